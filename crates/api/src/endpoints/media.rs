//! Media download and event calendar endpoints.

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tvk_common::AppResult;
use tvk_core::{event_to_ics, ics_filename};
use tvk_db::entities::MediaAsset;

use crate::{middleware::AppState, response::ApiResponse};

/// Create media router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/media/{id}/download", post(record_download))
        .route("/events/{id}/calendar.ics", get(event_calendar))
}

/// Count a download and return the asset so the client can fetch it.
async fn record_download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MediaAsset>> {
    Ok(ApiResponse::ok(state.media_service.record_download(&id).await?))
}

/// Download an event as an iCalendar file.
async fn event_calendar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event = state.catalog.events.get(&id).await?;
    let body = event_to_ics(&event, Utc::now())?;
    let disposition = format!("attachment; filename=\"{}\"", ics_filename(&event));

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
