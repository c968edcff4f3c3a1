//! Curated content endpoints.
//!
//! Every catalog list gets the same routes; handlers are generic over the
//! record type and pick their service from the [`Catalog`](tvk_core::Catalog).

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use serde::de::DeserializeOwned;
use tvk_common::AppResult;
use tvk_core::{Actor, CatalogEntry};
use tvk_db::entities::{
    Achievement, Banner, Event, IdeologyPoint, LeadershipMember, ManifestoPoint, MediaAsset,
};

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Public read routes, one per list.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .merge(public_routes::<Banner>())
        .merge(public_routes::<Event>())
        .merge(public_routes::<ManifestoPoint>())
        .merge(public_routes::<LeadershipMember>())
        .merge(public_routes::<IdeologyPoint>())
        .merge(public_routes::<Achievement>())
        .merge(public_routes::<MediaAsset>())
}

/// Admin CRUD routes, one set per list.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .merge(admin_routes::<Banner>())
        .merge(admin_routes::<Event>())
        .merge(admin_routes::<ManifestoPoint>())
        .merge(admin_routes::<LeadershipMember>())
        .merge(admin_routes::<IdeologyPoint>())
        .merge(admin_routes::<Achievement>())
        .merge(admin_routes::<MediaAsset>())
}

fn public_routes<T>() -> Router<AppState>
where
    T: CatalogEntry,
{
    Router::new().route(&format!("/{}", T::KIND), get(list_items::<T>))
}

fn admin_routes<T>() -> Router<AppState>
where
    T: CatalogEntry,
    T::Draft: DeserializeOwned,
{
    let base = format!("/{}", T::KIND);
    Router::new()
        .route(
            &base,
            get(admin_list_items::<T>)
                .put(replace_items::<T>)
                .post(create_item::<T>),
        )
        .route(
            &format!("{base}/{{id}}"),
            put(update_item::<T>).delete(delete_item::<T>),
        )
}

/// List items in display order.
async fn list_items<T: CatalogEntry>(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<T>>> {
    let items = state.catalog.service::<T>().list().await?;
    Ok(ApiResponse::ok(items))
}

/// List items for the admin console.
async fn admin_list_items<T: CatalogEntry>(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<T>>> {
    let items = state.catalog.service::<T>().list().await?;
    Ok(ApiResponse::ok(items))
}

/// Add an item to the end of the list.
async fn create_item<T>(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(draft): Json<T::Draft>,
) -> AppResult<Created<T>>
where
    T: CatalogEntry,
    T::Draft: DeserializeOwned,
{
    let item = state
        .catalog
        .service::<T>()
        .create(draft, &Actor::from(&admin))
        .await?;
    Ok(Created(item))
}

/// Overwrite the whole list.
async fn replace_items<T: CatalogEntry>(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(items): Json<Vec<T>>,
) -> AppResult<ApiResponse<Vec<T>>> {
    state
        .catalog
        .service::<T>()
        .replace_all(&items, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(items))
}

/// Replace one item.
async fn update_item<T: CatalogEntry>(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<T>,
) -> AppResult<ApiResponse<T>> {
    let item = state
        .catalog
        .service::<T>()
        .update(&id, item, &Actor::from(&admin))
        .await?;
    Ok(ApiResponse::ok(item))
}

/// Remove one item.
async fn delete_item<T: CatalogEntry>(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state
        .catalog
        .service::<T>()
        .delete(&id, &Actor::from(&admin))
        .await?;
    Ok(response::ok())
}
