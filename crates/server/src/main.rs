//! tvk-site server entry point.

use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tvk_api::AppState;
use tvk_common::{Config, ImagePolicy, hash_password};
use tvk_core::AssistantService;
use tvk_db::seed::{AdminSeed, SeedOptions, initialize_once};

/// Password shipped in the default configuration.
const DEFAULT_ADMIN_PASSWORD: &str = "change-me-admin";

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tvk=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(config.log.json);
    info!("Starting tvk-site server...");

    // Open store and seed first-run content
    let store = tvk_db::init(&config.store);

    if config.auth.admin_password == DEFAULT_ADMIN_PASSWORD {
        warn!("Administrator password is the shipped default; set TVK_AUTH__ADMIN_PASSWORD");
    }
    let seed = SeedOptions {
        admin: Some(AdminSeed {
            name: config.auth.admin_name.clone(),
            email: config.auth.admin_email.clone(),
            password_hash: hash_password(&config.auth.admin_password)?,
        }),
    };
    initialize_once(store.as_ref(), &seed).await?;

    // Wire services
    let assistant = AssistantService::from_config(&config.assistant)?;
    let state = AppState::new(store, ImagePolicy::from(&config.media), assistant);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", tvk_api::app(state))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server with graceful shutdown
    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((ip, config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
