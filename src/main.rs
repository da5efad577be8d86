// main.rs
mod config;
mod database;
mod entries;
mod error;
mod handlers;
mod keywords;
mod models;
mod utils;
mod views;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::database::setup_database;
use crate::handlers::{
    handle_create_api, handle_delete_api, handle_get_api, handle_index_request, handle_list_api,
    handle_submit_request, handle_update_api, AppState,
};
use crate::utils::{handle_404, UPLOADS_ROUTE};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

type BoxResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> BoxResult<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::build()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.rust_log))
        .init();

    let pool = setup_database(&config.database_url, config.database_max_connections).await?;
    tracing::info!(database = %config.database_url, "Connected to database");

    let app = setup_router(AppState::new(pool, config.upload_dir.clone()));

    let addr = config.server_addr();
    tracing::info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.as_path());

    Router::new()
        .route("/", get(handle_index_request).post(handle_submit_request))
        .route("/search", get(handle_index_request))
        .route("/api/entries", get(handle_list_api).post(handle_create_api))
        .route(
            "/api/entries/:id",
            put(handle_update_api)
                .get(handle_get_api)
                .delete(handle_delete_api),
        )
        .nest_service(&format!("/{}", UPLOADS_ROUTE), uploads)
        .fallback(|| async { handle_404() })
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
