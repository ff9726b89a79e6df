use axum::{Router, routing::get};
use configuration::Config;
use database::DbRepository;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod views;

/// The shared application state that all handlers can access.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

impl AppState {
    pub fn new(db_repo: DbRepository) -> Self {
        Self { db_repo }
    }
}

/// Builds the page routes on top of an already seeded store.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/", get(handlers::home))
        .route("/treatments", get(handlers::list_treatments))
        .route(
            "/treatments/:treatment_id",
            get(handlers::treatment_detail).post(handlers::submit_quiz),
        )
        .route("/compare", get(handlers::compare))
        .with_state(Arc::new(state))
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to the store, seeds it if empty, and serves until Ctrl-C.
///
/// A seeding failure is returned before the listener is bound, so a
/// half-seeded store is never served.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let db_pool = database::connect(&config.database).await?;
    database::initialize(&db_pool).await?;

    let app = create_router(AppState::new(DbRepository::new(db_pool.clone())));

    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
    }
}
