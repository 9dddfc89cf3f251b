//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   POST   /companies          GET /companies        (nameLike, minEmployees, maxEmployees)
//!   GET    /companies/{handle} PATCH /companies/{handle} DELETE /companies/{handle}
//!   POST   /jobs               GET /jobs             (titleLike, minSalary, hasEquity)
//!   GET    /jobs/{id}          PATCH /jobs/{id}      DELETE /jobs/{id}
//!   GET    /health

pub mod error;
pub mod handlers;
pub mod schema;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use db::Executor;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Executor>,
}

impl AppState {
    pub fn new(db: impl Executor + 'static) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    use handlers::{companies, jobs};

    Router::new()
        .route("/health", get(handlers::health))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:handle",
            get(companies::get)
                .patch(companies::update)
                .delete(companies::remove),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/:id",
            get(jobs::get).patch(jobs::update).delete(jobs::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, db: impl Executor + 'static) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
