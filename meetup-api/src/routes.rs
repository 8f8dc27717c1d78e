//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
///
/// A known path hit with the wrong method falls through to the frontend,
/// like any unknown path.
pub fn create_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(state.config.static_dir.join("static"));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check).fallback(handlers::serve_spa))

        // Registrations
        .route(
            "/api/register",
            post(handlers::register).fallback(handlers::serve_spa),
        )
        .route(
            "/api/registrations",
            get(handlers::list_registrations).fallback(handlers::serve_spa),
        )

        // Frontend
        .nest_service("/static", assets)
        .fallback(handlers::serve_spa)

        .with_state(state)
}
