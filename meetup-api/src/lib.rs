//! # Meetup API Server
//!
//! REST API for event registrations, consumed by the React frontend.
//!
//! ## Endpoints
//!
//! - `POST /api/register` - Register an attendee
//! - `GET /api/registrations` - List registrations, newest first
//! - `GET /health` - Health check
//! - `GET /static/*` - Built frontend assets
//! - anything else - The frontend's `index.html`
//!
//! ## Example
//!
//! ```rust,ignore
//! use meetup_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let server = ApiServer::from_config(config).await?;
//! server.run("0.0.0.0:8080".parse()?).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig, StoreBackend};
pub use dto::{HealthResponse, RegisterResponse};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use meetup_core::error::Result;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for meetup registrations.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server around prepared state.
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Opens the configured store and creates a server around it.
    pub async fn from_config(config: ApiConfig) -> Result<Self> {
        Ok(Self::new(AppState::new(config).await?))
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until Ctrl+C.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            store = self.state.service.backend(),
            "{} listening on {}", self.state.config.service_name, addr
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
