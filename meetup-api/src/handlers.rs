//! API route handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use meetup_core::constants::REGISTRATION_SUCCESSFUL;
use meetup_core::types::{Registration, RegistrationRequest};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Body returned when the frontend has not been built into the static dir.
const MISSING_FRONTEND: &str = "React app not found. Please build the frontend first.";

/// POST /api/register
///
/// The body is decoded as JSON regardless of the declared content type.
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let req = RegistrationRequest::from_json(&body)?;

    let registration = state.service.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: REGISTRATION_SUCCESSFUL.into(),
            id: registration.id,
        }),
    ))
}

/// GET /api/registrations
pub async fn list_registrations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Registration>>> {
    let registrations = state.service.list().await?;
    Ok(Json(registrations))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let registrations = state.service.count().await.unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".into(),
        service: state.config.service_name.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: env!("CARGO_PKG_VERSION").into(),
        store: state.service.backend().into(),
        registrations,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// Fallback: serves the single-page app's `index.html` for any other path.
pub async fn serve_spa(State(state): State<Arc<AppState>>) -> Response {
    let index = state.config.static_dir.join("index.html");

    match tokio::fs::read(&index).await {
        Ok(contents) => Html(contents).into_response(),
        Err(e) => {
            debug!(path = %index.display(), error = %e, "Frontend index not available");
            (StatusCode::NOT_FOUND, MISSING_FRONTEND).into_response()
        }
    }
}
