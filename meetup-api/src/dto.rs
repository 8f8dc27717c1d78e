//! DTOs for API requests and responses.
//!
//! Requests decode straight into [`RegistrationRequest`]; registrations are
//! returned as-is. Only the envelopes that exist purely for HTTP live here.

use serde::{Deserialize, Serialize};

/// Response for a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human-readable confirmation
    pub message: String,
    /// Id assigned by the store
    pub id: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" when the process answers
    pub status: String,
    /// Configured service name
    pub service: String,
    /// Current time (RFC 3339)
    pub timestamp: String,
    /// Crate version
    pub version: String,
    /// Storage backend in use
    pub store: String,
    /// Number of registrations (best effort)
    pub registrations: u64,
    /// Seconds since the server started
    pub uptime_seconds: u64,
}
