//! Error types for the registration service.
//!
//! A single error hierarchy built with `thiserror`. Store backends, the
//! service layer, and the HTTP layer all speak `MeetupError`.

use thiserror::Error;

/// Result type alias using `MeetupError`.
pub type Result<T> = std::result::Result<T, MeetupError>;

/// Main error type for all registration operations.
#[derive(Debug, Error)]
pub enum MeetupError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Caller-supplied data is missing a required field.
    #[error("Validation error: {0}")]
    ValidationError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The backing medium could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A single stored record could not be decoded.
    ///
    /// List operations drop the offending record and keep going.
    #[error("Failed to decode registration '{id}': {reason}")]
    StorePartialRead {
        /// Identifier of the offending record
        id: String,
        /// Why decoding failed
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A request body was not valid JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // STARTUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MeetupError {
    /// Returns true if the operation may succeed when retried by the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MeetupError::StoreUnavailable(_))
    }

    /// Returns true if this error was caused by bad caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, MeetupError::ValidationError(_))
    }
}
