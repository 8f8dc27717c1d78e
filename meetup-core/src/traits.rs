//! Common traits for the registration service.
//!
//! Storage backends implement [`RegistrationStore`]; everything above the
//! store holds an `Arc<dyn RegistrationStore>` and never knows which one it
//! got.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewRegistration, Registration};

// ═══════════════════════════════════════════════════════════════════════════════
// STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for registration storage and retrieval.
///
/// Implementations might use:
/// - In-memory storage (development, single-process deployments)
/// - A managed remote database (production)
///
/// # Consistency
///
/// Implementations follow a readers-writer discipline: any number of
/// [`list`](Self::list) calls may run together, while an
/// [`append`](Self::append) excludes every other append and list. A list
/// therefore never observes a half-written record, and id assignment is
/// linearizable.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Accepts a validated candidate and returns the stored record.
    ///
    /// The store assigns an id never handed out before and a `created_at`
    /// that is not earlier than any previously accepted record.
    async fn append(&self, candidate: NewRegistration) -> Result<Registration>;

    /// Returns a snapshot of every registration, newest first.
    ///
    /// Records with equal timestamps come back last-inserted first. Records
    /// that cannot be decoded are skipped rather than failing the call.
    async fn list(&self) -> Result<Vec<Registration>>;

    /// Returns the number of stored registrations.
    async fn count(&self) -> Result<u64>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
