//! In-memory registration store.
//!
//! Fast, thread-safe storage suitable for development and single-process
//! deployments. Everything is lost when the process exits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, instrument};

use meetup_core::error::Result;
use meetup_core::traits::RegistrationStore;
use meetup_core::types::{NewRegistration, Registration};

/// In-memory registration store.
///
/// A single readers-writer lock guards the record list and the id counter,
/// so appends are serialized while lists run in parallel.
///
/// # Ordering
///
/// Records are kept in insertion order. Timestamps are clamped to never go
/// backwards, so insertion order is also `created_at` order and listing is
/// a plain reversal.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Accepted records, oldest first
    records: Vec<Registration>,
    /// Next id to hand out
    next_id: u64,
}

impl Inner {
    fn last_created_at(&self) -> Option<DateTime<Utc>> {
        self.records.last().map(|r| r.created_at)
    }
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a store with preallocated capacity.
    ///
    /// Use this when the expected attendance is known up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::with_capacity(capacity),
                next_id: 1,
            }),
        }
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Returns true if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    #[instrument(skip(self, candidate))]
    async fn append(&self, candidate: NewRegistration) -> Result<Registration> {
        let mut inner = self.inner.write();

        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let created_at = match inner.last_created_at() {
            Some(last) if last > now => last,
            _ => now,
        };

        let registration = Registration::from_candidate(id.to_string(), candidate, created_at);
        inner.records.push(registration.clone());

        debug!(id, "Stored registration");
        Ok(registration)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Registration>> {
        let inner = self.inner.read();
        let registrations: Vec<Registration> = inner.records.iter().rev().cloned().collect();

        debug!(count = registrations.len(), "Listed registrations");
        Ok(registrations)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.read().records.len() as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
