//! # Meetup Registry
//!
//! Registration storage and the service that guards it.
//!
//! This crate provides two storage backends behind the
//! [`RegistrationStore`] trait:
//!
//! - **Memory**: in-process storage for development and single-node events
//! - **Turso**: a managed libSQL database (enable the `turso` feature)
//!
//! and the [`RegistrationService`] that validates submissions before they
//! reach a store.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use meetup_registry::{MemoryStore, RegistrationService};
//!
//! let service = RegistrationService::new(Arc::new(MemoryStore::new()));
//!
//! let registration = service.register(request).await?;
//! let newest_first = service.list().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod service;
#[cfg(feature = "turso")]
mod turso;

pub use memory::MemoryStore;
pub use service::RegistrationService;
#[cfg(feature = "turso")]
pub use turso::TursoStore;

// Re-export the trait from core
pub use meetup_core::traits::RegistrationStore;
