//! # Meetup Core
//!
//! Core types, errors, and traits for the meetup registration service.
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace:
//!
//! - **Types**: registrations and the raw submissions they are created from
//! - **Errors**: a single error enum with classification helpers
//! - **Constants**: field names and fixed messages
//! - **Traits**: the [`RegistrationStore`] capability implemented by each backend
//!
//! ## Example
//!
//! ```rust
//! use meetup_core::{RegistrationRequest, MeetupError};
//!
//! let request = RegistrationRequest {
//!     name: "Asha".into(),
//!     email: "asha@x.com".into(),
//!     company: "Acme".into(),
//!     role: "".into(),
//! };
//! assert!(matches!(request.validate(), Err(MeetupError::ValidationError(_))));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{MeetupError, Result};
pub use traits::*;
pub use types::*;
