//! Domain types for the registration service.
//!
//! - [`Registration`]: a record accepted by a store
//! - [`RegistrationRequest`]: an untrusted submission
//! - [`NewRegistration`]: a validated candidate awaiting an id and timestamp

mod registration;

pub use registration::*;
