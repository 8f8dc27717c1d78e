//! Fixed names and messages shared across the workspace.

/// Message returned when any required registration field is blank.
pub const ALL_FIELDS_REQUIRED: &str = "all fields are required";

/// Message returned by the API on a successful registration.
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";

/// Name of the collection/table that holds registrations.
pub const REGISTRATIONS_COLLECTION: &str = "registrations";

/// Service name reported by the health endpoint unless overridden.
pub const DEFAULT_SERVICE_NAME: &str = "AppDirect India Meetup 2025 Backend";

/// Port the server listens on unless overridden.
pub const DEFAULT_PORT: u16 = 8080;
