//! App state: configuration, selected store, registration service.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use meetup_core::constants::{DEFAULT_PORT, DEFAULT_SERVICE_NAME};
use meetup_core::error::{MeetupError, Result};
use meetup_registry::{MemoryStore, RegistrationService, RegistrationStore, TursoStore};
use tracing::info;

/// Which storage backend to run with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process memory, lost on restart
    #[default]
    Memory,
    /// Managed Turso (libSQL) database
    Turso,
}

impl FromStr for StoreBackend {
    type Err = MeetupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "turso" | "libsql" => Ok(Self::Turso),
            other => Err(MeetupError::ConfigError(format!(
                "unknown store backend '{}', expected 'memory' or 'turso'",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Turso => f.write_str("turso"),
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Listen port
    pub port: u16,
    /// Listen address
    pub bind: String,
    /// Storage backend
    pub store: StoreBackend,
    /// Turso database URL (required for the Turso backend)
    pub turso_url: Option<String>,
    /// Turso auth token
    pub turso_auth_token: String,
    /// Root of the built frontend (`index.html`, `static/`)
    pub static_dir: PathBuf,
    /// Name reported by the health endpoint
    pub service_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: "0.0.0.0".into(),
            store: StoreBackend::Memory,
            turso_url: None,
            turso_auth_token: String::new(),
            static_dir: PathBuf::from("./static"),
            service_name: DEFAULT_SERVICE_NAME.into(),
        }
    }
}

impl ApiConfig {
    /// Loads `.env` if present, then reads configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| MeetupError::ConfigError(format!("invalid PORT '{}'", raw)))?,
            None => defaults.port,
        };

        let store = match var("STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.store,
        };

        let config = Self {
            port,
            bind: var("BIND_ADDR").unwrap_or(defaults.bind),
            store,
            turso_url: var("TURSO_DATABASE_URL"),
            turso_auth_token: var("TURSO_AUTH_TOKEN").unwrap_or_default(),
            static_dir: var("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            service_name: var("SERVICE_NAME").unwrap_or(defaults.service_name),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks that the selected backend has what it needs.
    pub fn validate(&self) -> Result<()> {
        if self.store == StoreBackend::Turso && self.turso_url.is_none() {
            return Err(MeetupError::ConfigError(
                "TURSO_DATABASE_URL is required when STORE_BACKEND=turso".into(),
            ));
        }
        Ok(())
    }

    /// Opens the configured store.
    pub async fn open_store(&self) -> Result<Arc<dyn RegistrationStore>> {
        self.validate()?;

        let store: Arc<dyn RegistrationStore> = match self.store {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Turso => {
                let url = self.turso_url.as_deref().unwrap_or_default();
                Arc::new(TursoStore::connect(url, self.turso_auth_token.clone()).await?)
            }
        };

        info!(backend = store.backend(), "Using {} storage for registrations", store.backend());
        Ok(store)
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    /// Configuration the server started with
    pub config: ApiConfig,
    /// Registration service over the selected store
    pub service: RegistrationService,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Opens the configured store and builds the state around it.
    pub async fn new(config: ApiConfig) -> Result<Self> {
        let store = config.open_store().await?;
        Ok(Self::with_store(config, store))
    }

    /// Builds state around an already opened store.
    pub fn with_store(config: ApiConfig, store: Arc<dyn RegistrationStore>) -> Self {
        Self {
            config,
            service: RegistrationService::new(store),
            started_at: Instant::now(),
        }
    }
}
