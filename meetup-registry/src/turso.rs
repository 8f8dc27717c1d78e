//! Turso (libSQL) registration store.
//!
//! Registrations live in a managed remote database so they survive restarts
//! and can be shared by several server instances.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{params, Connection, Database, Row};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use meetup_core::constants::REGISTRATIONS_COLLECTION;
use meetup_core::error::{MeetupError, Result};
use meetup_core::traits::RegistrationStore;
use meetup_core::types::{NewRegistration, Registration};

/// Registration store backed by a Turso database.
///
/// # Schema
///
/// ```text
/// registrations(
///     seq        INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order
///     id         TEXT NOT NULL UNIQUE,               -- UUID v4
///     name, email, company, role TEXT NOT NULL,
///     created_at TEXT NOT NULL                       -- RFC 3339, UTC, nanoseconds
/// )
/// ```
///
/// Timestamps are written with a fixed width so that text order is time
/// order, and listing sorts on `created_at DESC, seq DESC`.
///
/// # Locking
///
/// An async readers-writer lock is held across the database round trip.
/// It also remembers the newest accepted timestamp so `created_at` never
/// goes backwards for this instance.
pub struct TursoStore {
    _db: Database,
    conn: Connection,
    last_created_at: RwLock<Option<DateTime<Utc>>>,
}

impl TursoStore {
    /// Connects to a remote Turso database and prepares the schema.
    pub async fn connect(url: impl Into<String>, auth_token: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let db = libsql::Builder::new_remote(url.clone(), auth_token.into())
            .build()
            .await
            .map_err(unavailable)?;

        let store = Self::from_database(db).await?;
        info!(url = %url, "Connected to Turso registration store");
        Ok(store)
    }

    /// Opens a local in-memory database.
    #[cfg(test)]
    async fn in_memory() -> Result<Self> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(unavailable)?;
        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db.connect().map_err(unavailable)?;
        Self::migrate(&conn).await?;
        let last = Self::newest_timestamp(&conn).await?;

        Ok(Self {
            _db: db,
            conn,
            last_created_at: RwLock::new(last),
        })
    }

    /// Creates the table and index if they do not exist yet.
    async fn migrate(conn: &Connection) -> Result<()> {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {REGISTRATIONS_COLLECTION} (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    id TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    company TEXT NOT NULL,
                    role TEXT NOT NULL,
                    created_at TEXT NOT NULL
                )"
            ),
            (),
        )
        .await
        .map_err(unavailable)?;

        conn.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS idx_{REGISTRATIONS_COLLECTION}_created_at
                    ON {REGISTRATIONS_COLLECTION} (created_at DESC, seq DESC)"
            ),
            (),
        )
        .await
        .map_err(unavailable)?;

        debug!("Registration schema ready");
        Ok(())
    }

    /// Reads the newest stored timestamp, ignoring rows that fail to parse.
    async fn newest_timestamp(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
        let mut rows = conn
            .query(
                &format!(
                    "SELECT created_at FROM {REGISTRATIONS_COLLECTION}
                        ORDER BY created_at DESC LIMIT 1"
                ),
                (),
            )
            .await
            .map_err(unavailable)?;

        let Some(row) = rows.next().await.map_err(unavailable)? else {
            return Ok(None);
        };

        Ok(row
            .get::<String>(0)
            .ok()
            .and_then(|raw| parse_timestamp(&raw).ok()))
    }

    /// Decodes one row, rejecting anything that is not a valid registration.
    fn decode_row(row: &Row) -> Result<Registration> {
        // Name the record by its id when readable, else by its row number.
        let id = row.get::<String>(1);
        let label = match &id {
            Ok(id) => id.clone(),
            Err(_) => format!("seq {}", row.get::<i64>(0).unwrap_or_default()),
        };
        let partial = |reason: String| MeetupError::StorePartialRead {
            id: label.clone(),
            reason,
        };
        let text = |idx: i32, column: &str| -> Result<String> {
            let value = row.get::<String>(idx).map_err(|e| partial(e.to_string()))?;
            if value.trim().is_empty() {
                return Err(partial(format!("{column} is blank")));
            }
            Ok(value)
        };

        let id = id.map_err(|e| partial(e.to_string()))?;
        let name = text(2, "name")?;
        let email = text(3, "email")?;
        let company = text(4, "company")?;
        let role = text(5, "role")?;
        let raw_created_at = row.get::<String>(6).map_err(|e| partial(e.to_string()))?;
        let created_at = parse_timestamp(&raw_created_at).map_err(|e| partial(e.to_string()))?;

        Ok(Registration {
            id,
            name,
            email,
            company,
            role,
            created_at,
        })
    }
}

#[async_trait]
impl RegistrationStore for TursoStore {
    #[instrument(skip(self, candidate))]
    async fn append(&self, candidate: NewRegistration) -> Result<Registration> {
        let mut last = self.last_created_at.write().await;

        let now = Utc::now();
        let created_at = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        let id = Uuid::new_v4().to_string();

        self.conn
            .execute(
                &format!(
                    "INSERT INTO {REGISTRATIONS_COLLECTION}
                        (id, name, email, company, role, created_at)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ),
                params![
                    id.as_str(),
                    candidate.name(),
                    candidate.email(),
                    candidate.company(),
                    candidate.role(),
                    format_timestamp(&created_at),
                ],
            )
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to save registration");
                unavailable(e)
            })?;

        *last = Some(created_at);

        debug!(id = %id, "Stored registration");
        Ok(Registration::from_candidate(id, candidate, created_at))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Registration>> {
        let _guard = self.last_created_at.read().await;

        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT seq, id, name, email, company, role, created_at
                        FROM {REGISTRATIONS_COLLECTION}
                        ORDER BY created_at DESC, seq DESC"
                ),
                (),
            )
            .await
            .map_err(unavailable)?;

        let mut registrations = Vec::new();
        while let Some(row) = rows.next().await.map_err(unavailable)? {
            match Self::decode_row(&row) {
                Ok(registration) => registrations.push(registration),
                Err(err) => warn!(error = %err, "Skipping undecodable registration"),
            }
        }

        debug!(count = registrations.len(), "Listed registrations");
        Ok(registrations)
    }

    async fn count(&self) -> Result<u64> {
        let mut rows = self
            .conn
            .query(&format!("SELECT COUNT(*) FROM {REGISTRATIONS_COLLECTION}"), ())
            .await
            .map_err(unavailable)?;

        let count = match rows.next().await.map_err(unavailable)? {
            Some(row) => row.get::<i64>(0).map_err(unavailable)?,
            None => 0,
        };
        Ok(count.max(0) as u64)
    }

    fn backend(&self) -> &'static str {
        "turso"
    }
}

fn unavailable(err: libsql::Error) -> MeetupError {
    MeetupError::StoreUnavailable(err.to_string())
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}
