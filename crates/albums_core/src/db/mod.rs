//! SQLite connection bootstrap for the album store.
//!
//! # Responsibility
//! - Open and configure the single process-wide SQLite connection.
//! - Provision the `album` table and verify liveness before first use.
//!
//! # Invariants
//! - Callers never receive a connection that failed the liveness check.
//! - Schema provisioning is idempotent; there is no versioned migration.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, ping};

pub type DbResult<T> = Result<T, DbError>;

/// Connection-level failure. Fatal at startup.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Liveness(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Liveness(message) => write!(f, "database liveness check failed: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Liveness(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
