//! Process configuration sourced from environment variables.
//!
//! # Responsibility
//! - Collect store credentials, database location and logging options.
//! - Keep lookups injectable so tests never touch the real environment.
//!
//! # Invariants
//! - The password never appears in `Debug` output or log events.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_USER: &str = "DBUSER";
pub const ENV_DB_PASSWORD: &str = "DBPASS";
pub const ENV_DB_PATH: &str = "ALBUMS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ALBUMS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ALBUMS_LOG_DIR";

pub const DEFAULT_DB_FILE_NAME: &str = "albums.sqlite3";
const DEFAULT_LOG_SUBDIR: &str = "albums_cli";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "environment variable `{key}` is set but empty"),
        }
    }
}

impl Error for ConfigError {}

/// Database credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Connection target for the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub credentials: Credentials,
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults. Credentials are optional, but the
    /// path, level and directory keys must not be set to an empty string.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            user: lookup(ENV_DB_USER),
            password: lookup(ENV_DB_PASSWORD),
        };

        let db_path = non_empty(&lookup, ENV_DB_PATH)?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let level = non_empty(&lookup, ENV_LOG_LEVEL)?
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_empty(&lookup, ENV_LOG_DIR)?
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Ok(Self {
            store: StoreConfig {
                credentials,
                db_path,
            },
            log: LogConfig { level, log_dir },
        })
    }
}

fn non_empty<F>(lookup: &F, key: &'static str) -> ConfigResult<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_SUBDIR).join("logs")
}
