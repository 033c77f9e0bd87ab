//! Core data access and command handling for the album catalog CLI.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use command::{parse_command, Command, CommandError, CommandResult, Dispatcher, Prompter};
pub use config::{AppConfig, ConfigError, Credentials, LogConfig, StoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::album::{format_albums, Album, AlbumDraft, AlbumField, AlbumId, DraftError, NewAlbum};
pub use repo::album_repo::{AlbumRepository, SqliteAlbumStore, StoreError, StoreResult};

/// Opens the configured database and wraps it in a record store.
pub fn open_store(config: &StoreConfig) -> DbResult<SqliteAlbumStore> {
    open_db(config).map(SqliteAlbumStore::new)
}

