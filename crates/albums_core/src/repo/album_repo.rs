//! Album repository contract and SQLite-backed store.
//!
//! # Responsibility
//! - Provide exact-match artist listing, id lookup and insert over `album`.
//! - Own the process-wide connection and release it explicitly on close.
//!
//! # Invariants
//! - All statements bind user input as parameters.
//! - `add_album` never accepts a caller-chosen id.

use crate::db::{DbError, DbResult};
use crate::model::album::{Album, AlbumId, NewAlbum};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const ALBUMS_BY_ARTIST_SQL: &str = "SELECT * FROM album WHERE artist = ?1 ORDER BY id ASC;";
const ALBUM_BY_ID_SQL: &str = "SELECT * FROM album WHERE id = ?1;";
const INSERT_ALBUM_SQL: &str = "INSERT INTO album (title, artist, price) VALUES (?1, ?2, ?3);";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a record store operation.
#[derive(Debug)]
pub enum StoreError {
    /// Read failed at the connection or statement level.
    Query(rusqlite::Error),
    /// Single-row lookup matched nothing.
    NotFound(AlbumId),
    /// Insert failed.
    Write(rusqlite::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// `true` for read failures, including the missing-row specialization.
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::Query(_) | Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "album query failed: {err}"),
            Self::NotFound(id) => write!(f, "album {id}: no such album"),
            Self::Write(err) => write!(f, "album insert failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) | Self::Write(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

/// Repository interface for album data access.
pub trait AlbumRepository {
    /// Lists albums whose artist equals `name` exactly. Empty when none match.
    fn albums_by_artist(&self, name: &str) -> StoreResult<Vec<Album>>;
    fn album_by_id(&self, id: AlbumId) -> StoreResult<Album>;
    /// Inserts `album` and returns the id assigned by the store.
    fn add_album(&self, album: &NewAlbum) -> StoreResult<AlbumId>;
}

/// SQLite-backed album store owning its connection.
pub struct SqliteAlbumStore {
    conn: Connection,
}

impl SqliteAlbumStore {
    /// Wraps an already bootstrapped connection (see `db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Closes the connection, reporting close failures.
    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, err)| {
            error!("event=db_close module=repo status=error error={}", err);
            DbError::Sqlite(err)
        })?;
        info!("event=db_close module=repo status=ok");
        Ok(())
    }
}

impl AlbumRepository for SqliteAlbumStore {
    fn albums_by_artist(&self, name: &str) -> StoreResult<Vec<Album>> {
        let started_at = Instant::now();
        let result = query_by_artist(&self.conn, name);
        match &result {
            Ok(albums) => info!(
                "event=album_query module=repo status=ok rows={} duration_ms={}",
                albums.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=album_query module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn album_by_id(&self, id: AlbumId) -> StoreResult<Album> {
        let started_at = Instant::now();
        let result = self
            .conn
            .query_row(ALBUM_BY_ID_SQL, [id], parse_album_row)
            .optional()
            .map_err(StoreError::Query)
            .and_then(|row| row.ok_or(StoreError::NotFound(id)));

        match &result {
            Ok(_) => info!(
                "event=album_get module=repo status=ok id={} duration_ms={}",
                id,
                started_at.elapsed().as_millis()
            ),
            Err(StoreError::NotFound(_)) => info!(
                "event=album_get module=repo status=not_found id={} duration_ms={}",
                id,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=album_get module=repo status=error id={} duration_ms={} error={}",
                id,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn add_album(&self, album: &NewAlbum) -> StoreResult<AlbumId> {
        let started_at = Instant::now();
        let result = self
            .conn
            .execute(
                INSERT_ALBUM_SQL,
                params![album.title.as_str(), album.artist.as_str(), album.price],
            )
            .map(|_| self.conn.last_insert_rowid())
            .map_err(StoreError::Write);

        match &result {
            Ok(id) => info!(
                "event=album_insert module=repo status=ok id={} duration_ms={}",
                id,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=album_insert module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn query_by_artist(conn: &Connection, name: &str) -> StoreResult<Vec<Album>> {
    let mut stmt = conn
        .prepare(ALBUMS_BY_ARTIST_SQL)
        .map_err(StoreError::Query)?;
    let rows = stmt
        .query_map([name], parse_album_row)
        .map_err(StoreError::Query)?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(StoreError::Query)
}

fn parse_album_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get("id")?,
        title: row.get("title")?,
        artist: row.get("artist")?,
        price: row.get("price")?,
    })
}
