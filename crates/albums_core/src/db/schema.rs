//! `album` table provisioning.

use super::DbResult;
use rusqlite::Connection;

const ALBUM_SCHEMA_SQL: &str = include_str!("album.sql");

/// Creates the `album` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(ALBUM_SCHEMA_SQL)?;
    Ok(())
}
