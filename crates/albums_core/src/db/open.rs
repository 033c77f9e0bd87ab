//! Connection open and liveness utilities.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections have the `album` table provisioned.
//! - Returned connections answered `SELECT 1`.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use crate::config::StoreConfig;
use log::{error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the configured database file and validates it is usable.
///
/// # Side effects
/// - Creates the database file and `album` table when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &StoreConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file user={} auth={}",
        config.credentials.user.as_deref().unwrap_or("-"),
        if config.credentials.has_password() {
            "password"
        } else {
            "none"
        }
    );

    let opened = Connection::open(&config.db_path);
    finish_open("file", started_at, opened)
}

/// Opens an in-memory database with the same bootstrap as `open_db`.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    finish_open("memory", started_at, Connection::open_in_memory())
}

/// Verifies the connection answers a trivial query.
pub fn ping(conn: &Connection) -> DbResult<()> {
    let answer: i64 = conn.query_row("SELECT 1;", [], |row| row.get(0))?;
    if answer != 1 {
        return Err(DbError::Liveness(format!("unexpected ping answer {answer}")));
    }
    Ok(())
}

fn finish_open(
    mode: &str,
    started_at: Instant,
    opened: rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)?;
    ping(conn)
}
