//! Connection provisioning for the single-file SQLite datastore.
//!
//! # Responsibility
//! - Hand out independent, configured connection handles on demand.
//! - Ensure the datastore's parent directory exists before first open.
//!
//! # Invariants
//! - Returned connections have `foreign_keys = ON`.
//! - Connections are never pooled or retained; lifecycle belongs to the
//!   caller, and dropping a handle closes it.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Contract for components that provision datastore connections.
///
/// Factories and repositories depend on this trait so a different backend
/// can be swapped in without touching call sites.
pub trait ConnectionProvider {
    /// Opens a fresh, configured connection to the underlying datastore.
    ///
    /// Each call yields an independent handle to the same file. Concurrent
    /// holders are permitted; SQLite itself serializes writers.
    fn get_connection(&self) -> DbResult<Connection>;
}

/// File-backed SQLite connection provider.
pub struct SqliteConnectionProvider {
    database_path: PathBuf,
}

impl SqliteConnectionProvider {
    /// Creates a provider for the given datastore file, creating any
    /// missing parent directory up front.
    ///
    /// # Errors
    /// - `DbError::Io` when the parent directory cannot be created.
    pub fn try_new(database_path: impl Into<PathBuf>) -> DbResult<Self> {
        let database_path = database_path.into();
        if let Some(dir) = database_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|source| DbError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(Self { database_path })
    }

    /// Path of the datastore file this provider opens.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Opens a configured in-memory database, for tests and demos.
    ///
    /// Note that every in-memory connection is its own database; this is
    /// only useful where a single handle serves the whole scenario.
    pub fn open_in_memory() -> DbResult<Connection> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        Ok(conn)
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn get_connection(&self) -> DbResult<Connection> {
        let started_at = Instant::now();
        let conn = match Connection::open(&self.database_path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error path={} duration_ms={} error={}",
                    self.database_path.display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };
        configure(&conn)?;
        info!(
            "event=db_open module=db status=ok path={} duration_ms={}",
            self.database_path.display(),
            started_at.elapsed().as_millis()
        );
        Ok(conn)
    }
}

/// Applies the pragmas every musiclib connection must carry.
///
/// No `busy_timeout` is set here: transient lock contention is handled by
/// the write-retry executor, and a driver-level timeout would mask it.
fn configure(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ConnectionProvider, SqliteConnectionProvider};

    #[test]
    fn in_memory_connection_has_foreign_keys_on() {
        let conn = SqliteConnectionProvider::open_in_memory().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn try_new_creates_missing_parent_directories() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b").join("music.db");

        let provider = SqliteConnectionProvider::try_new(&nested).unwrap();
        assert!(nested.parent().unwrap().is_dir());

        let conn = provider.get_connection().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn each_call_yields_an_independent_handle_to_the_same_file() {
        let root = tempfile::tempdir().unwrap();
        let provider = SqliteConnectionProvider::try_new(root.path().join("music.db")).unwrap();

        let first = provider.get_connection().unwrap();
        first
            .execute_batch("CREATE TABLE probe (n INTEGER);")
            .unwrap();
        drop(first);

        let second = provider.get_connection().unwrap();
        let count: i64 = second
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='probe';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
