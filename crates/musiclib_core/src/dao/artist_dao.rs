//! Artist gateway: table-specific SQL over the shared DAO base.
//!
//! # Responsibility
//! - Own statement text and column names for the `artists` table.
//! - Expose entity-shaped operations composed from the generic executors.
//!
//! # Invariants
//! - `create_table` is only safe after a negative `table_exists` check; it
//!   carries no `IF NOT EXISTS` guard of its own.
//! - Raw rows returned here are consumed by the repository mapper only.

use crate::db::exec::RetryPolicy;
use crate::db::{DbResult, RawRow};
use crate::model::artist::ArtistId;

use super::sqlite_dao::SqliteDao;
use rusqlite::Connection;

/// Logical table and column names for artist storage.
pub const TABLE: &str = "artists";
pub const COL_ID: &str = "artist_id";
pub const COL_NAME: &str = "name";

/// Capability set of an artist gateway.
///
/// Repositories and facades depend on this trait, so a different storage
/// backend can be substituted without touching call sites.
pub trait ArtistGateway {
    fn table_exists(&self) -> DbResult<bool>;
    fn create_table(&self) -> DbResult<()>;
    fn get_by_id(&self, id: ArtistId) -> DbResult<Option<RawRow>>;
    fn get_by_name(&self, name: &str) -> DbResult<Option<RawRow>>;
    fn get_all(&self) -> DbResult<Vec<RawRow>>;
    /// Inserts one artist; returns the generated id, or `-1` when retries
    /// against a locked datastore were exhausted.
    fn insert(&self, name: &str) -> DbResult<i64>;
    /// Renames one artist; returns the affected-row count.
    fn update(&self, id: ArtistId, name: &str) -> DbResult<usize>;
    /// Deletes one artist; returns the affected-row count.
    fn delete(&self, id: ArtistId) -> DbResult<usize>;
}

/// SQLite-backed artist gateway.
pub struct SqliteArtistDao {
    base: SqliteDao,
}

impl SqliteArtistDao {
    /// Builds a gateway over the given connection with default retries.
    pub fn new(conn: Connection) -> Self {
        Self::with_policy(conn, RetryPolicy::default())
    }

    /// Builds a gateway with an explicit write-retry policy.
    pub fn with_policy(conn: Connection, policy: RetryPolicy) -> Self {
        Self {
            base: SqliteDao::with_policy(conn, policy),
        }
    }
}

impl ArtistGateway for SqliteArtistDao {
    fn table_exists(&self) -> DbResult<bool> {
        self.base.table_exists(TABLE)
    }

    fn create_table(&self) -> DbResult<()> {
        self.base.execute_ddl(&format!(
            "CREATE TABLE {TABLE} (
                {COL_ID} INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                {COL_NAME} TEXT
            );"
        ))
    }

    fn get_by_id(&self, id: ArtistId) -> DbResult<Option<RawRow>> {
        self.base.query_one(
            &format!("SELECT {COL_ID}, {COL_NAME} FROM {TABLE} WHERE {COL_ID} = ?1;"),
            &[&id],
        )
    }

    fn get_by_name(&self, name: &str) -> DbResult<Option<RawRow>> {
        self.base.query_one(
            &format!("SELECT {COL_ID}, {COL_NAME} FROM {TABLE} WHERE {COL_NAME} = ?1;"),
            &[&name],
        )
    }

    fn get_all(&self) -> DbResult<Vec<RawRow>> {
        self.base
            .query_all(&format!("SELECT {COL_ID}, {COL_NAME} FROM {TABLE};"), &[])
    }

    fn insert(&self, name: &str) -> DbResult<i64> {
        self.base.execute_insert(
            &format!("INSERT INTO {TABLE} ({COL_NAME}) VALUES (?1);"),
            &[&name],
        )
    }

    fn update(&self, id: ArtistId, name: &str) -> DbResult<usize> {
        self.base.execute_update_delete(
            &format!("UPDATE {TABLE} SET {COL_NAME} = ?1 WHERE {COL_ID} = ?2;"),
            &[&name, &id],
        )
    }

    fn delete(&self, id: ArtistId) -> DbResult<usize> {
        self.base.execute_update_delete(
            &format!("DELETE FROM {TABLE} WHERE {COL_ID} = ?1;"),
            &[&id],
        )
    }
}
