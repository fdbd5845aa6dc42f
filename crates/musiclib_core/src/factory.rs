//! Database factories: per-call connection lifecycle behind a facade.
//!
//! # Responsibility
//! - Initialize the schema once at construction time.
//! - Open a fresh connection for every public operation and close it by
//!   scope; no connection is retained across calls.
//!
//! # Invariants
//! - Construction fails rather than yielding a factory over an
//!   uninitialized schema.

use crate::dao::artist_dao::{ArtistGateway, SqliteArtistDao};
use crate::db::exec::RetryPolicy;
use crate::db::{ConnectionProvider, DbResult, RawRow, SqliteConnectionProvider};
use crate::model::artist::ArtistId;
use crate::repo::ArtistRepository;

use log::info;
use rusqlite::Connection;
use std::path::PathBuf;

/// Contract for database environment setup.
pub trait DbFactory {
    /// Opens a fresh connection to the managed datastore.
    fn get_connection(&self) -> DbResult<Connection>;

    /// Ensures every table this factory manages exists.
    ///
    /// Safe to call repeatedly: each gateway is existence-checked before
    /// its table is created.
    fn initialize_database_tables(&self) -> DbResult<()>;
}

/// DAO-level facade over the artist datastore.
///
/// Every operation opens one connection, wires a gateway to it, performs a
/// single call, and lets scope teardown close the connection.
pub struct SqliteDbFactory {
    provider: SqliteConnectionProvider,
    policy: RetryPolicy,
}

impl SqliteDbFactory {
    /// Creates the factory and initializes the schema with default retries.
    pub fn try_new(database_path: impl Into<PathBuf>) -> DbResult<Self> {
        Self::try_new_with_policy(database_path, RetryPolicy::default())
    }

    /// Creates the factory with an explicit write-retry policy.
    pub fn try_new_with_policy(
        database_path: impl Into<PathBuf>,
        policy: RetryPolicy,
    ) -> DbResult<Self> {
        let factory = Self {
            provider: SqliteConnectionProvider::try_new(database_path)?,
            policy,
        };
        factory.initialize_database_tables()?;
        Ok(factory)
    }

    /// Hands out an artist gateway bound to a fresh connection.
    ///
    /// The gateway owns its connection; dropping the gateway closes it.
    pub fn artist_dao(&self) -> DbResult<SqliteArtistDao> {
        Ok(SqliteArtistDao::with_policy(
            self.get_connection()?,
            self.policy,
        ))
    }

    /// Inserts one artist; returns the generated id, `-1` when write
    /// retries were exhausted.
    pub fn create_artist(&self, name: &str) -> DbResult<i64> {
        self.artist_dao()?.insert(name)
    }

    pub fn get_artist_by_id(&self, id: ArtistId) -> DbResult<Option<RawRow>> {
        self.artist_dao()?.get_by_id(id)
    }

    pub fn get_artist_by_name(&self, name: &str) -> DbResult<Option<RawRow>> {
        self.artist_dao()?.get_by_name(name)
    }

    pub fn get_all_artists(&self) -> DbResult<Vec<RawRow>> {
        self.artist_dao()?.get_all()
    }

    /// Renames one artist; returns the affected-row count.
    pub fn update_artist(&self, id: ArtistId, name: &str) -> DbResult<usize> {
        self.artist_dao()?.update(id, name)
    }

    /// Deletes one artist; returns the affected-row count.
    pub fn delete_artist(&self, id: ArtistId) -> DbResult<usize> {
        self.artist_dao()?.delete(id)
    }
}

impl DbFactory for SqliteDbFactory {
    fn get_connection(&self) -> DbResult<Connection> {
        self.provider.get_connection()
    }

    fn initialize_database_tables(&self) -> DbResult<()> {
        initialize_tables(&self.provider, self.policy)
    }
}

/// Repository-level factory over the same datastore.
pub struct SqliteRepositoryFactory {
    provider: SqliteConnectionProvider,
    policy: RetryPolicy,
}

impl SqliteRepositoryFactory {
    /// Creates the factory and initializes the schema with default retries.
    pub fn try_new(database_path: impl Into<PathBuf>) -> DbResult<Self> {
        Self::try_new_with_policy(database_path, RetryPolicy::default())
    }

    /// Creates the factory with an explicit write-retry policy.
    pub fn try_new_with_policy(
        database_path: impl Into<PathBuf>,
        policy: RetryPolicy,
    ) -> DbResult<Self> {
        let factory = Self {
            provider: SqliteConnectionProvider::try_new(database_path)?,
            policy,
        };
        factory.initialize_database_tables()?;
        Ok(factory)
    }

    /// Hands out an artist repository bound to a fresh connection.
    pub fn artist_repository(&self) -> DbResult<ArtistRepository<SqliteArtistDao>> {
        Ok(ArtistRepository::new(SqliteArtistDao::with_policy(
            self.get_connection()?,
            self.policy,
        )))
    }
}

impl DbFactory for SqliteRepositoryFactory {
    fn get_connection(&self) -> DbResult<Connection> {
        self.provider.get_connection()
    }

    fn initialize_database_tables(&self) -> DbResult<()> {
        initialize_tables(&self.provider, self.policy)
    }
}

/// Runs the existence-check-then-create sequence for every registered
/// gateway on one short-lived connection.
fn initialize_tables(provider: &SqliteConnectionProvider, policy: RetryPolicy) -> DbResult<()> {
    let artist_dao = SqliteArtistDao::with_policy(provider.get_connection()?, policy);
    if !artist_dao.table_exists()? {
        artist_dao.create_table()?;
        info!("event=table_init module=factory status=created table=artists");
    }
    Ok(())
}
