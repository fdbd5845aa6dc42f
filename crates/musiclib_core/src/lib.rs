//! Layered data access for a small SQLite-backed music catalog.
//!
//! Three ways to reach the same storage, from rawest to most abstract:
//! a gateway/DAO (SQL in, raw rows out), a facade factory that hides
//! connection lifecycle, and a repository that trades in domain values.
//! All writes funnel through one bounded-retry executor built for a
//! single-writer, lock-prone datastore file.

pub mod dao;
pub mod db;
pub mod factory;
pub mod logging;
pub mod model;
pub mod repo;

pub use dao::{ArtistGateway, SqliteArtistDao};
pub use db::{ConnectionProvider, DbError, DbResult, RawRow, RetryPolicy, SqliteConnectionProvider};
pub use factory::{DbFactory, SqliteDbFactory, SqliteRepositoryFactory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::artist::{Artist, ArtistId};
pub use repo::{ArtistRepository, RepoError, RepoResult, Repository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
