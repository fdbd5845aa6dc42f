//! Data access objects over the shared execution primitives.
//!
//! # Responsibility
//! - Bind entity-specific SQL text to the generic read/write executors.
//! - Keep statement text and column names inside the persistence boundary.
//!
//! # Invariants
//! - Gateways own their connection for their whole lifetime; a gateway
//!   without a connection is unrepresentable.

pub mod artist_dao;
pub mod sqlite_dao;

pub use artist_dao::{ArtistGateway, SqliteArtistDao};
pub use sqlite_dao::SqliteDao;
