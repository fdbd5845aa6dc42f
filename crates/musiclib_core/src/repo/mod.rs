//! Repository layer: domain objects over raw gateway rows.
//!
//! # Responsibility
//! - Define the generic entity repository contract.
//! - Translate between raw rows and domain values in one place.
//!
//! # Invariants
//! - Validation refusals and exhausted retries surface as negative results
//!   (`None` / `0`), never as errors; only hard storage failures are `Err`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod artist_repo;

pub use artist_repo::ArtistRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Hard failures of the repository layer.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A persisted row did not match the entity's expected shape.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Generic CRUD contract for entity repositories.
///
/// Callers depend on this trait rather than a concrete backend, so storage
/// can be swapped without touching call sites.
pub trait Repository {
    type Entity;
    type Id;

    /// Persists a new entity, assigning its generated id in place.
    ///
    /// Returns `Ok(None)` when the entity is not insertable (validation
    /// refusal) or when the datastore made no progress; the passed-in
    /// entity is left untouched in both cases.
    fn add(&self, entity: &mut Self::Entity) -> RepoResult<Option<Self::Id>>;

    /// Fetches one entity by id; `Ok(None)` when absent.
    fn get_by_id(&self, id: Self::Id) -> RepoResult<Option<Self::Entity>>;

    /// Updates an existing entity; returns the affected-row count, `0` on
    /// validation refusal or when nothing matched.
    fn update(&self, entity: &Self::Entity) -> RepoResult<usize>;

    /// Deletes by id; returns the affected-row count.
    fn delete(&self, id: Self::Id) -> RepoResult<usize>;

    /// Fetches every entity, preserving datastore order.
    fn get_all(&self) -> RepoResult<Vec<Self::Entity>>;
}
