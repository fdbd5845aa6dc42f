//! Artist repository: maps gateway rows to `Artist` values.
//!
//! # Responsibility
//! - Keep the untyped row boundary from leaking past this module.
//! - Enforce the insert/update preconditions of the domain model.
//!
//! # Invariants
//! - `add` never leaves a partially persisted entity: either the row is
//!   committed and the instance carries its new id, or the instance is
//!   unchanged.
//! - A malformed persisted row is rejected, not silently skipped.

use crate::dao::artist_dao::{ArtistGateway, SqliteArtistDao, COL_ID, COL_NAME};
use crate::db::RawRow;
use crate::model::artist::{Artist, ArtistId};

use super::{RepoError, RepoResult, Repository};
use rusqlite::types::Value;
use rusqlite::Connection;

/// Repository over any artist gateway implementation.
pub struct ArtistRepository<G: ArtistGateway> {
    gateway: G,
}

impl ArtistRepository<SqliteArtistDao> {
    /// Builds a SQLite-backed repository over the given connection.
    pub fn with_connection(conn: Connection) -> Self {
        Self::new(SqliteArtistDao::new(conn))
    }
}

impl<G: ArtistGateway> ArtistRepository<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Fetches one artist by exact name; `Ok(None)` when absent.
    pub fn get_by_name(&self, name: &str) -> RepoResult<Option<Artist>> {
        match self.gateway.get_by_name(name)? {
            Some(row) => Ok(Some(map_artist_row(&row)?)),
            None => Ok(None),
        }
    }
}

impl<G: ArtistGateway> Repository for ArtistRepository<G> {
    type Entity = Artist;
    type Id = ArtistId;

    fn add(&self, entity: &mut Artist) -> RepoResult<Option<ArtistId>> {
        let Some(name) = entity.name.clone() else {
            return Ok(None);
        };

        let id = self.gateway.insert(&name)?;
        if id < 0 {
            // Retries exhausted: nothing was inserted.
            return Ok(None);
        }

        entity.id = Some(id);
        Ok(Some(id))
    }

    fn get_by_id(&self, id: ArtistId) -> RepoResult<Option<Artist>> {
        match self.gateway.get_by_id(id)? {
            Some(row) => Ok(Some(map_artist_row(&row)?)),
            None => Ok(None),
        }
    }

    fn update(&self, entity: &Artist) -> RepoResult<usize> {
        let (Some(id), Some(name)) = (entity.id, entity.name.as_deref()) else {
            return Ok(0);
        };
        Ok(self.gateway.update(id, name)?)
    }

    fn delete(&self, id: ArtistId) -> RepoResult<usize> {
        Ok(self.gateway.delete(id)?)
    }

    fn get_all(&self) -> RepoResult<Vec<Artist>> {
        self.gateway
            .get_all()?
            .iter()
            .map(map_artist_row)
            .collect()
    }
}

/// Pure mapping from one raw `artists` row to the domain value.
fn map_artist_row(row: &RawRow) -> RepoResult<Artist> {
    let id = row.integer(COL_ID).ok_or_else(|| {
        RepoError::InvalidData(format!("missing or non-integer `{COL_ID}` column"))
    })?;

    let name = match row.value(COL_NAME) {
        Some(Value::Text(name)) => Some(name.clone()),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "unexpected `{COL_NAME}` value {other:?}"
            )));
        }
    };

    Ok(Artist::with_id(id, name))
}
