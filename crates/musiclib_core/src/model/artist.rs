//! Artist domain model.
//!
//! # Responsibility
//! - Represent one artist independently of how it is stored.
//!
//! # Invariants
//! - A `Some(id)` artist corresponds to exactly one persisted row.
//! - A `None` id means the artist has never been persisted.

use serde::{Deserialize, Serialize};

/// Datastore-assigned artist identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ArtistId = i64;

/// One artist of the catalog.
///
/// Constructed in memory without an id; the repository assigns the id on
/// successful insertion and never partially persists an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Auto-generated by the datastore; absent until persisted.
    pub id: Option<ArtistId>,
    /// Display name; nullable in storage.
    pub name: Option<String>,
}

impl Artist {
    /// Creates a not-yet-persisted artist with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Reconstructs an artist from persisted state.
    pub fn with_id(id: ArtistId, name: Option<String>) -> Self {
        Self { id: Some(id), name }
    }

    /// Whether this artist carries a datastore identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
