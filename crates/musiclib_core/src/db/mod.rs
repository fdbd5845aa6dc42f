//! SQLite storage bootstrap and execution primitives.
//!
//! # Responsibility
//! - Open and configure SQLite connections for musiclib core.
//! - Provide the shared retry/transaction machinery used by gateways.
//!
//! # Invariants
//! - Every connection handed out has `foreign_keys = ON`.
//! - Transient busy/locked conditions never cross this boundary as errors;
//!   they resolve to no-progress results after bounded retries.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod exec;
pub mod provider;
pub mod row;

pub use exec::RetryPolicy;
pub use provider::{ConnectionProvider, SqliteConnectionProvider};
pub use row::RawRow;

pub type DbResult<T> = Result<T, DbError>;

/// Hard failures of the storage layer.
///
/// Transient contention is not represented here: the write path absorbs it
/// and reports a no-progress sentinel instead.
#[derive(Debug)]
pub enum DbError {
    /// Non-transient driver error (malformed statement, constraint
    /// violation, corrupt database). Propagated to callers unchanged.
    Sqlite(rusqlite::Error),
    /// Datastore file or its parent directory could not be provisioned.
    Io { path: PathBuf, source: io::Error },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(
                f,
                "cannot provision datastore path `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
