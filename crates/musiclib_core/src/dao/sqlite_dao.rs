//! Generic SQLite DAO base: read execution and retried write execution.
//!
//! # Responsibility
//! - Serialize all access to one shared connection behind an instance lock.
//! - Offer the three write result shapes over one retry skeleton.
//!
//! # Invariants
//! - The instance lock is held across each write's whole transaction scope,
//!   so writers on one DAO instance never interleave at statement level.
//! - Every write attempt commits or rolls back before the lock is released.
//! - Reads never commit or roll back.

use crate::db::exec::{run_with_retry, RetryPolicy};
use crate::db::{DbResult, RawRow};
use log::debug;
use rusqlite::{Connection, ToSql, Transaction};
use std::sync::{Mutex, PoisonError};

/// Shared DAO base owning one connection and the write-retry machinery.
///
/// The lock only serializes callers of this instance; contention from other
/// connections or processes still surfaces as SQLite busy errors, which is
/// what the retry loop is for. Holding the connection in a `Mutex` makes
/// the DAO `Send + Sync`, so one instance may serve multiple threads.
pub struct SqliteDao {
    conn: Mutex<Connection>,
    policy: RetryPolicy,
}

impl SqliteDao {
    /// Wraps a connection with the default retry policy.
    pub fn new(conn: Connection) -> Self {
        Self::with_policy(conn, RetryPolicy::default())
    }

    /// Wraps a connection with an explicit retry policy.
    pub fn with_policy(conn: Connection, policy: RetryPolicy) -> Self {
        Self {
            conn: Mutex::new(conn),
            policy,
        }
    }

    /// Checks the system catalog for a table of the given name.
    pub fn table_exists(&self, table: &str) -> DbResult<bool> {
        let found = self
            .query_one(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                &[&table],
            )?
            .is_some();
        debug!("event=table_exists module=dao table={table} found={found}");
        Ok(found)
    }

    /// Runs a DDL batch directly, outside the retry loop.
    ///
    /// Table creation happens once at initialization time, before any
    /// concurrent writer exists, so it does not share the retry path.
    pub fn execute_ddl(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock_conn();
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Executes one read statement and returns the first row, if any.
    pub fn query_one(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<Option<RawRow>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(RawRow::read(row)?)),
            None => Ok(None),
        }
    }

    /// Executes one read statement and returns every matching row in
    /// datastore order.
    pub fn query_all(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<Vec<RawRow>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(RawRow::read(row)?);
        }
        Ok(out)
    }

    /// Executes one mutating statement; `Ok(false)` means retries were
    /// exhausted without the statement being applied.
    pub fn execute_write(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<bool> {
        let outcome = self.run_write(sql, params, |_, _| ())?;
        Ok(outcome.is_some())
    }

    /// Executes one insert; returns the generated row id, or `-1` when
    /// retries were exhausted without a row being inserted.
    pub fn execute_insert(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<i64> {
        let outcome = self.run_write(sql, params, |tx, _| tx.last_insert_rowid())?;
        Ok(outcome.unwrap_or(-1))
    }

    /// Executes one update or delete; returns the affected-row count, `0`
    /// when nothing matched or when retries were exhausted.
    pub fn execute_update_delete(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize> {
        let outcome = self.run_write(sql, params, |_, changed| changed)?;
        Ok(outcome.unwrap_or(0))
    }

    /// Retry skeleton shared by the three write shapes.
    ///
    /// Each attempt locks the instance, opens a transaction, executes the
    /// statement, extracts the shape-specific result and commits. Dropping
    /// the transaction on any failure path rolls back, so a retried
    /// statement is applied at most once.
    fn run_write<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        extract: impl Fn(&Transaction<'_>, usize) -> T,
    ) -> DbResult<Option<T>> {
        run_with_retry(&self.policy, || {
            let mut conn = self.lock_conn();
            let tx = conn.transaction()?;
            let changed = tx.execute(sql, params)?;
            let value = extract(&tx, changed);
            tx.commit()?;
            Ok(value)
        })
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-write; the
        // transaction it held has already rolled back, so the connection
        // itself is still consistent.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
