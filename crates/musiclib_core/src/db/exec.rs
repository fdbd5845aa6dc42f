//! Bounded-retry execution of mutating statements.
//!
//! # Responsibility
//! - Classify transient SQLite contention (busy/locked result codes).
//! - Drive the attempt/sleep loop shared by every write result shape.
//!
//! # Invariants
//! - Only busy/locked conditions are retried; any other driver error
//!   aborts the loop and propagates unchanged.
//! - Exhausting retries is not an error: it resolves to `Ok(None)` and the
//!   caller maps it to that shape's no-progress sentinel.

use super::{DbError, DbResult};
use log::{debug, warn};
use rusqlite::ErrorCode;
use std::time::Duration;

/// Retry configuration for write attempts against a lock-prone datastore.
///
/// `max_retries * retry_delay` is the implicit upper bound on how long one
/// write can block; there is no other deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Must be positive.
    pub max_retries: u32,
    /// Pause between consecutive attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// Returns whether the driver reported transient lock contention.
///
/// Covers `SQLITE_BUSY` (another connection holds the file lock) and
/// `SQLITE_LOCKED` (a conflicting statement on a shared cache).
pub fn is_busy_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => matches!(
            code.code,
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
        ),
        _ => false,
    }
}

/// Runs `op` until it succeeds, fails hard, or the policy is exhausted.
///
/// `op` must be a self-contained attempt: acquire the lock, open the
/// transaction, execute, commit. Returning a busy error must leave the
/// datastore untouched (rolled back), so a later attempt applies the
/// statement at most once.
///
/// Sleeping happens between attempts only; exhaustion after `max_retries`
/// attempts has slept exactly `max_retries - 1` times.
pub fn run_with_retry<T>(
    policy: &RetryPolicy,
    op: impl FnMut() -> Result<T, rusqlite::Error>,
) -> DbResult<Option<T>> {
    run_with_sleeper(policy, std::thread::sleep, op)
}

fn run_with_sleeper<T>(
    policy: &RetryPolicy,
    mut sleep: impl FnMut(Duration),
    mut op: impl FnMut() -> Result<T, rusqlite::Error>,
) -> DbResult<Option<T>> {
    let mut attempt: u32 = 1;
    loop {
        match op() {
            Ok(value) => return Ok(Some(value)),
            Err(err) if is_busy_error(&err) => {
                if attempt >= policy.max_retries {
                    warn!(
                        "event=db_write_retry module=db status=exhausted attempts={}",
                        attempt
                    );
                    return Ok(None);
                }
                debug!(
                    "event=db_write_retry module=db status=busy attempt={}/{}",
                    attempt, policy.max_retries
                );
                sleep(policy.retry_delay);
                attempt += 1;
            }
            Err(err) => return Err(DbError::Sqlite(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_busy_error, run_with_sleeper, RetryPolicy};
    use rusqlite::ffi;
    use std::time::Duration;

    fn busy_error() -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        )
    }

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            retry_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn classifies_busy_and_locked_as_transient() {
        assert!(is_busy_error(&busy_error()));
        let locked = rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_LOCKED), None);
        assert!(is_busy_error(&locked));
        let hard = rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_CONSTRAINT), None);
        assert!(!is_busy_error(&hard));
    }

    #[test]
    fn succeeds_after_transient_failures_and_applies_once() {
        let mut failures_left = 3;
        let mut applied = 0;
        let mut sleeps = 0;

        let result = run_with_sleeper(&policy(5), |_| sleeps += 1, || {
            if failures_left > 0 {
                failures_left -= 1;
                return Err(busy_error());
            }
            applied += 1;
            Ok(42)
        })
        .unwrap();

        assert_eq!(result, Some(42));
        assert_eq!(applied, 1);
        assert_eq!(sleeps, 3);
    }

    #[test]
    fn exhaustion_returns_none_with_one_fewer_sleep_than_attempts() {
        let mut attempts = 0;
        let mut sleeps = 0;

        let result = run_with_sleeper(&policy(5), |_| sleeps += 1, || {
            attempts += 1;
            Err::<(), _>(busy_error())
        })
        .unwrap();

        assert_eq!(result, None);
        assert_eq!(attempts, 5);
        assert_eq!(sleeps, 4);
    }

    #[test]
    fn non_transient_errors_abort_immediately() {
        let mut attempts = 0;
        let mut sleeps = 0;

        let err = run_with_sleeper(&policy(5), |_| sleeps += 1, || {
            attempts += 1;
            Err::<(), _>(rusqlite::Error::SqliteFailure(
                ffi::Error::new(ffi::SQLITE_CONSTRAINT),
                Some("constraint failed".to_string()),
            ))
        })
        .unwrap_err();

        assert_eq!(attempts, 1);
        assert_eq!(sleeps, 0);
        assert!(err.to_string().contains("constraint"));
    }

    #[test]
    fn single_attempt_policy_never_sleeps() {
        let mut sleeps = 0;
        let result =
            run_with_sleeper(&policy(1), |_| sleeps += 1, || Err::<(), _>(busy_error())).unwrap();
        assert_eq!(result, None);
        assert_eq!(sleeps, 0);
    }
}
