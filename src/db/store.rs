//! Storage abstraction for the `names` table.
//!
//! Postgres failures are classified by SQLSTATE. The classification itself is
//! unit tested here; the full `sqlx::Error` path against a live server is
//! covered by `tests/postgres_store_test.rs` (run with `--ignored`).

use crate::domain::{NewRecord, Record, RecordId, RecordUpdate};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Postgres SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";
/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Name of the table every store operates on.
pub const TABLE_NAME: &str = "names";

/// Storage operations over profile records.
///
/// Implementations must make `create_table` and `insert` safe to run
/// concurrently with themselves: the bootstrapper relies on
/// "create if not exists" and "insert, ignore on email conflict".
#[async_trait]
pub trait NameStore: Send + Sync + fmt::Debug {
    /// Create the `names` table if it does not exist.
    async fn create_table(&self) -> Result<(), StoreError>;

    /// Cheap read against the table without fetching rows.
    ///
    /// Fails with `StoreError::MissingSchema` if the table does not exist.
    async fn check(&self) -> Result<(), StoreError>;

    /// Fetch every record. Ordering is not part of the contract.
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert a record, ignoring an email conflict.
    ///
    /// # Returns
    /// `true` if a row was inserted, `false` if the email already existed.
    async fn insert(&self, record: &NewRecord) -> Result<bool, StoreError>;

    /// Apply a batch of updates in input order, all or nothing.
    ///
    /// # Returns
    /// Number of rows matched across the batch. Unknown ids match nothing.
    ///
    /// # Errors
    /// `StoreError::Conflict` if an update would give a row an email held by
    /// another row. No row of the batch is changed in that case.
    async fn update_batch(&self, updates: &[RecordUpdate]) -> Result<u64, StoreError>;

    /// Delete the record with the given id.
    ///
    /// # Returns
    /// `true` if a row was removed.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The `names` table does not exist yet.
    #[error("relation \"{0}\" does not exist")]
    MissingSchema(&'static str),
    /// A write would break email uniqueness.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    /// Any other database or connectivity failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn is_missing_schema(&self) -> bool {
        matches!(self, StoreError::MissingSchema(_))
    }
}

/// SQLSTATE codes the store reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownState {
    UndefinedTable,
    UniqueViolation,
}

fn known_state(code: &str) -> Option<KnownState> {
    match code {
        UNDEFINED_TABLE => Some(KnownState::UndefinedTable),
        UNIQUE_VIOLATION => Some(KnownState::UniqueViolation),
        _ => None,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref().and_then(known_state) {
                Some(KnownState::UndefinedTable) => {
                    return StoreError::MissingSchema(TABLE_NAME)
                }
                Some(KnownState::UniqueViolation) => {
                    return StoreError::Conflict(db_err.message().to_string())
                }
                None => {}
            }
        }
        StoreError::Database(err)
    }
}
