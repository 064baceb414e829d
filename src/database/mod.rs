//! Target database access
//!
//! Every write of the migration goes through [`DatabaseBackend`]:
//! - [`DryRunBackend`]: records the statements and returns a sentinel id
//! - DuckDB: embedded rehearsal database (feature `duckdb-backend`)
//! - PostgreSQL: networked target (feature `postgres-backend`)

use async_trait::async_trait;

#[cfg(feature = "duckdb-backend")]
pub mod duckdb;

#[cfg(feature = "postgres-backend")]
pub mod postgres;

pub mod dry_run;
pub mod reversal;
pub mod schema;
pub mod statement;

#[cfg(feature = "duckdb-backend")]
pub use self::duckdb::DuckDBBackend;

#[cfg(feature = "postgres-backend")]
pub use self::postgres::PostgresBackend;

pub use dry_run::DryRunBackend;
pub use reversal::reversal_statements;
pub use schema::ArachneSchema;
pub use statement::{DeleteCondition, DeleteStatement, InsertStatement, SqlDialect};

/// Object id handed out by the dry-run backend for every primary insert
pub const DRY_RUN_OBJECT_ID: i64 = -1;

/// Error type for database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Statement execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Statement could not be built (bad identifier, no columns)
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// Insert with RETURNING produced no key
    #[error("Insert into '{0}' did not return a generated id")]
    MissingGeneratedId(String),

    /// Backend not compiled into this binary
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Result type for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Executes migration statements against one target
#[async_trait(?Send)]
pub trait DatabaseBackend: Send + Sync {
    /// Execute an insert.
    ///
    /// Returns the generated key when the statement asks for one, `None` otherwise.
    async fn insert(&self, statement: &InsertStatement) -> DatabaseResult<Option<i64>>;

    /// Execute a delete and return the number of affected rows
    async fn delete(&self, statement: &DeleteStatement) -> DatabaseResult<u64>;

    /// Backend name for logging
    fn backend_type(&self) -> &'static str;

    /// Whether statements are only recorded
    fn is_dry_run(&self) -> bool {
        false
    }
}
