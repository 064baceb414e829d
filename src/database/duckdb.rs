//! DuckDB database backend implementation
//!
//! An embedded target, used to rehearse a migration locally before it runs
//! against the production database.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::schema::ArachneSchema;
use super::{
    DatabaseBackend, DatabaseError, DatabaseResult, DeleteStatement, InsertStatement, SqlDialect,
};
use crate::models::AttributeValue;

/// DuckDB database backend
pub struct DuckDBBackend {
    /// Path to the database file (None for in-memory)
    db_path: Option<PathBuf>,
    /// DuckDB connection (wrapped in Mutex for thread safety)
    connection: Mutex<duckdb::Connection>,
}

impl DuckDBBackend {
    /// Open (or create) a file-based database
    pub fn new(db_path: impl AsRef<Path>) -> DatabaseResult<Self> {
        let path = db_path.as_ref().to_path_buf();
        let connection = duckdb::Connection::open(&path).map_err(|e| {
            DatabaseError::ConnectionFailed(format!("Failed to open DuckDB: {}", e))
        })?;

        Ok(Self {
            db_path: Some(path),
            connection: Mutex::new(connection),
        })
    }

    /// Create an in-memory database
    pub fn in_memory() -> DatabaseResult<Self> {
        let connection = duckdb::Connection::open_in_memory().map_err(|e| {
            DatabaseError::ConnectionFailed(format!("Failed to create in-memory DuckDB: {}", e))
        })?;

        Ok(Self {
            db_path: None,
            connection: Mutex::new(connection),
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn lock(&self) -> DatabaseResult<std::sync::MutexGuard<'_, duckdb::Connection>> {
        self.connection
            .lock()
            .map_err(|e| DatabaseError::ConnectionFailed(format!("Lock error: {}", e)))
    }

    /// Create the rehearsal tables if they don't exist
    pub fn initialize(&self) -> DatabaseResult<()> {
        self.lock()?
            .execute_batch(ArachneSchema::create_tables_sql())
            .map_err(|e| DatabaseError::QueryFailed(format!("Schema creation failed: {}", e)))
    }

    /// Count rows of a table, for rehearsal checks
    pub fn count_rows(&self, table: &str) -> DatabaseResult<i64> {
        crate::validation::input::validate_table_name(table)
            .map_err(|e| DatabaseError::InvalidStatement(e.to_string()))?;
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table);
        self.lock()?
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(format!("Count failed: {}", e)))
    }

    fn to_duckdb_value(value: &AttributeValue) -> duckdb::types::Value {
        match value {
            AttributeValue::Text(s) => duckdb::types::Value::Text(s.clone()),
            AttributeValue::Integer(n) => duckdb::types::Value::BigInt(*n),
        }
    }
}

#[async_trait(?Send)]
impl DatabaseBackend for DuckDBBackend {
    async fn insert(&self, statement: &InsertStatement) -> DatabaseResult<Option<i64>> {
        let sql = statement.to_sql(SqlDialect::DuckDb);
        let params: Vec<duckdb::types::Value> = statement
            .params()
            .into_iter()
            .map(Self::to_duckdb_value)
            .collect();
        let conn = self.lock()?;

        if statement.returning_column().is_some() {
            let id: i64 = conn
                .query_row(&sql, duckdb::params_from_iter(params), |row| row.get(0))
                .map_err(|e| match e {
                    duckdb::Error::QueryReturnedNoRows => {
                        DatabaseError::MissingGeneratedId(statement.table().to_string())
                    }
                    other => DatabaseError::QueryFailed(format!(
                        "Insert into {} failed: {}",
                        statement.table(),
                        other
                    )),
                })?;
            Ok(Some(id))
        } else {
            conn.execute(&sql, duckdb::params_from_iter(params))
                .map_err(|e| {
                    DatabaseError::QueryFailed(format!(
                        "Insert into {} failed: {}",
                        statement.table(),
                        e
                    ))
                })?;
            Ok(None)
        }
    }

    async fn delete(&self, statement: &DeleteStatement) -> DatabaseResult<u64> {
        let sql = statement.to_sql(SqlDialect::DuckDb);
        let affected = self
            .lock()?
            .execute(&sql, [statement.param()])
            .map_err(|e| {
                DatabaseError::QueryFailed(format!(
                    "Delete from {} failed: {}",
                    statement.table(),
                    e
                ))
            })?;
        Ok(affected as u64)
    }

    fn backend_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeList;

    #[test]
    fn test_file_database_keeps_its_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("rehearsal.duckdb");

        let backend = DuckDBBackend::new(&path).unwrap();
        backend.initialize().unwrap();
        assert_eq!(backend.db_path(), Some(path.as_path()));
        assert!(path.exists());

        assert_eq!(DuckDBBackend::in_memory().unwrap().db_path(), None);
    }

    #[tokio::test]
    async fn test_insert_returns_generated_ids() {
        let backend = DuckDBBackend::in_memory().unwrap();
        backend.initialize().unwrap();

        let stmt = InsertStatement::new(
            "objekt",
            AttributeList::new().with("Arbeitsnotiz", "ARS3D-Import"),
        )
        .unwrap()
        .returning("PS_ObjektID")
        .unwrap();

        let first = backend.insert(&stmt).await.unwrap().unwrap();
        let second = backend.insert(&stmt).await.unwrap().unwrap();
        assert_eq!(second, first + 1);
        assert_eq!(backend.count_rows("objekt").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let backend = DuckDBBackend::in_memory().unwrap();
        backend.initialize().unwrap();

        let insert = InsertStatement::new(
            "modell3d",
            AttributeList::new()
                .with("FS_ObjektID", 1_i64)
                .with("Pfad", "/ars3d-test/A1"),
        )
        .unwrap();
        backend.insert(&insert).await.unwrap();

        let delete = DeleteStatement::new(
            "modell3d",
            crate::database::DeleteCondition::StartsWith {
                column: "Pfad".to_string(),
                prefix: "/ars3d-test".to_string(),
            },
        )
        .unwrap();
        assert_eq!(backend.delete(&delete).await.unwrap(), 1);
        assert_eq!(backend.count_rows("modell3d").unwrap(), 0);
    }
}
