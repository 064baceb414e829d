//! PostgreSQL database backend implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::types::ToSql;

use super::{
    DatabaseBackend, DatabaseError, DatabaseResult, DeleteStatement, InsertStatement, SqlDialect,
};
use crate::models::AttributeValue;

/// PostgreSQL database backend
pub struct PostgresBackend {
    /// Connection string
    connection_string: String,
    /// PostgreSQL client (wrapped for async access)
    client: Arc<Mutex<tokio_postgres::Client>>,
}

impl PostgresBackend {
    /// Connect to the target database
    pub async fn new(connection_string: &str) -> DatabaseResult<Self> {
        let (client, connection) =
            tokio_postgres::connect(connection_string, tokio_postgres::NoTls)
                .await
                .map_err(|e| {
                    DatabaseError::ConnectionFailed(format!(
                        "Failed to connect to PostgreSQL: {}",
                        e
                    ))
                })?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self {
            connection_string: connection_string.to_string(),
            client: Arc::new(Mutex::new(client)),
        })
    }

    /// Get the connection string (masked for security)
    pub fn connection_string_masked(&self) -> String {
        if let Some(at_pos) = self.connection_string.find('@')
            && let Some(colon_pos) = self.connection_string[..at_pos].rfind(':')
        {
            let prefix = &self.connection_string[..colon_pos + 1];
            let suffix = &self.connection_string[at_pos..];
            return format!("{}****{}", prefix, suffix);
        }
        self.connection_string.clone()
    }

    fn to_sql_param(value: &AttributeValue) -> Box<dyn ToSql + Sync> {
        match value {
            AttributeValue::Text(s) => Box::new(s.clone()),
            AttributeValue::Integer(n) => Box::new(*n),
        }
    }
}

#[async_trait(?Send)]
impl DatabaseBackend for PostgresBackend {
    async fn insert(&self, statement: &InsertStatement) -> DatabaseResult<Option<i64>> {
        let sql = statement.to_sql(SqlDialect::Postgres);
        let owned: Vec<Box<dyn ToSql + Sync>> = statement
            .params()
            .into_iter()
            .map(Self::to_sql_param)
            .collect();
        let params: Vec<&(dyn ToSql + Sync)> = owned.iter().map(|p| p.as_ref()).collect();
        let client = self.client.lock().await;

        let failed = |e: tokio_postgres::Error| {
            DatabaseError::QueryFailed(format!("Insert into {} failed: {}", statement.table(), e))
        };

        if statement.returning_column().is_some() {
            let row = client
                .query_opt(&sql, &params)
                .await
                .map_err(failed)?
                .ok_or_else(|| DatabaseError::MissingGeneratedId(statement.table().to_string()))?;
            let id: i64 = row.try_get(0).map_err(failed)?;
            Ok(Some(id))
        } else {
            client.execute(&sql, &params).await.map_err(failed)?;
            Ok(None)
        }
    }

    async fn delete(&self, statement: &DeleteStatement) -> DatabaseResult<u64> {
        let sql = statement.to_sql(SqlDialect::Postgres);
        let param = statement.param();
        let client = self.client.lock().await;

        client.execute(&sql, &[&param]).await.map_err(|e| {
            DatabaseError::QueryFailed(format!("Delete from {} failed: {}", statement.table(), e))
        })
    }

    fn backend_type(&self) -> &'static str {
        "postgres"
    }
}
