//! Statement-recording backend

use async_trait::async_trait;
use std::sync::Mutex;

use super::{
    DRY_RUN_OBJECT_ID, DatabaseBackend, DatabaseError, DatabaseResult, DeleteStatement,
    InsertStatement,
};

/// Backend that executes nothing.
///
/// Each statement is kept in its substituted audit form. Inserts that ask for a
/// generated key receive [`DRY_RUN_OBJECT_ID`].
#[derive(Debug, Default)]
pub struct DryRunBackend {
    statements: Mutex<Vec<String>>,
    echo: bool,
}

impl DryRunBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print every statement to stdout as it is recorded
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    fn record(&self, sql: String) -> DatabaseResult<()> {
        if self.echo {
            println!("{}", sql);
        } else {
            tracing::debug!("[dry-run] {}", sql);
        }
        self.statements
            .lock()
            .map_err(|e| DatabaseError::QueryFailed(format!("Lock error: {}", e)))?
            .push(sql);
        Ok(())
    }

    /// All statements recorded so far
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Drain the recorded statements
    pub fn take_statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .map(|mut s| std::mem::take(&mut *s))
            .unwrap_or_default()
    }
}

#[async_trait(?Send)]
impl DatabaseBackend for DryRunBackend {
    async fn insert(&self, statement: &InsertStatement) -> DatabaseResult<Option<i64>> {
        self.record(statement.render_substituted())?;
        Ok(statement.returning_column().map(|_| DRY_RUN_OBJECT_ID))
    }

    async fn delete(&self, statement: &DeleteStatement) -> DatabaseResult<u64> {
        self.record(statement.render_substituted())?;
        Ok(0)
    }

    fn backend_type(&self) -> &'static str {
        "dry-run"
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
