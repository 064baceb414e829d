//! Running a migration over a whole export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::source::SourceError;
use super::{Migrator, RowOutcome};
use crate::database::DatabaseBackend;
use crate::models::SourceRow;

/// What to do after a row fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failed row
    #[default]
    Halt,
    /// Record the failure and go on with the next row
    Continue,
}

/// One row that was not migrated completely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-based data row number (the header is not counted)
    pub row_number: usize,
    /// The row's `object` value, when it could be read
    pub source_id: Option<String>,
    /// Id of the `objekt` record, when it was inserted before the failure
    pub object_id: Option<i64>,
    pub message: String,
}

/// Summary of a migration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub backend: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rows_seen: usize,
    pub rows_imported: usize,
    /// Inserted records per table
    pub inserts: BTreeMap<String, usize>,
    pub failures: Vec<RowFailure>,
    /// Whether the run stopped before the end of the export
    pub halted: bool,
}

impl MigrationReport {
    fn start(backend: &dyn DatabaseBackend) -> Self {
        let now = Utc::now();
        Self {
            backend: backend.backend_type().to_string(),
            dry_run: backend.is_dry_run(),
            started_at: now,
            finished_at: now,
            rows_seen: 0,
            rows_imported: 0,
            inserts: BTreeMap::new(),
            failures: Vec::new(),
            halted: false,
        }
    }

    fn count_inserts(&mut self, tables: &[&'static str]) {
        for table in tables {
            *self.inserts.entry(table.to_string()).or_insert(0) += 1;
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_inserts(&self) -> usize {
        self.inserts.values().sum()
    }

    /// Multi-line human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "{} of {} rows imported ({} records, backend {}{})",
            self.rows_imported,
            self.rows_seen,
            self.total_inserts(),
            self.backend,
            if self.dry_run { ", dry run" } else { "" }
        )];
        for (table, count) in &self.inserts {
            lines.push(format!("  {}: {}", table, count));
        }
        for failure in &self.failures {
            lines.push(format!(
                "  row {} ({}): {}",
                failure.row_number,
                failure.source_id.as_deref().unwrap_or("?"),
                failure.message
            ));
        }
        if self.halted {
            lines.push("Run halted before the end of the export".to_string());
        }
        lines.join("\n")
    }
}

/// Drives a [`Migrator`] over a row source
pub struct MigrationRun<'a> {
    migrator: &'a Migrator,
    policy: FailurePolicy,
}

impl<'a> MigrationRun<'a> {
    pub fn new(migrator: &'a Migrator, policy: FailurePolicy) -> Self {
        Self { migrator, policy }
    }

    /// Migrate rows one after another.
    ///
    /// A row that cannot be read always ends the run; a row that fails to migrate
    /// ends it only under [`FailurePolicy::Halt`].
    pub async fn execute<I>(&self, backend: &dyn DatabaseBackend, rows: I) -> MigrationReport
    where
        I: IntoIterator<Item = Result<SourceRow, SourceError>>,
    {
        let mut report = MigrationReport::start(backend);

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            report.rows_seen += 1;

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Row {}: {}", row_number, e);
                    report.failures.push(RowFailure {
                        row_number,
                        source_id: None,
                        object_id: None,
                        message: e.to_string(),
                    });
                    report.halted = true;
                    break;
                }
            };

            let source_id = row.object_id().map(str::to_string);
            tracing::info!(
                "Row {}: migrating {}",
                row_number,
                source_id.as_deref().unwrap_or("<no id>")
            );

            match self.migrator.migrate_row(backend, &row).await {
                Ok(RowOutcome {
                    object_id,
                    inserted,
                }) => {
                    tracing::info!(
                        "Row {}: objekt {} with {} records",
                        row_number,
                        object_id,
                        inserted.len()
                    );
                    report.count_inserts(&inserted);
                    report.rows_imported += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Row {} ({}): {}",
                        row_number,
                        source_id.as_deref().unwrap_or("<no id>"),
                        e
                    );
                    report.count_inserts(&e.inserted);
                    report.failures.push(RowFailure {
                        row_number,
                        source_id,
                        object_id: e.object_id,
                        message: e.to_string(),
                    });
                    if self.policy == FailurePolicy::Halt {
                        report.halted = true;
                        break;
                    }
                }
            }
        }

        report.finished_at = Utc::now();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_failures() {
        let now = Utc::now();
        let report = MigrationReport {
            backend: "dry-run".to_string(),
            dry_run: true,
            started_at: now,
            finished_at: now,
            rows_seen: 2,
            rows_imported: 1,
            inserts: BTreeMap::from([("objekt".to_string(), 2), ("URI".to_string(), 1)]),
            failures: vec![RowFailure {
                row_number: 2,
                source_id: Some("B2".to_string()),
                object_id: Some(-1),
                message: "Unexpected place of residence: x".to_string(),
            }],
            halted: true,
        };

        assert!(!report.is_success());
        assert_eq!(report.total_inserts(), 3);
        assert_eq!(
            report.summary(),
            "1 of 2 rows imported (3 records, backend dry-run, dry run)\n  \
URI: 1\n  \
objekt: 2\n  \
row 2 (B2): Unexpected place of residence: x\n\
Run halted before the end of the export"
        );
    }

    #[test]
    fn test_default_policy_halts() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Halt);
    }
}
