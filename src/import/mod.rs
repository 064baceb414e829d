//! Row migration
//!
//! [`Migrator`] writes one source row as an `objekt` record followed by its
//! dependent records, in a fixed order, each through the configured
//! [`DatabaseBackend`]. [`MigrationRun`] drives it over a whole export.

pub mod run;
pub mod source;

pub use run::{FailurePolicy, MigrationReport, MigrationRun, RowFailure};
pub use source::{CsvRowSource, SourceError};

use crate::builders::{self, BuildError, RowContext};
use crate::config::MigrationConfig;
use crate::database::schema::tables;
use crate::database::{DatabaseBackend, DatabaseError, InsertStatement};
use crate::enrich::MetadataEnricher;
use crate::mapping::MappingSet;
use crate::models::{AttributeList, SourceRow};

/// Why a row could not be migrated completely
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Tables written for a successfully migrated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub object_id: i64,
    pub inserted: Vec<&'static str>,
}

/// A failed row.
///
/// Records inserted before the failure stay in place; `object_id` is set when the
/// primary record was one of them.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct RowError {
    pub object_id: Option<i64>,
    pub inserted: Vec<&'static str>,
    #[source]
    pub error: MigrationError,
}

/// Collects the tables written for one row
struct RowWriter<'a> {
    backend: &'a dyn DatabaseBackend,
    object_id: Option<i64>,
    inserted: Vec<&'static str>,
}

impl RowWriter<'_> {
    fn fail(self, error: impl Into<MigrationError>) -> RowError {
        RowError {
            object_id: self.object_id,
            inserted: self.inserted,
            error: error.into(),
        }
    }

    /// Insert a dependent record; empty lists are skipped.
    async fn insert(
        &mut self,
        table: &'static str,
        attributes: AttributeList,
    ) -> Result<(), DatabaseError> {
        if attributes.is_empty() {
            tracing::debug!("No {} record for this row", table);
            return Ok(());
        }
        let statement = InsertStatement::new(table, attributes)?;
        self.backend.insert(&statement).await?;
        self.inserted.push(table);
        Ok(())
    }
}

/// Migrates single rows
pub struct Migrator {
    mappings: MappingSet,
    config: MigrationConfig,
    enricher: MetadataEnricher,
}

impl Migrator {
    pub fn new(mappings: MappingSet, config: MigrationConfig, enricher: MetadataEnricher) -> Self {
        Self {
            mappings,
            config,
            enricher,
        }
    }

    /// Insert the primary record, then place, dating (phrase), dating (period),
    /// ceramic, link and 3D model records.
    ///
    /// Stops at the first failure.
    pub async fn migrate_row(
        &self,
        backend: &dyn DatabaseBackend,
        row: &SourceRow,
    ) -> Result<RowOutcome, RowError> {
        let mut writer = RowWriter {
            backend,
            object_id: None,
            inserted: Vec::new(),
        };

        let object_id = match self.insert_object(backend, row).await {
            Ok(id) => id,
            Err(e) => return Err(writer.fail(e)),
        };
        writer.object_id = Some(object_id);
        writer.inserted.push(tables::OBJECT);

        if let Err(e) = self.insert_dependents(&mut writer, row, object_id).await {
            return Err(writer.fail(e));
        }

        Ok(RowOutcome {
            object_id,
            inserted: writer.inserted,
        })
    }

    async fn insert_object(
        &self,
        backend: &dyn DatabaseBackend,
        row: &SourceRow,
    ) -> Result<i64, MigrationError> {
        let attributes = builders::object_attributes(row, &self.mappings, &self.config.import)?;
        let statement = InsertStatement::new(tables::OBJECT, attributes)?
            .returning(self.config.database.object_id_column.as_str())?;

        backend
            .insert(&statement)
            .await?
            .ok_or_else(|| DatabaseError::MissingGeneratedId(tables::OBJECT.to_string()).into())
    }

    async fn insert_dependents(
        &self,
        writer: &mut RowWriter<'_>,
        row: &SourceRow,
        object_id: i64,
    ) -> Result<(), MigrationError> {
        let ctx = RowContext::new(row, object_id);
        let import = &self.config.import;

        writer
            .insert(tables::PLACE_REFERENCE, builders::place_attributes(&ctx, import)?)
            .await?;
        writer
            .insert(
                tables::DATING,
                builders::dating_attributes(&ctx, &self.mappings, import)?,
            )
            .await?;
        writer
            .insert(tables::DATING, builders::period_attributes(&ctx, import))
            .await?;
        writer
            .insert(
                tables::CERAMIC,
                builders::ceramic_attributes(&ctx, &self.mappings)?,
            )
            .await?;
        writer
            .insert(tables::URI, builders::link_attributes(&ctx, &self.config.portal))
            .await?;

        let model =
            builders::model3d_attributes(&ctx, &self.config.models, import, &self.enricher)
                .await?;
        writer.insert(tables::MODEL_3D, model).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DRY_RUN_OBJECT_ID, DryRunBackend};
    use crate::enrich::{MetadataError, MetadataSource};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct NoPortal;

    #[async_trait(?Send)]
    impl MetadataSource for NoPortal {
        async fn fetch(&self, object_id: &str) -> Result<String, MetadataError> {
            Err(MetadataError::Status {
                object_id: object_id.to_string(),
                status: 503,
            })
        }
    }

    fn migrator(model_dir: &std::path::Path) -> Migrator {
        let mut config = MigrationConfig::default();
        config.models.model_dir = model_dir.to_path_buf();
        Migrator::new(
            MappingSet::standard().unwrap(),
            config,
            MetadataEnricher::new(Box::new(NoPortal), None),
        )
    }

    #[tokio::test]
    async fn test_row_without_model_writes_fixed_table_order() {
        let temp = TempDir::new().unwrap();
        let backend = DryRunBackend::new();
        let row = SourceRow::from_pairs([
            ("object", "A1"),
            ("objectLabel", "bowl"),
            ("shapeLabel", "bowl"),
            ("residenceLabel", "Römisch-Germanisches Zentralmuseum"),
            ("dateLabel", "430-500 AD"),
            ("periodChronontology", "http://chronontology.dainst.org/period/abc"),
            ("periodLabel", "Spätantike"),
        ]);

        let outcome = migrator(temp.path())
            .migrate_row(&backend, &row)
            .await
            .unwrap();
        assert_eq!(outcome.object_id, DRY_RUN_OBJECT_ID);
        assert_eq!(
            outcome.inserted,
            vec!["objekt", "ortsbezug", "datierung", "datierung", "objektkeramik", "URI"]
        );
        assert_eq!(backend.statements().len(), 6);
    }

    #[tokio::test]
    async fn test_failure_after_primary_keeps_object_id() {
        let temp = TempDir::new().unwrap();
        let backend = DryRunBackend::new();
        let row = SourceRow::from_pairs([
            ("object", "A1"),
            ("objectLabel", "bowl"),
            ("residenceLabel", "Landesmuseum"),
        ]);

        let err = migrator(temp.path())
            .migrate_row(&backend, &row)
            .await
            .unwrap_err();
        assert_eq!(err.object_id, Some(DRY_RUN_OBJECT_ID));
        assert_eq!(err.inserted, vec!["objekt"]);
        assert_eq!(err.to_string(), "Unexpected place of residence: Landesmuseum");
    }

    #[tokio::test]
    async fn test_primary_failure_inserts_nothing() {
        let temp = TempDir::new().unwrap();
        let backend = DryRunBackend::new();
        let row = SourceRow::from_pairs([("objectLabel", "bowl"), ("shapeLabel", "vase")]);

        let err = migrator(temp.path())
            .migrate_row(&backend, &row)
            .await
            .unwrap_err();
        assert_eq!(err.object_id, None);
        assert!(backend.statements().is_empty());
    }
}
