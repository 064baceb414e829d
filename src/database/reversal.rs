//! Statements that undo an import run
//!
//! Imported records are found through the import marker on `objekt` and the model
//! folder on `modell3d`; no id bookkeeping is needed.

use super::schema::{columns, tables};
use super::{DatabaseResult, DeleteCondition, DeleteStatement};
use crate::config::{ImportSettings, ModelSettings};

/// DELETE statements in execution order: dependents first, `objekt` last.
pub fn reversal_statements(
    import: &ImportSettings,
    models: &ModelSettings,
    object_id_column: &str,
) -> DatabaseResult<Vec<DeleteStatement>> {
    let by_parent = |table: &str, column: &str| {
        DeleteStatement::new(
            table,
            DeleteCondition::ParentIn {
                column: column.to_string(),
                parent_table: tables::OBJECT.to_string(),
                parent_key: object_id_column.to_string(),
                marker_column: columns::OBJECT_MARKER.to_string(),
                marker: import.marker.clone(),
            },
        )
    };

    Ok(vec![
        by_parent(tables::URI, columns::OBJECT_FK)?,
        by_parent(tables::CERAMIC, columns::CERAMIC_PK)?,
        by_parent(tables::MODEL_3D, columns::OBJECT_FK)?,
        by_parent(tables::DATING, columns::OBJECT_FK)?,
        by_parent(tables::PLACE_REFERENCE, columns::OBJECT_FK)?,
        DeleteStatement::new(
            tables::MODEL_3D,
            DeleteCondition::StartsWith {
                column: columns::MODEL_PATH.to_string(),
                prefix: models.remote_folder.clone(),
            },
        )?,
        DeleteStatement::new(
            tables::OBJECT,
            DeleteCondition::Equals {
                column: columns::OBJECT_MARKER.to_string(),
                value: import.marker.clone(),
            },
        )?,
    ])
}
