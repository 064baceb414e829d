//! Per-table record builders
//!
//! Each builder turns one source row (plus the object id returned for it) into the
//! attribute list of one target record. An empty list means "no record for this
//! row" and is not an error.

pub mod ceramic;
pub mod dating;
pub mod link;
pub mod model3d;
pub mod object;
pub mod place;

use std::path::PathBuf;

use crate::enrich::MetadataError;
use crate::mapping::MappingError;
use crate::models::SourceRow;
use crate::models::row::{OBJECT_FIELD, OBJECT_LABEL_FIELD};
use crate::validation::input::validate_object_identifier;

pub use ceramic::ceramic_attributes;
pub use dating::{dating_attributes, period_attributes};
pub use link::link_attributes;
pub use model3d::{ModelFiles, find_model_files, model3d_attributes};
pub use object::object_attributes;
pub use place::place_attributes;

/// Errors that abort the current row
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Unexpected place of residence: {found}")]
    UnexpectedPlace { found: String, expected: String },

    #[error(
        "Missing obj or mtl file for id {object_id} ({obj_files} obj, {mtl_files} mtl files found)."
    )]
    MissingModelFiles {
        object_id: String,
        obj_files: usize,
        mtl_files: usize,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Source row has no '{field}' column")]
    MissingSourceField { field: String },

    #[error("Invalid object identifier '{value}': {message}")]
    InvalidObjectIdentifier { value: String, message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// The row being migrated and the id of its `objekt` record
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub row: &'a SourceRow,
    pub object_id: i64,
}

impl<'a> RowContext<'a> {
    pub fn new(row: &'a SourceRow, object_id: i64) -> Self {
        Self { row, object_id }
    }

    /// The row's ARS3D identifier, checked before it is used in paths or URLs
    pub fn source_id(&self) -> Result<&'a str, BuildError> {
        source_id(self.row)
    }
}

pub(crate) fn source_id(row: &SourceRow) -> Result<&str, BuildError> {
    let id = require(row, OBJECT_FIELD)?;
    validate_object_identifier(id).map_err(|e| BuildError::InvalidObjectIdentifier {
        value: id.to_string(),
        message: e.to_string(),
    })?;
    Ok(id)
}

pub(crate) fn require<'a>(row: &'a SourceRow, field: &str) -> Result<&'a str, BuildError> {
    row.get(field).ok_or_else(|| BuildError::MissingSourceField {
        field: field.to_string(),
    })
}

/// Row title: first character upper-cased, the rest lower-cased
pub(crate) fn title(row: &SourceRow) -> Result<String, BuildError> {
    Ok(capitalize(require(row, OBJECT_LABEL_FIELD)?))
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bowl"), "Bowl");
        assert_eq!(capitalize("RECTANGULAR DISH"), "Rectangular dish");
        assert_eq!(capitalize("öllampe"), "Öllampe");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_source_id_is_validated() {
        let row = SourceRow::from_pairs([("object", "../etc")]);
        assert!(matches!(
            source_id(&row),
            Err(BuildError::InvalidObjectIdentifier { .. })
        ));

        let row = SourceRow::from_pairs([("objectLabel", "bowl")]);
        assert!(matches!(
            source_id(&row),
            Err(BuildError::MissingSourceField { .. })
        ));
    }
}
