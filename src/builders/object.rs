//! `objekt`: the primary record

use super::{BuildError, title};
use crate::config::ImportSettings;
use crate::mapping::MappingSet;
use crate::models::{AttributeList, SourceRow};

/// Title, projected vocabulary fields, then the import marker and creator note.
pub fn object_attributes(
    row: &SourceRow,
    mappings: &MappingSet,
    import: &ImportSettings,
) -> Result<AttributeList, BuildError> {
    let mut attributes = AttributeList::new().with("KurzbeschreibungObjekt", title(row)?);
    attributes.extend_text(mappings.object.project(row)?);
    attributes.push("Arbeitsnotiz", import.marker.as_str());
    attributes.push("BearbeiterObjekt", import.creator_note.as_str());
    Ok(attributes)
}
