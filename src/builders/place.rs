//! `ortsbezug`: where the object is kept

use super::{BuildError, RowContext};
use crate::config::ImportSettings;
use crate::database::schema::columns;
use crate::models::AttributeList;

const RESIDENCE_FIELD: &str = "residenceLabel";

/// Only objects held by the configured institution are accepted.
pub fn place_attributes(
    ctx: &RowContext<'_>,
    import: &ImportSettings,
) -> Result<AttributeList, BuildError> {
    let found = ctx.row.value(RESIDENCE_FIELD);
    if found != import.residence {
        return Err(BuildError::UnexpectedPlace {
            found: found.to_string(),
            expected: import.residence.clone(),
        });
    }

    Ok(AttributeList::new()
        .with("FS_OrtID", import.residence_place_id)
        .with("FS_ObjektID", ctx.object_id)
        .with("ArtOrtsangabe", "Aufbewahrungsort")
        .with(columns::ORIGIN_MARKER, import.marker.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeValue, SourceRow};

    #[test]
    fn test_known_residence() {
        let row = SourceRow::from_pairs([("residenceLabel", "Römisch-Germanisches Zentralmuseum")]);
        let attributes =
            place_attributes(&RowContext::new(&row, 42), &ImportSettings::default()).unwrap();
        assert_eq!(
            attributes.get("FS_OrtID"),
            Some(&AttributeValue::Integer(1591))
        );
        assert_eq!(
            attributes.get("FS_ObjektID"),
            Some(&AttributeValue::Integer(42))
        );
        assert_eq!(attributes.len(), 4);
    }

    #[test]
    fn test_residence_must_match_exactly() {
        for residence in ["römisch-germanisches zentralmuseum", "", "Landesmuseum Mainz"] {
            let row = SourceRow::from_pairs([("residenceLabel", residence)]);
            let err = place_attributes(&RowContext::new(&row, 1), &ImportSettings::default())
                .unwrap_err();
            assert!(matches!(err, BuildError::UnexpectedPlace { .. }), "{}", residence);
        }
    }
}
