//! `datierung`: date phrases and chronontology periods

use super::{BuildError, RowContext};
use crate::config::ImportSettings;
use crate::database::schema::columns;
use crate::mapping::MappingSet;
use crate::models::AttributeList;

const PERIOD_URI_FIELD: &str = "periodChronontology";
const PERIOD_LABEL_FIELD: &str = "periodLabel";

/// Dating from the `dateLabel` phrase; empty when the phrase maps to nothing.
pub fn dating_attributes(
    ctx: &RowContext<'_>,
    mappings: &MappingSet,
    import: &ImportSettings,
) -> Result<AttributeList, BuildError> {
    let fields = mappings.dates.project(ctx.row)?;
    if fields.is_empty() {
        return Ok(AttributeList::new());
    }

    let mut attributes = AttributeList::new().with("FS_ObjektID", ctx.object_id);
    attributes.extend_text(fields);
    attributes.push(columns::ORIGIN_MARKER, import.marker.as_str());
    Ok(attributes)
}

/// Dating from a chronontology period; needs both the URI and the label.
pub fn period_attributes(ctx: &RowContext<'_>, import: &ImportSettings) -> AttributeList {
    let uri = ctx.row.value(PERIOD_URI_FIELD);
    let label = ctx.row.value(PERIOD_LABEL_FIELD);
    if uri.is_empty() || label.is_empty() {
        return AttributeList::new();
    }

    AttributeList::new()
        .with("FS_ObjektID", ctx.object_id)
        .with("AnfEpoche", label)
        .with("AnfEpocheChronId", period_id(uri))
        .with(columns::ORIGIN_MARKER, import.marker.as_str())
}

/// Last path segment of a period URI, ignoring a trailing slash
///
/// `.../period/abc/` yields `abc`, never an empty id.
fn period_id(uri: &str) -> &str {
    let trimmed = uri.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceRow;

    #[test]
    fn test_precise_years() {
        let row = SourceRow::from_pairs([("dateLabel", "430-500 AD")]);
        let attributes = dating_attributes(
            &RowContext::new(&row, 7),
            &MappingSet::standard().unwrap(),
            &ImportSettings::default(),
        )
        .unwrap();

        let keys: Vec<&str> = attributes.keys().collect();
        assert_eq!(
            keys,
            vec![
                "FS_ObjektID",
                "AnfPraezise",
                "AnfDatvn",
                "EndPraezise",
                "EndDatvn",
                "Ursprungsinformationen"
            ]
        );
        assert_eq!(attributes.text("AnfPraezise"), Some("430"));
        assert_eq!(attributes.text("EndDatvn"), Some("n. Chr."));
        assert!(!attributes.contains_key("AnfDatZeitraum"));
    }

    #[test]
    fn test_no_date_phrase_no_record() {
        let row = SourceRow::from_pairs([("dateLabel", " ")]);
        let attributes = dating_attributes(
            &RowContext::new(&row, 7),
            &MappingSet::standard().unwrap(),
            &ImportSettings::default(),
        )
        .unwrap();
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_period_needs_uri_and_label() {
        let row = SourceRow::from_pairs([
            ("periodChronontology", "http://chronontology.dainst.org/period/X5bkjFkGhm9a"),
            ("periodLabel", "Spätantike"),
        ]);
        let attributes = period_attributes(&RowContext::new(&row, 3), &ImportSettings::default());
        assert_eq!(attributes.text("AnfEpoche"), Some("Spätantike"));
        assert_eq!(attributes.text("AnfEpocheChronId"), Some("X5bkjFkGhm9a"));

        let row = SourceRow::from_pairs([("periodLabel", "Spätantike")]);
        assert!(period_attributes(&RowContext::new(&row, 3), &ImportSettings::default()).is_empty());
    }

    #[test]
    fn test_period_id_ignores_trailing_slash() {
        assert_eq!(period_id("http://x/period/abc/"), "abc");
        assert_eq!(period_id("abc"), "abc");
    }
}
