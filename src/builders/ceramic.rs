//! `objektkeramik`: vessel shape, keyed by the object id

use super::{BuildError, RowContext};
use crate::mapping::MappingSet;
use crate::models::AttributeList;

pub fn ceramic_attributes(
    ctx: &RowContext<'_>,
    mappings: &MappingSet,
) -> Result<AttributeList, BuildError> {
    let fields = mappings.ceramic.project(ctx.row)?;
    if fields.is_empty() {
        return Ok(AttributeList::new());
    }

    let mut attributes = AttributeList::new().with("PS_ObjektkeramikID", ctx.object_id);
    attributes.extend_text(fields);
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceRow;

    #[test]
    fn test_jug() {
        let row = SourceRow::from_pairs([("shapeLabel", "jug"), ("materialLabel", "clay")]);
        let attributes =
            ceramic_attributes(&RowContext::new(&row, 9), &MappingSet::standard().unwrap())
                .unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.text("GefaessformenKeramik"), Some("Kanne;Krug"));
    }

    #[test]
    fn test_lamp_has_no_ceramic_record() {
        let row = SourceRow::from_pairs([("shapeLabel", "lamp")]);
        assert!(
            ceramic_attributes(&RowContext::new(&row, 9), &MappingSet::standard().unwrap())
                .unwrap()
                .is_empty()
        );
    }
}
