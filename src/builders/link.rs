//! `URI`: sameAs link back to the ARS3D portal

use super::RowContext;
use crate::config::PortalSettings;
use crate::models::AttributeList;
use crate::models::row::OBJECT_FIELD;

/// Emitted for every row; the `object` value goes into the template as it is.
pub fn link_attributes(ctx: &RowContext<'_>, portal: &PortalSettings) -> AttributeList {
    let uri = portal
        .object_link_template
        .replace("{id}", ctx.row.value(OBJECT_FIELD));

    AttributeList::new()
        .with("FS_ObjektID", ctx.object_id)
        .with("URI", uri)
        .with("FS_URIQuelleID", portal.link_source_id)
        .with("Beziehung", "sameAs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeValue, SourceRow};

    #[test]
    fn test_portal_link() {
        let row = SourceRow::from_pairs([("object", "5f1c0b9e")]);
        let attributes = link_attributes(&RowContext::new(&row, 11), &PortalSettings::default());
        assert_eq!(
            attributes.text("URI"),
            Some("http://143.93.113.149/_portal/object.htm?id=ars3do:5f1c0b9e")
        );
        assert_eq!(
            attributes.get("FS_URIQuelleID"),
            Some(&AttributeValue::Integer(45))
        );
        assert_eq!(attributes.text("Beziehung"), Some("sameAs"));
    }

    #[test]
    fn test_link_keeps_identifier_verbatim() {
        let portal = PortalSettings::default();
        for id in ["RGZM:O.39012", "ars3do 12", ""] {
            let row = SourceRow::from_pairs([("object", id)]);
            let attributes = link_attributes(&RowContext::new(&row, 3), &portal);
            assert_eq!(
                attributes.text("URI").unwrap(),
                format!("http://143.93.113.149/_portal/object.htm?id=ars3do:{}", id)
            );
            assert_eq!(
                attributes.get("FS_ObjektID").and_then(AttributeValue::as_integer),
                Some(3)
            );
        }
    }
}
