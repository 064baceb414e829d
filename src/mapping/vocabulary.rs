//! The ARS3D → Arachne vocabulary tables
//!
//! These tables are data, maintained by hand for this dataset. When an import fails
//! with an unmapped value, extend the matching lookup here.

use super::{Directive, MappingError, MappingTable};

const AD: &str = "n. Chr.";

fn sub(key: &str, value: &str) -> Directive {
    Directive::substitute(key, value)
}

/// Mapping for the primary `objekt` record
pub fn object_mapping() -> Result<MappingTable, MappingError> {
    let vessel = || vec![sub("GattungAllgemein", "Kleinfund;Keramik;Gefäß")];
    let tool = || vec![sub("GattungAllgemein", "Kleinfund;Keramik;Gerät")];

    MappingTable::builder("objekt")
        .always("inventoryNumber", vec![Directive::copy("Katalognummer")])
        .lookup(
            "materialLabel",
            [
                ("clay", vec![sub("Material", "Ton")]),
                ("plaster", vec![sub("Material", "Gips")]),
            ],
        )
        .lookup(
            "conditionLabel",
            [
                ("complete", vec![sub("Erhaltung", "vollständig")]),
                ("fragmented", vec![sub("Erhaltung", "fragmentiert")]),
                (
                    "reconstructed",
                    vec![sub("Erhaltung", "fragmentiert"), sub("Bearbeitungen", "ergänzt")],
                ),
            ],
        )
        .lookup(
            "shapeLabel",
            [
                ("bowl", vessel()),
                ("rectangular dish", vessel()),
                ("mould", vec![sub("GattungAllgemein", "Kleinfund;Keramik")]),
                ("lamp", tool()),
                ("dish", vessel()),
                ("plate", vessel()),
                ("stamp", tool()),
                ("jug", vessel()),
                ("unclassified", vec![Directive::Suppress]),
            ],
        )
        .lookup(
            "manufacturingtypeLabel",
            [
                ("potter wheel", vec![sub("Technik", "Keramiktechnik, scheibengedreht")]),
                ("mould made", vec![sub("Technik", "Keramiktechnik, Matritze")]),
            ],
        )
        .build()
}

/// Mapping for `objektkeramik` (vessel shape only)
pub fn ceramic_mapping() -> Result<MappingTable, MappingError> {
    MappingTable::builder("objektkeramik")
        .lookup(
            "shapeLabel",
            [
                ("bowl", vec![sub("GefaessformenKeramik", "Schale")]),
                ("rectangular dish", vec![sub("GefaessformenKeramik", "Teller")]),
                ("mould", vec![Directive::Suppress]),
                ("lamp", vec![Directive::Suppress]),
                ("dish", vec![sub("GefaessformenKeramik", "Teller")]),
                ("plate", vec![sub("GefaessformenKeramik", "Teller")]),
                ("stamp", vec![Directive::Suppress]),
                ("jug", vec![sub("GefaessformenKeramik", "Kanne;Krug")]),
                ("unclassified", vec![Directive::Suppress]),
            ],
        )
        .build()
}

/// Mapping for phrase-based `datierung` records.
///
/// The export only uses a handful of date phrases, so they are enumerated instead
/// of parsed.
pub fn date_mapping() -> Result<MappingTable, MappingError> {
    let century = |start: Option<(&str, &str)>, end: Option<(&str, &str)>| {
        let mut directives = Vec::new();
        if let Some((key, value)) = start {
            directives.push(sub(key, value));
            directives.push(sub("AnfDatvn", AD));
        }
        if let Some((key, value)) = end {
            directives.push(sub(key, value));
            directives.push(sub("EndDatvn", AD));
        }
        directives
    };

    MappingTable::builder("datierung")
        .lookup(
            "dateLabel",
            [
                (
                    "310/320-430/450 AD",
                    century(
                        Some(("AnfDatZeitraum", "310/320")),
                        Some(("EndDatZeitraum", "430/450")),
                    ),
                ),
                (
                    "350/355 - 450/475 AD",
                    century(
                        Some(("AnfDatZeitraum", "350/355")),
                        Some(("EndDatZeitraum", "450/475")),
                    ),
                ),
                (
                    "330-370 to early 5. century AD",
                    vec![
                        sub("AnfDatZeitraum", "330-370"),
                        sub("AnfDatvn", AD),
                        sub("EndDatZeitraum", "Anfang/frühes"),
                        sub("EndDatJh", "5"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "280/300 to late 4. century AD",
                    vec![
                        sub("AnfDatZeitraum", "280/300"),
                        sub("AnfDatvn", AD),
                        sub("EndDatZeitraum", "Ende/spätes"),
                        sub("EndDatJh", "4"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "260-320 or mid-late 4. century AD",
                    vec![
                        sub("AnfDatZeitraum", "260-320"),
                        sub("AnfDatvn", AD),
                        sub("EndDatZeitraum", "Ende/spätes"),
                        sub("EndDatJh", "4"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "late 4. or early 5. century AD",
                    vec![
                        sub("AnfDatZeitraum", "Ende/spätes"),
                        sub("AnfDatJh", "4"),
                        sub("AnfDatvn", AD),
                        sub("EndDatZeitraum", "Anfang/frühes"),
                        sub("EndDatJh", "5"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "mid-late 4. century AD",
                    vec![
                        sub("EndDatZeitraum", "Mitte/Ende"),
                        sub("EndDatJh", "4"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "mid-late 5. century AD",
                    vec![
                        sub("EndDatZeitraum", "Mitte/Ende"),
                        sub("EndDatJh", "5"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "early 5. century AD",
                    vec![
                        sub("EndDatZeitraum", "Anfang/frühes"),
                        sub("EndDatJh", "5"),
                        sub("EndDatvn", AD),
                    ],
                ),
                (
                    "early 6. century AD",
                    vec![
                        sub("EndDatZeitraum", "Anfang/frühes"),
                        sub("EndDatJh", "6"),
                        sub("EndDatvn", AD),
                    ],
                ),
                ("4. century AD", century(None, Some(("EndDatJh", "4")))),
                // Same output as "4. century AD"; kept as delivered until the data owner confirms.
                ("5.century AD", century(None, Some(("EndDatJh", "4")))),
                (
                    "4.-5. century AD",
                    century(Some(("AnfDatJh", "5")), Some(("EndDatJh", "5"))),
                ),
                (
                    "430-500 AD",
                    century(Some(("AnfPraezise", "430")), Some(("EndPraezise", "500"))),
                ),
                (
                    "420-450 AD",
                    century(Some(("AnfPraezise", "420")), Some(("EndPraezise", "450"))),
                ),
                (
                    "350-430 AD",
                    century(Some(("AnfPraezise", "350")), Some(("EndPraezise", "430"))),
                ),
                (
                    "290/300-375",
                    century(
                        Some(("AnfDatZeitraum", "290/300")),
                        Some(("EndPraezise", "430")),
                    ),
                ),
            ],
        )
        .build()
}

/// The three vocabulary tables used by one migration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSet {
    pub object: MappingTable,
    pub ceramic: MappingTable,
    pub dates: MappingTable,
}

impl MappingSet {
    /// The tables for the ARS3D dataset
    pub fn standard() -> Result<Self, MappingError> {
        Ok(Self {
            object: object_mapping()?,
            ceramic: ceramic_mapping()?,
            dates: date_mapping()?,
        })
    }
}
