//! Controlled-vocabulary mapping
//!
//! A [`MappingTable`] maps ARS3D source fields to Arachne columns. Each field has a
//! [`FieldRule`]: either a fixed list of [`Directive`]s applied to any value, or a
//! lookup from the exact (trimmed) source value to such a list.
//!
//! Fields a table does not mention are ignored. A value missing from a lookup is an
//! error, never a silent default: it means the mapping has to be extended.

pub mod vocabulary;

use std::collections::HashSet;

use crate::models::SourceRow;

pub use vocabulary::MappingSet;

/// Errors raised while building or applying a mapping table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Source value has no entry in a value lookup
    #[error("Missing a mapping for '{field}.{value}'")]
    UnmappedVocabulary { field: String, value: String },

    /// Field declared twice in one table
    #[error("Mapping table '{table}' declares field '{field}' more than once")]
    DuplicateField { table: String, field: String },

    /// Lookup value declared twice for one field
    #[error("Mapping table '{table}' declares value '{value}' of field '{field}' more than once")]
    DuplicateValue {
        table: String,
        field: String,
        value: String,
    },

    /// Lookup value with surrounding whitespace can never match a trimmed input
    #[error("Mapping table '{table}' has untrimmed lookup value '{value}' for field '{field}'")]
    UntrimmedLookupValue {
        table: String,
        field: String,
        value: String,
    },

    /// Directive without a target column
    #[error("Mapping table '{table}' has a directive without target column for field '{field}'")]
    EmptyTargetKey { table: String, field: String },
}

/// What to emit for one target column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Emit the raw source value under `key`
    Copy { key: String },
    /// Emit a fixed literal under `key`
    Substitute { key: String, value: String },
    /// Emit nothing
    Suppress,
}

impl Directive {
    pub fn copy(key: impl Into<String>) -> Self {
        Directive::Copy { key: key.into() }
    }

    pub fn substitute(key: impl Into<String>, value: impl Into<String>) -> Self {
        Directive::Substitute {
            key: key.into(),
            value: value.into(),
        }
    }

    fn target_key(&self) -> Option<&str> {
        match self {
            Directive::Copy { key } | Directive::Substitute { key, .. } => Some(key),
            Directive::Suppress => None,
        }
    }

    /// Resolve against the raw source value
    fn resolve(&self, raw: &str) -> Option<(String, String)> {
        match self {
            Directive::Copy { key } => Some((key.clone(), raw.to_string())),
            Directive::Substitute { key, value } => Some((key.clone(), value.clone())),
            Directive::Suppress => None,
        }
    }
}

/// Rule for one source field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Applied to any non-empty value
    Always(Vec<Directive>),
    /// Selected by exact trimmed value, in declaration order
    ByValue(Vec<(String, Vec<Directive>)>),
}

impl FieldRule {
    fn directives_for(&self, field: &str, raw: &str) -> Result<&[Directive], MappingError> {
        match self {
            FieldRule::Always(directives) => Ok(directives.as_slice()),
            FieldRule::ByValue(entries) => {
                let trimmed = raw.trim();
                entries
                    .iter()
                    .find(|(value, _)| value == trimmed)
                    .map(|(_, directives)| directives.as_slice())
                    .ok_or_else(|| MappingError::UnmappedVocabulary {
                        field: field.to_string(),
                        value: raw.to_string(),
                    })
            }
        }
    }
}

/// A validated, immutable mapping table for one target table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    name: String,
    rules: Vec<(String, FieldRule)>,
}

impl MappingTable {
    /// Start building a table
    pub fn builder(name: impl Into<String>) -> MappingTableBuilder {
        MappingTableBuilder {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rule for a source field, if the table maps it
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    /// Source fields this table maps, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    /// Map one source field/value to zero or more `(column, value)` pairs.
    ///
    /// Blank values and unknown fields contribute nothing. Suppress directives are
    /// dropped; copy directives carry the raw value as given.
    pub fn apply(&self, field: &str, raw: &str) -> Result<Vec<(String, String)>, MappingError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let Some(rule) = self.rule(field) else {
            return Ok(Vec::new());
        };

        let directives = rule.directives_for(field, raw)?;
        Ok(directives.iter().filter_map(|d| d.resolve(raw)).collect())
    }

    /// Map every field of a row, in row order then directive order.
    pub fn project(&self, row: &SourceRow) -> Result<Vec<(String, String)>, MappingError> {
        let mut projected = Vec::new();
        for (field, value) in row.iter() {
            projected.extend(self.apply(field, value)?);
        }
        Ok(projected)
    }
}

/// Builder for [`MappingTable`]; structural errors surface in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct MappingTableBuilder {
    name: String,
    rules: Vec<(String, FieldRule)>,
}

impl MappingTableBuilder {
    /// Apply `directives` to any value of `field`
    pub fn always(mut self, field: impl Into<String>, directives: Vec<Directive>) -> Self {
        self.rules.push((field.into(), FieldRule::Always(directives)));
        self
    }

    /// Select directives by exact value of `field`
    pub fn lookup<I, V>(mut self, field: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (V, Vec<Directive>)>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(v, d)| (v.into(), d)).collect();
        self.rules.push((field.into(), FieldRule::ByValue(entries)));
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<MappingTable, MappingError> {
        let mut seen_fields = HashSet::new();
        for (field, rule) in &self.rules {
            if !seen_fields.insert(field.as_str()) {
                return Err(MappingError::DuplicateField {
                    table: self.name.clone(),
                    field: field.clone(),
                });
            }

            let directive_lists: Vec<&Vec<Directive>> = match rule {
                FieldRule::Always(directives) => vec![directives],
                FieldRule::ByValue(entries) => {
                    let mut seen_values = HashSet::new();
                    for (value, _) in entries {
                        if value.trim() != value {
                            return Err(MappingError::UntrimmedLookupValue {
                                table: self.name.clone(),
                                field: field.clone(),
                                value: value.clone(),
                            });
                        }
                        if !seen_values.insert(value.as_str()) {
                            return Err(MappingError::DuplicateValue {
                                table: self.name.clone(),
                                field: field.clone(),
                                value: value.clone(),
                            });
                        }
                    }
                    entries.iter().map(|(_, d)| d).collect()
                }
            };

            let empty_key = directive_lists
                .iter()
                .flat_map(|list| list.iter())
                .any(|d| d.target_key().is_some_and(str::is_empty));
            if empty_key {
                return Err(MappingError::EmptyTargetKey {
                    table: self.name.clone(),
                    field: field.clone(),
                });
            }
        }

        Ok(MappingTable {
            name: self.name,
            rules: self.rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material_table() -> MappingTable {
        MappingTable::builder("test")
            .always("inventoryNumber", vec![Directive::copy("Katalognummer")])
            .lookup(
                "conditionLabel",
                [
                    ("complete", vec![Directive::substitute("Erhaltung", "vollständig")]),
                    (
                        "reconstructed",
                        vec![
                            Directive::substitute("Erhaltung", "fragmentiert"),
                            Directive::substitute("Bearbeitungen", "ergänzt"),
                        ],
                    ),
                    ("unclassified", vec![Directive::Suppress]),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_blank_value_contributes_nothing() {
        let table = material_table();
        assert!(table.apply("conditionLabel", "").unwrap().is_empty());
        assert!(table.apply("conditionLabel", "   ").unwrap().is_empty());
        assert!(table.apply("inventoryNumber", "\t").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let table = material_table();
        assert!(table.apply("colourLabel", "red").unwrap().is_empty());
    }

    #[test]
    fn test_copy_keeps_raw_value() {
        let table = material_table();
        assert_eq!(
            table.apply("inventoryNumber", " X12 ").unwrap(),
            vec![("Katalognummer".to_string(), " X12 ".to_string())]
        );
    }

    #[test]
    fn test_lookup_matches_trimmed_value() {
        let table = material_table();
        assert_eq!(
            table.apply("conditionLabel", " reconstructed ").unwrap(),
            vec![
                ("Erhaltung".to_string(), "fragmentiert".to_string()),
                ("Bearbeitungen".to_string(), "ergänzt".to_string()),
            ]
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = material_table();
        let err = table.apply("conditionLabel", "Complete").unwrap_err();
        assert_eq!(
            err,
            MappingError::UnmappedVocabulary {
                field: "conditionLabel".to_string(),
                value: "Complete".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Missing a mapping for 'conditionLabel.Complete'"
        );
    }

    #[test]
    fn test_suppress_emits_nothing() {
        let table = material_table();
        assert!(table.apply("conditionLabel", "unclassified").unwrap().is_empty());
    }

    #[test]
    fn test_project_follows_row_order() {
        let table = material_table();
        let row = SourceRow::from_pairs([
            ("conditionLabel", "complete"),
            ("objectLabel", "bowl"),
            ("inventoryNumber", "X12"),
        ]);
        let projected = table.project(&row).unwrap();
        assert_eq!(
            projected,
            vec![
                ("Erhaltung".to_string(), "vollständig".to_string()),
                ("Katalognummer".to_string(), "X12".to_string()),
            ]
        );
        assert_eq!(projected, table.project(&row).unwrap());
    }

    #[test]
    fn test_build_rejects_duplicate_field() {
        let err = MappingTable::builder("dup")
            .always("a", vec![Directive::copy("A")])
            .always("a", vec![Directive::copy("B")])
            .build()
            .unwrap_err();
        assert!(matches!(err, MappingError::DuplicateField { .. }));
    }

    #[test]
    fn test_build_rejects_duplicate_value() {
        let err = MappingTable::builder("dup")
            .lookup(
                "a",
                [
                    ("x", vec![Directive::copy("A")]),
                    ("x", vec![Directive::copy("B")]),
                ],
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, MappingError::DuplicateValue { .. }));
    }

    #[test]
    fn test_build_rejects_untrimmed_value_and_empty_key() {
        let err = MappingTable::builder("t")
            .lookup("a", [(" x", vec![Directive::copy("A")])])
            .build()
            .unwrap_err();
        assert!(matches!(err, MappingError::UntrimmedLookupValue { .. }));

        let err = MappingTable::builder("t")
            .always("a", vec![Directive::substitute("", "v")])
            .build()
            .unwrap_err();
        assert!(matches!(err, MappingError::EmptyTargetKey { .. }));
    }
}
