//! Source rows read from the ARS3D export

use serde::{Deserialize, Serialize};

/// Column holding the ARS3D object identifier.
pub const OBJECT_FIELD: &str = "object";

/// Column holding the free-text object label.
pub const OBJECT_LABEL_FIELD: &str = "objectLabel";

/// One object from the ARS3D export.
///
/// Field order follows the CSV header and is preserved, because the projected
/// attribute order (and therefore the generated SQL text) depends on it.
/// Empty values mean "no data".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRow {
    fields: Vec<(String, String)>,
}

impl SourceRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(field, value)` pairs.
    ///
    /// A repeated field keeps its first position and its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (field, value) in pairs {
            row.insert(field, value);
        }
        row
    }

    fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Value of a field, if the column exists
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a field, or the empty string when the column is absent
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// The ARS3D object identifier (`object` column)
    pub fn object_id(&self) -> Option<&str> {
        self.get(OBJECT_FIELD)
    }

    /// Iterate fields in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
