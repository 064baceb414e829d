//! Input validation and sanitization utilities.
//!
//! # Security
//!
//! Input validation prevents:
//! - SQL injection via malicious table/column names in generated statements
//! - Path traversal via object identifiers used as directory and file names
//! - Buffer overflows via excessively long inputs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length for table names
pub const MAX_TABLE_NAME_LENGTH: usize = 255;

/// Maximum length for column names
pub const MAX_COLUMN_NAME_LENGTH: usize = 255;

/// Maximum length for ARS3D object identifiers
pub const MAX_OBJECT_IDENTIFIER_LENGTH: usize = 255;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),

    /// Input is a reserved word
    #[error("{field} cannot be a reserved word: {word}")]
    ReservedWord { field: &'static str, word: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shared rules for SQL identifiers: non-empty, bounded, starts with a letter
/// or underscore, then letters, digits and underscores only.
fn validate_identifier(field: &'static str, name: &str, max: usize) -> ValidationResult<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(ValidationError::Empty(field));
    };

    if name.len() > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: name.len(),
        });
    }

    if !first_char.is_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidFormat(
            field,
            "must start with a letter or underscore".to_string(),
        ));
    }

    if let Some(c) = name.chars().find(|c| !c.is_alphanumeric() && *c != '_') {
        return Err(ValidationError::InvalidCharacters {
            field,
            reason: format!("invalid character: '{}'", c),
        });
    }

    if is_sql_reserved_word(name) {
        return Err(ValidationError::ReservedWord {
            field,
            word: name.to_string(),
        });
    }

    Ok(())
}

/// Validate a table name.
///
/// # Examples
///
/// ```
/// use ars3d_import::validation::input::validate_table_name;
///
/// assert!(validate_table_name("objekt").is_ok());
/// assert!(validate_table_name("URI").is_ok());
/// assert!(validate_table_name("").is_err());
/// assert!(validate_table_name("objekt; DROP TABLE objekt").is_err());
/// ```
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    validate_identifier("table name", name, MAX_TABLE_NAME_LENGTH)
}

/// Validate a column name.
///
/// # Examples
///
/// ```
/// use ars3d_import::validation::input::validate_column_name;
///
/// assert!(validate_column_name("FS_ObjektID").is_ok());
/// assert!(validate_column_name("select").is_err());
/// assert!(validate_column_name("1abc").is_err());
/// ```
pub fn validate_column_name(name: &str) -> ValidationResult<()> {
    validate_identifier("column name", name, MAX_COLUMN_NAME_LENGTH)
}

/// Validate an ARS3D object identifier.
///
/// The identifier names a directory in the model store, a cache file and a URL
/// path segment, so separators, leading dots and control characters are rejected.
///
/// # Examples
///
/// ```
/// use ars3d_import::validation::input::validate_object_identifier;
///
/// assert!(validate_object_identifier("5f1c0b9e-2a49-4e0f-9a51-7c1c4f7d2e10").is_ok());
/// assert!(validate_object_identifier("../etc").is_err());
/// assert!(validate_object_identifier("a/b").is_err());
/// ```
pub fn validate_object_identifier(id: &str) -> ValidationResult<()> {
    const FIELD: &str = "object identifier";

    if id.trim().is_empty() {
        return Err(ValidationError::Empty(FIELD));
    }

    if id.len() > MAX_OBJECT_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            field: FIELD,
            max: MAX_OBJECT_IDENTIFIER_LENGTH,
            actual: id.len(),
        });
    }

    if id.starts_with('.') {
        return Err(ValidationError::InvalidFormat(
            FIELD,
            "must not start with a dot".to_string(),
        ));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !c.is_alphanumeric() && !matches!(c, '-' | '_' | '.'))
    {
        return Err(ValidationError::InvalidCharacters {
            field: FIELD,
            reason: format!("invalid character: '{}'", c),
        });
    }

    Ok(())
}

/// Sanitize a SQL identifier by quoting it.
///
/// # Examples
///
/// ```
/// use ars3d_import::validation::input::sanitize_sql_identifier;
///
/// assert_eq!(sanitize_sql_identifier("objekt", "postgres"), "\"objekt\"");
/// assert_eq!(sanitize_sql_identifier("objekt", "mysql"), "`objekt`");
/// ```
pub fn sanitize_sql_identifier(name: &str, dialect: &str) -> String {
    let quote_char = match dialect.to_lowercase().as_str() {
        "mysql" | "mariadb" => '`',
        _ => '"',
    };

    let escaped = name.replace(quote_char, &format!("{}{}", quote_char, quote_char));
    format!("{}{}{}", quote_char, escaped, quote_char)
}

/// Check if a word is a SQL reserved word.
///
/// This is a basic check covering common reserved words across SQL dialects.
fn is_sql_reserved_word(word: &str) -> bool {
    const RESERVED_WORDS: &[&str] = &[
        "select", "from", "where", "insert", "update", "delete", "create", "drop", "alter",
        "table", "index", "view", "database", "schema", "grant", "revoke", "commit",
        "rollback", "begin", "end", "transaction", "primary", "foreign", "key", "references",
        "constraint", "unique", "check", "default", "not", "null", "and", "or", "in",
        "between", "like", "is", "case", "when", "then", "else", "as", "on", "join", "union",
        "all", "distinct", "values", "set", "into", "returning", "true", "false",
    ];

    let lower = word.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arachne_identifiers_are_valid() {
        for table in ["objekt", "ortsbezug", "datierung", "objektkeramik", "URI", "modell3d"] {
            assert!(validate_table_name(table).is_ok(), "{}", table);
        }
        for column in ["KurzbeschreibungObjekt", "GefaessformenKeramik", "DateinameMTL"] {
            assert!(validate_column_name(column).is_ok(), "{}", column);
        }
    }

    #[test]
    fn test_column_name_rejects_injection() {
        assert!(matches!(
            validate_column_name("a\"b"),
            Err(ValidationError::InvalidCharacters { .. })
        ));
        assert!(matches!(
            validate_column_name("Values"),
            Err(ValidationError::ReservedWord { .. })
        ));
        assert_eq!(
            validate_column_name(""),
            Err(ValidationError::Empty("column name"))
        );
    }

    #[test]
    fn test_object_identifier_rules() {
        assert!(validate_object_identifier("abc_123.v2").is_ok());
        assert!(validate_object_identifier(" ").is_err());
        assert!(validate_object_identifier(".hidden").is_err());
        assert!(validate_object_identifier("a\\b").is_err());
        assert!(validate_object_identifier(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_sanitize_escapes_quotes() {
        assert_eq!(sanitize_sql_identifier("a\"b", "duckdb"), "\"a\"\"b\"");
    }
}
