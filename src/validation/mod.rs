//! Validation functionality
//!
//! Input validation and sanitization for values that end up in SQL text,
//! file system paths or URLs.

pub mod input;

pub use input::{
    ValidationError, ValidationResult, sanitize_sql_identifier, validate_column_name,
    validate_object_identifier, validate_table_name,
};
