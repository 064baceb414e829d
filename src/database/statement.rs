//! INSERT and DELETE statements for the Arachne tables
//!
//! Statements carry their values separately from the SQL text. Every backend binds
//! values as parameters; only the audit rendering ever inlines them.

use super::{DatabaseError, DatabaseResult};
use crate::models::{AttributeList, AttributeValue};
use crate::validation::input::{sanitize_sql_identifier, validate_column_name, validate_table_name};

/// SQL flavour a statement is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    /// Human-readable form used in logs and dry runs (`%s` placeholders)
    Audit,
    /// `$n` placeholders with explicit casts
    Postgres,
    /// `?` placeholders
    DuckDb,
}

impl SqlDialect {
    fn identifier(self, name: &str) -> String {
        match self {
            SqlDialect::Audit => name.to_string(),
            SqlDialect::Postgres => sanitize_sql_identifier(name, "postgres"),
            SqlDialect::DuckDb => sanitize_sql_identifier(name, "duckdb"),
        }
    }

    fn placeholder(self, index: usize, value: &AttributeValue) -> String {
        match self {
            SqlDialect::Audit => "%s".to_string(),
            SqlDialect::Postgres => match value {
                AttributeValue::Integer(_) => format!("${}::bigint", index),
                AttributeValue::Text(_) => format!("${}::text", index),
            },
            SqlDialect::DuckDb => "?".to_string(),
        }
    }
}

fn validate_table(table: &str) -> DatabaseResult<()> {
    validate_table_name(table)
        .map_err(|e| DatabaseError::InvalidStatement(format!("table '{}': {}", table, e)))
}

fn validate_column(table: &str, column: &str) -> DatabaseResult<()> {
    validate_column_name(column).map_err(|e| {
        DatabaseError::InvalidStatement(format!("column '{}.{}': {}", table, column, e))
    })
}

/// A parameterized INSERT of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: String,
    attributes: AttributeList,
    returning: Option<String>,
}

impl InsertStatement {
    /// Build an insert, validating the table and every column name.
    pub fn new(table: impl Into<String>, attributes: AttributeList) -> DatabaseResult<Self> {
        let table = table.into();
        validate_table(&table)?;
        if attributes.is_empty() {
            return Err(DatabaseError::InvalidStatement(format!(
                "insert into '{}' has no columns",
                table
            )));
        }
        for column in attributes.keys() {
            validate_column(&table, column)?;
        }

        Ok(Self {
            table,
            attributes,
            returning: None,
        })
    }

    /// Ask the backend for the generated key in `column`
    pub fn returning(mut self, column: impl Into<String>) -> DatabaseResult<Self> {
        let column = column.into();
        validate_column(&self.table, &column)?;
        self.returning = Some(column);
        Ok(self)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    pub fn returning_column(&self) -> Option<&str> {
        self.returning.as_deref()
    }

    /// Values in placeholder order
    pub fn params(&self) -> Vec<&AttributeValue> {
        self.attributes.values().collect()
    }

    /// Render the statement text with placeholders.
    ///
    /// The audit form never has a `RETURNING` clause.
    pub fn to_sql(&self, dialect: SqlDialect) -> String {
        let columns: Vec<String> = self
            .attributes
            .keys()
            .map(|c| dialect.identifier(c))
            .collect();
        let placeholders: Vec<String> = self
            .attributes
            .values()
            .enumerate()
            .map(|(i, v)| dialect.placeholder(i + 1, v))
            .collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            dialect.identifier(&self.table),
            columns.join(", "),
            placeholders.join(", ")
        );

        if dialect != SqlDialect::Audit
            && let Some(column) = &self.returning
        {
            sql.push_str(" RETURNING ");
            sql.push_str(&dialect.identifier(column));
            if dialect == SqlDialect::Postgres {
                sql.push_str("::bigint");
            }
        }
        sql
    }

    /// The audit form with every value inlined in double quotes.
    ///
    /// For display only; values are not escaped.
    pub fn render_substituted(&self) -> String {
        let columns: Vec<&str> = self.attributes.keys().collect();
        let values: Vec<String> = self
            .attributes
            .values()
            .map(|v| format!("\"{}\"", v))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            values.join(", ")
        )
    }
}

/// Row filter of a [`DeleteStatement`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteCondition {
    /// `column = value`
    Equals { column: String, value: String },
    /// `column LIKE prefix%`, with LIKE wildcards in the prefix escaped
    StartsWith { column: String, prefix: String },
    /// `column IN (SELECT parent_key FROM parent_table WHERE marker_column = marker)`
    ParentIn {
        column: String,
        parent_table: String,
        parent_key: String,
        marker_column: String,
        marker: String,
    },
}

impl DeleteCondition {
    fn identifiers(&self) -> Vec<&str> {
        match self {
            DeleteCondition::Equals { column, .. } | DeleteCondition::StartsWith { column, .. } => {
                vec![column.as_str()]
            }
            DeleteCondition::ParentIn {
                column,
                parent_key,
                marker_column,
                ..
            } => vec![column.as_str(), parent_key.as_str(), marker_column.as_str()],
        }
    }

    fn param(&self) -> String {
        match self {
            DeleteCondition::Equals { value, .. } => value.clone(),
            DeleteCondition::StartsWith { prefix, .. } => format!("{}%", escape_like(prefix)),
            DeleteCondition::ParentIn { marker, .. } => marker.clone(),
        }
    }
}

fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A single-parameter DELETE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStatement {
    table: String,
    condition: DeleteCondition,
}

impl DeleteStatement {
    pub fn new(table: impl Into<String>, condition: DeleteCondition) -> DatabaseResult<Self> {
        let table = table.into();
        validate_table(&table)?;
        for column in condition.identifiers() {
            validate_column(&table, column)?;
        }
        if let DeleteCondition::ParentIn { parent_table, .. } = &condition {
            validate_table(parent_table)?;
        }
        Ok(Self { table, condition })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn condition(&self) -> &DeleteCondition {
        &self.condition
    }

    /// The bound value (a LIKE pattern for prefix conditions)
    pub fn param(&self) -> String {
        self.condition.param()
    }

    pub fn to_sql(&self, dialect: SqlDialect) -> String {
        let placeholder = match dialect {
            SqlDialect::Audit => "%s",
            SqlDialect::Postgres => "$1::text",
            SqlDialect::DuckDb => "?",
        };
        let id = |name: &str| dialect.identifier(name);

        let filter = match &self.condition {
            DeleteCondition::Equals { column, .. } => format!("{} = {}", id(column), placeholder),
            DeleteCondition::StartsWith { column, .. } => {
                format!("{} LIKE {} ESCAPE '\\'", id(column), placeholder)
            }
            DeleteCondition::ParentIn {
                column,
                parent_table,
                parent_key,
                marker_column,
                ..
            } => format!(
                "{} IN (SELECT {} FROM {} WHERE {} = {})",
                id(column),
                id(parent_key),
                id(parent_table),
                id(marker_column),
                placeholder
            ),
        };

        format!("DELETE FROM {} WHERE {}", id(&self.table), filter)
    }

    /// Audit form with the parameter inlined in double quotes
    pub fn render_substituted(&self) -> String {
        self.to_sql(SqlDialect::Audit)
            .replacen("%s", &format!("\"{}\"", self.param()), 1)
    }
}
