//! ARS3D → Arachne import
//!
//! Migrates archaeological objects exported from the ARS3D portal (a CSV file plus
//! one JSON metadata document per object) into the Arachne relational schema:
//! - Controlled-vocabulary mapping of source fields to Arachne columns
//! - Per-table record builders, including 3D model records with portal metadata
//! - Dependent inserts through a dry-run, DuckDB or PostgreSQL backend
//! - Reversal of a previous import

pub mod builders;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod database;
pub mod enrich;
pub mod import;
pub mod mapping;
pub mod models;
pub mod validation;

pub use builders::{BuildError, RowContext};
pub use config::{ConfigError, MigrationConfig};
pub use database::{DatabaseBackend, DatabaseError, DryRunBackend, InsertStatement};
pub use enrich::{HttpMetadataSource, MetadataEnricher, MetadataError, MetadataSource};
pub use import::{
    CsvRowSource, FailurePolicy, MigrationError, MigrationReport, MigrationRun, Migrator,
    RowError, RowOutcome, SourceError,
};
pub use mapping::{Directive, FieldRule, MappingError, MappingSet, MappingTable};
pub use models::{AttributeList, AttributeValue, SourceRow};
