//! CLI-specific error types

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::database::DatabaseError;
use crate::enrich::MetadataError;
use crate::import::SourceError;
use crate::mapping::MappingError;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mapping tables are invalid: {0}")]
    Mapping(#[from] MappingError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Portal error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("{0} row(s) failed to migrate")]
    RowsFailed(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(String),
}
