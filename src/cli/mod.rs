//! Command-line interface for the ARS3D import

pub mod commands;
pub mod error;

pub use error::CliError;
