//! CLI command implementations

pub mod config;
pub mod migrate;
pub mod revert;

use std::path::{Path, PathBuf};

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, DatabaseBackendType, MigrationConfig};
use crate::database::{DatabaseBackend, DryRunBackend};

/// Load the config file (defaults when absent) and the directory relative paths
/// in it are resolved against.
pub(crate) fn load_config(path: Option<&Path>) -> Result<(MigrationConfig, PathBuf), CliError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
    }
    let config = MigrationConfig::load(&path)?;

    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((config, base_dir))
}

/// Open the backend selected by config and flags.
///
/// Dry runs never touch a database; their statements are printed to stdout.
pub(crate) async fn open_backend(
    config: &MigrationConfig,
    base_dir: &Path,
    dry_run: bool,
) -> Result<Box<dyn DatabaseBackend>, CliError> {
    if dry_run {
        return Ok(Box::new(DryRunBackend::echoing()));
    }

    match config.database.backend {
        DatabaseBackendType::DuckDB => {
            #[cfg(feature = "duckdb-backend")]
            {
                let db_path = config.get_duckdb_path(base_dir);
                tracing::info!("Opening DuckDB database {}", db_path.display());
                let backend = crate::database::DuckDBBackend::new(&db_path)?;
                backend.initialize()?;
                Ok(Box::new(backend))
            }
            #[cfg(not(feature = "duckdb-backend"))]
            {
                let _ = base_dir;
                Err(crate::database::DatabaseError::BackendUnavailable(
                    "DuckDB support not compiled in (feature duckdb-backend)".to_string(),
                )
                .into())
            }
        }
        DatabaseBackendType::Postgres => {
            #[cfg(feature = "postgres-backend")]
            {
                let conn_str = config.get_postgres_connection_string().ok_or_else(|| {
                    CliError::InvalidArgument(
                        "PostgreSQL connection string not configured".to_string(),
                    )
                })?;
                let backend = crate::database::PostgresBackend::new(conn_str).await?;
                tracing::info!("Connected to {}", backend.connection_string_masked());
                Ok(Box::new(backend))
            }
            #[cfg(not(feature = "postgres-backend"))]
            {
                Err(crate::database::DatabaseError::BackendUnavailable(
                    "PostgreSQL support not compiled in (feature postgres-backend)".to_string(),
                )
                .into())
            }
        }
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::IoError(format!("Failed to create runtime: {}", e)))
}
