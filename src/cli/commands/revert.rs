//! `revert`: delete everything an import run wrote

use std::path::PathBuf;

use super::{load_config, open_backend, runtime};
use crate::cli::error::CliError;
use crate::config::DatabaseBackendType;
use crate::database::reversal_statements;

/// Revert command arguments
#[derive(Debug, Clone)]
pub struct RevertArgs {
    pub dry_run: bool,
    pub config: Option<PathBuf>,
    pub backend: Option<DatabaseBackendType>,
}

/// Execute the reversal statements in order; returns the deleted row count.
pub fn handle_revert(args: &RevertArgs) -> Result<u64, CliError> {
    let (mut config, base_dir) = load_config(args.config.as_deref())?;
    if let Some(backend) = args.backend {
        config.database.backend = backend;
    }

    let statements = reversal_statements(
        &config.import,
        &config.models,
        &config.database.object_id_column,
    )?;

    let rt = runtime()?;
    rt.block_on(async {
        let backend = open_backend(&config, &base_dir, args.dry_run).await?;
        let mut total = 0;
        for statement in &statements {
            let deleted = backend.delete(statement).await?;
            tracing::info!("Deleted {} rows from {}", deleted, statement.table());
            total += deleted;
        }
        Ok::<_, CliError>(total)
    })
}
