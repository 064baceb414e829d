//! `migrate`: import an ARS3D export

use std::path::PathBuf;

use super::{load_config, open_backend, runtime};
use crate::cli::error::CliError;
use crate::config::DatabaseBackendType;
use crate::enrich::{HttpMetadataSource, MetadataEnricher};
use crate::import::{CsvRowSource, FailurePolicy, MigrationReport, MigrationRun, Migrator};
use crate::mapping::MappingSet;

/// Migrate command arguments
#[derive(Debug, Clone)]
pub struct MigrateArgs {
    /// Semicolon-delimited export from the ARS3D portal
    pub objects_csv: PathBuf,
    /// Print statements instead of executing them
    pub dry_run: bool,
    /// Config file (defaults to ./ars3d-import.toml)
    pub config: Option<PathBuf>,
    /// Overrides `[models] model_dir`
    pub model_dir: Option<PathBuf>,
    /// Overrides `[portal] cache_dir`
    pub portal_dir: Option<PathBuf>,
    /// Overrides `[database] backend`
    pub backend: Option<DatabaseBackendType>,
    /// Continue with the next row after a failure
    pub keep_going: bool,
}

/// Run the migration; fails when any row failed.
pub fn handle_migrate(args: &MigrateArgs) -> Result<MigrationReport, CliError> {
    if !args.objects_csv.exists() {
        return Err(CliError::FileNotFound(args.objects_csv.clone()));
    }

    let (mut config, base_dir) = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.model_dir {
        config.models.model_dir = dir.clone();
    }
    if let Some(dir) = &args.portal_dir {
        config.portal.cache_dir = Some(dir.clone());
    }
    if let Some(backend) = args.backend {
        config.database.backend = backend;
    }

    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Halt
    };

    let source = Box::new(HttpMetadataSource::new(&config.portal)?);
    let enricher = MetadataEnricher::new(source, config.portal.cache_dir.clone());
    let rows = CsvRowSource::from_path(&args.objects_csv)?;

    let rt = runtime()?;
    let report = rt.block_on(async {
        let backend = open_backend(&config, &base_dir, args.dry_run).await?;
        let migrator = Migrator::new(MappingSet::standard()?, config.clone(), enricher);
        let report = MigrationRun::new(&migrator, policy)
            .execute(backend.as_ref(), rows)
            .await;
        Ok::<_, CliError>(report)
    })?;

    eprintln!("{}", report.summary());

    if report.is_success() {
        Ok(report)
    } else {
        Err(CliError::RowsFailed(report.failures.len()))
    }
}
