//! CLI binary entry point for ars3d-import

#[cfg(feature = "cli")]
use ars3d_import::cli::commands::config::handle_init_config;
#[cfg(feature = "cli")]
use ars3d_import::cli::commands::migrate::{MigrateArgs, handle_migrate};
#[cfg(feature = "cli")]
use ars3d_import::cli::commands::revert::{RevertArgs, handle_revert};
#[cfg(feature = "cli")]
use ars3d_import::config::DatabaseBackendType;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "ars3d-import")]
#[command(about = "Migrate ARS3D objects into the Arachne database")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG is ignored)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Import objects from an ARS3D CSV export
    Migrate {
        /// CSV file with object data from the ARS3D portal
        objects_csv: PathBuf,
        /// Print the SQL instead of executing it
        #[arg(long)]
        dry_run: bool,
        /// Config file (default: ./ars3d-import.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory to check for 3D model files
        #[arg(long)]
        model_dir: Option<PathBuf>,
        /// Directory with <id>.json files used as a cache for portal queries
        #[arg(long)]
        portal_dir: Option<PathBuf>,
        /// Database backend (duckdb or postgres)
        #[arg(long)]
        backend: Option<DatabaseBackendType>,
        /// Continue with the next row when a row fails
        #[arg(long)]
        keep_going: bool,
    },
    /// Delete all records written by previous imports
    Revert {
        /// Print the SQL instead of executing it
        #[arg(long)]
        dry_run: bool,
        /// Config file (default: ./ars3d-import.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Database backend (duckdb or postgres)
        #[arg(long)]
        backend: Option<DatabaseBackendType>,
    },
    /// Write a sample configuration file
    InitConfig {
        /// Target path (default: ./ars3d-import.toml)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Migrate {
            objects_csv,
            dry_run,
            config,
            model_dir,
            portal_dir,
            backend,
            keep_going,
        } => {
            let args = MigrateArgs {
                objects_csv,
                dry_run,
                config,
                model_dir,
                portal_dir,
                backend,
                keep_going,
            };
            handle_migrate(&args).map(|_| ())
        }
        Commands::Revert {
            dry_run,
            config,
            backend,
        } => {
            let args = RevertArgs {
                dry_run,
                config,
                backend,
            };
            handle_revert(&args).map(|deleted| eprintln!("Deleted {} rows", deleted))
        }
        Commands::InitConfig { path, force } => handle_init_config(path.as_deref(), force)
            .map(|path| eprintln!("Wrote {}", path.display())),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
