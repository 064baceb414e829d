//! `init-config`: write a sample configuration file

use std::path::{Path, PathBuf};

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, sample_config};

/// Write the sample config to `path` (or `./ars3d-import.toml`).
///
/// Existing files are left alone unless `force` is set.
pub fn handle_init_config(path: Option<&Path>, force: bool) -> Result<PathBuf, CliError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if path.exists() && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigrationConfig;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ars3d-import.toml");

        handle_init_config(Some(&path), false).unwrap();
        let parsed = MigrationConfig::parse(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, MigrationConfig::default());

        assert!(handle_init_config(Some(&path), false).is_err());
        assert!(handle_init_config(Some(&path), true).is_ok());
    }
}
