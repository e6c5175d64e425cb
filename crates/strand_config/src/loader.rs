//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::StrandConfig;
use std::path::{Path, PathBuf};

/// The configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "strand.toml";

/// Upper bound on the per-level trace indent.
const MAX_INDENT: usize = 16;

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<StrandConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<StrandConfig, ConfigError> {
    let config: StrandConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Returns `<dir>/strand.toml` if it exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Loads the explicit configuration if given, else `strand.toml` from `dir`
/// if present, else the defaults.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<StrandConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => match find_config(dir) {
            Some(path) => load_config(&path),
            None => Ok(StrandConfig::default()),
        },
    }
}

/// Validates that configuration values are usable.
fn validate_config(config: &StrandConfig) -> Result<(), ConfigError> {
    if config.report.cell_types.is_empty() {
        return Err(ConfigError::invalid(
            "report.cell_types",
            "must list at least one prefix",
        ));
    }
    if config.trace.indent > MAX_INDENT {
        return Err(ConfigError::invalid(
            "trace.indent",
            format!("must be at most {MAX_INDENT}"),
        ));
    }
    if config.mappings.limit == 0 {
        return Err(ConfigError::invalid("mappings.limit", "must be positive"));
    }
    Ok(())
}
