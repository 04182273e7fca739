//! Registry file discovery and loading.
//!
//! The registry is a single YAML file. It is taken from `--config` (or
//! `CAMPFIRE_CONFIG`) when given, otherwise from the user's config directory.

use crate::config::schema::AppRegistry;
use crate::config::validator::validate;
use crate::error::{CampfireError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default registry location: `~/.config/campfire/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("campfire").join("config.yml"))
}

/// Load a registry file and parse it into [`AppRegistry`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<AppRegistry> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CampfireError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CampfireError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`AppRegistry`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<AppRegistry> {
    // An empty file is an empty registry, not a parse error.
    if content.trim().is_empty() {
        return Ok(AppRegistry::default());
    }

    let parse_error = |e: serde_yaml::Error| CampfireError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    };

    let mut document: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    document.apply_merge().map_err(parse_error)?;
    serde_yaml::from_value(document).map_err(parse_error)
}

/// Load and validate the registry, with optional path override.
///
/// # Errors
///
/// Returns `ConfigNotFound` when no override is given and no default
/// location can be determined, plus any error from [`load_config_file`]
/// or validation.
pub fn load_config(config_override: Option<&Path>) -> Result<AppRegistry> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| CampfireError::ConfigNotFound {
            path: PathBuf::from("campfire/config.yml"),
        })?,
    };

    tracing::debug!("Loading app registry from {}", path.display());

    let registry = load_config_file(&path)?;
    validate(&registry)?;
    Ok(registry)
}
