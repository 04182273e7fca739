//! App registry loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use campfire::config::{load_config_file, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(
//!     &path,
//!     "apps:\n  - name: rbac\n    host: github\n    repo: org/rbac\n    path: deploy.yml\n",
//! )
//! .unwrap();
//!
//! let registry = load_config_file(&path).unwrap();
//! validate(&registry).unwrap();
//! assert!(registry.get("rbac").is_some());
//! ```
//!
//! # Registry File Location
//!
//! 1. `--config PATH` or `CAMPFIRE_CONFIG`
//! 2. `~/.config/campfire/config.yml`

pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{
    format_env_name, AppRegistry, AppSpec, GithubSettings, GitlabSettings, Host, Settings,
    DEFAULT_ENV_NAME_FORMAT, ENV_NAME_FORMAT_VAR,
};

// Loader re-exports
pub use loader::{default_config_path, load_config, load_config_file, parse_config};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};
