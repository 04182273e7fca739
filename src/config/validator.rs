//! Registry validation rules.
//!
//! Raw registry data is checked once, where it enters the system:
//! - App names must be unique and non-empty
//! - Hosts must be `github` or `gitlab`
//! - `repo` must have exactly two segments
//! - `path` must not be empty

use crate::config::schema::AppRegistry;
use crate::error::{CampfireError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// App name if error is app-specific
    pub app: Option<String>,
}

/// Validate a registry and return all errors.
///
/// All errors are collected rather than stopping at the first one, so
/// several mistakes can be fixed in one pass.
pub fn validate_config(registry: &AppRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for app in &registry.apps {
        if app.name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "missing-name".to_string(),
                message: format!("App with repo '{}' has no name", app.repo),
                app: None,
            });
            continue;
        }

        if !seen.insert(app.name.as_str()) {
            errors.push(ValidationError {
                rule: "duplicate-app".to_string(),
                message: format!("App '{}' is declared more than once", app.name),
                app: Some(app.name.clone()),
            });
        }

        if let Err(e) = app.host() {
            errors.push(ValidationError {
                rule: "unknown-host".to_string(),
                message: e.to_string(),
                app: Some(app.name.clone()),
            });
        }

        if app.repo_parts().is_none() {
            errors.push(ValidationError {
                rule: "invalid-repo".to_string(),
                message: format!(
                    "App '{}' has repo '{}', expected '<owner>/<name>'",
                    app.name, app.repo
                ),
                app: Some(app.name.clone()),
            });
        }

        if app.path.trim().is_empty() {
            errors.push(ValidationError {
                rule: "missing-path".to_string(),
                message: format!("App '{}' has no template path", app.name),
                app: Some(app.name.clone()),
            });
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(registry: &AppRegistry) -> Result<()> {
    let errors = validate_config(registry);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(CampfireError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
