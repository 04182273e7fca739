//! Render parameters for an app.
//!
//! Precedence, lowest first:
//! 1. Built-in defaults (`IMAGE_TAG`, `ENV_NAME`, `CLOWDER_ENABLED`, `MIN_REPLICAS`, `REPLICAS`)
//! 2. The app's `parameters` from the registry
//! 3. Command-line overrides (`--set-parameter app/KEY=VALUE`)

use crate::config::schema::AppSpec;
use crate::error::{CampfireError, Result};
use std::collections::BTreeMap;

/// Number of commit characters used for `IMAGE_TAG`.
pub const IMAGE_TAG_LENGTH: usize = 7;

/// Per-app parameter overrides, keyed by app name.
pub type ParameterOverrides = BTreeMap<String, BTreeMap<String, String>>;

/// Image tag for a commit: its first [`IMAGE_TAG_LENGTH`] characters.
pub fn image_tag(commit: &str) -> String {
    commit.chars().take(IMAGE_TAG_LENGTH).collect()
}

/// Built-in parameters every app is rendered with.
pub fn default_parameters(commit: &str, env_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("IMAGE_TAG".to_string(), image_tag(commit)),
        ("ENV_NAME".to_string(), env_name.to_string()),
        ("CLOWDER_ENABLED".to_string(), "true".to_string()),
        ("MIN_REPLICAS".to_string(), "1".to_string()),
        ("REPLICAS".to_string(), "1".to_string()),
    ])
}

/// Full parameter set for rendering `app` at `commit`.
pub fn build_parameters(
    app: &AppSpec,
    commit: &str,
    env_name: &str,
    overrides: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut params = default_parameters(commit, env_name);
    params.extend(app.parameters.clone());
    if let Some(overrides) = overrides {
        params.extend(overrides.clone());
    }
    params
}

/// Parse `APP/KEY=VALUE` into its parts.
///
/// # Errors
///
/// Returns `ConfigValidationError` when the app, key, or `=` is missing.
pub fn parse_override(input: &str) -> Result<(String, String, String)> {
    let invalid = || CampfireError::ConfigValidationError {
        message: format!("Invalid parameter override '{}', expected APP/KEY=VALUE", input),
    };

    let (target, value) = input.split_once('=').ok_or_else(invalid)?;
    let (app, key) = target.split_once('/').ok_or_else(invalid)?;

    if app.is_empty() || key.is_empty() {
        return Err(invalid());
    }

    Ok((app.to_string(), key.to_string(), value.to_string()))
}

/// Group parsed overrides by app.
pub fn collect_overrides<'a, I>(inputs: I) -> Result<ParameterOverrides>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut overrides = ParameterOverrides::new();
    for input in inputs {
        let (app, key, value) = parse_override(input)?;
        overrides.entry(app).or_default().insert(key, value);
    }
    Ok(overrides)
}
