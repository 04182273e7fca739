//! Configuration schema definitions for Campfire.
//!
//! This module contains the struct definitions that map to the app
//! registry file (`config.yml`).

use crate::error::{CampfireError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default `ENV_NAME` format; `{namespace}` is replaced with the target namespace.
pub const DEFAULT_ENV_NAME_FORMAT: &str = "env-{namespace}";

/// Environment variable that overrides [`DEFAULT_ENV_NAME_FORMAT`].
pub const ENV_NAME_FORMAT_VAR: &str = "ENV_NAME_FORMAT";

/// Root of the app registry file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppRegistry {
    /// Fetchable apps, unique by name.
    pub apps: Vec<AppSpec>,

    /// Explicit `ENV_NAME` for every rendered app
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_name: Option<String>,

    /// Global settings
    pub settings: Settings,
}

impl AppRegistry {
    /// Look up an app by name.
    pub fn get(&self, name: &str) -> Option<&AppSpec> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// All declared apps, sorted by name.
    pub fn sorted_apps(&self) -> Vec<&AppSpec> {
        let mut apps: Vec<&AppSpec> = self.apps.iter().collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        apps
    }
}

/// One fetchable app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSpec {
    /// Unique app name
    pub name: String,

    /// Source host: `github` or `gitlab`
    pub host: String,

    /// `owner/repo` on GitHub, `group/project` on GitLab
    pub repo: String,

    /// Template file path within the repo
    pub path: String,

    /// Template parameter overrides
    #[serde(
        default,
        deserialize_with = "deserialize_parameters",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub parameters: BTreeMap<String, String>,
}

impl AppSpec {
    /// Create an app with no parameter overrides.
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        repo: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            repo: repo.into(),
            path: path.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter override.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Parse the declared host.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHost` for anything but `github` or `gitlab`.
    pub fn host(&self) -> Result<Host> {
        match self.host.as_str() {
            "github" => Ok(Host::Github),
            "gitlab" => Ok(Host::Gitlab),
            other => Err(CampfireError::UnknownHost {
                host: other.to_string(),
                app: self.name.clone(),
            }),
        }
    }

    /// Split `repo` into its two segments, if it has exactly two.
    pub fn repo_parts(&self) -> Option<(&str, &str)> {
        let (first, second) = self.repo.split_once('/')?;
        if first.is_empty() || second.is_empty() || second.contains('/') {
            return None;
        }
        Some((first, second))
    }
}

/// Source-control host an app is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Github,
    Gitlab,
}

/// Global settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// HTTP timeout in seconds; no timeout when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Format for the default `ENV_NAME`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_name_format: Option<String>,

    /// GitHub endpoints
    pub github: GithubSettings,

    /// GitLab endpoints and trust
    pub gitlab: GitlabSettings,
}

impl Settings {
    /// HTTP timeout, `None` meaning wait indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Effective `ENV_NAME` format: setting, then `ENV_NAME_FORMAT`, then the default.
    pub fn env_name_format(&self) -> String {
        self.env_name_format
            .clone()
            .or_else(|| std::env::var(ENV_NAME_FORMAT_VAR).ok())
            .unwrap_or_else(|| DEFAULT_ENV_NAME_FORMAT.to_string())
    }
}

/// GitHub API and raw-content endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GithubSettings {
    pub api_url: String,
    pub raw_url: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
        }
    }
}

/// GitLab instance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitlabSettings {
    /// Base URL of the instance
    pub url: String,

    /// PEM root CA; the embedded certificate is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for GitlabSettings {
    fn default() -> Self {
        Self {
            url: "https://gitlab.cee.redhat.com".to_string(),
            ca_cert: None,
        }
    }
}

/// Substitute `{namespace}` in an env name format.
pub fn format_env_name(format: &str, namespace: &str) -> String {
    format.replace("{namespace}", namespace)
}

/// Accept strings, numbers, and booleans as parameter values.
fn deserialize_parameters<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Option::<BTreeMap<String, serde_yaml::Value>>::deserialize(deserializer)?;
    let mut parameters = BTreeMap::new();

    for (key, value) in raw.unwrap_or_default() {
        let value = match value {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => String::new(),
            _ => {
                return Err(D::Error::custom(format!(
                    "parameter '{}' must be a scalar value",
                    key
                )))
            }
        };
        parameters.insert(key, value);
    }

    Ok(parameters)
}
