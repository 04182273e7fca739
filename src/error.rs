//! Error types for Campfire operations.
//!
//! This module defines [`CampfireError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Registry problems (missing file, bad YAML, unknown app or host) are
//!   config errors; see [`CampfireError::is_config_error`]
//! - Non-success HTTP responses are [`CampfireError::HostError`] and always
//!   carry the status, app name, and URL
//! - Nothing is retried; the first error aborts the whole resolution run

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Campfire operations.
#[derive(Debug, Error)]
pub enum CampfireError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested app is not declared in the registry.
    #[error("app {app} not found in local config")]
    AppNotFound { app: String },

    /// App declares a host other than `github` or `gitlab`.
    #[error("invalid host {host} for app {app}")]
    UnknownHost { host: String, app: String },

    /// A source host answered with a non-success status.
    #[error("Invalid response code {status} fetching {target} for {app}: {url}")]
    HostError {
        status: u16,
        target: String,
        app: String,
        url: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitLab group listing has no project matching the repo.
    #[error("project ID not found for {repo}")]
    ProjectNotFound { repo: String },

    /// Template could not be parsed or rendered.
    #[error("Failed to process template for {app}: {message}")]
    TemplateError { app: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CampfireError {
    /// Whether this error comes from the registry rather than a remote host.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::AppNotFound { .. }
                | Self::UnknownHost { .. }
        )
    }
}

/// Result type alias for Campfire operations.
pub type Result<T> = std::result::Result<T, CampfireError>;
