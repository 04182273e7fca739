//! Root CA used to verify the GitLab instance.
//!
//! The certificate is configuration: the embedded default can be replaced
//! with `settings.gitlab.caCert`. For each GitLab fetch it is staged into a
//! temporary file that is removed when the [`StagedCertificate`] guard drops,
//! including when the fetch bails out early.

use crate::config::schema::GitlabSettings;
use crate::error::{CampfireError, Result};
use reqwest::Certificate;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Default internal root CA, compiled into the binary.
pub const DEFAULT_CA_PEM: &str = include_str!("../../assets/gitlab-ca.pem");

/// A PEM-encoded root certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaCertificate {
    pem: String,
}

impl CaCertificate {
    /// The embedded default certificate.
    pub fn embedded() -> Self {
        Self {
            pem: DEFAULT_CA_PEM.to_string(),
        }
    }

    /// Wrap PEM text without touching the filesystem.
    pub fn from_pem(pem: impl Into<String>) -> Result<Self> {
        let pem = pem.into();
        if !pem.contains("-----BEGIN CERTIFICATE-----") {
            return Err(CampfireError::ConfigValidationError {
                message: "CA certificate is not PEM encoded".to_string(),
            });
        }
        Ok(Self { pem })
    }

    /// Read a PEM file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let pem = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CampfireError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CampfireError::Io(e)
            }
        })?;
        Self::from_pem(pem)
    }

    /// Certificate configured for GitLab, falling back to the embedded one.
    pub fn from_settings(settings: &GitlabSettings) -> Result<Self> {
        match &settings.ca_cert {
            Some(path) => Self::from_file(path),
            None => Ok(Self::embedded()),
        }
    }

    /// The PEM text.
    pub fn pem(&self) -> &str {
        &self.pem
    }

    /// Write the certificate to a fresh temporary file.
    pub fn stage(&self) -> Result<StagedCertificate> {
        let mut file = tempfile::Builder::new()
            .prefix("campfire-ca-")
            .suffix(".pem")
            .tempfile()?;
        file.write_all(self.pem.as_bytes())?;
        file.flush()?;

        tracing::debug!("Staged CA certificate at {}", file.path().display());
        Ok(StagedCertificate { file })
    }
}

/// A certificate file on disk for as long as this value lives.
#[derive(Debug)]
pub struct StagedCertificate {
    file: NamedTempFile,
}

impl StagedCertificate {
    /// Location of the staged file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Load the staged file as a TLS root certificate.
    ///
    /// reqwest only accepts certificates in memory, so the client trusts the
    /// bytes read back from the staged path rather than the path itself.
    pub fn certificate(&self) -> Result<Certificate> {
        let pem = fs::read(self.path())?;
        Certificate::from_pem(&pem).map_err(|e| CampfireError::ConfigValidationError {
            message: format!("Invalid CA certificate: {}", e),
        })
    }
}
