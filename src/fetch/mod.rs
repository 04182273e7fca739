//! Template fetching from source-control hosts.
//!
//! [`SourceFetcher`] is the seam between resolution and the network:
//! given an app, it returns the commit the template was pinned to and the
//! raw template bytes. [`HostFetcher`] is the real implementation and
//! dispatches on the app's host.

pub mod ca;
pub mod github;
pub mod gitlab;
pub mod http;

pub use ca::{CaCertificate, StagedCertificate, DEFAULT_CA_PEM};
pub use github::GithubFetcher;
pub use gitlab::GitlabFetcher;
pub use http::HttpFetcher;

use crate::config::schema::{AppSpec, Host, Settings};
use crate::error::Result;
use std::time::Duration;

/// A template pinned to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTemplate {
    /// Full commit identifier the template was read at.
    pub commit: String,
    /// Raw template bytes.
    pub content: Vec<u8>,
}

/// Source of app templates.
pub trait SourceFetcher {
    /// Fetch the app's template at the latest commit of its default branch.
    fn fetch(&self, app: &AppSpec) -> Result<FetchedTemplate>;
}

/// Fetches from GitHub or GitLab depending on the app's host.
#[derive(Debug, Clone)]
pub struct HostFetcher {
    github: GithubFetcher,
    gitlab: GitlabFetcher,
}

impl HostFetcher {
    /// Build fetchers from registry settings, with an optional timeout override.
    pub fn from_settings(settings: &Settings, timeout: Option<Duration>) -> Result<Self> {
        let timeout = timeout.or_else(|| settings.timeout());
        Ok(Self {
            github: GithubFetcher::new(&settings.github, timeout)?,
            gitlab: GitlabFetcher::new(&settings.gitlab, timeout)?,
        })
    }
}

impl SourceFetcher for HostFetcher {
    fn fetch(&self, app: &AppSpec) -> Result<FetchedTemplate> {
        match app.host()? {
            Host::Github => self.github.fetch(app),
            Host::Gitlab => self.gitlab.fetch(app),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampfireError;
    use httpmock::prelude::*;

    #[test]
    fn unknown_host_fails_without_requests() {
        let fetcher = HostFetcher::from_settings(&Settings::default(), None).unwrap();
        let app = AppSpec::new("rbac", "bitbucket", "org/rbac", "t.yml");

        let err = fetcher.fetch(&app).unwrap_err();
        assert!(matches!(err, CampfireError::UnknownHost { .. }));
    }

    #[test]
    fn dispatches_github_apps_to_github() {
        let server = MockServer::start();
        let ref_mock = server.mock(|when, then| {
            when.method(GET).path("/repos/org/rbac/git/refs/heads/master");
            then.status(200)
                .json_body(serde_json::json!({ "object": { "sha": "abcdef1234567" } }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/org/rbac/abcdef1234567/t.yml");
            then.status(200).body("objects: []");
        });

        let mut settings = Settings::default();
        settings.github.api_url = server.base_url();
        settings.github.raw_url = server.base_url();
        let fetcher = HostFetcher::from_settings(&settings, None).unwrap();

        let fetched = fetcher
            .fetch(&AppSpec::new("rbac", "github", "org/rbac", "t.yml"))
            .unwrap();
        assert_eq!(fetched.commit, "abcdef1234567");
        ref_mock.assert();
    }
}
