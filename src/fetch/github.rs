//! GitHub template fetching.
//!
//! Resolves the `master` branch to a commit SHA through the REST API, then
//! downloads the template pinned to that commit from the raw content host.
//! Requests are unauthenticated.

use serde::Deserialize;
use std::time::Duration;

use super::http::HttpFetcher;
use super::FetchedTemplate;
use crate::config::schema::{AppSpec, GithubSettings};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

/// Fetches app templates from GitHub.
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    http: HttpFetcher,
    api_url: String,
    raw_url: String,
}

impl GithubFetcher {
    /// Create a fetcher for the given endpoints.
    pub fn new(settings: &GithubSettings, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::with_timeout(timeout)?,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            raw_url: settings.raw_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the `master` branch reference for `repo`.
    pub fn ref_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/git/refs/heads/master", self.api_url, repo)
    }

    /// URL of `path` in `repo` at `commit`.
    pub fn content_url(&self, repo: &str, commit: &str, path: &str) -> String {
        format!("{}/{}/{}/{}", self.raw_url, repo, commit, path)
    }

    /// Resolve the app's `master` branch to a commit SHA.
    pub fn latest_commit(&self, app: &AppSpec) -> Result<String> {
        let git_ref: GitRef = self
            .http
            .get_json(&self.ref_url(&app.repo), "commit ref", &app.name)?;
        Ok(git_ref.object.sha)
    }

    /// Fetch the app's template at the latest `master` commit.
    pub fn fetch(&self, app: &AppSpec) -> Result<FetchedTemplate> {
        let commit = self.latest_commit(app)?;
        let url = self.content_url(&app.repo, &commit, &app.path);
        let content = self.http.get_bytes(&url, "template", &app.name)?;

        tracing::debug!(
            "Fetched template for '{}' from github at {}",
            app.name,
            commit
        );
        Ok(FetchedTemplate { commit, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampfireError;
    use httpmock::prelude::*;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    fn fetcher(server: &MockServer) -> GithubFetcher {
        let settings = GithubSettings {
            api_url: server.url("/api"),
            raw_url: server.url("/raw/"),
        };
        GithubFetcher::new(&settings, Some(Duration::from_secs(10))).unwrap()
    }

    fn app() -> AppSpec {
        AppSpec::new("rbac", "github", "RedHatInsights/insights-rbac", "deploy/rbac.yml")
    }

    #[test]
    fn builds_public_github_urls_by_default() {
        let fetcher = GithubFetcher::new(&GithubSettings::default(), None).unwrap();
        assert_eq!(
            fetcher.ref_url("org/repo"),
            "https://api.github.com/repos/org/repo/git/refs/heads/master"
        );
        assert_eq!(
            fetcher.content_url("org/repo", "abc", "deploy/t.yml"),
            "https://raw.githubusercontent.com/org/repo/abc/deploy/t.yml"
        );
    }

    #[test]
    fn fetches_template_at_master_commit() {
        let server = MockServer::start();
        let ref_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/repos/RedHatInsights/insights-rbac/git/refs/heads/master");
            then.status(200).json_body(serde_json::json!({
                "ref": "refs/heads/master",
                "object": { "sha": SHA, "type": "commit" }
            }));
        });
        let content_mock = server.mock(|when, then| {
            when.method(GET).path(format!(
                "/raw/RedHatInsights/insights-rbac/{}/deploy/rbac.yml",
                SHA
            ));
            then.status(200).body("kind: Template\nobjects: []\n");
        });

        let fetched = fetcher(&server).fetch(&app()).unwrap();

        assert_eq!(fetched.commit, SHA);
        assert_eq!(fetched.content, b"kind: Template\nobjects: []\n");
        ref_mock.assert();
        content_mock.assert();
    }

    #[test]
    fn content_failure_reports_status_app_and_url() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/repos/RedHatInsights/insights-rbac/git/refs/heads/master");
            then.status(200)
                .json_body(serde_json::json!({ "object": { "sha": SHA } }));
        });
        server.mock(|when, then| {
            when.method(GET).path(format!(
                "/raw/RedHatInsights/insights-rbac/{}/deploy/rbac.yml",
                SHA
            ));
            then.status(404);
        });

        let err = fetcher(&server).fetch(&app()).unwrap_err();
        assert!(matches!(err, CampfireError::HostError { status: 404, .. }));

        let msg = err.to_string();
        assert!(msg.contains("404"), "missing status: {}", msg);
        assert!(msg.contains("rbac"), "missing app: {}", msg);
        assert!(
            msg.contains(&format!("{}/deploy/rbac.yml", SHA)),
            "missing url: {}",
            msg
        );
    }

    #[test]
    fn ref_failure_is_host_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/repos/RedHatInsights/insights-rbac/git/refs/heads/master");
            then.status(403);
        });

        let err = fetcher(&server).fetch(&app()).unwrap_err();
        assert!(matches!(err, CampfireError::HostError { status: 403, .. }));
    }
}
