//! GitLab template fetching.
//!
//! Talks to an internal GitLab instance whose TLS chain ends in a custom
//! root CA. Each fetch stages that CA in a temporary file, resolves the
//! project ID from the group listing, resolves `master` to a commit, then
//! downloads the raw template. The staged file is removed on every exit path.

use serde::Deserialize;
use std::time::Duration;

use super::ca::CaCertificate;
use super::http::HttpFetcher;
use super::FetchedTemplate;
use crate::config::schema::{AppSpec, GitlabSettings};
use crate::error::{CampfireError, Result};

#[derive(Debug, Deserialize)]
struct Project {
    id: u64,
    path: String,
}

#[derive(Debug, Deserialize)]
struct Branch {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    id: String,
}

/// Fetches app templates from a GitLab instance.
#[derive(Debug, Clone)]
pub struct GitlabFetcher {
    base_url: String,
    ca: CaCertificate,
    timeout: Option<Duration>,
}

impl GitlabFetcher {
    /// Create a fetcher for the configured instance.
    pub fn new(settings: &GitlabSettings, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self::with_certificate(
            &settings.url,
            CaCertificate::from_settings(settings)?,
            timeout,
        ))
    }

    /// Create a fetcher with an explicit root CA.
    pub fn with_certificate(base_url: &str, ca: CaCertificate, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ca,
            timeout,
        }
    }

    /// URL listing the projects of `group`.
    pub fn projects_url(&self, group: &str) -> String {
        format!("{}/api/v4/groups/{}/projects/?per_page=100", self.base_url, group)
    }

    /// URL of the `master` branch of project `id`.
    pub fn branch_url(&self, project_id: u64) -> String {
        format!(
            "{}/api/v4/projects/{}/repository/branches/master",
            self.base_url, project_id
        )
    }

    /// URL of `path` in `repo` at `commit`.
    pub fn content_url(&self, repo: &str, commit: &str, path: &str) -> String {
        format!("{}/{}/-/raw/{}/{}", self.base_url, repo, commit, path)
    }

    /// Fetch the app's template at the latest `master` commit.
    pub fn fetch(&self, app: &AppSpec) -> Result<FetchedTemplate> {
        let (group, project) = app.repo_parts().ok_or_else(|| {
            CampfireError::ConfigValidationError {
                message: format!(
                    "App '{}' has repo '{}', expected '<group>/<project>'",
                    app.name, app.repo
                ),
            }
        })?;

        // Dropped at the end of this call, removing the file.
        let staged = self.ca.stage()?;
        let http = HttpFetcher::with_root_certificate(self.timeout, staged.certificate()?)?;

        let project_id = self.find_project_id(&http, app, group, project)?;

        let branch: Branch = http.get_json(&self.branch_url(project_id), "commit ref", &app.name)?;
        let commit = branch.commit.id;

        let url = self.content_url(&app.repo, &commit, &app.path);
        let content = http.get_bytes(&url, "template", &app.name)?;

        tracing::debug!(
            "Fetched template for '{}' from gitlab project {} at {}",
            app.name,
            project_id,
            commit
        );
        Ok(FetchedTemplate { commit, content })
    }

    fn find_project_id(
        &self,
        http: &HttpFetcher,
        app: &AppSpec,
        group: &str,
        project: &str,
    ) -> Result<u64> {
        let projects: Vec<Project> =
            http.get_json(&self.projects_url(group), "project list", &app.name)?;

        projects
            .iter()
            .find(|p| p.path == project)
            .map(|p| p.id)
            .ok_or_else(|| CampfireError::ProjectNotFound {
                repo: app.repo.clone(),
            })
    }
}
