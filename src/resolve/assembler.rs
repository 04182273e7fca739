//! Config assembly.
//!
//! Resolving an app fetches and renders its template, strips resource
//! settings, appends the items to the output list, marks the app processed,
//! and (when asked) resolves every dependency that is not processed yet.
//!
//! Apps are tracked as processed or not, with no in-progress state. A
//! dependency cycle (A needs B needs A) therefore ends when the second visit
//! to A finds it already processed; it is not reported as an error.

use std::collections::{BTreeMap, BTreeSet};

use super::dependencies::collect_dependencies;
use super::output::ConfigList;
use super::params::{build_parameters, ParameterOverrides};
use super::postprocess::strip_resource_config;
use crate::config::schema::{format_env_name, AppRegistry, AppSpec};
use crate::error::{CampfireError, Result};
use crate::fetch::SourceFetcher;
use crate::template::{parse_template, RenderedItem, TemplateRenderer};

/// State threaded through one resolution run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    processed: BTreeSet<String>,
    config: ConfigList,
}

impl Resolution {
    /// Start a run with nothing processed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run treating `apps` as already processed.
    pub fn with_processed<I, S>(apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            processed: apps.into_iter().map(Into::into).collect(),
            config: ConfigList::new(),
        }
    }

    /// Whether `app` has been resolved in this run.
    pub fn is_processed(&self, app: &str) -> bool {
        self.processed.contains(app)
    }

    /// Items accumulated so far.
    pub fn config(&self) -> &ConfigList {
        &self.config
    }

    /// Finish the run.
    pub fn into_config(self) -> ConfigList {
        self.config
    }

    fn record(&mut self, app: &str, items: Vec<RenderedItem>) {
        self.config.extend(items);
        self.processed.insert(app.to_string());
    }
}

/// Resolves apps from a registry into a single [`ConfigList`].
pub struct ConfigAssembler<'a> {
    registry: &'a AppRegistry,
    fetcher: &'a dyn SourceFetcher,
    renderer: &'a dyn TemplateRenderer,
    overrides: ParameterOverrides,
}

impl<'a> ConfigAssembler<'a> {
    /// Create an assembler over `registry`.
    pub fn new(
        registry: &'a AppRegistry,
        fetcher: &'a dyn SourceFetcher,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            registry,
            fetcher,
            renderer,
            overrides: ParameterOverrides::new(),
        }
    }

    /// Apply per-app parameter overrides on top of registry parameters.
    pub fn with_overrides(mut self, overrides: ParameterOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// `ENV_NAME` used for apps rendered into `namespace`.
    pub fn env_name(&self, namespace: &str) -> String {
        match &self.registry.env_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format_env_name(&self.registry.settings.env_name_format(), namespace),
        }
    }

    /// Resolve `app_name` in a fresh run and return the assembled list.
    ///
    /// # Errors
    ///
    /// Returns the first fetch, render, or lookup error; nothing is returned
    /// for apps resolved before it.
    pub fn resolve(
        &self,
        namespace: &str,
        app_name: &str,
        follow_dependencies: bool,
    ) -> Result<ConfigList> {
        let resolution =
            self.resolve_into(Resolution::new(), namespace, app_name, follow_dependencies)?;
        Ok(resolution.into_config())
    }

    /// Resolve `app_name` into an existing run.
    ///
    /// An app already processed in `resolution` is not fetched again and
    /// adds no items.
    pub fn resolve_into(
        &self,
        mut resolution: Resolution,
        namespace: &str,
        app_name: &str,
        follow_dependencies: bool,
    ) -> Result<Resolution> {
        let app = self
            .registry
            .get(app_name)
            .ok_or_else(|| CampfireError::AppNotFound {
                app: app_name.to_string(),
            })?;

        if resolution.is_processed(app_name) {
            tracing::debug!("app '{}' already processed, skipping", app_name);
            return Ok(resolution);
        }

        tracing::info!("processing app '{}'", app_name);

        let items = self.render_app(app, namespace)?;
        let dependencies = if follow_dependencies {
            collect_dependencies(&items)
        } else {
            BTreeSet::new()
        };

        resolution.record(app_name, items);

        if dependencies.is_empty() {
            return Ok(resolution);
        }
        self.resolve_dependencies(resolution, namespace, app_name, dependencies)
    }

    fn resolve_dependencies(
        &self,
        mut resolution: Resolution,
        namespace: &str,
        app_name: &str,
        dependencies: BTreeSet<String>,
    ) -> Result<Resolution> {
        tracing::info!(
            "found dependencies for app '{}': {:?}",
            app_name,
            dependencies
        );

        for dependency in dependencies {
            if resolution.is_processed(&dependency) {
                tracing::debug!(
                    "app '{}' dependency '{}' already processed",
                    app_name,
                    dependency
                );
                continue;
            }

            tracing::info!(
                "app '{}' dependency '{}' not previously processed",
                app_name,
                dependency
            );
            resolution = self.resolve_into(resolution, namespace, &dependency, true)?;
        }

        Ok(resolution)
    }

    fn render_app(&self, app: &AppSpec, namespace: &str) -> Result<Vec<RenderedItem>> {
        let fetched = self.fetcher.fetch(app)?;

        let template =
            parse_template(&fetched.content).map_err(|e| CampfireError::TemplateError {
                app: app.name.clone(),
                message: e.to_string(),
            })?;

        let parameters: BTreeMap<String, String> = build_parameters(
            app,
            &fetched.commit,
            &self.env_name(namespace),
            self.overrides.get(&app.name),
        );
        tracing::debug!("Rendering '{}' with parameters {:?}", app.name, parameters);

        let mut items = self
            .renderer
            .render(&template, &parameters)
            .map_err(|e| CampfireError::TemplateError {
                app: app.name.clone(),
                message: format!("{:#}", e),
            })?
            .items;

        strip_resource_config(&mut items);
        Ok(items)
    }
}
