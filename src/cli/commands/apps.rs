//! Apps command implementation.
//!
//! The `campfire apps` command lists the apps declared in the registry.

use std::io::Write;
use std::path::{Path, PathBuf};

use console::style;

use crate::cli::args::AppsArgs;
use crate::config::load_config;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

/// The apps command implementation.
pub struct AppsCommand {
    config_path: Option<PathBuf>,
    args: AppsArgs,
}

impl AppsCommand {
    /// Create a new apps command.
    pub fn new(config_path: Option<&Path>, args: AppsArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for AppsCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let registry = load_config(self.config_path.as_deref())?;

        if registry.apps.is_empty() {
            tracing::info!("no apps declared in registry");
            return Ok(CommandResult::success());
        }

        for app in registry.sorted_apps() {
            if self.args.names_only {
                writeln!(out, "{}", app.name)?;
            } else {
                writeln!(
                    out,
                    "{}  {} {}:{}",
                    style(&app.name).bold(),
                    style(&app.host).dim(),
                    app.repo,
                    app.path
                )?;
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const REGISTRY: &str = r#"
apps:
  - name: rbac
    host: github
    repo: RedHatInsights/insights-rbac
    path: deploy/rbac-clowdapp.yml
  - name: advisor
    host: gitlab
    repo: insights-platform/advisor-backend
    path: deploy/clowdapp.yml
"#;

    fn write_registry(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    fn run(path: &Path, args: AppsArgs) -> String {
        console::set_colors_enabled(false);
        let mut out = Vec::new();
        let result = AppsCommand::new(Some(path), args)
            .execute(&mut out)
            .unwrap();
        assert!(result.success);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_apps_sorted_with_source() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, REGISTRY);

        let output = run(&path, AppsArgs::default());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("advisor"));
        assert!(lines[0].contains("gitlab insights-platform/advisor-backend:deploy/clowdapp.yml"));
        assert!(lines[1].starts_with("rbac"));
    }

    #[test]
    fn names_only() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, REGISTRY);

        let output = run(&path, AppsArgs { names_only: true });
        assert_eq!(output, "advisor\nrbac\n");
    }

    #[test]
    fn empty_registry_prints_nothing() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, "");

        assert_eq!(run(&path, AppsArgs::default()), "");
    }

    #[test]
    fn invalid_registry_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(
            &temp,
            "apps:\n  - name: x\n    host: bitbucket\n    repo: a/b\n    path: p\n",
        );

        let err = AppsCommand::new(Some(&path), AppsArgs::default())
            .execute(&mut Vec::new())
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
