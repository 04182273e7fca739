//! Process command implementation.
//!
//! The `campfire process` command resolves an app (and by default its
//! ClowdApp dependencies) and prints the resulting `List`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::{load_config, AppRegistry};
use crate::error::Result;
use crate::fetch::{HostFetcher, SourceFetcher};
use crate::resolve::{collect_overrides, ConfigAssembler};
use crate::template::TemplateProcessor;

use super::dispatcher::{Command, CommandResult};

/// The process command implementation.
pub struct ProcessCommand {
    config_path: Option<PathBuf>,
    args: ProcessArgs,
}

impl ProcessCommand {
    /// Create a new process command.
    pub fn new(config_path: Option<&Path>, args: ProcessArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Resolve against `registry` with `fetcher` and encode the result.
    pub fn render(&self, registry: &AppRegistry, fetcher: &dyn SourceFetcher) -> Result<String> {
        let overrides = collect_overrides(self.args.set_parameter.iter().map(String::as_str))?;
        let renderer = TemplateProcessor::new();

        let list = ConfigAssembler::new(registry, fetcher, &renderer)
            .with_overrides(overrides)
            .resolve(
                &self.args.namespace,
                &self.args.app,
                !self.args.no_get_dependencies,
            )?;

        tracing::debug!("assembled {} items", list.len());

        match self.args.output {
            OutputFormat::Json => list.to_json(),
            OutputFormat::Yaml => list.to_yaml(),
        }
    }
}

impl Command for ProcessCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let registry = load_config(self.config_path.as_deref())?;
        let timeout = self.args.timeout.map(Duration::from_secs);
        let fetcher = HostFetcher::from_settings(&registry.settings, timeout)?;

        let encoded = self.render(&registry, &fetcher)?;
        writeln!(out, "{}", encoded.trim_end())?;
        Ok(CommandResult::success())
    }
}
