//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`campfire process`, `campfire apps`)
//! - Shared registry location handling

pub mod apps;
pub mod completions;
pub mod dispatcher;
pub mod process;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
