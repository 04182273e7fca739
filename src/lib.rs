//! Campfire - Resolve deployment config from remote app templates.
//!
//! Campfire reads a local registry of apps, fetches each app's template
//! from GitHub or GitLab at the latest commit of its default branch,
//! renders it with deployment parameters, and assembles the results
//! (following ClowdApp dependencies) into a single `List`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - App registry loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Template fetching from source-control hosts
//! - [`resolve`] - Recursive resolution into a config list
//! - [`template`] - Template parsing and parameter rendering
//!
//! # Example
//!
//! ```
//! use campfire::template::interpolation::substitute_text;
//! use std::collections::BTreeMap;
//!
//! let mut values = BTreeMap::new();
//! values.insert("IMAGE_TAG".to_string(), "abc1234".to_string());
//! let image = substitute_text("quay.io/app:${IMAGE_TAG}", &values);
//! assert_eq!(image, "quay.io/app:abc1234");
//! ```
//!
//! For network-backed resolution, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod resolve;
pub mod template;

pub use error::{CampfireError, Result};
