//! Resolution of apps into a deployable config list.
//!
//! - [`params`] - render parameter defaults and precedence
//! - [`postprocess`] - resource stripping for ClowdApp items
//! - [`dependencies`] - dependency discovery in rendered items
//! - [`assembler`] - the recursive [`ConfigAssembler`]
//! - [`output`] - the [`ConfigList`] result
//!
//! # Example
//!
//! ```no_run
//! use campfire::config::load_config;
//! use campfire::fetch::HostFetcher;
//! use campfire::resolve::ConfigAssembler;
//! use campfire::template::TemplateProcessor;
//!
//! let registry = load_config(None).unwrap();
//! let fetcher = HostFetcher::from_settings(&registry.settings, None).unwrap();
//! let renderer = TemplateProcessor::new();
//!
//! let list = ConfigAssembler::new(&registry, &fetcher, &renderer)
//!     .resolve("ephemeral-01", "rbac", true)
//!     .unwrap();
//! println!("{}", list.to_json().unwrap());
//! ```

pub mod assembler;
pub mod dependencies;
pub mod output;
pub mod params;
pub mod postprocess;

pub use assembler::{ConfigAssembler, Resolution};
pub use dependencies::collect_dependencies;
pub use output::ConfigList;
pub use params::{
    build_parameters, collect_overrides, default_parameters, image_tag, parse_override,
    ParameterOverrides, IMAGE_TAG_LENGTH,
};
pub use postprocess::{strip_resource_config, CLOWDAPP_KIND};
