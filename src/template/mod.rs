//! Template parsing and rendering.
//!
//! - [`interpolation`] - `${NAME}` / `${{NAME}}` reference handling
//! - [`item`] - [`RenderedItem`], the tagged resource record
//! - [`processor`] - [`TemplateRenderer`] and the built-in [`TemplateProcessor`]

pub mod interpolation;
pub mod item;
pub mod processor;

pub use interpolation::{parse_references, substitute, Segment};
pub use item::RenderedItem;
pub use processor::{
    ProcessedTemplate, Template, TemplateParameter, TemplateProcessor, TemplateRenderer,
};

use serde_json::Value;

/// Parse raw template bytes (YAML or JSON) into a document.
///
/// Merge keys (`<<: *anchor`) are resolved before conversion.
pub fn parse_template(content: &[u8]) -> Result<Value, serde_yaml::Error> {
    let mut document: serde_yaml::Value = serde_yaml::from_slice(content)?;
    document.apply_merge()?;
    serde_yaml::from_value(document)
}
