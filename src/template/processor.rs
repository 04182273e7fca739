//! Template processing.
//!
//! A template is a document with `objects` (the resources) and
//! `parameters` (declared inputs with optional defaults). Processing
//! computes each declared parameter's value, substitutes references in every
//! object, and returns the objects as [`RenderedItem`]s.
//!
//! Parameters passed in but not declared by the template are ignored.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::interpolation::{substitute, substitute_text};
use super::item::RenderedItem;

/// Renders a parsed template with a parameter set.
pub trait TemplateRenderer {
    /// Produce the template's resources with `parameters` applied.
    fn render(
        &self,
        template: &Value,
        parameters: &BTreeMap<String, String>,
    ) -> Result<ProcessedTemplate>;
}

/// Output of rendering a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedTemplate {
    pub items: Vec<RenderedItem>,
}

/// Template document as read from the source host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Template {
    pub objects: Vec<Value>,
    pub parameters: Vec<TemplateParameter>,
}

/// A declared template input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateParameter {
    pub name: String,
    pub value: Option<Value>,
    pub required: bool,
}

impl TemplateParameter {
    /// The template's default as text, if any.
    pub fn default_value(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Processes templates with OpenShift parameter semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateProcessor;

impl TemplateProcessor {
    /// Create a processor.
    pub fn new() -> Self {
        Self
    }

    /// Compute the value of every declared parameter.
    ///
    /// Supplied values win over template defaults; parameters with neither
    /// become empty strings unless `required`, which is an error.
    pub fn effective_parameters(
        template: &Template,
        supplied: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>> {
        let mut effective = BTreeMap::new();

        for param in &template.parameters {
            let value = supplied
                .get(&param.name)
                .cloned()
                .or_else(|| param.default_value());

            let value = match value {
                Some(v) if !(param.required && v.is_empty()) => v,
                _ if param.required => bail!("required parameter '{}' has no value", param.name),
                _ => String::new(),
            };

            effective.insert(param.name.clone(), value);
        }

        for name in supplied.keys() {
            if !effective.contains_key(name) {
                tracing::debug!("Ignoring parameter '{}' not declared by template", name);
            }
        }

        Ok(effective)
    }
}

impl TemplateRenderer for TemplateProcessor {
    fn render(
        &self,
        template: &Value,
        parameters: &BTreeMap<String, String>,
    ) -> Result<ProcessedTemplate> {
        let template: Template =
            serde_json::from_value(template.clone()).context("malformed template document")?;
        let values = Self::effective_parameters(&template, parameters)?;

        let items = template
            .objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                RenderedItem::try_from(substitute_value(object, &values))
                    .map_err(|e| anyhow!("object {}: {}", index, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ProcessedTemplate { items })
    }
}

fn substitute_value(value: &Value, values: &BTreeMap<String, String>) -> Value {
    match value {
        Value::String(s) => substitute(s, values),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_value(item, values))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(substitute_text(key, values), substitute_value(item, values));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
