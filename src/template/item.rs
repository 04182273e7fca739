//! Rendered resource items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One resource produced by rendering a template.
///
/// `kind` is pulled out as the discriminator; everything else stays as
/// loosely-typed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedItem {
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RenderedItem {
    /// Create an item of `kind` from the remaining fields.
    pub fn new(kind: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            fields,
        }
    }

    /// Exact, case-sensitive kind match.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Case-insensitive kind match.
    pub fn is_kind_ignore_case(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// `metadata.name`, if present.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("metadata")?.get("name")?.as_str()
    }

    /// The `spec` mapping, if present.
    pub fn spec(&self) -> Option<&Map<String, Value>> {
        self.fields.get("spec")?.as_object()
    }

    /// Mutable `spec` mapping, if present.
    pub fn spec_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.fields.get_mut("spec")?.as_object_mut()
    }

    /// Convert back into a plain JSON object.
    pub fn into_value(self) -> Value {
        let mut object = self.fields;
        object.insert("kind".to_string(), Value::String(self.kind));
        Value::Object(object)
    }
}

impl TryFrom<Value> for RenderedItem {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err("rendered object is not a mapping".to_string());
        };

        match fields.remove("kind") {
            Some(Value::String(kind)) => Ok(Self { kind, fields }),
            Some(_) => Err("rendered object has a non-string 'kind'".to_string()),
            None => Err("rendered object has no 'kind'".to_string()),
        }
    }
}
