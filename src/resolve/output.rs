//! The output manifest.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CampfireError, Result};
use crate::template::RenderedItem;

/// A `List` of every item rendered during a resolution run, in the order
/// apps were resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigList {
    pub kind: String,
    pub api_version: String,
    pub metadata: Map<String, Value>,
    pub items: Vec<RenderedItem>,
}

impl Default for ConfigList {
    fn default() -> Self {
        Self {
            kind: "List".to_string(),
            api_version: "v1".to_string(),
            metadata: Map::new(),
            items: Vec::new(),
        }
    }
}

impl ConfigList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append items.
    pub fn extend(&mut self, items: impl IntoIterator<Item = RenderedItem>) {
        self.items.extend(items);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CampfireError::Other(anyhow::anyhow!("Failed to encode JSON: {}", e)))
    }

    /// YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CampfireError::Other(anyhow::anyhow!("Failed to encode YAML: {}", e)))
    }
}
