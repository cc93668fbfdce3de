//! Demo registry loaded from JSON.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DemoError, encode_component};

/// Percent-encoded payload of one demo.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoPayload {
    /// Rendered markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,
    /// Source code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Nested named content, usually keyed by language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<Map<String, Value>>,
}

/// Registry entry for one demo source.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoEntry {
    pub data: DemoPayload,
    /// Module identifier of the compiled demo component.
    #[serde(alias = "comp", skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl DemoEntry {
    /// Entry for a demo whose only payload is its source code.
    #[must_use]
    pub fn from_source(component: impl Into<String>, code: &str) -> Self {
        Self {
            data: DemoPayload {
                code: Some(encode_component(code)),
                ..DemoPayload::default()
            },
            component: Some(component.into()),
        }
    }
}

/// Demo entries keyed by source path, in registry order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DemoRegistry(IndexMap<String, DemoEntry>);

impl DemoRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Json`] if the text is not a registry object.
    pub fn from_json(json: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Io`] if the file cannot be read and
    /// [`DemoError::Json`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let json = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, src: impl Into<String>, entry: DemoEntry) {
        self.0.insert(src.into(), entry);
    }

    #[must_use]
    pub fn get(&self, src: &str) -> Option<&DemoEntry> {
        self.0.get(src)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DemoEntry)> {
        self.0.iter().map(|(src, entry)| (src.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const REGISTRY: &str = r#"{
        "demos/button.demo.vue": {
            "data": { "render": "%3Cbutton%3E", "code": "%3Ctemplate%3E", "block": { "en-US": "Click" } },
            "comp": "./demos/button.demo.vue"
        },
        "demos/empty.demo.vue": {}
    }"#;

    #[test]
    fn test_from_json() {
        let registry = DemoRegistry::from_json(REGISTRY).unwrap();

        assert_eq!(registry.len(), 2);
        let entry = registry.get("demos/button.demo.vue").unwrap();
        assert_eq!(entry.data.render.as_deref(), Some("%3Cbutton%3E"));
        assert_eq!(entry.component.as_deref(), Some("./demos/button.demo.vue"));
        assert_eq!(
            registry.get("demos/empty.demo.vue"),
            Some(&DemoEntry::default())
        );
    }

    #[test]
    fn test_iter_keeps_registry_order() {
        let registry = DemoRegistry::from_json(REGISTRY).unwrap();
        let keys: Vec<&str> = registry.iter().map(|(src, _)| src).collect();
        assert_eq!(keys, vec!["demos/button.demo.vue", "demos/empty.demo.vue"]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = DemoRegistry::load(&temp.path().join("demos.json")).unwrap_err();
        assert!(matches!(err, DemoError::Io { .. }));
    }

    #[test]
    fn test_load_and_serialize() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("demos.json");
        let mut registry = DemoRegistry::new();
        registry.insert("a.demo.vue", DemoEntry::from_source("a.demo.vue", "<p>a b</p>"));
        fs::write(&path, serde_json::to_string(&registry).unwrap()).unwrap();

        let loaded = DemoRegistry::load(&path).unwrap();
        assert_eq!(
            loaded.get("a.demo.vue").unwrap().data.code.as_deref(),
            Some("%3Cp%3Ea%20b%3C%2Fp%3E")
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            DemoRegistry::from_json("[1, 2]"),
            Err(DemoError::Json(_))
        ));
    }
}
