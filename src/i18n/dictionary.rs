//! Translation dictionaries: nested JSON objects addressed by dotted keys.

use crate::i18n::LoadError;
use serde_json::{Map, Value};

/// A tree of translatable strings for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    root: Map<String, Value>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dictionary from a JSON document.
    ///
    /// `resource` is only used to label errors.
    pub fn from_json(resource: &str, body: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(body).map_err(|source| LoadError::Parse {
            resource: resource.to_string(),
            source,
        })?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(LoadError::NotAnObject {
                resource: resource.to_string(),
            }),
        }
    }

    /// Whether the dictionary holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Look up a dotted key such as `"planner.hoursValue"`.
    ///
    /// Object nodes are indexed by key and array nodes by a decimal index,
    /// so `"testimonials.items.0.quote"` addresses into a list. Only string,
    /// number and boolean leaves count as found; numbers and booleans are
    /// rendered in their JSON form.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        match current {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Deep-merge an overlay onto this dictionary.
    ///
    /// Object nodes merge recursively; anything else in the overlay
    /// (strings, numbers, arrays) replaces the base value outright.
    pub fn merge(&mut self, overlay: Dictionary) {
        merge_maps(&mut self.root, overlay.root);
    }

    /// Dotted paths of every string, number and boolean leaf.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for (name, value) in &self.root {
            collect_keys(name.clone(), value, &mut keys);
        }
        keys
    }
}

impl TryFrom<Value> for Dictionary {
    type Error = Value;

    /// Succeeds only for JSON objects; the rejected value is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(other),
        }
    }
}

fn merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, overlay_value) in overlay {
        match overlay_value {
            Value::Object(nested) => {
                let slot = base
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(target) = slot {
                    merge_maps(target, nested);
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

fn collect_keys(path: String, value: &Value, keys: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                collect_keys(format!("{}.{}", path, name), child, keys);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_keys(format!("{}.{}", path, index), child, keys);
            }
        }
        Value::Null => {}
        _ => keys.push(path),
    }
}
