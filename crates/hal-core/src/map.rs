//! Map primitives shared by every flattened view.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Property bag of a resource: string keys to arbitrary JSON-like values.
///
/// Sorted by key, so flattened output is deterministic.
pub type PropertyMap = Map<String, Value>;

/// A property map together with the key it is published under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedMap {
    pub name: String,
    pub content: PropertyMap,
}

impl NamedMap {
    #[must_use]
    pub fn new(name: impl Into<String>, content: PropertyMap) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Only the content is serialized; the name is the key a parent stores it under.
impl Serialize for NamedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.content.serialize(serializer)
    }
}
