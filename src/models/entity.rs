//! Entities: annotations (links, mentions, media) attached to character runs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How an entity behaves when its text is partially edited or copied
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    /// Text may change freely; the entity follows it
    Mutable,
    /// Text is atomic; any partial edit removes the entity
    Immutable,
    /// Text is a list of whitespace-separated segments removed one at a time
    Segmented,
}

/// An entity instance referenced by character metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Entity {
    /// Entity type tag, e.g. `LINK`
    #[serde(rename = "type")]
    pub entity_type: String,

    pub mutability: Mutability,

    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, mutability: Mutability) -> Self {
        Self {
            entity_type: entity_type.into(),
            mutability,
            data: Map::new(),
        }
    }

    /// Builder-style data setter
    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}
