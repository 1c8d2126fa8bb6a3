//! World documents opened by name

use serde::{Deserialize, Serialize};

/// A world as stored on disk.
///
/// The content is opaque to the editor core. `world_name` is not part of the
/// document; it is assigned from the name the world was opened under.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    #[serde(skip)]
    pub world_name: String,
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl World {
    pub fn new(world_name: impl Into<String>) -> Self {
        Self {
            world_name: world_name.into(),
            data: serde_json::Map::new(),
        }
    }

    /// Get a top-level value of the world document
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}
