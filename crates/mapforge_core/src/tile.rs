//! Tile variants and the tile type registry

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Animation speed used when a tile becomes animated, in milliseconds per frame
pub const DEFAULT_ANIMATION_SPEED_MS: u32 = 1000;

/// Identity of a tile instance.
///
/// Two tiles with equal content are still different tiles; lookups in the
/// atlas go through this id, never through the tile's content.
pub type TileId = Uuid;

fn default_speed() -> u32 {
    DEFAULT_ANIMATION_SPEED_MS
}

/// Visual data of a tile, tagged by variant in the serialized form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TileKind {
    /// A single image asset
    Static {
        #[serde(default)]
        file: String,
    },
    /// A sequence of image assets played at a fixed rate
    Animated {
        #[serde(default)]
        frames: Vec<String>,
        /// Milliseconds per frame
        #[serde(default = "default_speed")]
        speed: u32,
    },
}

impl TileKind {
    /// Get the registry entry for this variant
    pub fn tile_type(&self) -> TileType {
        match self {
            TileKind::Static { .. } => TileType::Static,
            TileKind::Animated { .. } => TileType::Animated,
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        TileKind::Static {
            file: String::new(),
        }
    }
}

/// A single atlas entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    #[serde(default = "Uuid::new_v4")]
    id: TileId,
    /// Whether this tile blocks movement
    #[serde(default)]
    pub solid: bool,
    #[serde(flatten)]
    pub kind: TileKind,
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(false, TileKind::default())
    }
}

impl Tile {
    /// Create a new tile instance with a fresh identity
    pub fn new(solid: bool, kind: TileKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            solid,
            kind,
        }
    }

    /// Create a non-solid static tile
    pub fn new_static(file: impl Into<String>) -> Self {
        Self::new(false, TileKind::Static { file: file.into() })
    }

    /// Create a non-solid animated tile
    pub fn new_animated(frames: Vec<String>, speed: u32) -> Self {
        Self::new(false, TileKind::Animated { frames, speed })
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn tile_type(&self) -> TileType {
        self.kind.tile_type()
    }

    /// Asset identifiers this tile displays, in frame order
    pub fn assets(&self) -> Vec<&str> {
        match &self.kind {
            TileKind::Static { file } if file.is_empty() => Vec::new(),
            TileKind::Static { file } => vec![file.as_str()],
            TileKind::Animated { frames, .. } => frames.iter().map(String::as_str).collect(),
        }
    }

    /// Build a new tile instance of `target` type from this one.
    ///
    /// `solid` carries over. A static file becomes the single frame of the new
    /// animation (played at `speed_ms`); an animation keeps only its first frame
    /// as the static file. Converting to the same type copies the visual data.
    pub fn converted(&self, target: TileType, speed_ms: u32) -> Tile {
        let kind = match (&self.kind, target) {
            (TileKind::Static { file }, TileType::Animated) => TileKind::Animated {
                frames: vec![file.clone()],
                speed: speed_ms,
            },
            (TileKind::Animated { frames, .. }, TileType::Static) => TileKind::Static {
                file: frames.first().cloned().unwrap_or_default(),
            },
            (kind, _) => kind.clone(),
        };
        Tile::new(self.solid, kind)
    }
}

/// Tile variants selectable in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Static,
    Animated,
}

struct TileTypeEntry {
    tile_type: TileType,
    tag: &'static str,
    create: fn() -> TileKind,
}

fn create_static() -> TileKind {
    TileKind::default()
}

fn create_animated() -> TileKind {
    TileKind::Animated {
        frames: Vec::new(),
        speed: DEFAULT_ANIMATION_SPEED_MS,
    }
}

// Indexed by `TileType as usize`; order is the dropdown order.
static TILE_TYPES: [TileTypeEntry; 2] = [
    TileTypeEntry {
        tile_type: TileType::Static,
        tag: "Static",
        create: create_static,
    },
    TileTypeEntry {
        tile_type: TileType::Animated,
        tag: "Animated",
        create: create_animated,
    },
];

impl TileType {
    /// All tile types in display order
    pub const ALL: [TileType; 2] = [TileType::Static, TileType::Animated];

    fn entry(self) -> &'static TileTypeEntry {
        &TILE_TYPES[self as usize]
    }

    /// Discriminator tag used in the serialized atlas
    pub fn tag(self) -> &'static str {
        self.entry().tag
    }

    /// Look up a tile type by its discriminator tag
    pub fn from_tag(tag: &str) -> Option<TileType> {
        TILE_TYPES
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.tile_type)
    }

    /// Create the blank visual data for this type
    pub fn create_default(self) -> TileKind {
        (self.entry().create)()
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
