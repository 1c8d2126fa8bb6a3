//! Property panel state for the selected tile
//!
//! A `TileDraft` holds the unsaved values of the panel: the solid checkbox,
//! the file selector of a static tile, or the frame list and speed text of an
//! animated one. Nothing reaches the atlas until the draft validates.

use mapforge_core::{Tile, TileId, TileKind, TileType};
use thiserror::Error;

use crate::FrameListEditor;

/// Label of the remove button once it waits for confirmation
pub const CONFIRM_REMOVE_LABEL: &str = "Click again to confirm!";
pub const REMOVE_LABEL: &str = "Remove";

/// Reasons a draft cannot be saved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Static tile needs a file")]
    EmptyFile,
    #[error("Animated tile needs at least one frame")]
    EmptyFrameList,
    #[error("Frame {index} has no file")]
    EmptyFrame { index: usize },
    #[error("Speed '{0}' is not a whole number of milliseconds")]
    InvalidSpeed(String),
}

/// Unsaved property values of a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileDraft {
    Static {
        solid: bool,
        file: String,
    },
    Animated {
        solid: bool,
        frames: FrameListEditor,
        speed: String,
    },
}

impl TileDraft {
    /// Seed a draft with the tile's current values
    pub fn from_tile(tile: &Tile) -> Self {
        match &tile.kind {
            TileKind::Static { file } => TileDraft::Static {
                solid: tile.solid,
                file: file.clone(),
            },
            TileKind::Animated { frames, speed } => TileDraft::Animated {
                solid: tile.solid,
                frames: FrameListEditor::new(frames.clone()),
                speed: speed.to_string(),
            },
        }
    }

    pub fn tile_type(&self) -> TileType {
        match self {
            TileDraft::Static { .. } => TileType::Static,
            TileDraft::Animated { .. } => TileType::Animated,
        }
    }

    pub fn solid(&self) -> bool {
        match self {
            TileDraft::Static { solid, .. } | TileDraft::Animated { solid, .. } => *solid,
        }
    }

    pub fn set_solid(&mut self, value: bool) {
        match self {
            TileDraft::Static { solid, .. } | TileDraft::Animated { solid, .. } => *solid = value,
        }
    }

    /// Check the draft and produce the values to store
    pub fn validate(&self) -> Result<(bool, TileKind), ValidationError> {
        match self {
            TileDraft::Static { solid, file } => {
                if file.trim().is_empty() {
                    return Err(ValidationError::EmptyFile);
                }
                Ok((*solid, TileKind::Static { file: file.clone() }))
            }
            TileDraft::Animated {
                solid,
                frames,
                speed,
            } => {
                let speed: u32 = speed
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::InvalidSpeed(speed.clone()))?;

                if frames.is_empty() {
                    return Err(ValidationError::EmptyFrameList);
                }
                if let Some(index) = frames.entries().iter().position(|f| f.trim().is_empty()) {
                    return Err(ValidationError::EmptyFrame { index });
                }

                Ok((
                    *solid,
                    TileKind::Animated {
                        frames: frames.entries().to_vec(),
                        speed,
                    },
                ))
            }
        }
    }
}

/// Outcome of the last save attempt, shown on the save button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed,
}

/// Property panel of one selected tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPanel {
    tile_id: TileId,
    pub draft: TileDraft,
    status: Option<SaveStatus>,
    remove_armed: bool,
}

impl PropertyPanel {
    pub fn for_tile(tile: &Tile) -> Self {
        Self {
            tile_id: tile.id(),
            draft: TileDraft::from_tile(tile),
            status: None,
            remove_armed: false,
        }
    }

    pub fn tile_id(&self) -> TileId {
        self.tile_id
    }

    pub fn status(&self) -> Option<SaveStatus> {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: SaveStatus) {
        self.status = Some(status);
    }

    pub fn remove_armed(&self) -> bool {
        self.remove_armed
    }

    /// Arm the remove button; returns true if it was already armed
    pub(crate) fn arm_remove(&mut self) -> bool {
        std::mem::replace(&mut self.remove_armed, true)
    }

    pub fn remove_label(&self) -> &'static str {
        if self.remove_armed {
            CONFIRM_REMOVE_LABEL
        } else {
            REMOVE_LABEL
        }
    }

    /// Entries of the type dropdown
    pub fn type_options(&self) -> impl Iterator<Item = &'static str> {
        TileType::ALL.into_iter().map(TileType::tag)
    }
}
