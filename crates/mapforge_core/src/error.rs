//! Error types shared by the atlas and the stores

use thiserror::Error;

use crate::TileId;

/// Errors raised by a backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Errors raised by atlas mutations
///
/// `IndexOutOfRange` and `TileNotFound` are precondition violations: the caller
/// addressed a slot or a tile that is not part of the atlas.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Tile index {index} out of range (atlas has {len} tiles)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Tile {0} is not part of the atlas")]
    TileNotFound(TileId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
