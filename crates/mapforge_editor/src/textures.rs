//! Texture loading collaborator

use mapforge_core::Tile;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to load texture '{asset}': {reason}")]
pub struct TextureLoadError {
    pub asset: String,
    pub reason: String,
}

/// Resolves asset identifiers into displayable resources owned by the host
pub trait TextureLoader {
    fn load(&self, asset: &str) -> Result<(), TextureLoadError>;
}

/// Loader for hosts that do not display textures
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTextureLoader;

impl TextureLoader for NullTextureLoader {
    fn load(&self, _asset: &str) -> Result<(), TextureLoadError> {
        Ok(())
    }
}

/// Load every asset of `tile`. Failures only affect what is displayed, so
/// they are logged and skipped.
pub fn load_tile_textures(loader: &dyn TextureLoader, tile: &Tile) {
    for asset in tile.assets() {
        if let Err(e) = loader.load(asset) {
            log::warn!("{}", e);
        }
    }
}
