//! Open-world dialog model

use std::rc::Rc;

use mapforge_core::{StoreError, World, WorldStore};
use thiserror::Error;

pub const DIALOG_TITLE: &str = "Worlds";
pub const SUBMIT_TEXT: &str = "Open World";

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("World not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves world names from the store's listing into loaded worlds
pub struct WorldResolver {
    store: Rc<dyn WorldStore>,
    world_files: Vec<String>,
}

impl WorldResolver {
    pub fn new(store: Rc<dyn WorldStore>) -> Self {
        Self {
            store,
            world_files: Vec::new(),
        }
    }

    /// Refresh the listing; call every time the dialog is shown since the
    /// world directory may have changed in between.
    pub fn show(&mut self) -> Result<&[String], WorldError> {
        self.world_files = self.store.list_world_files()?;
        log::debug!("Listed {} worlds", self.world_files.len());
        Ok(&self.world_files)
    }

    /// Names from the last refresh
    pub fn world_files(&self) -> &[String] {
        &self.world_files
    }

    /// Load the world listed under `name` and stamp it with that name
    pub fn open(&self, name: &str) -> Result<World, WorldError> {
        if !self.world_files.iter().any(|file| file == name) {
            return Err(WorldError::NotFound(name.to_string()));
        }
        let mut world = self.store.load_world(name)?;
        world.world_name = name.to_string();
        log::info!("Opened world {}", name);
        Ok(world)
    }
}

impl std::fmt::Debug for WorldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldResolver")
            .field("world_files", &self.world_files)
            .finish()
    }
}
