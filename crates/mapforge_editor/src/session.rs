//! Tile edit session
//!
//! One session backs one open tile atlas editor. It owns the attached atlas,
//! tracks which tile is selected, and applies add, type change, save and
//! delete transactions. Saves and deletes write the store first and only
//! update the in-memory atlas once the write went through.

use std::rc::Rc;

use mapforge_core::{
    AtlasError, AtlasStore, StoreError, Tile, TileAtlas, TileId, TileType,
    DEFAULT_ANIMATION_SPEED_MS,
};
use thiserror::Error;

use crate::events::{Observers, SessionEvent, SubscriptionId};
use crate::properties::{PropertyPanel, SaveStatus, TileDraft, ValidationError};
use crate::textures::{load_tile_textures, TextureLoader};
use crate::EditorConfig;

/// Errors returned by session transitions
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No tile atlas attached")]
    NoAtlas,
    #[error("No tile selected")]
    NoSelection,
    #[error("The selected tile has not been added to the atlas yet")]
    NotCommitted,
    #[error("Draft is a {draft} tile but the selected tile is {tile}")]
    TypeMismatch { draft: TileType, tile: TileType },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::Atlas(AtlasError::Store(err))
    }
}

/// What is currently selected in the tile listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// The trailing "add tile" slot
    New,
    Tile(TileId),
}

/// One entry of the tile listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSlot {
    Tile { index: usize, id: TileId },
    Add,
}

/// Result of pressing the remove button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveRequest {
    /// First click; the button now asks for confirmation
    NeedsConfirmation,
    Removed(TileId),
}

pub struct TileEditSession {
    atlas: Option<TileAtlas>,
    store: Rc<dyn AtlasStore>,
    loader: Rc<dyn TextureLoader>,
    selection: Selection,
    panel: Option<PropertyPanel>,
    observers: Observers,
    animation_speed_ms: u32,
    confirm_remove: bool,
}

impl TileEditSession {
    pub fn new(store: Rc<dyn AtlasStore>, loader: Rc<dyn TextureLoader>) -> Self {
        Self {
            atlas: None,
            store,
            loader,
            selection: Selection::None,
            panel: None,
            observers: Observers::default(),
            animation_speed_ms: DEFAULT_ANIMATION_SPEED_MS,
            confirm_remove: true,
        }
    }

    /// Apply editor settings
    pub fn with_config(mut self, config: &EditorConfig) -> Self {
        self.animation_speed_ms = config.default_animation_speed_ms;
        self.confirm_remove = config.confirm_remove;
        self
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: SessionEvent) {
        self.observers.notify(&event);
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.panel = match selection {
            Selection::Tile(id) => self
                .atlas
                .as_ref()
                .and_then(|atlas| atlas.get_by_id(id))
                .map(PropertyPanel::for_tile),
            Selection::None | Selection::New => None,
        };
        let tile_type = self.selected_tile().map(Tile::tile_type);
        self.emit(SessionEvent::SelectionChanged {
            selection,
            tile_type,
        });
    }

    // ------------------------------------------------------------------
    // Atlas lifecycle
    // ------------------------------------------------------------------

    /// Attach an atlas, replacing the current one and clearing the selection
    pub fn attach(&mut self, atlas: TileAtlas) {
        log::debug!("Attaching tile atlas {}", atlas.filename());
        let filename = atlas.filename().to_string();
        self.atlas = Some(atlas);
        self.emit(SessionEvent::AtlasChanged {
            filename: Some(filename),
        });
        self.set_selection(Selection::None);
    }

    /// Load an atlas from the store and attach it
    pub fn open(&mut self, filename: &str) -> Result<(), SessionError> {
        let atlas = TileAtlas::load(filename, self.store.as_ref())?;
        self.attach(atlas);
        Ok(())
    }

    /// Detach the current atlas and hand it back
    pub fn detach(&mut self) -> Option<TileAtlas> {
        let atlas = self.atlas.take()?;
        self.emit(SessionEvent::AtlasChanged { filename: None });
        self.set_selection(Selection::None);
        Some(atlas)
    }

    pub fn atlas(&self) -> Option<&TileAtlas> {
        self.atlas.as_ref()
    }

    /// Window title for the attached atlas
    pub fn title(&self) -> Option<String> {
        self.atlas
            .as_ref()
            .map(|atlas| format!("Tile atlas ({})", atlas.filename()))
    }

    /// Every tile in atlas order followed by the add slot
    pub fn slots(&self) -> Vec<TileSlot> {
        let Some(atlas) = &self.atlas else {
            return Vec::new();
        };
        atlas
            .iter()
            .enumerate()
            .map(|(index, tile)| TileSlot::Tile {
                index,
                id: tile.id(),
            })
            .chain(std::iter::once(TileSlot::Add))
            .collect()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        match self.selection {
            Selection::Tile(id) => self.atlas.as_ref()?.get_by_id(id),
            Selection::None | Selection::New => None,
        }
    }

    /// Atlas position of the selection; `None` for no selection or the add slot
    pub fn selected_index(&self) -> Option<usize> {
        match self.selection {
            Selection::Tile(id) => self.atlas.as_ref()?.index_of(id),
            Selection::None | Selection::New => None,
        }
    }

    pub fn is_selected(&self, id: TileId) -> bool {
        self.selection == Selection::Tile(id)
    }

    pub fn panel(&self) -> Option<&PropertyPanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut PropertyPanel> {
        self.panel.as_mut()
    }

    /// Select a tile of the attached atlas and open its property panel
    pub fn select(&mut self, id: TileId) -> Result<(), SessionError> {
        let atlas = self.atlas.as_ref().ok_or(SessionError::NoAtlas)?;
        if !atlas.contains(id) {
            log::error!("Cannot select tile {} outside of {}", id, atlas.filename());
            return Err(AtlasError::TileNotFound(id).into());
        }
        self.set_selection(Selection::Tile(id));
        Ok(())
    }

    /// Focus the add slot without creating a tile
    pub fn select_new(&mut self) {
        self.set_selection(Selection::New);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::None);
    }

    /// Handle a click on a listing slot
    pub fn activate(&mut self, slot: TileSlot) -> Result<TileId, SessionError> {
        match slot {
            TileSlot::Tile { id, .. } => self.select(id).map(|_| id),
            TileSlot::Add => self.add_new(),
        }
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Append a blank, non-solid static tile and select it
    pub fn add_new(&mut self) -> Result<TileId, SessionError> {
        let atlas = self.atlas.as_mut().ok_or(SessionError::NoAtlas)?;
        let id = atlas.add(Tile::default());
        self.emit(SessionEvent::TilesChanged);
        self.set_selection(Selection::Tile(id));
        Ok(id)
    }

    /// Convert the selected tile to `target`, keeping its atlas position.
    ///
    /// The replacement is a new tile instance and becomes the selection. The
    /// solid flag comes from the open panel so an unsaved checkbox change
    /// survives the conversion. Returns the id of the selected tile.
    pub fn change_type(&mut self, target: TileType) -> Result<TileId, SessionError> {
        let id = match self.selection {
            Selection::Tile(id) => id,
            Selection::New => return Err(SessionError::NotCommitted),
            Selection::None => return Err(SessionError::NoSelection),
        };
        let atlas = self.atlas.as_mut().ok_or(SessionError::NoAtlas)?;
        let index = atlas.index_of(id).ok_or(SessionError::NotCommitted)?;

        let current = &atlas[index];
        if current.tile_type() == target {
            return Ok(id);
        }

        let mut replacement = current.converted(target, self.animation_speed_ms);
        if let Some(panel) = &self.panel {
            replacement.solid = panel.draft.solid();
        }
        let new_id = replacement.id();
        atlas.replace_at(index, replacement)?;
        log::debug!("Tile {} converted to {} as {}", id, target, new_id);

        self.emit(SessionEvent::TilesChanged);
        self.set_selection(Selection::Tile(new_id));
        Ok(new_id)
    }

    /// Validate `draft`, store it into the selected tile and persist the atlas.
    ///
    /// The draft must be of the tile's current type; use `change_type` to
    /// convert first. Nothing changes when validation or the store write fails.
    pub fn save(&mut self, draft: &TileDraft) -> Result<TileId, SessionError> {
        let id = match self.selection {
            Selection::Tile(id) => id,
            Selection::New => return Err(SessionError::NotCommitted),
            Selection::None => return Err(SessionError::NoSelection),
        };
        let atlas = self.atlas.as_ref().ok_or(SessionError::NoAtlas)?;
        let index = atlas.index_of(id).ok_or(AtlasError::TileNotFound(id))?;
        if draft.tile_type() != atlas[index].tile_type() {
            return Err(SessionError::TypeMismatch {
                draft: draft.tile_type(),
                tile: atlas[index].tile_type(),
            });
        }

        let (solid, kind) = draft.validate()?;

        let mut candidate = atlas.clone();
        if let Some(tile) = candidate.get_mut(index) {
            tile.solid = solid;
            tile.kind = kind;
        }
        candidate.save(self.store.as_ref())?;

        load_tile_textures(self.loader.as_ref(), &candidate[index]);
        self.atlas = Some(candidate);
        self.emit(SessionEvent::TileSaved { id });
        Ok(id)
    }

    /// Save the open panel's draft and record the outcome on the panel
    pub fn save_panel(&mut self) -> Result<TileId, SessionError> {
        let draft = self
            .panel
            .as_ref()
            .map(|panel| panel.draft.clone())
            .ok_or(SessionError::NoSelection)?;

        let result = self.save(&draft);
        if let Some(panel) = self.panel.as_mut() {
            match &result {
                Ok(_) => panel.set_status(SaveStatus::Saved),
                Err(e) => {
                    log::debug!("Tile not saved: {}", e);
                    panel.set_status(SaveStatus::Failed);
                }
            }
        }
        result
    }

    /// Remove a tile from the atlas and persist the atlas.
    ///
    /// If the tile was selected its panel closes and the selection is cleared.
    pub fn delete(&mut self, id: TileId) -> Result<(), SessionError> {
        let atlas = self.atlas.as_ref().ok_or(SessionError::NoAtlas)?;

        let mut candidate = atlas.clone();
        if let Err(e) = candidate.remove(id) {
            log::error!("Cannot delete tile {}: {}", id, e);
            return Err(e.into());
        }
        candidate.save(self.store.as_ref())?;
        self.atlas = Some(candidate);

        if self.is_selected(id) {
            self.set_selection(Selection::None);
        }
        self.emit(SessionEvent::TileDeleted { id });
        self.emit(SessionEvent::TilesChanged);
        Ok(())
    }

    /// Press the remove button of the open panel.
    ///
    /// The first press only arms the button unless confirmation is disabled.
    pub fn request_remove(&mut self) -> Result<RemoveRequest, SessionError> {
        let confirm_remove = self.confirm_remove;
        let panel = self.panel.as_mut().ok_or(SessionError::NoSelection)?;
        let armed = panel.arm_remove();
        if confirm_remove && !armed {
            return Ok(RemoveRequest::NeedsConfirmation);
        }

        let id = panel.tile_id();
        self.delete(id)?;
        Ok(RemoveRequest::Removed(id))
    }
}

impl std::fmt::Debug for TileEditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileEditSession")
            .field("atlas", &self.atlas)
            .field("selection", &self.selection)
            .field("panel", &self.panel)
            .field("observers", &self.observers)
            .finish()
    }
}
