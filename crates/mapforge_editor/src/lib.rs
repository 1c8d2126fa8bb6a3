//! Tile atlas editing for mapforge, independent of any UI toolkit
//!
//! The host UI renders the listing from `TileEditSession::slots`, forwards
//! clicks and panel edits to the session, and redraws when the session
//! notifies its observers.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use mapforge_core::TileType;
//! use mapforge_editor::{EditorConfig, NullTextureLoader, TileEditSession};
//!
//! let config = EditorConfig::load_or_default();
//! let store = Rc::new(config.open_store());
//! let mut session = TileEditSession::new(store, Rc::new(NullTextureLoader)).with_config(&config);
//! session.subscribe(|event| println!("{:?}", event));
//!
//! session.open("overworld.json")?;
//! session.add_new()?;
//! session.change_type(TileType::Animated)?;
//! session.save_panel()?;
//! ```

mod config;
mod events;
mod frames;
mod properties;
mod session;
mod textures;
mod world_dialog;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, EditorConfig};
pub use events::{Observer, Observers, SessionEvent, SubscriptionId};
pub use frames::FrameListEditor;
pub use properties::{
    PropertyPanel, SaveStatus, TileDraft, ValidationError, CONFIRM_REMOVE_LABEL, REMOVE_LABEL,
};
pub use session::{RemoveRequest, Selection, SessionError, TileEditSession, TileSlot};
pub use textures::{load_tile_textures, NullTextureLoader, TextureLoadError, TextureLoader};
pub use world_dialog::{WorldError, WorldResolver, DIALOG_TITLE, SUBMIT_TEXT};
