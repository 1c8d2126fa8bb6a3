//! Test fixtures shared by the `#[cfg(test)]` modules of this crate.
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use crate::testing::*;
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use mapforge_core::{MemoryStore, Tile, TileAtlas};

use crate::events::SessionEvent;
use crate::session::TileEditSession;
use crate::textures::{TextureLoadError, TextureLoader};

/// Loader that remembers every asset it was asked for
#[derive(Debug, Default)]
pub struct RecordingLoader {
    loaded: RefCell<Vec<String>>,
}

impl RecordingLoader {
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.borrow().clone()
    }
}

impl TextureLoader for RecordingLoader {
    fn load(&self, asset: &str) -> Result<(), TextureLoadError> {
        self.loaded.borrow_mut().push(asset.to_string());
        Ok(())
    }
}

/// Loader whose every load fails
#[derive(Debug, Default)]
pub struct FailingLoader;

impl TextureLoader for FailingLoader {
    fn load(&self, asset: &str) -> Result<(), TextureLoadError> {
        Err(TextureLoadError {
            asset: asset.to_string(),
            reason: "no such texture".to_string(),
        })
    }
}

/// `sample.json`: a static grass tile followed by a two-frame water animation
pub fn sample_atlas() -> TileAtlas {
    TileAtlas::with_tiles(
        "sample.json",
        vec![
            Tile::new_static("grass.png"),
            Tile::new_animated(vec!["water_0.png".into(), "water_1.png".into()], 500)
                .with_solid(true),
        ],
    )
}

/// Store and loader a session under test writes to
pub struct Fixture {
    pub store: Rc<MemoryStore>,
    pub loader: Rc<RecordingLoader>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Rc::new(MemoryStore::new()),
            loader: Rc::new(RecordingLoader::default()),
        }
    }

    /// Session with no atlas attached
    pub fn session(&self) -> TileEditSession {
        TileEditSession::new(self.store.clone(), self.loader.clone())
    }

    pub fn session_with(&self, atlas: TileAtlas) -> TileEditSession {
        let mut session = self.session();
        session.attach(atlas);
        session
    }

    /// Collect every event the session emits from now on
    pub fn record_events(&self, session: &mut TileEditSession) -> Rc<RefCell<Vec<SessionEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }
}
