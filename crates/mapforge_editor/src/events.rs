//! Change notifications for hosts rendering the editor

use mapforge_core::{TileId, TileType};

use crate::Selection;

/// Something the host UI may need to redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A different atlas was attached (`None` when detached)
    AtlasChanged { filename: Option<String> },
    /// The tile list changed; the listing must be rebuilt from the atlas
    TilesChanged,
    /// The selection moved; `tile_type` picks the property panel to show
    SelectionChanged {
        selection: Selection,
        tile_type: Option<TileType>,
    },
    /// A tile's edited properties were validated and persisted
    TileSaved { id: TileId },
    /// A tile was removed from the atlas and the atlas persisted
    TileDeleted { id: TileId },
}

pub type Observer = Box<dyn FnMut(&SessionEvent)>;

/// Handle returned by `Observers::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: &SessionEvent) {
        for (_, observer) in &mut self.entries {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
