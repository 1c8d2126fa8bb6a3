//! Ordered tile collection backed by a store

use crate::{AtlasError, AtlasStore, StoreError, Tile, TileId};

/// An ordered, index-addressable list of tiles.
///
/// The position of a tile is its external identifier for the host UI, so the
/// relative order of tiles never changes: new tiles are appended, replacement
/// happens in place, and removal closes the gap without reordering.
#[derive(Debug, Clone, Default)]
pub struct TileAtlas {
    filename: String,
    tiles: Vec<Tile>,
}

impl TileAtlas {
    /// Create an empty atlas persisted under `filename`
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            tiles: Vec::new(),
        }
    }

    /// Create an atlas from existing tiles
    pub fn with_tiles(filename: impl Into<String>, tiles: Vec<Tile>) -> Self {
        Self {
            filename: filename.into(),
            tiles,
        }
    }

    /// Load an atlas from the store
    pub fn load(filename: impl Into<String>, store: &dyn AtlasStore) -> Result<Self, StoreError> {
        let filename = filename.into();
        let tiles = store.load_tiles(&filename)?;
        log::debug!("Loaded tile atlas {} ({} tiles)", filename, tiles.len());
        Ok(Self { filename, tiles })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Get tile at index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Get mutable tile at index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Get a tile by its identity
    pub fn get_by_id(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id() == id)
    }

    /// Position of the first tile with this identity
    pub fn index_of(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id() == id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.index_of(id).is_some()
    }

    /// Append a tile and return its identity
    pub fn add(&mut self, tile: Tile) -> TileId {
        let id = tile.id();
        self.tiles.push(tile);
        id
    }

    /// Remove a tile, keeping the order of the remaining ones.
    ///
    /// The tile must be part of the atlas.
    pub fn remove(&mut self, id: TileId) -> Result<Tile, AtlasError> {
        let index = self.index_of(id).ok_or(AtlasError::TileNotFound(id))?;
        Ok(self.tiles.remove(index))
    }

    /// Replace the tile at `index`, returning the previous one
    pub fn replace_at(&mut self, index: usize, tile: Tile) -> Result<Tile, AtlasError> {
        let len = self.tiles.len();
        let slot = self
            .tiles
            .get_mut(index)
            .ok_or(AtlasError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, tile))
    }

    /// Write every tile, in order, to the store under this atlas' filename
    pub fn save(&self, store: &dyn AtlasStore) -> Result<(), StoreError> {
        store.save_tiles(&self.filename, &self.tiles)?;
        log::info!(
            "Saved tile atlas {} ({} tiles)",
            self.filename,
            self.tiles.len()
        );
        Ok(())
    }
}

impl std::ops::Index<usize> for TileAtlas {
    type Output = Tile;

    fn index(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }
}

impl<'a> IntoIterator for &'a TileAtlas {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, TileKind};

    fn ids(atlas: &TileAtlas) -> Vec<TileId> {
        atlas.iter().map(Tile::id).collect()
    }

    #[test]
    fn test_index_of_tracks_add_and_remove() {
        let mut atlas = TileAtlas::new("tiles.json");
        let a = atlas.add(Tile::new_static("a.png"));
        let b = atlas.add(Tile::new_static("b.png"));
        let c = atlas.add(Tile::new_static("c.png"));

        assert_eq!(atlas.index_of(a), Some(0));
        assert_eq!(atlas.index_of(b), Some(1));
        assert_eq!(atlas.index_of(c), Some(2));

        atlas.remove(b).unwrap();
        assert_eq!(atlas.index_of(b), None);
        assert_eq!(ids(&atlas), vec![a, c]);

        let d = atlas.add(Tile::new_static("d.png"));
        assert_eq!(atlas.index_of(d), Some(2));

        atlas.remove(a).unwrap();
        atlas.remove(c).unwrap();
        atlas.remove(d).unwrap();
        assert!(atlas.is_empty());
    }

    #[test]
    fn test_index_of_matches_shadow_list_over_random_edits() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut atlas = TileAtlas::new("tiles.json");
            let mut shadow: Vec<TileId> = Vec::new();
            let mut removed: Vec<TileId> = Vec::new();

            for step in 0..200 {
                if shadow.is_empty() || rng.gen_bool(0.6) {
                    let id = atlas.add(Tile::new_static(format!("{}_{}.png", seed, step)));
                    shadow.push(id);
                } else {
                    let id = shadow.remove(rng.gen_range(0..shadow.len()));
                    assert_eq!(atlas.remove(id).unwrap().id(), id);
                    removed.push(id);
                }

                assert_eq!(ids(&atlas), shadow, "seed {} step {}", seed, step);
                for (index, id) in shadow.iter().enumerate() {
                    assert_eq!(atlas.index_of(*id), Some(index), "seed {} step {}", seed, step);
                }
                for id in &removed {
                    assert_eq!(atlas.index_of(*id), None, "seed {} step {}", seed, step);
                }
            }
        }
    }

    #[test]
    fn test_equal_tiles_have_separate_identity() {
        let mut atlas = TileAtlas::new("tiles.json");
        let first = atlas.add(Tile::new_static("same.png"));
        let second = atlas.add(Tile::new_static("same.png"));

        assert_ne!(first, second);
        atlas.remove(second).unwrap();
        assert_eq!(atlas.index_of(first), Some(0));
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn test_remove_missing_tile_is_an_error() {
        let mut atlas = TileAtlas::new("tiles.json");
        atlas.add(Tile::new_static("a.png"));

        let stranger = Tile::new_static("a.png");
        let result = atlas.remove(stranger.id());
        assert!(matches!(result, Err(AtlasError::TileNotFound(id)) if id == stranger.id()));
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn test_replace_at_keeps_position() {
        let mut atlas = TileAtlas::new("tiles.json");
        let a = atlas.add(Tile::new_static("a.png"));
        let b = atlas.add(Tile::new_static("b.png"));

        let replacement = Tile::new_animated(vec!["a.png".into()], 1000);
        let replacement_id = replacement.id();
        let old = atlas.replace_at(0, replacement).unwrap();

        assert_eq!(old.id(), a);
        assert_eq!(ids(&atlas), vec![replacement_id, b]);
        assert!(matches!(atlas[0].kind, TileKind::Animated { .. }));
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut atlas = TileAtlas::new("tiles.json");
        atlas.add(Tile::new_static("a.png"));

        let result = atlas.replace_at(1, Tile::default());
        assert!(matches!(
            result,
            Err(AtlasError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_save_and_load_through_store() {
        let store = MemoryStore::new();
        let mut atlas = TileAtlas::new("forest.json");
        let a = atlas.add(Tile::new_static("tree.png").with_solid(true));
        let b = atlas.add(Tile::new_animated(vec!["leaf_0.png".into(), "leaf_1.png".into()], 200));

        atlas.save(&store).unwrap();
        assert_eq!(store.write_count(), 1);

        let loaded = TileAtlas::load("forest.json", &store).unwrap();
        assert_eq!(loaded.filename(), "forest.json");
        assert_eq!(ids(&loaded), vec![a, b]);
        assert!(loaded[0].solid);
        assert_eq!(loaded[1].assets(), vec!["leaf_0.png", "leaf_1.png"]);
    }
}
