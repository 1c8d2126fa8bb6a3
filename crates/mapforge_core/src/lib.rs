//! Core data structures for mapforge
//!
//! This crate provides the toolkit-independent model behind the tile atlas editor:
//! - `Tile` - A single atlas entry, either static or animated
//! - `TileType` - The registry of tile variants and their discriminator tags
//! - `TileAtlas` - An ordered, index-addressable collection of tiles
//! - `World` - An opaque world document resolved by name
//! - `AtlasStore` / `WorldStore` - Persistence collaborators, with a JSON
//!   file implementation and an in-memory one

mod atlas;
mod error;
mod store;
mod tile;
mod world;

pub use atlas::TileAtlas;
pub use error::{AtlasError, StoreError};
pub use store::{decode_atlas, encode_atlas, AtlasStore, JsonFileStore, MemoryStore, WorldStore};
pub use tile::{Tile, TileId, TileKind, TileType, DEFAULT_ANIMATION_SPEED_MS};
pub use world::World;
