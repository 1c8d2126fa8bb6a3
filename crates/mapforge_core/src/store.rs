//! Persistence collaborators for atlases and worlds
//!
//! Atlases are stored as `{ "tiles": [...] }` JSON documents, each tile tagged
//! with its `type`. Worlds are JSON documents listed by file stem.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::{StoreError, Tile, World};

/// Key/path to serialized atlas storage
pub trait AtlasStore {
    /// Durably write the full tile list under `filename`.
    ///
    /// On failure the previously stored version must remain intact.
    fn save_tiles(&self, filename: &str, tiles: &[Tile]) -> Result<(), StoreError>;

    /// Read the tile list stored under `filename`
    fn load_tiles(&self, filename: &str) -> Result<Vec<Tile>, StoreError>;
}

/// Source of world documents
pub trait WorldStore {
    /// Names of all worlds currently available, sorted
    fn list_world_files(&self) -> Result<Vec<String>, StoreError>;

    /// Deserialize the world stored under `name`
    fn load_world(&self, name: &str) -> Result<World, StoreError>;
}

#[derive(Serialize)]
struct AtlasDocumentRef<'a> {
    tiles: &'a [Tile],
}

#[derive(Deserialize)]
struct AtlasDocument {
    #[serde(default)]
    tiles: Vec<Tile>,
}

/// Serialize a tile list into the atlas document format
pub fn encode_atlas(tiles: &[Tile]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(&AtlasDocumentRef { tiles })?)
}

/// Parse an atlas document
pub fn decode_atlas(bytes: &[u8]) -> Result<Vec<Tile>, StoreError> {
    let document: AtlasDocument = serde_json::from_slice(bytes)?;
    Ok(document.tiles)
}

/// Directory-backed JSON store.
///
/// Atlases live under `atlas_dir/<filename>`, worlds under
/// `world_dir/<name>.<world_extension>`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    atlas_dir: PathBuf,
    world_dir: PathBuf,
    world_extension: String,
}

impl JsonFileStore {
    pub fn new(atlas_dir: impl Into<PathBuf>, world_dir: impl Into<PathBuf>) -> Self {
        Self {
            atlas_dir: atlas_dir.into(),
            world_dir: world_dir.into(),
            world_extension: "json".to_string(),
        }
    }

    /// Only list world files with this extension
    pub fn with_world_extension(mut self, extension: impl Into<String>) -> Self {
        self.world_extension = extension.into();
        self
    }

    pub fn atlas_path(&self, filename: &str) -> PathBuf {
        self.atlas_dir.join(filename)
    }

    pub fn world_path(&self, name: &str) -> PathBuf {
        self.world_dir
            .join(format!("{}.{}", name, self.world_extension))
    }
}

fn not_found(err: std::io::Error, what: &str) -> StoreError {
    if err.kind() == std::io::ErrorKind::NotFound {
        StoreError::NotFound(what.to_string())
    } else {
        StoreError::Io(err)
    }
}

// Write a temp file next to the target, flush it to disk, then rename it over
// the target. The temp file is deleted if anything before the rename fails.
fn write_atomic(
    path: &Path,
    write: impl FnOnce(&mut fs::File) -> std::io::Result<()>,
) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    // Make the rename itself durable
    #[cfg(unix)]
    fs::File::open(parent)?.sync_all()?;

    Ok(())
}

impl AtlasStore for JsonFileStore {
    fn save_tiles(&self, filename: &str, tiles: &[Tile]) -> Result<(), StoreError> {
        let bytes = encode_atlas(tiles)?;
        let path = self.atlas_path(filename);
        write_atomic(&path, |file| file.write_all(&bytes))?;
        log::debug!("Atlas written to {:?} ({} bytes)", path, bytes.len());
        Ok(())
    }

    fn load_tiles(&self, filename: &str) -> Result<Vec<Tile>, StoreError> {
        let bytes = fs::read(self.atlas_path(filename)).map_err(|e| not_found(e, filename))?;
        decode_atlas(&bytes)
    }
}

impl WorldStore for JsonFileStore {
    fn list_world_files(&self) -> Result<Vec<String>, StoreError> {
        if !self.world_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.world_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path
                .extension()
                .is_some_and(|ext| ext == self.world_extension.as_str())
            {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn load_world(&self, name: &str) -> Result<World, StoreError> {
        let bytes = fs::read(self.world_path(name)).map_err(|e| not_found(e, name))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// In-process store keeping serialized documents in memory.
///
/// Atlases are kept in their encoded form so a stored atlas can be compared
/// byte for byte. Writes can be switched to fail for hosts that want to
/// exercise their error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    atlases: RefCell<HashMap<String, Vec<u8>>>,
    worlds: RefCell<BTreeMap<String, serde_json::Value>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a world document
    pub fn insert_world(&self, name: impl Into<String>, document: serde_json::Value) {
        self.worlds.borrow_mut().insert(name.into(), document);
    }

    pub fn remove_world(&self, name: &str) -> bool {
        self.worlds.borrow_mut().remove(name).is_some()
    }

    /// Encoded atlas stored under `filename`
    pub fn raw_atlas(&self, filename: &str) -> Option<Vec<u8>> {
        self.atlases.borrow().get(filename).cloned()
    }

    /// Number of successful atlas writes
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Make every following atlas write fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl AtlasStore for MemoryStore {
    fn save_tiles(&self, filename: &str, tiles: &[Tile]) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Rejected(filename.to_string()));
        }
        let bytes = encode_atlas(tiles)?;
        self.atlases.borrow_mut().insert(filename.to_string(), bytes);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn load_tiles(&self, filename: &str) -> Result<Vec<Tile>, StoreError> {
        let atlases = self.atlases.borrow();
        let bytes = atlases
            .get(filename)
            .ok_or_else(|| StoreError::NotFound(filename.to_string()))?;
        decode_atlas(bytes)
    }
}

impl WorldStore for MemoryStore {
    fn list_world_files(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.worlds.borrow().keys().cloned().collect())
    }

    fn load_world(&self, name: &str) -> Result<World, StoreError> {
        let document = self
            .worlds
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(serde_json::from_value(document)?)
    }
}
