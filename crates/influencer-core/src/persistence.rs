//! Save/load of game state and mini-game high scores.
//!
//! The game lives in a single JSON record under [`SAVE_KEY`] in a
//! [`KeyValueStore`]. High scores are plain integer strings under their own
//! keys. For save files outside the store, [`export_binary`] and
//! [`import_binary`] write the snapshot with bincode to any writer.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use bincode::Options;
use thiserror::Error;

use crate::snapshot::{GameSnapshot, InvariantViolation};

/// Key holding the saved game.
pub const SAVE_KEY: &str = "influencer-x-save";

/// Largest binary save [`import_binary`] will read.
pub const MAX_SAVE_BYTES: u64 = 1024 * 1024;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors raised while saving or loading a game.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),

    #[error("corrupt save: {0}")]
    Corrupt(#[from] InvariantViolation),

    #[error("save exceeds {MAX_SAVE_BYTES} bytes")]
    TooLarge,
}

/// String key-value storage, modelled on browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

fn lock_err(context: &'static str) -> StoreError {
    StoreError::Backend(format!("poisoned lock: {context}"))
}

/// In-process store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| lock_err("memory.get"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| lock_err("memory.set"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| lock_err("memory.remove"))?;
        entries.remove(key);
        Ok(())
    }
}

/// One file per key under a root directory.
///
/// Keys map straight to file names, so only `[A-Za-z0-9_-]` is accepted.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // write-then-rename so a crash never leaves half a save
        let staging = path.with_extension("tmp");
        fs::write(&staging, value)?;
        if let Err(e) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write the snapshot as JSON under `key`.
pub fn save_game_to(
    store: &dyn KeyValueStore,
    key: &str,
    snapshot: &GameSnapshot,
) -> Result<(), SaveError> {
    let json = serde_json::to_string(snapshot)?;
    store.set(key, &json)?;
    Ok(())
}

pub fn save_game(store: &dyn KeyValueStore, snapshot: &GameSnapshot) -> Result<(), SaveError> {
    save_game_to(store, SAVE_KEY, snapshot)
}

/// Strict load: every way a save can be bad is an error.
pub fn read_game_from(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<GameSnapshot>, SaveError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let snapshot: GameSnapshot = serde_json::from_str(&json)?;
    snapshot.check_invariants()?;
    Ok(Some(snapshot))
}

pub fn read_game(store: &dyn KeyValueStore) -> Result<Option<GameSnapshot>, SaveError> {
    read_game_from(store, SAVE_KEY)
}

/// Lenient load: a save that cannot be used counts as no save.
pub fn load_game_from(store: &dyn KeyValueStore, key: &str) -> Option<GameSnapshot> {
    match read_game_from(store, key) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("discarding unusable save under {key}: {e}");
            None
        }
    }
}

pub fn load_game(store: &dyn KeyValueStore) -> Option<GameSnapshot> {
    load_game_from(store, SAVE_KEY)
}

pub fn has_save(store: &dyn KeyValueStore) -> bool {
    store.contains(SAVE_KEY).unwrap_or(false)
}

pub fn delete_save(store: &dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(SAVE_KEY)
}

/// Arcade mini-games that keep a best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiniGame {
    Snake,
    Game2048,
}

impl MiniGame {
    pub const ALL: [MiniGame; 2] = [MiniGame::Snake, MiniGame::Game2048];

    pub fn score_key(self) -> &'static str {
        match self {
            MiniGame::Snake => "snake-high-score",
            MiniGame::Game2048 => "2048-best-score",
        }
    }
}

/// Best recorded score, or 0 when missing or unreadable.
pub fn best_score(store: &dyn KeyValueStore, game: MiniGame) -> u64 {
    match store.get(game.score_key()) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("could not read {}: {e}", game.score_key());
            0
        }
    }
}

/// Record `score` if it beats the stored best; returns whether it did.
pub fn submit_score(
    store: &dyn KeyValueStore,
    game: MiniGame,
    score: u64,
) -> Result<bool, StoreError> {
    if score <= best_score(store, game) {
        return Ok(false);
    }
    store.set(game.score_key(), &score.to_string())?;
    Ok(true)
}

fn binary_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_SAVE_BYTES)
}

fn bincode_err(e: Box<bincode::ErrorKind>) -> SaveError {
    match *e {
        bincode::ErrorKind::SizeLimit => SaveError::TooLarge,
        _ => SaveError::Bincode(e),
    }
}

/// Write a snapshot with bincode.
pub fn export_binary<W: Write>(snapshot: &GameSnapshot, writer: W) -> Result<(), SaveError> {
    binary_options()
        .serialize_into(writer, snapshot)
        .map_err(bincode_err)
}

/// Read a snapshot written by [`export_binary`], rejecting corrupt state.
///
/// Length prefixes are checked against [`MAX_SAVE_BYTES`] before anything
/// is allocated.
pub fn import_binary<R: Read>(reader: R) -> Result<GameSnapshot, SaveError> {
    let snapshot: GameSnapshot = binary_options()
        .deserialize_from(reader)
        .map_err(bincode_err)?;
    snapshot.check_invariants()?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use influencer_logic::careers::{Career, Skill};
    use std::io::Cursor;

    fn sample() -> GameSnapshot {
        let mut snapshot = GameSnapshot::new_game("Ana", Career::Musician);
        snapshot.player.skills.set(Skill::Composition, 2.5);
        snapshot.player.stats.followers = 1234;
        snapshot.day = 4;
        snapshot.hour = 17;
        snapshot
    }

    #[test]
    fn test_memory_store_basics() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert!(store.contains("a").unwrap());
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_json_save_roundtrip() {
        let store = MemoryStore::new();
        assert!(!has_save(&store));
        save_game(&store, &sample()).unwrap();
        assert!(has_save(&store));
        assert_eq!(load_game(&store), Some(sample()));
    }

    #[test]
    fn test_missing_save_is_none() {
        let store = MemoryStore::new();
        assert_eq!(load_game(&store), None);
        assert!(read_game(&store).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_saves_are_none() {
        let store = MemoryStore::new();
        store.set(SAVE_KEY, "{not json").unwrap();
        assert_eq!(load_game(&store), None);
        assert!(matches!(read_game(&store), Err(SaveError::Json(_))));

        let mut broken = sample();
        broken.hour = 30;
        store
            .set(SAVE_KEY, &serde_json::to_string(&broken).unwrap())
            .unwrap();
        assert_eq!(load_game(&store), None);
        assert!(matches!(read_game(&store), Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn test_delete_save() {
        let store = MemoryStore::new();
        save_game(&store, &sample()).unwrap();
        delete_save(&store).unwrap();
        assert!(!has_save(&store));
    }

    #[test]
    fn test_high_scores() {
        let store = MemoryStore::new();
        assert_eq!(best_score(&store, MiniGame::Snake), 0);
        assert!(submit_score(&store, MiniGame::Snake, 12).unwrap());
        assert!(!submit_score(&store, MiniGame::Snake, 12).unwrap());
        assert!(!submit_score(&store, MiniGame::Snake, 3).unwrap());
        assert!(submit_score(&store, MiniGame::Snake, 40).unwrap());
        assert_eq!(best_score(&store, MiniGame::Snake), 40);
        assert_eq!(best_score(&store, MiniGame::Game2048), 0);
        assert_eq!(store.get("snake-high-score").unwrap().as_deref(), Some("40"));

        store.set("2048-best-score", "lots").unwrap();
        assert_eq!(best_score(&store, MiniGame::Game2048), 0);
        assert!(submit_score(&store, MiniGame::Game2048, 2048).unwrap());
    }

    #[test]
    fn test_binary_roundtrip() {
        let mut buffer = Vec::new();
        export_binary(&sample(), &mut buffer).unwrap();
        let back = import_binary(Cursor::new(buffer)).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_binary_garbage_rejected() {
        let result = import_binary(Cursor::new(vec![1u8, 2, 3]));
        assert!(matches!(result, Err(SaveError::Bincode(_))));
    }

    #[test]
    fn test_binary_huge_length_prefix_rejected() {
        let result = import_binary(&[0xffu8; 8][..]);
        assert!(matches!(result, Err(SaveError::TooLarge)));
    }

    #[test]
    fn test_dir_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path().join("saves")).unwrap();
        assert_eq!(store.get(SAVE_KEY).unwrap(), None);
        save_game(&store, &sample()).unwrap();
        assert!(store.root().join(SAVE_KEY).exists());
        assert_eq!(load_game(&store), Some(sample()));

        store.remove(SAVE_KEY).unwrap();
        store.remove(SAVE_KEY).unwrap();
        assert!(!has_save(&store));
    }

    #[test]
    fn test_dir_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", "dot.name"] {
            assert!(matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_dir_store_failed_rename_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        // a non-empty directory at the target path makes the rename fail
        fs::create_dir_all(store.root().join(SAVE_KEY).join("occupied")).unwrap();
        assert!(matches!(store.set(SAVE_KEY, "{}"), Err(StoreError::Io(_))));
        assert!(!store.root().join(SAVE_KEY).with_extension("tmp").exists());
    }
}
