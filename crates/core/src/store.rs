//! Persistence capability seam and the external blob layout.
//!
//! The game persists as two JSON blobs in a key-value store:
//! - `"player"`: `{ location, coins, history }`
//! - `"cacheMementos"`: mapping from `"i:j"` cell key to `{ location, coins }`
//!
//! A missing or unparseable blob is treated as absent: loading never aborts
//! on corrupt state, it falls back to a fresh default.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use serde::de::DeserializeOwned;

use crate::game::Game;
use crate::memento::MementoStore;
use crate::state::Player;
use crate::types::GameConfig;

pub const PLAYER_KEY: &str = "player";
pub const MEMENTOS_KEY: &str = "cacheMementos";

/// External persistent key-value capability. Implementations decide where
/// the serialized blobs live; the core only reads and writes strings.
pub trait KvStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "save I/O error: {e}"),
            Self::Serialize(e) => write!(f, "save serialization error: {e}"),
        }
    }
}

impl std::error::Error for SaveError {}

impl Game {
    /// Write both persisted blobs through the store.
    pub fn save_to(&self, store: &mut dyn KvStore) -> Result<(), SaveError> {
        let player_json =
            serde_json::to_string(&self.state().player).map_err(SaveError::Serialize)?;
        store.set(PLAYER_KEY, &player_json).map_err(SaveError::Io)?;

        let mementos_json =
            serde_json::to_string(self.mementos()).map_err(SaveError::Serialize)?;
        store.set(MEMENTOS_KEY, &mementos_json).map_err(SaveError::Io)?;

        Ok(())
    }

    /// Restore a game from the store, rebuilding the cache neighborhood
    /// around the restored position. I/O failures propagate; missing or
    /// corrupt blobs fall back to fresh defaults.
    pub fn load_from(store: &dyn KvStore, config: GameConfig) -> io::Result<Self> {
        let player = read_blob::<Player>(store, PLAYER_KEY)?
            .unwrap_or_else(|| Player::at_origin(config.origin));
        let mementos = read_blob::<MementoStore>(store, MEMENTOS_KEY)?.unwrap_or_default();
        Ok(Self::from_parts(config, player, mementos))
    }
}

fn read_blob<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> io::Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    Ok(serde_json::from_str(&raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_writes_both_external_keys() {
        let game = Game::new(GameConfig::default());
        let mut store = MemoryStore::new();
        game.save_to(&mut store).expect("save");

        assert!(store.get(PLAYER_KEY).unwrap().is_some());
        assert!(store.get(MEMENTOS_KEY).unwrap().is_some());
    }

    #[test]
    fn player_blob_uses_the_external_layout() {
        let game = Game::new(GameConfig::default());
        let mut store = MemoryStore::new();
        game.save_to(&mut store).expect("save");

        let raw = store.get(PLAYER_KEY).unwrap().expect("player blob");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert!(value.get("location").is_some());
        assert!(value.get("coins").is_some());
        assert!(value.get("history").is_some());
    }

    #[test]
    fn load_from_empty_store_starts_fresh() {
        let store = MemoryStore::new();
        let game = Game::load_from(&store, GameConfig::default()).expect("load");
        assert_eq!(game.state().player.location, game.config().origin);
        assert!(game.state().player.coins.is_empty());
    }

    #[test]
    fn corrupt_blobs_are_treated_as_absent() {
        let mut store = MemoryStore::new();
        store.set(PLAYER_KEY, "{not json").unwrap();
        store.set(MEMENTOS_KEY, "[]").unwrap();

        let game = Game::load_from(&store, GameConfig::default()).expect("load");
        assert_eq!(game.state().player.location, game.config().origin);
        assert!(game.state().player.coins.is_empty());
    }
}
