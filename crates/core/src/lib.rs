pub mod game;
pub mod grid;
pub mod luck;
pub mod memento;
pub mod spawn;
pub mod state;
pub mod store;
pub mod types;

pub use game::Game;
pub use memento::{CacheMemento, MementoStore};
pub use state::{Cache, GameState, Player};
pub use store::{KvStore, MEMENTOS_KEY, MemoryStore, PLAYER_KEY, SaveError};
pub use types::*;
