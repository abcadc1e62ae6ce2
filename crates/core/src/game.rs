use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::memento::{CacheMemento, MementoStore};
use crate::spawn;
use crate::state::{GameState, Player};
use crate::types::{Cell, CoinId, Direction, GameConfig, LatLng, LogEvent};

/// Single controller owning all game state. Every mutation runs to
/// completion on the caller's thread; no partial state is observable.
pub struct Game {
    config: GameConfig,
    state: GameState,
    mementos: MementoStore,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_parts(config, Player::at_origin(config.origin), MementoStore::new())
    }

    /// Assemble a game from previously persisted parts and rebuild the
    /// active window around the restored position.
    pub fn from_parts(config: GameConfig, player: Player, mementos: MementoStore) -> Self {
        let mut game = Self {
            state: GameState { player, caches: Default::default() },
            config,
            mementos,
            log: Vec::new(),
        };
        game.rebuild_caches();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mementos(&self) -> &MementoStore {
        &self.mementos
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn player_cell(&self) -> Cell {
        Cell::containing(self.state.player.location, self.config.tile_degrees)
    }

    /// Translate the player, append to movement history, and rebuild the
    /// cache neighborhood at the new position.
    pub fn move_player(&mut self, d_lat: f64, d_lng: f64) {
        let to = self.state.player.location.offset(d_lat, d_lng);
        self.state.player.location = to;
        self.state.player.history.push(to);
        self.log.push(LogEvent::PlayerMoved { to });
        self.rebuild_caches();
    }

    /// One-tile step in a cardinal direction.
    pub fn step(&mut self, direction: Direction) {
        let (d_lat, d_lng) = direction.step(self.config.tile_degrees);
        self.move_player(d_lat, d_lng);
    }

    /// Absolute positioning for an external location feed, expressed as a
    /// delta move so history and regeneration behave like any other move.
    pub fn set_location(&mut self, lat: f64, lng: f64) {
        let here = self.state.player.location;
        self.move_player(lat - here.lat, lng - here.lng);
    }

    /// Move every coin in the identified cache into the player inventory
    /// and write the emptied state through to the memento store. Returns
    /// the number of coins moved; a missing or empty cache is a silent
    /// no-op returning 0.
    pub fn collect(&mut self, cell: Cell) -> usize {
        let Some(cache) = self.state.caches.get_mut(&cell) else {
            return 0;
        };
        if cache.coins.is_empty() {
            return 0;
        }

        let coins = std::mem::take(&mut cache.coins);
        let count = coins.len();
        self.state.player.coins.extend(coins);
        self.mementos.set(cell, CacheMemento::of(cache));
        self.log.push(LogEvent::CoinsCollected { cell, count });
        count
    }

    /// Move the entire player inventory into the identified cache and
    /// persist the cache's new state. Returns the number of coins moved;
    /// a missing cache is a silent no-op returning 0.
    pub fn deposit(&mut self, cell: Cell) -> usize {
        let Some(cache) = self.state.caches.get_mut(&cell) else {
            return 0;
        };

        let coins = std::mem::take(&mut self.state.player.coins);
        let count = coins.len();
        cache.coins.extend(coins);
        self.mementos.set(cell, CacheMemento::of(cache));
        if count > 0 {
            self.log.push(LogEvent::CoinsDeposited { cell, count });
        }
        count
    }

    /// Restore the player to the origin and clear all mementos, so every
    /// cache regenerates at its deterministic spawn state. Confirmation is
    /// the presentation adapter's responsibility.
    pub fn reset(&mut self) {
        self.state.player = Player::at_origin(self.config.origin);
        self.mementos.clear();
        self.log.push(LogEvent::WorldReset);
        self.rebuild_caches();
    }

    /// Last-known location of the cache a coin was minted in, for
    /// re-centering the view from a coin identifier.
    pub fn cache_location_for_coin(&self, id: CoinId) -> Option<LatLng> {
        self.mementos.get(id.minting_cell()).map(|memento| memento.location)
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.state.player.location.lat.to_bits());
        hasher.write_u64(self.state.player.location.lng.to_bits());
        hasher.write_u64(self.state.player.history.len() as u64);
        for coin in &self.state.player.coins {
            write_coin_id(&mut hasher, coin.id);
        }
        for (cell, cache) in &self.state.caches {
            hasher.write_i64(cell.i);
            hasher.write_i64(cell.j);
            for coin in &cache.coins {
                write_coin_id(&mut hasher, coin.id);
            }
        }
        hasher.write_u64(self.mementos.len() as u64);
        hasher.finish()
    }

    fn rebuild_caches(&mut self) {
        self.state.caches = spawn::rebuild_window(
            self.state.player.location,
            &self.config,
            &mut self.mementos,
            &mut self.log,
        );
    }
}

fn write_coin_id(hasher: &mut Xxh3, id: CoinId) {
    hasher.write_i64(id.i);
    hasher.write_i64(id.j);
    hasher.write_u32(id.serial);
}
