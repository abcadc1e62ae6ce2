//! Durable cache snapshots keyed by cell, surviving cache recreation.
//!
//! The store is the source of truth across neighborhood rebuilds: a cell
//! with a memento always rematerializes from it, and every collect/deposit
//! writes the cache's new state back through `set`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::Cache;
use crate::types::{Cell, Coin, LatLng};

/// Durable projection of a cache: location plus coin collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheMemento {
    pub location: LatLng,
    pub coins: Vec<Coin>,
}

impl CacheMemento {
    pub fn of(cache: &Cache) -> Self {
        Self { location: cache.location, coins: cache.coins.clone() }
    }

    pub fn materialize(&self) -> Cache {
        Cache { location: self.location, coins: self.coins.clone() }
    }
}

/// Repository of cache mementos keyed by `"i:j"` cell key.
///
/// No eviction: the map grows with unique cells visited. Serializes as the
/// plain JSON mapping used by the persisted `cacheMementos` blob.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MementoStore {
    mementos: BTreeMap<String, CacheMemento>,
}

impl MementoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<&CacheMemento> {
        self.mementos.get(&cell.key())
    }

    pub fn set(&mut self, cell: Cell, memento: CacheMemento) {
        self.mementos.insert(cell.key(), memento);
    }

    pub fn clear(&mut self) {
        self.mementos.clear();
    }

    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CacheMemento)> {
        self.mementos.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memento(coin_count: u32) -> CacheMemento {
        let cell = Cell { i: 5, j: -7 };
        CacheMemento {
            location: LatLng::new(0.00055, -0.00065),
            coins: (0..coin_count)
                .map(|serial| Coin {
                    id: crate::types::CoinId { i: cell.i, j: cell.j, serial },
                    value: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn get_after_set_returns_the_stored_memento() {
        let mut store = MementoStore::new();
        let cell = Cell { i: 5, j: -7 };
        assert!(store.get(cell).is_none());

        store.set(cell, memento(3));
        assert_eq!(store.get(cell), Some(&memento(3)));
    }

    #[test]
    fn set_overwrites_previous_state_for_the_cell() {
        let mut store = MementoStore::new();
        let cell = Cell { i: 5, j: -7 };
        store.set(cell, memento(3));
        store.set(cell, memento(0));
        assert_eq!(store.get(cell).map(|m| m.coins.len()), Some(0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn materialize_reproduces_exactly_the_stored_coins() {
        let stored = memento(4);
        let cache = stored.materialize();
        assert_eq!(cache.location, stored.location);
        assert_eq!(cache.coins, stored.coins);
    }

    #[test]
    fn serializes_as_a_plain_cell_key_mapping() {
        let mut store = MementoStore::new();
        store.set(Cell { i: 5, j: -7 }, memento(1));
        let json = serde_json::to_value(&store).expect("serialize");
        assert!(json.get("5:-7").is_some(), "unexpected layout: {json}");
    }
}
