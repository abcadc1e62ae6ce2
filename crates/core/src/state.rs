use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Coin, LatLng};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub location: LatLng,
    pub coins: Vec<Coin>,
    pub history: Vec<LatLng>,
}

impl Player {
    pub fn at_origin(origin: LatLng) -> Self {
        Self { location: origin, coins: Vec::new(), history: vec![origin] }
    }
}

/// An active cache. Pure data: display handles belong to the presentation
/// adapter, related by cell key lookup. Recreated on every neighborhood
/// rebuild; only its memento survives.
#[derive(Clone, Debug, PartialEq)]
pub struct Cache {
    pub location: LatLng,
    pub coins: Vec<Coin>,
}

pub struct GameState {
    pub player: Player,
    /// Active cache window, keyed by cell. Replaced wholesale on rebuild.
    pub caches: BTreeMap<Cell, Cache>,
}

impl GameState {
    pub fn new(origin: LatLng) -> Self {
        Self { player: Player::at_origin(origin), caches: BTreeMap::new() }
    }
}
