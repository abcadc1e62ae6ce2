use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        Self { lat: self.lat + d_lat, lng: self.lng + d_lng }
    }
}

/// Grid cell: the quotient of a coordinate pair by the tile size.
/// The unit of spawn determinism; see `grid` for the mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub i: i64,
    pub j: i64,
}

/// Coin identity: the cell where it was minted plus a per-cell serial.
/// Identity is the triple, never object identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinId {
    pub i: i64,
    pub j: i64,
    pub serial: u32,
}

impl CoinId {
    pub fn minting_cell(self) -> Cell {
        Cell { i: self.i, j: self.j }
    }
}

/// Renders the external coin identifier format `{i}:{j}#{serial}`.
impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.i, self.j, self.serial)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCoinIdError {
    pub input: String,
}

impl fmt::Display for ParseCoinIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed coin id {:?}, expected \"i:j#serial\"", self.input)
    }
}

impl std::error::Error for ParseCoinIdError {}

impl FromStr for CoinId {
    type Err = ParseCoinIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoinIdError { input: s.to_string() };
        let (cell_part, serial_part) = s.split_once('#').ok_or_else(err)?;
        let (i_part, j_part) = cell_part.split_once(':').ok_or_else(err)?;
        Ok(Self {
            i: i_part.parse().map_err(|_| err())?,
            j: j_part.parse().map_err(|_| err())?,
            serial: serial_part.parse().map_err(|_| err())?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Outward-facing state-change feed for the presentation adapter.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    PlayerMoved { to: LatLng },
    CacheSpawned { cell: Cell, coin_count: usize },
    CacheRestored { cell: Cell, coin_count: usize },
    CoinsCollected { cell: Cell, count: usize },
    CoinsDeposited { cell: Cell, count: usize },
    WorldReset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// Grid tile size in degrees.
    pub tile_degrees: f64,
    /// Neighborhood half-width in cells; the active window spans
    /// `[-radius, radius]` in both axes around the player.
    pub neighborhood_radius: i32,
    /// Spawn probability threshold for the per-cell hash roll.
    pub spawn_probability: f64,
    /// Starting position; also the position restored by `reset`.
    pub origin: LatLng,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_degrees: 0.0001,
            neighborhood_radius: 8,
            spawn_probability: 0.1,
            origin: LatLng::new(36.98949379578401, -122.06277128548504),
        }
    }
}
