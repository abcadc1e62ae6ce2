//! Degree-grid partition: mapping continuous coordinates to cells and the
//! `"i:j"` cell key format shared with the persisted memento layout.

use crate::types::{Cell, Direction, LatLng};

impl Cell {
    /// Cell containing a continuous position, flooring toward negative
    /// infinity on both axes.
    pub fn containing(pos: LatLng, tile_degrees: f64) -> Self {
        Self {
            i: (pos.lat / tile_degrees).floor() as i64,
            j: (pos.lng / tile_degrees).floor() as i64,
        }
    }

    /// Cell key as persisted in the `cacheMementos` mapping.
    pub fn key(self) -> String {
        format!("{}:{}", self.i, self.j)
    }

    /// Parse an `"i:j"` cell key. `None` for anything malformed.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (i_part, j_part) = key.split_once(':')?;
        Some(Self { i: i_part.parse().ok()?, j: j_part.parse().ok()? })
    }
}

impl Direction {
    /// One-tile step vector as `(d_lat, d_lng)` multiples of the tile size.
    pub fn step(self, tile_degrees: f64) -> (f64, f64) {
        match self {
            Self::North => (tile_degrees, 0.0),
            Self::South => (-tile_degrees, 0.0),
            Self::West => (0.0, -tile_degrees),
            Self::East => (0.0, tile_degrees),
        }
    }
}
