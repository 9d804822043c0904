//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Stamp written on a house once it has been processed in a daily pass
pub type Tick = u64;

/// Unique identifier for housing units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HouseId(pub u32);

impl HouseId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Integer tile coordinate on the city map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance, the metric the desirability model falls off by
    pub fn max_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// All tiles of the `side` x `side` square whose top-left corner is `self`
    pub fn square(self, side: u8) -> impl Iterator<Item = TilePos> {
        let side = side as i32;
        (0..side).flat_map(move |dy| (0..side).map(move |dx| self.offset(dx, dy)))
    }
}
