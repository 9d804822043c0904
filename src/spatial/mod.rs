//! Map-side collaborators of the house engine
//!
//! Tile storage and pathfinding belong to the host simulation. The engine
//! reaches them only through these traits.

pub mod desirability;
pub mod grid;
pub mod tile_map;

use crate::core::types::TilePos;

pub use desirability::{DesirabilityProfile, StructureKind};
pub use grid::Grid;
pub use tile_map::{Terrain, TileMap, UndoSwitch};

/// Map/tile services consumed by the house engine
pub trait MapServices {
    /// Whether an expanding house may take over this non-house tile
    fn can_absorb(&self, tile: TilePos) -> bool;

    /// A house now covers this tile
    fn occupy(&mut self, tile: TilePos);

    /// A house no longer covers this tile
    fn release(&mut self, tile: TilePos);

    /// Non-house structure on a tile, for the neighbour scan
    fn structure_at(&self, tile: TilePos) -> Option<StructureKind>;

    /// Recompute decorative garden tiles after a footprint grew
    fn refresh_gardens(&mut self);

    /// Rebuild the land pathfinding graph
    fn rebuild_land_routing(&mut self);
}

/// Undo-recording subsystem
pub trait UndoRecorder {
    /// Irreversible footprint changes make the pending undo step invalid
    fn disable(&mut self);
}
