//! In-memory tile map implementing the map collaborators
//!
//! Hosts with their own map storage implement `MapServices` directly; this
//! one backs the CLI, the benches and the tests.

use serde::{Deserialize, Serialize};

use crate::core::types::TilePos;
use crate::spatial::desirability::StructureKind;
use crate::spatial::grid::Grid;
use crate::spatial::{MapServices, UndoRecorder};

/// What occupies a tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Empty,
    Garden,
    Road,
    Highway,
    House,
    Structure(StructureKind),
}

#[derive(Debug, Clone)]
pub struct TileMap {
    tiles: Grid<Terrain>,
    /// Number of garden refreshes requested
    pub garden_refreshes: u32,
    /// Number of land routing rebuilds requested
    pub routing_rebuilds: u32,
}

impl TileMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: Grid::new(width, height),
            garden_refreshes: 0,
            routing_rebuilds: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.tiles.width
    }

    pub fn height(&self) -> usize {
        self.tiles.height
    }

    pub fn terrain(&self, tile: TilePos) -> Option<Terrain> {
        self.tiles.get(tile).copied()
    }

    pub fn set_terrain(&mut self, tile: TilePos, terrain: Terrain) {
        self.tiles.set(tile, terrain);
    }

    /// Place a structure over a rectangle of tiles
    pub fn place_structure(&mut self, origin: TilePos, width: i32, height: i32, kind: StructureKind) {
        for dy in 0..height {
            for dx in 0..width {
                self.tiles.set(origin.offset(dx, dy), Terrain::Structure(kind));
            }
        }
    }
}

impl MapServices for TileMap {
    fn can_absorb(&self, tile: TilePos) -> bool {
        matches!(self.tiles.get(tile), Some(Terrain::Empty | Terrain::Garden))
    }

    fn occupy(&mut self, tile: TilePos) {
        self.tiles.set(tile, Terrain::House);
    }

    fn release(&mut self, tile: TilePos) {
        self.tiles.set(tile, Terrain::Empty);
    }

    fn structure_at(&self, tile: TilePos) -> Option<StructureKind> {
        match self.tiles.get(tile)? {
            Terrain::Structure(kind) => Some(*kind),
            Terrain::Highway => Some(StructureKind::Highway),
            Terrain::Garden => Some(StructureKind::Garden),
            _ => None,
        }
    }

    fn refresh_gardens(&mut self) {
        self.garden_refreshes += 1;
    }

    fn rebuild_land_routing(&mut self) {
        self.routing_rebuilds += 1;
    }
}

/// Undo recorder that only remembers whether recording is still enabled
#[derive(Debug, Clone)]
pub struct UndoSwitch {
    pub enabled: bool,
    /// Times recording was disabled
    pub disabled_count: u32,
}

impl UndoSwitch {
    pub fn new() -> Self {
        Self {
            enabled: true,
            disabled_count: 0,
        }
    }
}

impl Default for UndoSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoRecorder for UndoSwitch {
    fn disable(&mut self) {
        self.enabled = false;
        self.disabled_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_and_garden_are_absorbable() {
        let mut map = TileMap::new(4, 4);
        map.set_terrain(TilePos::new(1, 0), Terrain::Garden);
        map.set_terrain(TilePos::new(2, 0), Terrain::Road);
        map.place_structure(TilePos::new(3, 0), 1, 1, StructureKind::Temple);

        assert!(map.can_absorb(TilePos::new(0, 0)));
        assert!(map.can_absorb(TilePos::new(1, 0)));
        assert!(!map.can_absorb(TilePos::new(2, 0)));
        assert!(!map.can_absorb(TilePos::new(3, 0)));
        assert!(!map.can_absorb(TilePos::new(9, 9)));
    }

    #[test]
    fn test_occupy_release_round_trip() {
        let mut map = TileMap::new(2, 2);
        let tile = TilePos::new(1, 1);
        map.occupy(tile);
        assert_eq!(map.terrain(tile), Some(Terrain::House));
        assert!(!map.can_absorb(tile));
        map.release(tile);
        assert_eq!(map.terrain(tile), Some(Terrain::Empty));
    }

    #[test]
    fn test_structure_at_reports_highway() {
        let mut map = TileMap::new(3, 3);
        map.set_terrain(TilePos::new(0, 0), Terrain::Highway);
        map.place_structure(TilePos::new(1, 1), 2, 2, StructureKind::Warehouse);
        assert_eq!(map.structure_at(TilePos::new(0, 0)), Some(StructureKind::Highway));
        assert_eq!(map.structure_at(TilePos::new(2, 2)), Some(StructureKind::Warehouse));
        assert_eq!(map.structure_at(TilePos::new(0, 2)), None);
    }

    #[test]
    fn test_undo_switch_disables() {
        let mut undo = UndoSwitch::new();
        assert!(undo.enabled);
        undo.disable();
        assert!(!undo.enabled);
        assert_eq!(undo.disabled_count, 1);
    }
}
