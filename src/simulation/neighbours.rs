//! Worst-desirability neighbour lookup
//!
//! A rough re-run of the desirability falloff over the tiles around a house,
//! used only to tell the player which neighbour is dragging it down.

use crate::city::house::HousingUnit;
use crate::city::registry::HouseRegistry;
use crate::core::config::ScanWindow;
use crate::core::types::TilePos;
use crate::spatial::desirability::StructureKind;
use crate::spatial::MapServices;

/// Structure kind with the most negative contribution near `house`, if any
pub fn worst_desirability_neighbour(
    house: &HousingUnit,
    registry: &HouseRegistry,
    map: &dyn MapServices,
    window: ScanWindow,
) -> Option<StructureKind> {
    let (min, max) = registry.area(house.origin, window.radius_x, window.radius_y);
    let mut lowest = 0;
    let mut worst = None;

    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let tile = TilePos::new(x, y);
            let Some(kind) = structure_at(house, registry, map, tile) else {
                continue;
            };
            let distance = tile.max_distance(&house.origin);
            if let Some(des) = kind.profile().at_distance(distance) {
                if des < lowest {
                    lowest = des;
                    worst = Some(kind);
                }
            }
        }
    }
    worst
}

/// What the scan sees on a tile; the house itself and houses at least as
/// grand are ignored
fn structure_at(
    house: &HousingUnit,
    registry: &HouseRegistry,
    map: &dyn MapServices,
    tile: TilePos,
) -> Option<StructureKind> {
    match registry.house_at(tile) {
        Some(id) if id == house.id => None,
        Some(id) => registry
            .get(id)
            .filter(|other| other.tier < house.tier)
            .map(|other| StructureKind::House(other.tier)),
        None => map.structure_at(tile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::tier::HouseTier;
    use crate::spatial::tile_map::{Terrain, TileMap};

    fn setup() -> (HouseRegistry, TileMap) {
        (HouseRegistry::new(12, 20), TileMap::new(12, 20))
    }

    #[test]
    fn test_no_neighbours() {
        let (mut registry, mut map) = setup();
        let id = registry.spawn(TilePos::new(5, 10), &mut map).unwrap();
        let house = registry.get(id).unwrap();
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, ScanWindow::default()),
            None
        );
    }

    #[test]
    fn test_picks_most_negative() {
        let (mut registry, mut map) = setup();
        let id = registry
            .spawn_tier(TilePos::new(5, 10), HouseTier::SmallInsula, &mut map)
            .unwrap();
        map.place_structure(TilePos::new(6, 10), 1, 1, StructureKind::Market);
        map.place_structure(TilePos::new(5, 12), 1, 1, StructureKind::Warehouse);

        let house = registry.get(id).unwrap();
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, ScanWindow::default()),
            Some(StructureKind::Warehouse)
        );
    }

    #[test]
    fn test_window_is_narrow_along_x() {
        let (mut registry, mut map) = setup();
        let id = registry.spawn(TilePos::new(5, 10), &mut map).unwrap();
        map.place_structure(TilePos::new(7, 10), 1, 1, StructureKind::Barracks);

        let house = registry.get(id).unwrap();
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, ScanWindow::default()),
            None
        );
        let wide = ScanWindow {
            radius_x: 2,
            radius_y: 2,
        };
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, wide),
            Some(StructureKind::Barracks)
        );
    }

    #[test]
    fn test_highway_counts_and_grander_houses_do_not() {
        let (mut registry, mut map) = setup();
        let id = registry
            .spawn_tier(TilePos::new(5, 10), HouseTier::LargeHovel, &mut map)
            .unwrap();
        registry
            .spawn_tier(TilePos::new(5, 11), HouseTier::SmallCasa, &mut map)
            .unwrap();
        let house = registry.get(id).unwrap();
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, ScanWindow::default()),
            None
        );

        map.set_terrain(TilePos::new(5, 13), Terrain::Highway);
        let house = registry.get(id).unwrap();
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, ScanWindow::default()),
            Some(StructureKind::Highway)
        );
    }

    #[test]
    fn test_lower_tier_house_is_reported() {
        let (mut registry, mut map) = setup();
        let id = registry
            .spawn_tier(TilePos::new(5, 10), HouseTier::SmallInsula, &mut map)
            .unwrap();
        registry.spawn(TilePos::new(5, 9), &mut map).unwrap();

        let house = registry.get(id).unwrap();
        assert_eq!(
            worst_desirability_neighbour(house, &registry, &map, ScanWindow::default()),
            Some(StructureKind::House(HouseTier::SmallTent))
        );
    }
}
