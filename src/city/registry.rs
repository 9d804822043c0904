//! House registry - owns every housing unit and the tiles they cover
//!
//! Besides lookup and tier-bucketed traversal, the registry implements the
//! footprint operations the transition table triggers: merging four
//! single-tile houses, expanding into a larger square, and shrinking or
//! desizing back down.

use ahash::AHashMap;

use crate::city::house::{HouseState, HousingUnit};
use crate::city::tier::HouseTier;
use crate::core::error::{HouseError, Result};
use crate::core::types::{HouseId, TilePos};
use crate::spatial::grid::Grid;
use crate::spatial::MapServices;

/// Tier given to the single-tile houses split off by `shrink`
pub const SPLIT_PIECE_TIER: HouseTier = HouseTier::MediumInsula;

#[derive(Debug, Clone)]
pub struct HouseRegistry {
    houses: Vec<HousingUnit>,
    index: AHashMap<HouseId, usize>,
    occupancy: Grid<Option<HouseId>>,
    next_id: u32,
}

impl HouseRegistry {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            houses: Vec::new(),
            index: AHashMap::new(),
            occupancy: Grid::new(width, height),
            next_id: 1,
        }
    }

    pub fn width(&self) -> usize {
        self.occupancy.width
    }

    pub fn height(&self) -> usize {
        self.occupancy.height
    }

    /// Build a small tent on a vacant lot
    pub fn spawn(&mut self, origin: TilePos, map: &mut dyn MapServices) -> Result<HouseId> {
        self.spawn_tier(origin, HouseTier::SmallTent, map)
    }

    /// Place a house of any tier; every footprint tile must be free
    pub fn spawn_tier(
        &mut self,
        origin: TilePos,
        tier: HouseTier,
        map: &mut dyn MapServices,
    ) -> Result<HouseId> {
        for tile in origin.square(tier.footprint_side()) {
            if !self.occupancy.in_bounds(tile) || self.house_at(tile).is_some() {
                return Err(HouseError::TileUnavailable(tile));
            }
        }
        let id = self.allocate_id();
        let house = HousingUnit::with_tier(id, origin, tier);
        Ok(self.insert(house, map))
    }

    fn allocate_id(&mut self) -> HouseId {
        let id = HouseId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, house: HousingUnit, map: &mut dyn MapServices) -> HouseId {
        let id = house.id;
        for tile in house.tiles() {
            self.occupancy.set(tile, Some(id));
            map.occupy(tile);
        }
        self.index.insert(id, self.houses.len());
        self.houses.push(house);
        id
    }

    pub fn get(&self, id: HouseId) -> Option<&HousingUnit> {
        self.index.get(&id).map(|&i| &self.houses[i])
    }

    pub fn get_mut(&mut self, id: HouseId) -> Option<&mut HousingUnit> {
        self.index.get(&id).map(|&i| &mut self.houses[i])
    }

    /// Inclusive corners of the window around `center`, clipped to the map
    pub fn area(&self, center: TilePos, radius_x: i32, radius_y: i32) -> (TilePos, TilePos) {
        self.occupancy.area(center, radius_x, radius_y)
    }

    pub fn house_at(&self, tile: TilePos) -> Option<HouseId> {
        self.occupancy.get(tile).copied().flatten()
    }

    /// Houses still on the map, in creation order
    pub fn iter(&self) -> impl Iterator<Item = &HousingUnit> + '_ {
        self.houses.iter().filter(|h| h.is_in_use())
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Snapshot of the in-use houses currently at `tier`
    pub fn ids_of_tier(&self, tier: HouseTier) -> Vec<HouseId> {
        self.iter().filter(|h| h.tier == tier).map(|h| h.id).collect()
    }

    pub fn count_by_tier(&self) -> [usize; 20] {
        let mut counts = [0; 20];
        for house in self.iter() {
            counts[house.tier.index()] += 1;
        }
        counts
    }

    /// Demolish a house and free its tiles
    pub fn remove(&mut self, id: HouseId, map: &mut dyn MapServices) -> Result<()> {
        let house = self.get(id).ok_or(HouseError::HouseNotFound(id))?;
        if !house.is_in_use() {
            return Err(HouseError::HouseNotFound(id));
        }
        if let Some(removed) = self.retire(id) {
            for tile in removed.tiles() {
                map.release(tile);
            }
        }
        Ok(())
    }

    /// Mark a house removed and clear its occupancy without touching the map
    fn retire(&mut self, id: HouseId) -> Option<HousingUnit> {
        let house = self.get_mut(id)?;
        house.state = HouseState::Removed;
        let snapshot = house.clone();
        for tile in snapshot.tiles() {
            if self.house_at(tile) == Some(id) {
                self.occupancy.set(tile, None);
            }
        }
        Some(snapshot)
    }

    /// Rewrite the tier of a house in place
    pub fn change_tier(&mut self, id: HouseId, tier: HouseTier) -> bool {
        match self.get_mut(id) {
            Some(house) if house.is_in_use() => {
                house.tier = tier;
                true
            }
            _ => false,
        }
    }

    /// Merge four same-tier single-tile houses into one 2x2 house
    ///
    /// The house must sit at the top-left of the square. Stock and population
    /// of the absorbed houses move into it. Returns whether a merge happened.
    pub fn merge(&mut self, id: HouseId) -> bool {
        let Some(house) = self.get(id) else {
            return false;
        };
        if !house.is_in_use() || house.is_merged || house.size != 1 {
            return false;
        }
        let tier = house.tier;
        let origin = house.origin;

        let mut partners = Vec::with_capacity(3);
        for tile in origin.square(2).skip(1) {
            let partner = self.house_at(tile).and_then(|pid| self.get(pid));
            match partner {
                Some(p) if p.tier == tier && p.size == 1 && !p.is_merged => partners.push(p.id),
                _ => return false,
            }
        }

        for pid in partners {
            if let Some(partner) = self.retire(pid) {
                if let Some(house) = self.get_mut(id) {
                    house.inventory.absorb(partner.inventory);
                    house.population += partner.population;
                }
            }
        }
        if let Some(house) = self.get_mut(id) {
            house.size = 2;
            house.is_merged = true;
        }
        for tile in origin.square(2) {
            self.occupancy.set(tile, Some(id));
        }
        true
    }

    /// Find a square of `tiles` tiles containing the house that it can grow into
    ///
    /// Every tile of the square must be the house itself, part of a house of
    /// the same or lower tier lying entirely within the square, or land the
    /// map lets a house absorb. Returns the square's top-left tile.
    pub fn can_expand(&self, id: HouseId, tiles: u8, map: &dyn MapServices) -> Option<TilePos> {
        let house = self.get(id)?;
        let side = square_side(tiles)?;
        if side < house.size {
            return None;
        }
        let slack = (side - house.size) as i32;

        for dy in 0..=slack {
            for dx in 0..=slack {
                let candidate = house.origin.offset(-dx, -dy);
                if self.square_is_absorbable(house, candidate, side, map) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn square_is_absorbable(
        &self,
        house: &HousingUnit,
        origin: TilePos,
        side: u8,
        map: &dyn MapServices,
    ) -> bool {
        origin.square(side).all(|tile| {
            if !self.occupancy.in_bounds(tile) {
                return false;
            }
            match self.house_at(tile) {
                Some(other) if other == house.id => true,
                Some(other) => self
                    .get(other)
                    .map(|o| o.tier <= house.tier && o.fits_within(origin, side))
                    .unwrap_or(false),
                None => map.can_absorb(tile),
            }
        })
    }

    /// Grow a house into the square at `origin` and set its new tier
    ///
    /// Houses inside the square are absorbed along with their stock and
    /// population; free land is claimed on the map.
    pub fn expand(
        &mut self,
        id: HouseId,
        origin: TilePos,
        side: u8,
        tier: HouseTier,
        map: &mut dyn MapServices,
    ) -> bool {
        if !self.get(id).map(|h| h.is_in_use()).unwrap_or(false) {
            return false;
        }

        let mut absorbed = Vec::new();
        for tile in origin.square(side) {
            match self.house_at(tile) {
                Some(other) if other == id => {}
                Some(other) => {
                    if !absorbed.contains(&other) {
                        absorbed.push(other);
                    }
                }
                None => map.occupy(tile),
            }
        }

        for other in absorbed {
            if let Some(partner) = self.retire(other) {
                if let Some(house) = self.get_mut(id) {
                    house.inventory.absorb(partner.inventory);
                    house.population += partner.population;
                }
            }
        }

        if let Some(house) = self.get_mut(id) {
            house.origin = origin;
            house.size = side;
            house.tier = tier;
            house.no_space_to_expand = false;
        }
        for tile in origin.square(side) {
            self.occupancy.set(tile, Some(id));
        }
        true
    }

    /// Split a multi-tile house back down one footprint step
    ///
    /// The house keeps a footprint one side smaller at its origin; every freed
    /// tile becomes a new medium insula. Stock and population are shared
    /// evenly. Returns the ids of the new houses.
    pub fn shrink(&mut self, id: HouseId, tier: HouseTier, map: &mut dyn MapServices) -> Vec<HouseId> {
        let Some(freed) = self.shrink_footprint(id, tier) else {
            return Vec::new();
        };

        let (shares, population_share) = match self.get_mut(id) {
            Some(house) => {
                let shares = house.inventory.split(freed.len());
                let holders = freed.len() as u32 + 1;
                let share = house.population / holders;
                house.population -= share * freed.len() as u32;
                (shares, share)
            }
            None => return Vec::new(),
        };

        let mut created = Vec::with_capacity(freed.len());
        for (tile, inventory) in freed.into_iter().zip(shares) {
            let new_id = self.allocate_id();
            let mut piece = HousingUnit::with_tier(new_id, tile, SPLIT_PIECE_TIER);
            piece.size = 1;
            piece.inventory = inventory;
            piece.population = population_share;
            created.push(self.insert(piece, map));
        }
        created
    }

    /// Reduce a house by one footprint step without splitting it
    ///
    /// Freed tiles go back to the map as vacant land; the house keeps all of
    /// its stock.
    pub fn desize(&mut self, id: HouseId, tier: HouseTier, map: &mut dyn MapServices) -> bool {
        let Some(freed) = self.shrink_footprint(id, tier) else {
            return false;
        };
        for tile in freed {
            map.release(tile);
        }
        true
    }

    /// Shared footprint step for shrink and desize; returns the freed tiles
    fn shrink_footprint(&mut self, id: HouseId, tier: HouseTier) -> Option<Vec<TilePos>> {
        let house = self.get_mut(id)?;
        if !house.is_in_use() {
            return None;
        }
        if house.size < 2 {
            house.tier = tier;
            return Some(Vec::new());
        }
        let old = house.clone();
        house.size -= 1;
        house.tier = tier;
        house.is_merged = false;
        let kept = house.clone();

        let freed: Vec<TilePos> = old.tiles().filter(|tile| !kept.covers(*tile)).collect();
        for tile in &freed {
            self.occupancy.set(*tile, None);
        }
        Some(freed)
    }
}

/// Side length of a square of `tiles` tiles
fn square_side(tiles: u8) -> Option<u8> {
    (1..=tiles).find(|side| side * side == tiles)
}
