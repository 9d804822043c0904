//! Housing unit record
//!
//! A house is one record with a tier field. Evolving or devolving rewrites
//! the tier (and possibly the footprint) in place; identity and stock are
//! preserved across transitions.

use serde::{Deserialize, Serialize};

use crate::city::inventory::Inventory;
use crate::city::tier::HouseTier;
use crate::core::types::{HouseId, Tick, TilePos};
use crate::simulation::explanation::EvolveText;

/// Outcome of the desirability gate and requirement checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolveStatus {
    Devolve,
    #[default]
    Hold,
    Evolve,
}

/// Whether the house still exists on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseState {
    InUse,
    /// Absorbed by a merge or demolished
    Removed,
}

/// Boolean access flags computed by the external coverage walkers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccess {
    /// Fountain or reservoir water
    pub water: bool,
    pub well: bool,
    pub latrines: bool,
    /// Reached by a pantheon walker
    pub pantheon: bool,
    pub temple_mercury: bool,
    pub temple_mars: bool,
}

/// Graduated service coverage levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLevels {
    /// Aggregate entertainment coverage, 0-100
    pub entertainment: u8,
    /// 0 none, 1 school, 2 school and library, 3 all three
    pub education: u8,
    pub school: bool,
    pub library: bool,
    /// Distinct gods the house has access to
    pub gods: u8,
    pub barber: u8,
    pub bathhouse: u8,
    /// 0 none, 1 clinic, 2 clinic and hospital
    pub health: u8,
    pub clinic: bool,
}

/// One housing unit in the city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingUnit {
    pub id: HouseId,
    pub tier: HouseTier,
    pub state: HouseState,
    /// Top-left tile of the footprint
    pub origin: TilePos,
    /// Side length of the square footprint
    pub size: u8,
    pub population: u32,
    /// Fed in by the external desirability model
    pub desirability: i32,
    pub access: ServiceAccess,
    pub services: ServiceLevels,
    pub inventory: Inventory,
    /// Consecutive DEVOLVE ticks seen so far
    pub devolve_delay: u8,
    /// Formed by merging four single-tile houses
    pub is_merged: bool,
    pub no_space_to_expand: bool,
    pub has_plague: bool,
    /// Stamp of the last daily pass that processed this house
    pub last_update: Option<Tick>,
    /// Last desirability gate result
    pub evolve_status: EvolveStatus,
    /// Last advisory explanation
    pub explanation: Option<EvolveText>,
}

impl HousingUnit {
    /// A freshly built small tent on a single tile
    pub fn new(id: HouseId, origin: TilePos) -> Self {
        Self::with_tier(id, origin, HouseTier::SmallTent)
    }

    /// A house of the given tier occupying that tier's usual footprint
    pub fn with_tier(id: HouseId, origin: TilePos, tier: HouseTier) -> Self {
        Self {
            id,
            tier,
            state: HouseState::InUse,
            origin,
            size: tier.footprint_side(),
            population: 0,
            desirability: 0,
            access: ServiceAccess::default(),
            services: ServiceLevels::default(),
            inventory: Inventory::new(),
            devolve_delay: 0,
            is_merged: false,
            no_space_to_expand: false,
            has_plague: false,
            last_update: None,
            evolve_status: EvolveStatus::Hold,
            explanation: None,
        }
    }

    pub fn is_in_use(&self) -> bool {
        self.state == HouseState::InUse
    }

    /// Tiles covered by the footprint
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> {
        self.origin.square(self.size)
    }

    pub fn covers(&self, tile: TilePos) -> bool {
        let side = self.size as i32;
        tile.x >= self.origin.x
            && tile.y >= self.origin.y
            && tile.x < self.origin.x + side
            && tile.y < self.origin.y + side
    }

    /// Whether the whole footprint lies inside the square at `origin`
    pub fn fits_within(&self, origin: TilePos, side: u8) -> bool {
        let side = side as i32;
        let own = self.size as i32;
        self.origin.x >= origin.x
            && self.origin.y >= origin.y
            && self.origin.x + own <= origin.x + side
            && self.origin.y + own <= origin.y + side
    }
}
