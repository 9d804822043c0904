//! Desirability gate
//!
//! Maps a house's externally computed desirability onto evolve, hold or
//! devolve for its (bonus-adjusted) tier.

use crate::city::house::{EvolveStatus, HousingUnit};
use crate::city::house_model::HouseModelTable;
use crate::city::tier::HouseTier;

/// Evolve cutoff used for the top tier, which has nowhere to evolve to
pub const UNREACHABLE_EVOLVE_DESIRABILITY: i32 = 1000;

/// Gate a house on desirability alone
///
/// `bonus` lowers the tier the cutoffs are read from, so a house with the
/// pantheon bonus is judged against the tier below its own.
pub fn check_evolve_desirability(house: &HousingUnit, bonus: u8, table: &HouseModelTable) -> EvolveStatus {
    let level = HouseTier::bounded(house.tier as i32 - bonus as i32);
    let row = table.get(level);
    let evolve_des = if level.is_top() {
        UNREACHABLE_EVOLVE_DESIRABILITY
    } else {
        row.evolve_desirability
    };

    if house.desirability <= row.devolve_desirability {
        EvolveStatus::Devolve
    } else if house.desirability >= evolve_des {
        EvolveStatus::Evolve
    } else {
        EvolveStatus::Hold
    }
}
