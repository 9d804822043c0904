//! Requirement evaluator
//!
//! Checks one house against one tier's row in a fixed priority order and
//! stops at the first unmet need. Every check it passes or fails is tallied
//! into the demand aggregate for the advisory layer.

use crate::city::demand::{DemandAggregate, MissingService, RequiredService};
use crate::city::house::{EvolveStatus, HousingUnit};
use crate::city::house_model::HouseModelTable;
use crate::city::inventory::Good;
use crate::city::modifiers::GlobalModifiers;
use crate::city::tier::HouseTier;
use crate::simulation::desirability::check_evolve_desirability;

/// Whether the house meets every service and goods requirement of its tier
///
/// With `for_upgrade` the row of the next tier is used instead. `bonus`
/// lowers the evaluated tier by one.
pub fn has_required_goods_and_services(
    house: &HousingUnit,
    for_upgrade: bool,
    bonus: u8,
    table: &HouseModelTable,
    modifiers: &GlobalModifiers,
    demands: &mut DemandAggregate,
) -> bool {
    let level = HouseTier::bounded(house.tier as i32 + i32::from(for_upgrade) - bonus as i32);
    let row = table.get(level);
    let services = &house.services;

    // water
    if !house.access.water {
        if row.water >= 2 {
            if level > HouseTier::SmallCasa {
                demands.add_missing(MissingService::Fountain);
                return false;
            } else if !house.access.well {
                demands.add_missing(MissingService::Well);
                return false;
            } else if level > HouseTier::LargeShack && !house.access.latrines {
                return false;
            }
        }
        if row.water == 1 && !house.access.well {
            demands.add_missing(MissingService::Well);
            return false;
        }
    }

    // entertainment
    if services.entertainment < row.entertainment {
        demands.add_missing(if services.entertainment > 0 {
            MissingService::MoreEntertainment
        } else {
            MissingService::Entertainment
        });
        return false;
    }

    // education
    if services.education < row.education {
        demands.add_missing(if services.education > 0 {
            MissingService::MoreEducation
        } else {
            MissingService::Education
        });
        return false;
    }
    match row.education {
        2 => {
            demands.add_requiring(RequiredService::School);
            demands.add_requiring(RequiredService::Library);
        }
        1 => demands.add_requiring(RequiredService::School),
        _ => {}
    }

    // religion
    let religion = row.religion_required();
    if services.gods < religion {
        demands.add_missing(match religion {
            1 => MissingService::Religion,
            2 => MissingService::SecondReligion,
            _ => MissingService::ThirdReligion,
        });
        return false;
    } else if religion > 0 {
        demands.add_requiring(RequiredService::Religion);
    }

    if services.barber < row.barber {
        demands.add_missing(MissingService::Barber);
        return false;
    }
    if row.barber == 1 {
        demands.add_requiring(RequiredService::Barber);
    }

    if services.bathhouse < row.bathhouse {
        demands.add_missing(MissingService::Bathhouse);
        return false;
    }
    if row.bathhouse == 1 {
        demands.add_requiring(RequiredService::Bathhouse);
    }

    // health
    if services.health < row.health {
        demands.add_missing(if row.health < 2 {
            MissingService::Clinic
        } else {
            MissingService::Hospital
        });
        return false;
    }
    if row.health >= 1 {
        demands.add_requiring(RequiredService::Clinic);
    }

    if house.inventory.food_types_available() < row.food_types {
        demands.add_missing(MissingService::Food);
        return false;
    }

    // goods
    let inventory = &house.inventory;
    if inventory.get(Good::Pottery) < row.goods.pottery
        || inventory.get(Good::Oil) < row.goods.oil
        || inventory.get(Good::Furniture) < row.goods.furniture
    {
        return false;
    }
    if row.goods.wine > 0 && inventory.get(Good::Wine) == 0 {
        return false;
    }
    if row.goods.wine > 1 && !modifiers.multiple_wine_available {
        demands.add_missing(MissingService::SecondWine);
        return false;
    }
    true
}

/// Combine the desirability gate with the requirement evaluator
///
/// Unmet requirements for the current tier force DEVOLVE. An EVOLVE verdict
/// is only kept when the house would also satisfy the next tier.
pub fn check_requirements(
    house: &HousingUnit,
    table: &HouseModelTable,
    modifiers: &GlobalModifiers,
    demands: &mut DemandAggregate,
) -> EvolveStatus {
    let bonus = modifiers.tier_bonus(house);
    let status = check_evolve_desirability(house, bonus, table);

    if !has_required_goods_and_services(house, false, bonus, table, modifiers, demands) {
        EvolveStatus::Devolve
    } else if status == EvolveStatus::Evolve {
        if has_required_goods_and_services(house, true, bonus, table, modifiers, demands) {
            EvolveStatus::Evolve
        } else {
            EvolveStatus::Hold
        }
    } else {
        status
    }
}
