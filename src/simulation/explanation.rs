//! Evolve explanation selector
//!
//! Picks the single most pressing reason a house is about to devolve, or the
//! first thing standing between it and the next tier. Purely advisory: it
//! never changes status, tier or stock.

use serde::{Deserialize, Serialize};

use crate::city::house::HousingUnit;
use crate::city::house_model::{HouseModelTable, LevelRequirementRow};
use crate::city::inventory::Good;
use crate::city::modifiers::GlobalModifiers;
use crate::city::tier::HouseTier;
use crate::spatial::desirability::StructureKind;

/// Explanation shown for a house, with a stable numeric code per reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EvolveText {
    // will devolve because...
    DevolveDesirability = 0,
    DevolveNeedsWell = 1,
    DevolveNeedsFountain = 2,
    DevolveNoEntertainment = 3,
    DevolveEntertainmentBasic = 4,
    DevolveEntertainmentSome = 5,
    DevolveEntertainmentModerate = 6,
    DevolveEntertainmentGood = 7,
    DevolveEntertainmentExcellent = 8,
    DevolveNeedsFood = 9,
    DevolveNeedsSecondFood = 10,
    DevolveNeedsThirdFood = 11,
    DevolveNeedsSchool = 14,
    DevolveNeedsLibrary = 15,
    DevolveNeedsSchoolWithLibrary = 16,
    DevolveNeedsAcademy = 17,
    DevolveNeedsBathhouse = 18,
    DevolveNeedsPottery = 19,
    DevolveNeedsReligion = 20,
    DevolveNeedsSecondGod = 21,
    DevolveNeedsThirdGod = 22,
    DevolveNeedsBarber = 23,
    DevolveNeedsClinic = 24,
    DevolveNeedsHospital = 25,
    DevolveNeedsClinicAndHospital = 26,
    DevolveNeedsOil = 27,
    DevolveNeedsFurniture = 28,
    DevolveNeedsWine = 29,
    // will evolve if...
    EvolveDesirability = 30,
    EvolveNeedsWell = 31,
    EvolveNeedsFountain = 32,
    EvolveNoEntertainment = 33,
    EvolveEntertainmentBasic = 34,
    EvolveEntertainmentSome = 35,
    EvolveEntertainmentModerate = 36,
    EvolveEntertainmentGood = 37,
    EvolveEntertainmentExcellent = 38,
    EvolveNeedsFood = 39,
    EvolveNeedsSecondFood = 40,
    EvolveNeedsThirdFood = 41,
    EvolveNeedsSchool = 44,
    EvolveNeedsLibrary = 45,
    EvolveNeedsSchoolWithLibrary = 46,
    EvolveNeedsAcademy = 47,
    EvolveNeedsBathhouse = 48,
    EvolveNeedsPottery = 49,
    EvolveNeedsReligion = 50,
    EvolveNeedsSecondGod = 51,
    EvolveNeedsThirdGod = 52,
    EvolveNeedsBarber = 53,
    EvolveNeedsClinic = 54,
    EvolveNeedsHospital = 55,
    EvolveNeedsClinicAndHospital = 56,
    EvolveNeedsOil = 57,
    EvolveNeedsFurniture = 58,
    EvolveNeedsWine = 59,
    TopTier = 60,
    Evolving = 61,
    EvolveDesirabilityWorstNeighbour = 62,
    NoSpaceToExpand = 64,
    DevolveNeedsSecondWine = 65,
    EvolveNeedsSecondWine = 66,
    DevolveNeedsLatrines = 67,
    NeedsLatrines = 68,
}

impl EvolveText {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this reason describes an imminent downgrade
    pub fn is_devolve_reason(self) -> bool {
        matches!(self.code(), 0..=29 | 65 | 67)
    }

    /// The "will evolve if" twin of a service or goods shortfall
    fn for_upgrade(self) -> Self {
        use EvolveText::*;
        match self {
            DevolveNoEntertainment => EvolveNoEntertainment,
            DevolveEntertainmentBasic => EvolveEntertainmentBasic,
            DevolveEntertainmentSome => EvolveEntertainmentSome,
            DevolveEntertainmentModerate => EvolveEntertainmentModerate,
            DevolveEntertainmentGood => EvolveEntertainmentGood,
            DevolveEntertainmentExcellent => EvolveEntertainmentExcellent,
            DevolveNeedsFood => EvolveNeedsFood,
            DevolveNeedsSecondFood => EvolveNeedsSecondFood,
            DevolveNeedsThirdFood => EvolveNeedsThirdFood,
            DevolveNeedsSchool => EvolveNeedsSchool,
            DevolveNeedsLibrary => EvolveNeedsLibrary,
            DevolveNeedsSchoolWithLibrary => EvolveNeedsSchoolWithLibrary,
            DevolveNeedsAcademy => EvolveNeedsAcademy,
            DevolveNeedsBathhouse => EvolveNeedsBathhouse,
            DevolveNeedsPottery => EvolveNeedsPottery,
            DevolveNeedsReligion => EvolveNeedsReligion,
            DevolveNeedsSecondGod => EvolveNeedsSecondGod,
            DevolveNeedsThirdGod => EvolveNeedsThirdGod,
            DevolveNeedsBarber => EvolveNeedsBarber,
            DevolveNeedsClinic => EvolveNeedsClinic,
            DevolveNeedsHospital => EvolveNeedsHospital,
            DevolveNeedsClinicAndHospital => EvolveNeedsClinicAndHospital,
            DevolveNeedsOil => EvolveNeedsOil,
            DevolveNeedsFurniture => EvolveNeedsFurniture,
            DevolveNeedsWine => EvolveNeedsWine,
            DevolveNeedsSecondWine => EvolveNeedsSecondWine,
            other => other,
        }
    }
}

/// Select the explanation for a house
///
/// `worst_neighbour` is the result of the worst-desirability scan and only
/// changes which desirability code is reported.
pub fn determine_evolve_text(
    house: &HousingUnit,
    table: &HouseModelTable,
    modifiers: &GlobalModifiers,
    worst_neighbour: Option<StructureKind>,
) -> EvolveText {
    let level = HouseTier::bounded(house.tier as i32 - modifiers.tier_bonus(house) as i32);
    let row = table.get(level);

    // this house will devolve soon because...
    if house.desirability <= row.devolve_desirability {
        return EvolveText::DevolveDesirability;
    }
    if !house.access.water {
        if row.water == 1 {
            if !house.access.well {
                return EvolveText::DevolveNeedsWell;
            } else if !house.access.latrines {
                return EvolveText::NeedsLatrines;
            }
        }
        if row.water == 2 {
            if !house.access.latrines {
                return EvolveText::DevolveNeedsLatrines;
            } else if level >= HouseTier::LargeCasa {
                return EvolveText::DevolveNeedsFountain;
            }
        }
    }
    if let Some(text) = service_shortfall(house, row, modifiers) {
        return text;
    }
    if house.tier.is_top() {
        return EvolveText::TopTier;
    }

    // this house will evolve if...
    if house.desirability < row.evolve_desirability {
        return if worst_neighbour.is_some() {
            EvolveText::EvolveDesirabilityWorstNeighbour
        } else {
            EvolveText::EvolveDesirability
        };
    }
    let level = level.shifted(1);
    let row = table.get(level);
    if !house.access.water {
        if row.water == 1 {
            if !house.access.well {
                return EvolveText::EvolveNeedsWell;
            } else if !house.access.latrines {
                return EvolveText::NeedsLatrines;
            }
        }
        if row.water == 2
            && level >= HouseTier::LargeCasa
            && house.access.well
            && house.access.latrines
        {
            return EvolveText::EvolveNeedsFountain;
        }
    }
    if let Some(text) = service_shortfall(house, row, modifiers) {
        return text.for_upgrade();
    }

    if house.no_space_to_expand {
        EvolveText::NoSpaceToExpand
    } else {
        EvolveText::Evolving
    }
}

/// First unmet service or goods need against `row`, phrased as a devolve reason
fn service_shortfall(
    house: &HousingUnit,
    row: &LevelRequirementRow,
    modifiers: &GlobalModifiers,
) -> Option<EvolveText> {
    let services = &house.services;
    let inventory = &house.inventory;

    if services.entertainment < row.entertainment {
        return Some(match (services.entertainment, row.entertainment) {
            (0, _) => EvolveText::DevolveNoEntertainment,
            (_, 0..=9) => EvolveText::DevolveEntertainmentBasic,
            (_, 10..=24) => EvolveText::DevolveEntertainmentSome,
            (_, 25..=49) => EvolveText::DevolveEntertainmentModerate,
            (_, 50..=79) => EvolveText::DevolveEntertainmentGood,
            _ => EvolveText::DevolveEntertainmentExcellent,
        });
    }

    // A requirement above three food types has no dedicated message
    if inventory.food_types_available() < row.food_types {
        match row.food_types {
            1 => return Some(EvolveText::DevolveNeedsFood),
            2 => return Some(EvolveText::DevolveNeedsSecondFood),
            3 => return Some(EvolveText::DevolveNeedsThirdFood),
            _ => {}
        }
    }

    // Two levels of education with neither building in reach has no message
    if services.education < row.education {
        match row.education {
            1 => return Some(EvolveText::DevolveNeedsSchool),
            2 if services.school => return Some(EvolveText::DevolveNeedsLibrary),
            2 if services.library => return Some(EvolveText::DevolveNeedsSchoolWithLibrary),
            3 => return Some(EvolveText::DevolveNeedsAcademy),
            _ => {}
        }
    }

    if services.bathhouse < row.bathhouse {
        return Some(EvolveText::DevolveNeedsBathhouse);
    }
    if inventory.get(Good::Pottery) < row.goods.pottery {
        return Some(EvolveText::DevolveNeedsPottery);
    }

    let religion = row.religion_required();
    if services.gods < religion {
        return Some(match religion {
            1 => EvolveText::DevolveNeedsReligion,
            2 => EvolveText::DevolveNeedsSecondGod,
            _ => EvolveText::DevolveNeedsThirdGod,
        });
    }

    if services.barber < row.barber {
        return Some(EvolveText::DevolveNeedsBarber);
    }
    if services.health < row.health {
        return Some(if row.health == 1 {
            EvolveText::DevolveNeedsClinic
        } else if services.clinic {
            EvolveText::DevolveNeedsHospital
        } else {
            EvolveText::DevolveNeedsClinicAndHospital
        });
    }

    if inventory.get(Good::Oil) < row.goods.oil {
        return Some(EvolveText::DevolveNeedsOil);
    }
    if inventory.get(Good::Furniture) < row.goods.furniture {
        return Some(EvolveText::DevolveNeedsFurniture);
    }
    if inventory.get(Good::Wine) < row.goods.wine {
        return Some(EvolveText::DevolveNeedsWine);
    }
    if row.goods.wine > 1 && !modifiers.multiple_wine_available {
        return Some(EvolveText::DevolveNeedsSecondWine);
    }
    None
}
