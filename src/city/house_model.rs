//! House model table - per-tier requirements and usage rates
//!
//! One immutable row per tier: desirability cutoffs, service thresholds,
//! minimum goods stock and monthly goods usage. The built-in table is the
//! stock balance; a full replacement can be loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::city::inventory::Good;
use crate::city::tier::{HouseTier, TIER_COUNT};
use crate::core::error::{HouseError, Result};

/// Amount of each non-food inventory good
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoodsAmounts {
    pub pottery: u32,
    pub oil: u32,
    pub furniture: u32,
    pub wine: u32,
}

impl GoodsAmounts {
    pub fn get(&self, good: Good) -> u32 {
        match good {
            Good::Pottery => self.pottery,
            Good::Oil => self.oil,
            Good::Furniture => self.furniture,
            Good::Wine => self.wine,
            _ => 0,
        }
    }
}

/// Requirements for one house tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRequirementRow {
    pub tier: HouseTier,
    /// Desirability at or below which the house wants to devolve
    pub devolve_desirability: i32,
    /// Desirability at or above which the house wants to evolve
    pub evolve_desirability: i32,
    #[serde(default)]
    pub entertainment: u8,
    /// 0 none, 1 well, 2 fountain
    #[serde(default)]
    pub water: u8,
    /// Distinct gods; values above 3 are treated as 3
    #[serde(default)]
    pub religion: u8,
    #[serde(default)]
    pub education: u8,
    #[serde(default)]
    pub barber: u8,
    #[serde(default)]
    pub bathhouse: u8,
    #[serde(default)]
    pub health: u8,
    #[serde(default)]
    pub food_types: u8,
    /// Minimum stock required
    #[serde(default)]
    pub goods: GoodsAmounts,
    /// Amount consumed per scheduled consumption tick; defaults to `goods`
    #[serde(default)]
    pub usage: Option<GoodsAmounts>,
    #[serde(default)]
    pub max_people: u32,
}

impl LevelRequirementRow {
    /// Amount of `good` consumed per scheduled tick
    pub fn uses(&self, good: Good) -> u32 {
        self.usage.unwrap_or(self.goods).get(good)
    }

    /// Religion requirement capped at three gods
    pub fn religion_required(&self) -> u8 {
        self.religion.min(3)
    }
}

/// Read-only table of all 20 tier rows
#[derive(Debug, Clone)]
pub struct HouseModelTable {
    rows: Vec<LevelRequirementRow>,
}

impl HouseModelTable {
    /// Build a table from rows in any order; every tier must appear exactly once
    pub fn from_rows(mut rows: Vec<LevelRequirementRow>) -> Result<Self> {
        if rows.len() != TIER_COUNT {
            return Err(HouseError::InvalidTable(format!(
                "expected {} rows, found {}",
                TIER_COUNT,
                rows.len()
            )));
        }
        rows.sort_by_key(|row| row.tier);
        for (i, row) in rows.iter().enumerate() {
            if row.tier.index() != i {
                return Err(HouseError::InvalidTable(format!(
                    "tier {} is duplicated or missing",
                    HouseTier::ALL[i]
                )));
            }
            if row.devolve_desirability >= row.evolve_desirability {
                return Err(HouseError::InvalidTable(format!(
                    "{}: devolve_desirability ({}) must be below evolve_desirability ({})",
                    row.tier, row.devolve_desirability, row.evolve_desirability
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Row for a tier; the tier type guarantees the index is in range
    pub fn get(&self, tier: HouseTier) -> &LevelRequirementRow {
        &self.rows[tier.index()]
    }

    pub fn rows(&self) -> &[LevelRequirementRow] {
        &self.rows
    }

    /// The stock balance table
    pub fn with_defaults() -> Self {
        use HouseTier::*;

        #[rustfmt::skip]
        let data: [(HouseTier, i32, i32, u8, u8, u8, u8, u8, u8, u8, u8, [u32; 4], u32); TIER_COUNT] = [
            // tier          devolve evolve ent wat rel edu bar bat hea food [pot oil fur wine] people
            (SmallTent,      -99,  -10,   0,  0,  0,  0,  0,  0,  0,  0, [0, 0, 0, 0],   5),
            (LargeTent,      -12,   -5,   0,  1,  0,  0,  0,  0,  0,  0, [0, 0, 0, 0],   7),
            (SmallShack,      -7,    0,   0,  1,  1,  0,  0,  0,  0,  0, [0, 0, 0, 0],   9),
            (LargeShack,      -2,    4,   0,  1,  1,  0,  0,  0,  0,  1, [0, 0, 0, 0],  11),
            (SmallHovel,       2,    8,  10,  1,  1,  0,  0,  0,  0,  1, [0, 0, 0, 0],  13),
            (LargeHovel,       6,   12,  10,  2,  1,  1,  0,  0,  0,  1, [0, 0, 0, 0],  15),
            (SmallCasa,       10,   16,  10,  2,  1,  1,  0,  0,  0,  1, [1, 0, 0, 0],  16),
            (LargeCasa,       14,   20,  25,  2,  1,  1,  0,  1,  0,  1, [1, 0, 0, 0],  17),
            (SmallInsula,     18,   25,  25,  2,  1,  1,  0,  1,  0,  1, [1, 0, 0, 0],  19),
            (MediumInsula,    22,   32,  30,  2,  1,  2,  1,  1,  0,  1, [1, 1, 0, 0],  20),
            (LargeInsula,     29,   40,  35,  2,  2,  2,  1,  1,  1,  1, [1, 1, 0, 0],  84),
            (GrandInsula,     37,   48,  40,  2,  2,  2,  1,  1,  1,  2, [1, 1, 1, 0],  84),
            (SmallVilla,      45,   53,  45,  2,  2,  2,  1,  1,  1,  2, [1, 1, 1, 1],  40),
            (MediumVilla,     50,   58,  50,  2,  2,  2,  1,  1,  1,  2, [1, 1, 1, 1],  42),
            (LargeVilla,      55,   63,  55,  2,  2,  3,  1,  1,  2,  2, [1, 1, 1, 1],  90),
            (GrandVilla,      60,   68,  60,  2,  3,  3,  1,  1,  2,  2, [1, 1, 1, 1],  94),
            (SmallPalace,     65,   74,  70,  2,  3,  3,  1,  1,  2,  3, [1, 1, 1, 2], 106),
            (MediumPalace,    70,   80,  80,  2,  3,  3,  1,  1,  2,  3, [1, 1, 1, 2], 112),
            (LargePalace,     76,   90,  90,  2,  4,  3,  1,  1,  2,  3, [2, 2, 2, 2], 190),
            (LuxuryPalace,    85,  100, 100,  2,  4,  3,  1,  1,  2,  3, [2, 2, 2, 2], 200),
        ];

        let rows = data
            .into_iter()
            .map(
                |(tier, devolve, evolve, ent, water, religion, education, barber, bathhouse, health, food, goods, people)| {
                    LevelRequirementRow {
                        tier,
                        devolve_desirability: devolve,
                        evolve_desirability: evolve,
                        entertainment: ent,
                        water,
                        religion,
                        education,
                        barber,
                        bathhouse,
                        health,
                        food_types: food,
                        goods: GoodsAmounts {
                            pottery: goods[0],
                            oil: goods[1],
                            furniture: goods[2],
                            wine: goods[3],
                        },
                        usage: None,
                        max_people: people,
                    }
                },
            )
            .collect();

        Self { rows }
    }

    /// Load a table from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a table from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlHouseModels = toml::from_str(content)?;
        Self::from_rows(toml_data.houses)
    }
}

impl Default for HouseModelTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// TOML representation of a house model file
#[derive(Debug, Deserialize)]
struct TomlHouseModels {
    houses: Vec<LevelRequirementRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_well_formed() {
        let table = HouseModelTable::with_defaults();
        let rebuilt = HouseModelTable::from_rows(table.rows().to_vec());
        assert!(rebuilt.is_ok());
        for tier in HouseTier::ALL {
            assert_eq!(table.get(tier).tier, tier);
        }
    }

    #[test]
    fn test_default_cutoffs_increase_with_tier() {
        let table = HouseModelTable::with_defaults();
        for pair in table.rows().windows(2) {
            assert!(pair[1].evolve_desirability > pair[0].evolve_desirability);
            assert!(pair[1].devolve_desirability > pair[0].devolve_desirability);
        }
    }

    #[test]
    fn test_usage_defaults_to_required_goods() {
        let table = HouseModelTable::with_defaults();
        let palace = table.get(HouseTier::SmallPalace);
        assert_eq!(palace.uses(Good::Wine), 2);
        assert_eq!(palace.uses(Good::Wheat), 0);

        let mut row = palace.clone();
        row.usage = Some(GoodsAmounts { wine: 5, ..GoodsAmounts::default() });
        assert_eq!(row.uses(Good::Wine), 5);
        assert_eq!(row.uses(Good::Pottery), 0);
    }

    #[test]
    fn test_religion_requirement_is_capped() {
        let table = HouseModelTable::with_defaults();
        assert_eq!(table.get(HouseTier::LuxuryPalace).religion, 4);
        assert_eq!(table.get(HouseTier::LuxuryPalace).religion_required(), 3);
    }

    #[test]
    fn test_from_rows_rejects_wrong_count() {
        let mut rows = HouseModelTable::with_defaults().rows().to_vec();
        rows.pop();
        assert!(matches!(
            HouseModelTable::from_rows(rows),
            Err(HouseError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_duplicate_tier() {
        let mut rows = HouseModelTable::with_defaults().rows().to_vec();
        rows[3].tier = HouseTier::SmallTent;
        assert!(HouseModelTable::from_rows(rows).is_err());
    }

    #[test]
    fn test_parse_toml_round_trips_default_table() {
        let table = HouseModelTable::with_defaults();
        let mut content = String::new();
        for row in table.rows() {
            content.push_str(&format!(
                "[[houses]]\ntier = {}\ndevolve_desirability = {}\nevolve_desirability = {}\n\
                 entertainment = {}\nwater = {}\nreligion = {}\neducation = {}\nbarber = {}\n\
                 bathhouse = {}\nhealth = {}\nfood_types = {}\nmax_people = {}\n\
                 goods = {{ pottery = {}, oil = {}, furniture = {}, wine = {} }}\n\n",
                serde_json::to_string(&row.tier).unwrap(),
                row.devolve_desirability,
                row.evolve_desirability,
                row.entertainment,
                row.water,
                row.religion,
                row.education,
                row.barber,
                row.bathhouse,
                row.health,
                row.food_types,
                row.max_people,
                row.goods.pottery,
                row.goods.oil,
                row.goods.furniture,
                row.goods.wine,
            ));
        }

        let parsed = HouseModelTable::parse_toml(&content).unwrap();
        assert_eq!(parsed.rows(), table.rows());
    }

    #[test]
    fn test_parse_toml_reads_usage_override() {
        let mut content = String::new();
        for tier in HouseTier::ALL {
            content.push_str(&format!(
                "[[houses]]\ntier = {}\ndevolve_desirability = {}\nevolve_desirability = {}\n",
                serde_json::to_string(&tier).unwrap(),
                tier.index() as i32 * 5 - 10,
                tier.index() as i32 * 5 - 5,
            ));
            if tier == HouseTier::SmallVilla {
                content.push_str("usage = { oil = 3 }\n");
            }
        }

        let table = HouseModelTable::parse_toml(&content).unwrap();
        assert_eq!(table.get(HouseTier::SmallVilla).uses(Good::Oil), 3);
        assert_eq!(table.get(HouseTier::SmallVilla).uses(Good::Wine), 0);
        assert_eq!(table.get(HouseTier::LargeTent).water, 0);
    }

    #[test]
    fn test_parse_toml_reports_parse_errors() {
        let err = HouseModelTable::parse_toml("houses = 3").unwrap_err();
        assert!(matches!(err, HouseError::TomlError(_)));
    }
}
