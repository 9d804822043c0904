//! City-wide flags and the modifiers derived from them once per pass

use serde::{Deserialize, Serialize};

use crate::city::house::HousingUnit;
use crate::city::inventory::Good;
use crate::core::config::EngineConfig;

/// City-wide state supplied by the host simulation every day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityFlags {
    /// Grand temple of Venus is built and working
    pub venus_grand_temple_working: bool,
    /// Pantheon housing-evolution module active
    pub pantheon_housing_module: bool,
    /// Grand temple of Mercury, pottery and furniture module
    pub mercury_pottery_furniture_module: bool,
    /// Grand temple of Mercury, oil and wine module
    pub mercury_oil_wine_module: bool,
    /// Grand temple of Mars, all goods module
    pub mars_all_goods_module: bool,
    /// More than one kind of wine reaches the city
    pub multiple_wine_available: bool,
}

/// Modifiers recomputed from `CityFlags` at the start of every pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalModifiers {
    /// Active devolve hysteresis window
    pub devolve_window: u8,
    pub pantheon_bonus: bool,
    pub multiple_wine_available: bool,
    mercury_pottery_furniture: bool,
    mercury_oil_wine: bool,
    mars_all_goods: bool,
}

impl GlobalModifiers {
    pub fn compute(flags: &CityFlags, config: &EngineConfig) -> Self {
        let devolve_window = if flags.venus_grand_temple_working {
            config.devolve_delay_with_venus
        } else {
            config.devolve_delay
        };
        Self {
            devolve_window,
            pantheon_bonus: flags.pantheon_housing_module,
            multiple_wine_available: flags.multiple_wine_available,
            mercury_pottery_furniture: flags.mercury_pottery_furniture_module,
            mercury_oil_wine: flags.mercury_oil_wine_module,
            mars_all_goods: flags.mars_all_goods_module,
        }
    }

    /// Tier bonus for a house: 1 when the pantheon module reaches it
    pub fn tier_bonus(&self, house: &HousingUnit) -> u8 {
        u8::from(self.pantheon_bonus && house.access.pantheon)
    }

    /// Consumption reduction percentage for one good in one house
    ///
    /// The three monument bonuses stack additively.
    pub fn consumption_reduction(&self, house: &HousingUnit, good: Good) -> u32 {
        let mut reduction = 0;
        if self.mercury_pottery_furniture && matches!(good, Good::Pottery | Good::Furniture) {
            reduction += 20;
        }
        if self.mercury_oil_wine
            && house.access.temple_mercury
            && matches!(good, Good::Oil | Good::Wine)
        {
            reduction += 20;
        }
        if self.mars_all_goods && house.access.temple_mars && Good::GOODS.contains(&good) {
            reduction += 10;
        }
        reduction
    }
}

impl Default for GlobalModifiers {
    fn default() -> Self {
        Self::compute(&CityFlags::default(), &EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{HouseId, TilePos};

    fn house() -> HousingUnit {
        HousingUnit::new(HouseId(1), TilePos::new(0, 0))
    }

    #[test]
    fn test_venus_lengthens_window() {
        let config = EngineConfig::default();
        let plain = GlobalModifiers::compute(&CityFlags::default(), &config);
        assert_eq!(plain.devolve_window, 2);

        let flags = CityFlags {
            venus_grand_temple_working: true,
            ..CityFlags::default()
        };
        assert_eq!(GlobalModifiers::compute(&flags, &config).devolve_window, 20);
    }

    #[test]
    fn test_tier_bonus_needs_module_and_access() {
        let flags = CityFlags {
            pantheon_housing_module: true,
            ..CityFlags::default()
        };
        let modifiers = GlobalModifiers::compute(&flags, &EngineConfig::default());
        let mut h = house();
        assert_eq!(modifiers.tier_bonus(&h), 0);
        h.access.pantheon = true;
        assert_eq!(modifiers.tier_bonus(&h), 1);

        assert_eq!(GlobalModifiers::default().tier_bonus(&h), 0);
    }

    #[test]
    fn test_reductions_stack() {
        let flags = CityFlags {
            mercury_pottery_furniture_module: true,
            mercury_oil_wine_module: true,
            mars_all_goods_module: true,
            ..CityFlags::default()
        };
        let modifiers = GlobalModifiers::compute(&flags, &EngineConfig::default());
        let mut h = house();

        // House-level temple flags gate the second and third bonus
        assert_eq!(modifiers.consumption_reduction(&h, Good::Pottery), 20);
        assert_eq!(modifiers.consumption_reduction(&h, Good::Oil), 0);

        h.access.temple_mercury = true;
        h.access.temple_mars = true;
        assert_eq!(modifiers.consumption_reduction(&h, Good::Pottery), 30);
        assert_eq!(modifiers.consumption_reduction(&h, Good::Wine), 30);
        assert_eq!(modifiers.consumption_reduction(&h, Good::Wheat), 0);
    }
}
