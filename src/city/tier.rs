//! House tiers, ordered from the smallest tent to the luxury palace

use serde::{Deserialize, Serialize};

use crate::core::error::{HouseError, Result};

/// One of the 20 ordered house categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HouseTier {
    SmallTent = 0,
    LargeTent = 1,
    SmallShack = 2,
    LargeShack = 3,
    SmallHovel = 4,
    LargeHovel = 5,
    SmallCasa = 6,
    LargeCasa = 7,
    SmallInsula = 8,
    MediumInsula = 9,
    LargeInsula = 10,
    GrandInsula = 11,
    SmallVilla = 12,
    MediumVilla = 13,
    LargeVilla = 14,
    GrandVilla = 15,
    SmallPalace = 16,
    MediumPalace = 17,
    LargePalace = 18,
    LuxuryPalace = 19,
}

pub const TIER_COUNT: usize = 20;

impl HouseTier {
    pub const MIN: HouseTier = HouseTier::SmallTent;
    pub const MAX: HouseTier = HouseTier::LuxuryPalace;

    pub const ALL: [HouseTier; TIER_COUNT] = [
        HouseTier::SmallTent,
        HouseTier::LargeTent,
        HouseTier::SmallShack,
        HouseTier::LargeShack,
        HouseTier::SmallHovel,
        HouseTier::LargeHovel,
        HouseTier::SmallCasa,
        HouseTier::LargeCasa,
        HouseTier::SmallInsula,
        HouseTier::MediumInsula,
        HouseTier::LargeInsula,
        HouseTier::GrandInsula,
        HouseTier::SmallVilla,
        HouseTier::MediumVilla,
        HouseTier::LargeVilla,
        HouseTier::GrandVilla,
        HouseTier::SmallPalace,
        HouseTier::MediumPalace,
        HouseTier::LargePalace,
        HouseTier::LuxuryPalace,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Checked conversion for callers holding a raw tier index
    pub fn try_from_index(index: u8) -> Result<Self> {
        Self::from_index(index).ok_or(HouseError::TierOutOfRange(index))
    }

    /// Clamp an arbitrary level into the valid tier range
    pub fn bounded(level: i32) -> Self {
        let clamped = level.clamp(Self::MIN as i32, Self::MAX as i32);
        Self::ALL[clamped as usize]
    }

    /// `self + delta`, clamped into range
    pub fn shifted(self, delta: i32) -> Self {
        Self::bounded(self as i32 + delta)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self as u8 + 1)
    }

    pub fn prev(self) -> Option<Self> {
        (self as u8).checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_top(self) -> bool {
        self == Self::MAX
    }

    /// Side length of the footprint a house of this tier normally occupies
    pub fn footprint_side(self) -> u8 {
        match self {
            HouseTier::LargeInsula
            | HouseTier::GrandInsula
            | HouseTier::SmallVilla
            | HouseTier::MediumVilla => 2,
            HouseTier::LargeVilla
            | HouseTier::GrandVilla
            | HouseTier::SmallPalace
            | HouseTier::MediumPalace => 3,
            HouseTier::LargePalace | HouseTier::LuxuryPalace => 4,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HouseTier::SmallTent => "small tent",
            HouseTier::LargeTent => "large tent",
            HouseTier::SmallShack => "small shack",
            HouseTier::LargeShack => "large shack",
            HouseTier::SmallHovel => "small hovel",
            HouseTier::LargeHovel => "large hovel",
            HouseTier::SmallCasa => "small casa",
            HouseTier::LargeCasa => "large casa",
            HouseTier::SmallInsula => "small insula",
            HouseTier::MediumInsula => "medium insula",
            HouseTier::LargeInsula => "large insula",
            HouseTier::GrandInsula => "grand insula",
            HouseTier::SmallVilla => "small villa",
            HouseTier::MediumVilla => "medium villa",
            HouseTier::LargeVilla => "large villa",
            HouseTier::GrandVilla => "grand villa",
            HouseTier::SmallPalace => "small palace",
            HouseTier::MediumPalace => "medium palace",
            HouseTier::LargePalace => "large palace",
            HouseTier::LuxuryPalace => "luxury palace",
        }
    }
}

impl std::fmt::Display for HouseTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering_matches_index() {
        for (i, tier) in HouseTier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i);
            assert_eq!(HouseTier::from_index(i as u8), Some(*tier));
        }
        assert!(HouseTier::SmallTent < HouseTier::LuxuryPalace);
    }

    #[test]
    fn test_from_index_rejects_out_of_range() {
        assert_eq!(HouseTier::from_index(20), None);
        assert!(matches!(
            HouseTier::try_from_index(42),
            Err(HouseError::TierOutOfRange(42))
        ));
    }

    #[test]
    fn test_bounded_clamps() {
        assert_eq!(HouseTier::bounded(-1), HouseTier::SmallTent);
        assert_eq!(HouseTier::bounded(25), HouseTier::LuxuryPalace);
        assert_eq!(HouseTier::SmallTent.shifted(-1), HouseTier::SmallTent);
        assert_eq!(HouseTier::LuxuryPalace.shifted(1), HouseTier::LuxuryPalace);
        assert_eq!(HouseTier::SmallCasa.shifted(1), HouseTier::LargeCasa);
    }

    #[test]
    fn test_next_and_prev_stop_at_ends() {
        assert_eq!(HouseTier::LuxuryPalace.next(), None);
        assert_eq!(HouseTier::SmallTent.prev(), None);
        assert_eq!(HouseTier::LargePalace.next(), Some(HouseTier::LuxuryPalace));
    }

    #[test]
    fn test_footprint_grows_at_growth_targets() {
        assert_eq!(HouseTier::MediumInsula.footprint_side(), 1);
        assert_eq!(HouseTier::LargeInsula.footprint_side(), 2);
        assert_eq!(HouseTier::LargeVilla.footprint_side(), 3);
        assert_eq!(HouseTier::LargePalace.footprint_side(), 4);
    }
}
