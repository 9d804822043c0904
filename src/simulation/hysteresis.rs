//! Devolve hysteresis
//!
//! A house has to want to devolve for `window` consecutive passes before the
//! downgrade commits, so a briefly interrupted service does not flicker the
//! tier.

use crate::city::house::{EvolveStatus, HousingUnit};

/// Returns true while a DEVOLVE verdict must still be held back
///
/// The counter advances on every DEVOLVE; the pass on which it reaches
/// `window` lets the downgrade through and resets it. Any other status resets
/// the counter.
pub fn has_devolve_delay(house: &mut HousingUnit, status: EvolveStatus, window: u8) -> bool {
    if status != EvolveStatus::Devolve {
        house.devolve_delay = 0;
        return false;
    }
    house.devolve_delay = house.devolve_delay.saturating_add(1);
    if house.devolve_delay < window {
        true
    } else {
        house.devolve_delay = 0;
        false
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
    fn test_window_th_devolve_commits() {
        let mut h = house();
        assert!(has_devolve_delay(&mut h, EvolveStatus::Devolve, 2));
        assert_eq!(h.devolve_delay, 1);
        assert!(!has_devolve_delay(&mut h, EvolveStatus::Devolve, 2));
        assert_eq!(h.devolve_delay, 0);
    }

    #[test]
    fn test_other_status_resets() {
        let mut h = house();
        has_devolve_delay(&mut h, EvolveStatus::Devolve, 20);
        has_devolve_delay(&mut h, EvolveStatus::Devolve, 20);
        assert_eq!(h.devolve_delay, 2);

        assert!(!has_devolve_delay(&mut h, EvolveStatus::Hold, 20));
        assert_eq!(h.devolve_delay, 0);
    }

    #[test]
    fn test_long_window() {
        let mut h = house();
        for _ in 0..19 {
            assert!(has_devolve_delay(&mut h, EvolveStatus::Devolve, 20));
        }
        assert!(!has_devolve_delay(&mut h, EvolveStatus::Devolve, 20));
    }

    #[test]
    fn test_window_of_one_never_delays() {
        let mut h = house();
        assert!(!has_devolve_delay(&mut h, EvolveStatus::Devolve, 1));
        assert_eq!(h.devolve_delay, 0);
    }
}
