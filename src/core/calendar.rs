//! Game calendar for the daily house pass
//!
//! The city runs on days grouped into short months. House consumption is
//! scheduled by day-of-month, and monument consumption reductions are keyed
//! on the total number of elapsed months.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAYS_PER_MONTH: u32 = 16;
pub const MONTHS_PER_YEAR: u64 = 12;

/// Calendar tracks simulation time with day/month granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCalendar {
    total_days: u64,
    days_per_month: u32,
}

impl GameCalendar {
    pub fn new(days_per_month: u32) -> Self {
        Self {
            total_days: 0,
            days_per_month: days_per_month.max(1),
        }
    }

    /// Start the calendar at a given month and day-of-month
    pub fn at(days_per_month: u32, total_months: u64, day: u32) -> Self {
        let days_per_month = days_per_month.max(1);
        Self {
            total_days: total_months * days_per_month as u64 + (day % days_per_month) as u64,
            days_per_month,
        }
    }

    pub fn advance_day(&mut self) {
        self.total_days += 1;
    }

    pub fn total_days(&self) -> u64 {
        self.total_days
    }

    /// Day within the current month, starting at 0
    pub fn day(&self) -> u32 {
        (self.total_days % self.days_per_month as u64) as u32
    }

    pub fn total_months(&self) -> u64 {
        self.total_days / self.days_per_month as u64
    }

    pub fn month(&self) -> u64 {
        self.total_months() % MONTHS_PER_YEAR
    }

    pub fn year(&self) -> u64 {
        self.total_months() / MONTHS_PER_YEAR
    }

    pub fn days_per_month(&self) -> u32 {
        self.days_per_month
    }
}

impl Default for GameCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_DAYS_PER_MONTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_advances() {
        let mut cal = GameCalendar::new(16);
        assert_eq!(cal.total_days(), 0);
        assert_eq!(cal.day(), 0);

        cal.advance_day();
        assert_eq!(cal.day(), 1);
        assert_eq!(cal.total_months(), 0);

        for _ in 0..15 {
            cal.advance_day();
        }
        assert_eq!(cal.day(), 0);
        assert_eq!(cal.total_months(), 1);
    }

    #[test]
    fn test_calendar_at() {
        let cal = GameCalendar::at(16, 25, 7);
        assert_eq!(cal.total_months(), 25);
        assert_eq!(cal.day(), 7);
        assert_eq!(cal.month(), 1);
        assert_eq!(cal.year(), 2);
    }

    #[test]
    fn test_zero_length_month_is_clamped() {
        let mut cal = GameCalendar::new(0);
        assert_eq!(cal.days_per_month(), 1);
        cal.advance_day();
        assert_eq!(cal.total_months(), 1);
    }
}
