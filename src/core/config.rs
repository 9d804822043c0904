//! Engine configuration with documented constants
//!
//! All tuning numbers for the house pass are collected here. The house
//! requirement table itself lives in `city::house_model`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::calendar::DEFAULT_DAYS_PER_MONTH;
use crate::core::error::{HouseError, Result};

/// Tile window scanned around a house when looking for its worst neighbour
///
/// The window is anisotropic to match the external desirability model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    /// Half extent along x
    pub radius_x: i32,
    /// Half extent along y
    pub radius_y: i32,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            radius_x: 1,
            radius_y: 8,
        }
    }
}

/// Configuration for the house progression engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === HYSTERESIS ===
    /// Consecutive DEVOLVE ticks before a downgrade commits
    ///
    /// At 2, a house that loses a service survives one bad day.
    pub devolve_delay: u8,

    /// Devolve window while the grand temple of Venus is working
    ///
    /// Must be at least `devolve_delay`.
    pub devolve_delay_with_venus: u8,

    // === FOOTPRINT ===
    /// Large villas and palaces keep a single, smaller footprint on devolve
    /// instead of splitting into several houses
    pub patrician_devolution_fix: bool,

    // === CONSUMPTION ===
    /// Day of month on which multi-tile houses consume a second time
    pub second_consumption_day: u32,

    /// Days per month used by the calendar
    pub days_per_month: u32,

    // === ADVISORY ===
    /// Window scanned for the worst-desirability neighbour
    pub neighbour_scan: ScanWindow,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            devolve_delay: 2,
            devolve_delay_with_venus: 20,
            patrician_devolution_fix: false,
            second_consumption_day: 7,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
            neighbour_scan: ScanWindow::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.devolve_delay == 0 {
            return Err("devolve_delay must be at least 1".into());
        }

        if self.devolve_delay_with_venus < self.devolve_delay {
            return Err(format!(
                "devolve_delay_with_venus ({}) should be >= devolve_delay ({})",
                self.devolve_delay_with_venus, self.devolve_delay
            ));
        }

        if self.days_per_month == 0 {
            return Err("days_per_month must be positive".into());
        }

        // Day 0 is the regular consumption day
        if self.second_consumption_day == 0 || self.second_consumption_day >= self.days_per_month {
            return Err(format!(
                "second_consumption_day ({}) must be within 1..{}",
                self.second_consumption_day, self.days_per_month
            ));
        }

        if self.neighbour_scan.radius_x < 0 || self.neighbour_scan.radius_y < 0 {
            return Err("neighbour_scan radii must not be negative".into());
        }

        Ok(())
    }

    /// Parse and validate a config from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(HouseError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.devolve_delay, 2);
        assert_eq!(config.devolve_delay_with_venus, 20);
    }

    #[test]
    fn test_venus_delay_below_base_is_rejected() {
        let config = EngineConfig {
            devolve_delay: 5,
            devolve_delay_with_venus: 3,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_second_consumption_day_out_of_month_is_rejected() {
        let config = EngineConfig {
            second_consumption_day: 16,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let config = EngineConfig::parse_toml(
            r#"
            patrician_devolution_fix = true

            [neighbour_scan]
            radius_x = 4
            radius_y = 4
            "#,
        )
        .unwrap();

        assert!(config.patrician_devolution_fix);
        assert_eq!(config.devolve_delay, 2);
        assert_eq!(config.neighbour_scan, ScanWindow { radius_x: 4, radius_y: 4 });
    }

    #[test]
    fn test_parse_invalid_toml_reports_config_error() {
        let err = EngineConfig::parse_toml("devolve_delay = 0").unwrap_err();
        assert!(matches!(err, HouseError::InvalidConfig(_)));
    }
}
