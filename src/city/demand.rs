//! Demand aggregate - per-pass tally of unmet and required services
//!
//! Written by the requirement evaluator while houses are processed and read
//! by the advisory layer after the pass.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A need that stopped at least one house this pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingService {
    Well,
    Fountain,
    Entertainment,
    MoreEntertainment,
    Education,
    MoreEducation,
    Religion,
    SecondReligion,
    ThirdReligion,
    Barber,
    Bathhouse,
    Clinic,
    Hospital,
    Food,
    SecondWine,
}

/// A service houses currently rely on to keep their tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredService {
    School,
    Library,
    Religion,
    Barber,
    Bathhouse,
    Clinic,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemandAggregate {
    missing: AHashMap<MissingService, u32>,
    requiring: AHashMap<RequiredService, u32>,
}

impl DemandAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counters; called at the start of every pass
    pub fn reset(&mut self) {
        self.missing.clear();
        self.requiring.clear();
    }

    pub fn add_missing(&mut self, service: MissingService) {
        *self.missing.entry(service).or_insert(0) += 1;
    }

    pub fn add_requiring(&mut self, service: RequiredService) {
        *self.requiring.entry(service).or_insert(0) += 1;
    }

    pub fn missing(&self, service: MissingService) -> u32 {
        self.missing.get(&service).copied().unwrap_or(0)
    }

    pub fn requiring(&self, service: RequiredService) -> u32 {
        self.requiring.get(&service).copied().unwrap_or(0)
    }

    pub fn total_missing(&self) -> u32 {
        self.missing.values().sum()
    }

    pub fn total_requiring(&self) -> u32 {
        self.requiring.values().sum()
    }

    /// Missing counters sorted by service, for stable display
    pub fn missing_sorted(&self) -> Vec<(MissingService, u32)> {
        let mut entries: Vec<_> = self.missing.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort();
        entries
    }

    pub fn requiring_sorted(&self) -> Vec<(RequiredService, u32)> {
        let mut entries: Vec<_> = self.requiring.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort();
        entries
    }
}
