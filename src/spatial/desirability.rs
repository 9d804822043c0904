//! Structure kinds and their desirability falloff profiles
//!
//! The full desirability field is computed by an external spatial model.
//! These profiles only feed the advisory worst-neighbour lookup.

use serde::{Deserialize, Serialize};

use crate::city::tier::HouseTier;

/// A neighbouring structure that influences desirability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    House(HouseTier),
    Highway,
    Road,
    Garden,
    Statue,
    Temple,
    Market,
    Prefecture,
    EngineersPost,
    Warehouse,
    Granary,
    Workshop,
    Farm,
    Barracks,
    Reservoir,
}

/// Base value plus a step adjustment applied every `step` tiles of distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesirabilityProfile {
    pub value: i32,
    /// Tiles per step
    pub step: i32,
    /// Added once per completed step
    pub step_size: i32,
    /// Maximum influence distance
    pub range: i32,
}

impl DesirabilityProfile {
    pub const fn new(value: i32, step: i32, step_size: i32, range: i32) -> Self {
        Self {
            value,
            step,
            step_size,
            range,
        }
    }

    /// Contribution felt at `distance` tiles, or None beyond range
    pub fn at_distance(&self, distance: i32) -> Option<i32> {
        if distance > self.range {
            return None;
        }
        let mut des = self.value;
        let mut tiles_within_step = 0;
        let mut dist = distance;
        while dist >= 1 {
            tiles_within_step += 1;
            if tiles_within_step >= self.step {
                des += self.step_size;
                tiles_within_step = 0;
            }
            dist -= 1;
        }
        Some(des)
    }
}

impl StructureKind {
    pub fn profile(self) -> DesirabilityProfile {
        match self {
            StructureKind::House(tier) => house_profile(tier),
            StructureKind::Highway => DesirabilityProfile::new(-4, 1, 1, 4),
            StructureKind::Road => DesirabilityProfile::new(0, 0, 0, 0),
            StructureKind::Garden => DesirabilityProfile::new(3, 1, -1, 3),
            StructureKind::Statue => DesirabilityProfile::new(3, 1, -1, 3),
            StructureKind::Temple => DesirabilityProfile::new(4, 2, -1, 6),
            StructureKind::Market => DesirabilityProfile::new(-2, 1, 1, 6),
            StructureKind::Prefecture => DesirabilityProfile::new(-2, 1, 1, 2),
            StructureKind::EngineersPost => DesirabilityProfile::new(0, 1, 1, 1),
            StructureKind::Warehouse => DesirabilityProfile::new(-5, 2, 2, 4),
            StructureKind::Granary => DesirabilityProfile::new(-4, 1, 2, 2),
            StructureKind::Workshop => DesirabilityProfile::new(-4, 1, 1, 4),
            StructureKind::Farm => DesirabilityProfile::new(-2, 1, 1, 2),
            StructureKind::Barracks => DesirabilityProfile::new(-6, 1, 1, 6),
            StructureKind::Reservoir => DesirabilityProfile::new(-6, 1, 2, 3),
        }
    }
}

fn house_profile(tier: HouseTier) -> DesirabilityProfile {
    match tier.index() {
        0..=3 => DesirabilityProfile::new(-3, 1, 1, 3),
        4..=7 => DesirabilityProfile::new(-2, 1, 1, 2),
        8..=11 => DesirabilityProfile::new(0, 0, 0, 0),
        12..=15 => DesirabilityProfile::new(2, 1, -1, 2),
        _ => DesirabilityProfile::new(4, 2, -1, 6),
    }
}
