//! Level transition table
//!
//! Where each tier goes on evolve and devolve, and which tiers change their
//! footprint while doing so. A transition rewrites the tier of the existing
//! record; only the growth and shrink tiers touch the map.

use serde::Serialize;

use crate::city::house::EvolveStatus;
use crate::city::registry::HouseRegistry;
use crate::city::tier::HouseTier;
use crate::core::config::EngineConfig;
use crate::core::types::HouseId;
use crate::spatial::{MapServices, UndoRecorder};

/// How a tier moves between levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Tier rewrite in both directions
    Plain,
    /// Evolving needs a square block of `tiles` tiles
    Growth { tiles: u8 },
    /// Devolving gives up part of the footprint; `desize` tiers keep a single
    /// house when the patrician devolution fix is on
    Shrink { desize: bool },
    /// Never evolves
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRow {
    pub tier: HouseTier,
    pub evolve: Option<HouseTier>,
    pub devolve: Option<HouseTier>,
    pub kind: Transition,
    /// Try the 2x2 tile merge before evaluating
    pub merges_first: bool,
    /// Only evaluated while someone lives there
    pub requires_population: bool,
    /// Downgrades go through the devolve hysteresis
    pub uses_hysteresis: bool,
}

/// Transition row for a tier
pub fn transition_for(tier: HouseTier) -> TransitionRow {
    use HouseTier::*;

    let kind = match tier {
        MediumInsula => Transition::Growth { tiles: 4 },
        MediumVilla => Transition::Growth { tiles: 9 },
        MediumPalace => Transition::Growth { tiles: 16 },
        LargeInsula => Transition::Shrink { desize: false },
        LargeVilla | LargePalace => Transition::Shrink { desize: true },
        LuxuryPalace => Transition::Top,
        _ => Transition::Plain,
    };
    TransitionRow {
        tier,
        evolve: if tier.is_top() { None } else { tier.next() },
        devolve: tier.prev(),
        kind,
        merges_first: tier <= LargeCasa,
        requires_population: tier <= LargeTent,
        uses_hysteresis: tier != SmallTent,
    }
}

/// What happened to a house this pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Outcome {
    /// No change
    Held,
    /// A downgrade was held back by the hysteresis
    Delayed,
    /// Skipped: empty tent or plague
    Skipped,
    Evolved { from: HouseTier, to: HouseTier },
    Devolved { from: HouseTier, to: HouseTier },
    /// Grew into a larger footprint
    Expanded { from: HouseTier, to: HouseTier },
    /// Wanted to grow but found no room
    NoSpace { tier: HouseTier },
    /// Split into a smaller house plus single-tile houses
    Shrunk { from: HouseTier, to: HouseTier, new_houses: usize },
    /// Gave up part of the footprint as vacant land
    Desized { from: HouseTier, to: HouseTier },
}

impl Outcome {
    /// Whether the house's footprint changed
    pub fn changes_footprint(&self) -> bool {
        matches!(
            self,
            Outcome::Expanded { .. } | Outcome::Shrunk { .. } | Outcome::Desized { .. }
        )
    }
}

/// Apply a post-hysteresis verdict to a house
pub fn apply_transition(
    id: HouseId,
    status: EvolveStatus,
    registry: &mut HouseRegistry,
    map: &mut dyn MapServices,
    undo: &mut dyn UndoRecorder,
    config: &EngineConfig,
) -> Outcome {
    let Some(house) = registry.get(id).filter(|h| h.is_in_use()) else {
        tracing::warn!("Transition requested for missing house {:?}", id);
        return Outcome::Held;
    };
    let from = house.tier;
    let row = transition_for(from);

    match status {
        EvolveStatus::Hold => Outcome::Held,
        EvolveStatus::Evolve => {
            let Some(to) = row.evolve else {
                return Outcome::Held;
            };
            match row.kind {
                Transition::Top => Outcome::Held,
                Transition::Growth { tiles } => match registry.can_expand(id, tiles, map) {
                    Some(origin) => {
                        undo.disable();
                        if let Some(house) = registry.get_mut(id) {
                            if from == HouseTier::MediumInsula {
                                house.is_merged = false;
                            }
                        }
                        registry.expand(id, origin, to.footprint_side(), to, map);
                        map.refresh_gardens();
                        Outcome::Expanded { from, to }
                    }
                    None => {
                        if let Some(house) = registry.get_mut(id) {
                            house.no_space_to_expand = true;
                        }
                        Outcome::NoSpace { tier: from }
                    }
                },
                _ => {
                    registry.change_tier(id, to);
                    Outcome::Evolved { from, to }
                }
            }
        }
        EvolveStatus::Devolve => {
            let Some(to) = row.devolve else {
                return Outcome::Held;
            };
            match row.kind {
                Transition::Shrink { desize } => {
                    undo.disable();
                    if desize && config.patrician_devolution_fix {
                        registry.desize(id, to, map);
                        Outcome::Desized { from, to }
                    } else {
                        let created = registry.shrink(id, to, map);
                        Outcome::Shrunk {
                            from,
                            to,
                            new_houses: created.len(),
                        }
                    }
                }
                _ => {
                    registry.change_tier(id, to);
                    Outcome::Devolved { from, to }
                }
            }
        }
    }
}
