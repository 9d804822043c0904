//! Daily house pass - orchestrates evolution and consumption
//!
//! Once per simulated day every house is visited exactly once, lowest tier
//! first:
//! 1. Skip houses that are removed or already stamped this pass
//! 2. Merge single-tile houses on the lowest tiers
//! 3. Evaluate requirements and desirability
//! 4. Hold back downgrades through the devolve hysteresis
//! 5. Apply the transition (tier rewrite or footprint change)
//! 6. Consume goods on scheduled days, plague or not
//! 7. Stamp the house
//!
//! Footprint changes are batched: land routing is rebuilt once after the
//! pass if anything grew, merged or shrank.

use serde::Serialize;

use crate::city::demand::DemandAggregate;
use crate::city::house::{EvolveStatus, HousingUnit};
use crate::city::house_model::HouseModelTable;
use crate::city::modifiers::{CityFlags, GlobalModifiers};
use crate::city::registry::HouseRegistry;
use crate::city::tier::HouseTier;
use crate::core::calendar::GameCalendar;
use crate::core::config::EngineConfig;
use crate::core::error::{HouseError, Result};
use crate::core::types::{HouseId, Tick};
use crate::simulation::consumption::{consume_resources, should_consume_today};
use crate::simulation::desirability::check_evolve_desirability;
use crate::simulation::explanation::{determine_evolve_text, EvolveText};
use crate::simulation::hysteresis::has_devolve_delay;
use crate::simulation::neighbours::worst_desirability_neighbour;
use crate::simulation::requirements::{check_requirements, has_required_goods_and_services};
use crate::simulation::transition::{apply_transition, transition_for, Outcome, Transition};
use crate::spatial::{MapServices, UndoRecorder};

/// Per-pass state shared by every house in the pass
///
/// Reset at the start of each pass; the demand tally stays readable until
/// the next one.
#[derive(Debug, Clone, Default)]
pub struct SimulationContext {
    pub demands: DemandAggregate,
    pub modifiers: GlobalModifiers,
    /// Stamp written on every house processed by the current pass
    pub stamp: Tick,
}

impl SimulationContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin_pass(&mut self, flags: &CityFlags, config: &EngineConfig, stamp: Tick) {
        self.demands.reset();
        self.modifiers = GlobalModifiers::compute(flags, config);
        self.stamp = stamp;
    }
}

/// A transition that happened during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HouseEvent {
    pub house: HouseId,
    pub outcome: Outcome,
}

/// Summary of one daily pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassReport {
    pub stamp: Tick,
    pub processed: usize,
    /// Empty tents and plague-stricken houses
    pub skipped: usize,
    pub merged: usize,
    pub evolved: usize,
    pub devolved: usize,
    pub delayed: usize,
    pub no_space: usize,
    pub goods_consumed: u32,
    pub routing_rebuilt: bool,
    pub events: Vec<HouseEvent>,
}

impl PassReport {
    fn record(&mut self, id: HouseId, outcome: Outcome) {
        match outcome {
            Outcome::Held => return,
            Outcome::Skipped => {
                self.skipped += 1;
                return;
            }
            Outcome::Delayed => {
                self.delayed += 1;
                return;
            }
            Outcome::NoSpace { .. } => self.no_space += 1,
            Outcome::Evolved { .. } | Outcome::Expanded { .. } => self.evolved += 1,
            Outcome::Devolved { .. } | Outcome::Shrunk { .. } | Outcome::Desized { .. } => {
                self.devolved += 1
            }
        }
        tracing::debug!("House {:?}: {:?}", id, outcome);
        self.events.push(HouseEvent { house: id, outcome });
    }
}

/// The house progression engine
#[derive(Debug, Clone)]
pub struct HouseEngine {
    table: HouseModelTable,
    config: EngineConfig,
}

impl HouseEngine {
    pub fn new(table: HouseModelTable, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(HouseError::InvalidConfig)?;
        Ok(Self { table, config })
    }

    /// Engine with the built-in table and default config
    pub fn with_defaults() -> Self {
        Self {
            table: HouseModelTable::with_defaults(),
            config: EngineConfig::default(),
        }
    }

    pub fn table(&self) -> &HouseModelTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the daily evolve-and-consume pass over every house
    ///
    /// The pass stamp is the calendar's day count, so calling this twice on
    /// the same day leaves the second call with nothing to do.
    pub fn process_day(
        &self,
        registry: &mut HouseRegistry,
        map: &mut dyn MapServices,
        undo: &mut dyn UndoRecorder,
        flags: &CityFlags,
        calendar: &GameCalendar,
        ctx: &mut SimulationContext,
    ) -> PassReport {
        ctx.begin_pass(flags, &self.config, calendar.total_days());
        let mut report = PassReport {
            stamp: ctx.stamp,
            ..PassReport::default()
        };
        let mut footprint_changed = false;

        for tier in HouseTier::ALL {
            // Houses that change tier mid-pass land in a later bucket and are
            // caught there by the stamp
            for id in registry.ids_of_tier(tier) {
                let Some(house) = registry.get(id) else {
                    continue;
                };
                if !house.is_in_use() || house.last_update == Some(ctx.stamp) {
                    continue;
                }

                let outcome = if house.has_plague {
                    Outcome::Skipped
                } else {
                    self.evolve_house(id, registry, map, undo, ctx, &mut report)
                };
                footprint_changed |= outcome.changes_footprint();
                report.record(id, outcome);

                if let Some(house) = registry.get_mut(id) {
                    if should_consume_today(house, calendar, &self.config) {
                        report.goods_consumed +=
                            consume_resources(house, &self.table, &ctx.modifiers, calendar.total_months());
                    }
                    house.last_update = Some(ctx.stamp);
                }
                report.processed += 1;
            }
        }

        if footprint_changed || report.merged > 0 {
            map.rebuild_land_routing();
            report.routing_rebuilt = true;
        }

        tracing::info!(
            "House pass {}: {} processed, {} evolved, {} devolved, {} delayed",
            report.stamp,
            report.processed,
            report.evolved,
            report.devolved,
            report.delayed
        );
        report
    }

    fn evolve_house(
        &self,
        id: HouseId,
        registry: &mut HouseRegistry,
        map: &mut dyn MapServices,
        undo: &mut dyn UndoRecorder,
        ctx: &mut SimulationContext,
        report: &mut PassReport,
    ) -> Outcome {
        let Some(house) = registry.get(id) else {
            return Outcome::Held;
        };
        let row = transition_for(house.tier);
        if row.requires_population && house.population == 0 {
            return Outcome::Skipped;
        }

        if row.merges_first && registry.merge(id) {
            report.merged += 1;
        }

        let Some(house) = registry.get_mut(id) else {
            return Outcome::Held;
        };
        let status = self.evaluate(house, row.kind, ctx);
        house.evolve_status = status;
        if row.uses_hysteresis && has_devolve_delay(house, status, ctx.modifiers.devolve_window) {
            return Outcome::Delayed;
        }

        apply_transition(id, status, registry, map, undo, &self.config)
    }

    /// Status for a house before hysteresis
    ///
    /// The top tier skips the next-tier lookahead since it has nowhere to go.
    fn evaluate(&self, house: &HousingUnit, kind: Transition, ctx: &mut SimulationContext) -> EvolveStatus {
        if kind != Transition::Top {
            return check_requirements(house, &self.table, &ctx.modifiers, &mut ctx.demands);
        }
        let bonus = ctx.modifiers.tier_bonus(house);
        let status = check_evolve_desirability(house, bonus, &self.table);
        if has_required_goods_and_services(house, false, bonus, &self.table, &ctx.modifiers, &mut ctx.demands) {
            status
        } else {
            EvolveStatus::Devolve
        }
    }

    /// Work out and store the advisory explanation for one house
    ///
    /// Uses the modifiers of the most recent pass.
    pub fn explain(
        &self,
        id: HouseId,
        registry: &mut HouseRegistry,
        map: &dyn MapServices,
        ctx: &SimulationContext,
    ) -> Option<EvolveText> {
        let house = registry.get(id).filter(|h| h.is_in_use())?;
        let worst = worst_desirability_neighbour(house, registry, map, self.config.neighbour_scan);
        let text = determine_evolve_text(house, &self.table, &ctx.modifiers, worst);
        if let Some(house) = registry.get_mut(id) {
            house.explanation = Some(text);
        }
        Some(text)
    }
}

impl Default for HouseEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::inventory::Good;
    use crate::core::types::TilePos;
    use crate::spatial::tile_map::{TileMap, UndoSwitch};

    struct Fixture {
        engine: HouseEngine,
        registry: HouseRegistry,
        map: TileMap,
        undo: UndoSwitch,
        calendar: GameCalendar,
        ctx: SimulationContext,
    }

    impl Fixture {
        fn new(size: usize) -> Self {
            Self {
                engine: HouseEngine::with_defaults(),
                registry: HouseRegistry::new(size, size),
                map: TileMap::new(size, size),
                undo: UndoSwitch::new(),
                calendar: GameCalendar::at(16, 1, 3),
                ctx: SimulationContext::new(),
            }
        }

        fn run(&mut self, flags: &CityFlags) -> PassReport {
            self.engine.process_day(
                &mut self.registry,
                &mut self.map,
                &mut self.undo,
                flags,
                &self.calendar,
                &mut self.ctx,
            )
        }

        fn run_days(&mut self, days: usize) -> Vec<PassReport> {
            (0..days)
                .map(|_| {
                    let report = self.run(&CityFlags::default());
                    self.calendar.advance_day();
                    report
                })
                .collect()
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = EngineConfig {
            devolve_delay: 0,
            ..EngineConfig::default()
        };
        let err = HouseEngine::new(HouseModelTable::with_defaults(), config).unwrap_err();
        assert!(matches!(err, HouseError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_tent_is_skipped() {
        let mut fx = Fixture::new(4);
        let id = fx.registry.spawn(TilePos::new(0, 0), &mut fx.map).unwrap();
        fx.registry.get_mut(id).unwrap().desirability = 100;

        let report = fx.run(&CityFlags::default());

        assert_eq!(report.skipped, 1);
        assert_eq!(fx.registry.get(id).unwrap().tier, HouseTier::SmallTent);
        assert_eq!(fx.registry.get(id).unwrap().last_update, Some(report.stamp));
    }

    #[test]
    fn test_populated_tent_evolves_one_tier() {
        let mut fx = Fixture::new(4);
        let id = fx.registry.spawn(TilePos::new(0, 0), &mut fx.map).unwrap();
        {
            let house = fx.registry.get_mut(id).unwrap();
            house.population = 3;
            house.desirability = 50;
            house.access.water = true;
        }

        let report = fx.run(&CityFlags::default());

        // The stamp stops the large tent bucket from evolving it again
        assert_eq!(fx.registry.get(id).unwrap().tier, HouseTier::LargeTent);
        assert_eq!(report.evolved, 1);
        assert_eq!(report.events.len(), 1);
    }

    #[test]
    fn test_same_day_pass_is_idempotent() {
        let mut fx = Fixture::new(4);
        let id = fx.registry.spawn(TilePos::new(0, 0), &mut fx.map).unwrap();
        {
            let house = fx.registry.get_mut(id).unwrap();
            house.population = 3;
            house.desirability = 50;
            house.access.water = true;
        }

        fx.run(&CityFlags::default());
        let second = fx.run(&CityFlags::default());

        assert_eq!(second.processed, 0);
        assert_eq!(fx.registry.get(id).unwrap().tier, HouseTier::LargeTent);
    }

    #[test]
    fn test_devolve_waits_for_window() {
        let mut fx = Fixture::new(4);
        let id = fx
            .registry
            .spawn_tier(TilePos::new(0, 0), HouseTier::SmallShack, &mut fx.map)
            .unwrap();
        fx.registry.get_mut(id).unwrap().desirability = -100;

        let reports = fx.run_days(2);

        assert_eq!(reports[0].delayed, 1);
        assert_eq!(reports[1].devolved, 1);
        assert_eq!(fx.registry.get(id).unwrap().tier, HouseTier::LargeTent);
        assert_eq!(fx.registry.get(id).unwrap().evolve_status, EvolveStatus::Devolve);
    }

    #[test]
    fn test_plague_skips_evolution_but_consumes() {
        let mut fx = Fixture::new(4);
        fx.calendar = GameCalendar::at(16, 1, 0);
        let id = fx
            .registry
            .spawn_tier(TilePos::new(0, 0), HouseTier::SmallCasa, &mut fx.map)
            .unwrap();
        {
            let house = fx.registry.get_mut(id).unwrap();
            house.has_plague = true;
            house.desirability = -100;
            house.inventory.add(Good::Pottery, 5);
        }

        let report = fx.run(&CityFlags::default());

        assert_eq!(report.skipped, 1);
        let house = fx.registry.get(id).unwrap();
        assert_eq!(house.tier, HouseTier::SmallCasa);
        assert_eq!(house.devolve_delay, 0);
        assert_eq!(house.inventory.get(Good::Pottery), 4);
    }

    #[test]
    fn test_merge_triggers_single_routing_rebuild() {
        let mut fx = Fixture::new(4);
        for origin in [TilePos::new(0, 0), TilePos::new(2, 0)] {
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let id = fx
                    .registry
                    .spawn_tier(origin.offset(dx, dy), HouseTier::SmallShack, &mut fx.map)
                    .unwrap();
                let house = fx.registry.get_mut(id).unwrap();
                house.access.water = true;
                house.services.gods = 1;
            }
        }

        let report = fx.run(&CityFlags::default());

        assert_eq!(report.merged, 2);
        assert_eq!(fx.registry.count(), 2);
        assert!(report.routing_rebuilt);
        assert_eq!(fx.map.routing_rebuilds, 1);
    }

    #[test]
    fn test_explain_stores_text() {
        let mut fx = Fixture::new(4);
        let id = fx
            .registry
            .spawn_tier(TilePos::new(0, 0), HouseTier::SmallCasa, &mut fx.map)
            .unwrap();
        fx.registry.get_mut(id).unwrap().desirability = -100;

        let text = fx.engine.explain(id, &mut fx.registry, &fx.map, &fx.ctx);

        assert_eq!(text, Some(EvolveText::DevolveDesirability));
        assert_eq!(fx.registry.get(id).unwrap().explanation, text);
        assert_eq!(fx.registry.get(id).unwrap().evolve_status, EvolveStatus::Hold);
    }
}
