//! Domus - demo city runner
//!
//! Builds a seeded demo city, drives the daily house pass for a number of
//! days and prints how the houses settled.

use std::path::PathBuf;

use ahash::AHashMap;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use domus::city::{CityFlags, DemandAggregate, Good, HouseModelTable, HouseRegistry, HouseTier, HousingUnit};
use domus::core::error::Result;
use domus::core::types::{HouseId, TilePos};
use domus::core::{EngineConfig, GameCalendar};
use domus::simulation::{HouseEngine, PassReport, SimulationContext};
use domus::spatial::{StructureKind, Terrain, TileMap, UndoSwitch};

/// Run the house progression engine over a generated city
#[derive(Parser, Debug)]
#[command(name = "domus")]
#[command(about = "Simulate house evolution in a seeded demo city")]
struct Args {
    /// Days to simulate
    #[arg(long, default_value_t = 96)]
    days: u32,

    /// Map width in tiles
    #[arg(long, default_value_t = 32)]
    width: usize,

    /// Map height in tiles
    #[arg(long, default_value_t = 32)]
    height: usize,

    /// Random seed for the generated city
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// House model table to load instead of the built-in one
    #[arg(long)]
    table: Option<PathBuf>,

    /// Engine config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run with the grand temple of Venus working
    #[arg(long)]
    venus: bool,

    /// Print explanations for this many houses
    #[arg(long, default_value_t = 5)]
    explain: usize,

    /// Emit the final summary as JSON
    #[arg(long)]
    json: bool,
}

/// Final state printed at the end of a run
#[derive(Serialize)]
struct Summary {
    days: u32,
    houses: usize,
    population: u32,
    tiers: Vec<(HouseTier, usize)>,
    demands: DemandAggregate,
    last_pass: PassReport,
}

/// Stand-in for the coverage walkers and desirability model of a full game
struct DemoCity {
    registry: HouseRegistry,
    map: TileMap,
    /// Neighbourhood quality per house, 0-100
    quality: AHashMap<HouseId, i32>,
    rng: ChaCha8Rng,
}

impl DemoCity {
    fn generate(width: usize, height: usize, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut map = TileMap::new(width, height);
        let mut registry = HouseRegistry::new(width, height);
        let mut quality = AHashMap::new();

        let amenities = [
            StructureKind::Temple,
            StructureKind::Market,
            StructureKind::Warehouse,
            StructureKind::Prefecture,
            StructureKind::Statue,
        ];

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let tile = TilePos::new(x, y);
                if y % 5 == 4 || x % 9 == 8 {
                    map.set_terrain(tile, Terrain::Road);
                    continue;
                }
                let roll: f32 = rng.gen();
                if roll < 0.06 {
                    let kind = amenities[rng.gen_range(0..amenities.len())];
                    map.place_structure(tile, 1, 1, kind);
                } else if roll < 0.09 {
                    map.set_terrain(tile, Terrain::Garden);
                } else if roll < 0.70 {
                    let id = registry.spawn(tile, &mut map)?;
                    if let Some(house) = registry.get_mut(id) {
                        house.population = rng.gen_range(1..=5);
                    }
                    quality.insert(id, rng.gen_range(0..=100));
                }
            }
        }

        tracing::info!("Generated {}x{} city with {} houses", width, height, registry.count());
        Ok(Self {
            registry,
            map,
            quality,
            rng,
        })
    }

    /// Refresh services, desirability and deliveries ahead of a pass
    fn update_coverage(&mut self, calendar: &GameCalendar) {
        let ids: Vec<HouseId> = self.registry.iter().map(|h| h.id).collect();
        let progress = (calendar.total_days() / 2) as i32;

        for id in ids {
            let base = *self.quality.entry(id).or_insert(50);
            let jitter = self.rng.gen_range(-4..=4);
            let deliver = calendar.day() == 0;
            if let Some(house) = self.registry.get_mut(id) {
                let level = (base + progress + jitter).clamp(0, 100);
                apply_coverage(house, level, deliver);
            }
        }
    }
}

fn apply_coverage(house: &mut HousingUnit, level: i32, deliver: bool) {
    house.desirability = level - 20;
    house.access.well = true;
    house.access.latrines = level > 10;
    house.access.water = level > 25;
    house.access.pantheon = level > 80;

    let services = &mut house.services;
    services.entertainment = level as u8;
    services.education = (level / 30).min(3) as u8;
    services.school = services.education >= 1;
    services.library = services.education >= 2;
    services.gods = if level > 5 { (level / 25 + 1).min(3) as u8 } else { 0 };
    services.barber = u8::from(level > 45);
    services.bathhouse = u8::from(level > 35);
    services.health = (level / 40).min(2) as u8;
    services.clinic = services.health >= 1;

    if deliver {
        let food_types = (level / 30 + 1).min(4) as usize;
        for food in Good::FOODS.iter().take(food_types) {
            house.inventory.add(*food, 20);
        }
        if level > 30 {
            for good in Good::GOODS {
                house.inventory.add(good, 3);
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let table = match &args.table {
        Some(path) => HouseModelTable::load_from_toml(path)?,
        None => HouseModelTable::with_defaults(),
    };
    let config = match &args.config {
        Some(path) => EngineConfig::load_from_toml(path)?,
        None => EngineConfig::default(),
    };
    let mut calendar = GameCalendar::new(config.days_per_month);
    let engine = HouseEngine::new(table, config)?;

    let mut city = DemoCity::generate(args.width, args.height, args.seed)?;
    let mut undo = UndoSwitch::new();
    let mut ctx = SimulationContext::new();
    let flags = CityFlags {
        venus_grand_temple_working: args.venus,
        multiple_wine_available: true,
        ..CityFlags::default()
    };

    let mut last_pass = PassReport::default();
    for _ in 0..args.days {
        city.update_coverage(&calendar);
        last_pass = engine.process_day(&mut city.registry, &mut city.map, &mut undo, &flags, &calendar, &mut ctx);
        calendar.advance_day();
    }

    let counts = city.registry.count_by_tier();
    let summary = Summary {
        days: args.days,
        houses: city.registry.count(),
        population: city.registry.iter().map(|h| h.population).sum(),
        tiers: HouseTier::ALL
            .iter()
            .map(|tier| (*tier, counts[tier.index()]))
            .filter(|(_, count)| *count > 0)
            .collect(),
        demands: ctx.demands.clone(),
        last_pass,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\n=== DOMUS: {} days, year {} month {} ===", args.days, calendar.year(), calendar.month());
    println!("{} houses, {} residents", summary.houses, summary.population);
    println!("Land routing rebuilds: {}", city.map.routing_rebuilds);
    println!();
    println!("Houses by tier:");
    for (tier, count) in &summary.tiers {
        println!("  {:<16} {:>5}", tier.name(), count);
    }
    println!();
    println!("Missing services:");
    for (service, count) in ctx.demands.missing_sorted() {
        println!("  {:<18} {:>5}", format!("{:?}", service), count);
    }
    println!("Relied-on services:");
    for (service, count) in ctx.demands.requiring_sorted() {
        println!("  {:<18} {:>5}", format!("{:?}", service), count);
    }

    if args.explain > 0 {
        println!();
        println!("Sample explanations:");
        let ids: Vec<HouseId> = city.registry.iter().map(|h| h.id).take(args.explain).collect();
        for id in ids {
            if let Some(text) = engine.explain(id, &mut city.registry, &city.map, &ctx) {
                if let Some(house) = city.registry.get(id) {
                    println!("  {:?} {:<16} code {:>2} {:?}", id, house.tier.name(), text.code(), text);
                }
            }
        }
    }

    Ok(())
}
