//! City layer - houses, their stock, and the tables and flags that govern them

pub mod demand;
pub mod house;
pub mod house_model;
pub mod inventory;
pub mod modifiers;
pub mod registry;
pub mod tier;

pub use demand::{DemandAggregate, MissingService, RequiredService};
pub use house::{EvolveStatus, HouseState, HousingUnit, ServiceAccess, ServiceLevels};
pub use house_model::{GoodsAmounts, HouseModelTable, LevelRequirementRow};
pub use inventory::{Good, Inventory};
pub use modifiers::{CityFlags, GlobalModifiers};
pub use registry::HouseRegistry;
pub use tier::{HouseTier, TIER_COUNT};
