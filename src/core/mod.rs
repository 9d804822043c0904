pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::GameCalendar;
pub use config::{EngineConfig, ScanWindow};
pub use error::{HouseError, Result};
