use thiserror::Error;

use crate::core::types::{HouseId, TilePos};

#[derive(Error, Debug)]
pub enum HouseError {
    #[error("House tier index out of range: {0}")]
    TierOutOfRange(u8),

    #[error("House not found: {0:?}")]
    HouseNotFound(HouseId),

    #[error("Tile unavailable for a house: {0:?}")]
    TileUnavailable(TilePos),

    #[error("Invalid house model table: {0}")]
    InvalidTable(String),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HouseError>;
