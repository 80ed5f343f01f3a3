use thiserror::Error;

use crate::detection::TrackingId;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("coordinate context not set; call set_coordinate_context before processing frames")]
    MissingCoordinateContext,

    #[error("invalid coordinate context: {0}")]
    InvalidCoordinateContext(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    #[error("inventory unavailable: {0}")]
    Unavailable(String),

    #[error("inventory rejected item {0}: {1}")]
    Rejected(TrackingId, String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DisposalError {
    #[error("inventory update failed: {0}")]
    Inventory(#[from] InventoryError),
}

impl DisposalError {
    /// Whether the caller may confirm the same match result again.
    pub fn is_retryable(&self) -> bool {
        match self {
            DisposalError::Inventory(_) => true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum BinScanError {
    #[error("malformed bin payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported bin category: {0}")]
    UnsupportedCategory(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Disposal(#[from] DisposalError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    BinScan(#[from] BinScanError),
}

pub type Result<T> = std::result::Result<T, Error>;
