use thiserror::Error;

use crate::core::types::{BayId, UnitId};

/// Raised by a recovery pool when every slot is cooling down
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No recovery slot available")]
pub struct NoSlotAvailable;

#[derive(Error, Debug)]
pub enum BayError {
    #[error("Unit {unit} is not compatible with bay {bay}")]
    IncompatibleUnit { bay: BayId, unit: UnitId },

    #[error("Insufficient capacity: needed {needed}, available {available}")]
    InsufficientCapacity { needed: f64, available: f64 },

    #[error(transparent)]
    NoSlotAvailable(#[from] NoSlotAvailable),

    #[error("Bay {bay} has no functional doors")]
    NoDoorsAvailable { bay: BayId },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unit already loaded: {0}")]
    AlreadyLoaded(UnitId),

    #[error("Unit not loaded: {0}")]
    NotLoaded(UnitId),

    #[error("Bay {bay} cannot recover units")]
    RecoveryNotSupported { bay: BayId },

    #[error("Bay {bay} already launched {limit} units this round")]
    LaunchLimitReached { bay: BayId, limit: u32 },

    #[error("Malformed bay record: {0}")]
    MalformedRecord(String),

    #[error("Duplicate bay id: {0}")]
    DuplicateBay(BayId),

    #[error("Unknown bay: {0}")]
    UnknownBay(BayId),

    #[error("No bay can take unit {0}")]
    NoBayAvailable(UnitId),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BayError>;
