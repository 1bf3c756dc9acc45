//! Error types for declined actions, config loading and snapshot decoding.
//!
//! None of these are fatal: a declined action leaves the simulation exactly
//! as it was, and the tick keeps running.

use thiserror::Error;

use crate::shared::{AnimalId, NodeId, TilePos};

/// Why a player action was declined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("tile {pos} is not in a state that allows this action")]
    InvalidTileState { pos: TilePos },

    #[error("{id} does not exist or cannot do that right now")]
    InvalidAnimalState { id: AnimalId },

    #[error("capacity of {capacity} reached")]
    CapacityExceeded { capacity: u32 },

    #[error("{id} is depleted or does not exist")]
    NodeUnavailable { id: NodeId },

    #[error("no catalog entry for {name}")]
    UnknownCatalogEntry { name: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config read failed: {0}")]
    Io(String),

    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] serde_json::Error),
}
