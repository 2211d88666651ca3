//! Simulation errors

use thiserror::Error;

/// Errors raised at the edges of a simulation run.
///
/// Classification itself never fails; these cover raw input validation,
/// configuration and report output.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Order draw out of range: {0} (expected 0, 1 or 2)")]
    InvalidOrder(u8),

    #[error("Binary draw {name} out of range: {value} (expected 0 or 1)")]
    InvalidBit { name: &'static str, value: u8 },

    #[error("Parallel run needs at least one worker")]
    ZeroWorkers,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
