//! Domain errors reported back through the input boundary.

use thiserror::Error;

/// Why a player command was rejected. A rejected command leaves the
/// simulation state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("cell is already occupied by a tower")]
    CellOccupied,
    #[error("cell lies on the enemy path")]
    CellOnPath,
    #[error("cell is outside the build grid")]
    OutOfBounds,
    #[error("insufficient funds to upgrade: need {needed}, have {available}")]
    InsufficientUpgradeFunds { needed: u32, available: u32 },
    #[error("tower is already at maximum level")]
    MaxLevel,
    #[error("tower not found")]
    TowerNotFound,
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("the match is over; only reset is accepted")]
    MatchOver,
}
