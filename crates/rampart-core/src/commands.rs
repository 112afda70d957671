//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are validated and applied synchronously; each returns either an
//! outcome or the reason it was rejected.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, GridCell};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Build a tower of `archetype` on `cell`.
    BuildTower {
        cell: GridCell,
        archetype: TowerArchetype,
    },
    /// Upgrade an existing tower by one level.
    UpgradeTower { tower: EntityId },
    /// Start the next wave without waiting for the countdown.
    StartWave,
    /// Discard the match and start over.
    Reset,
}

/// Result of an accepted command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    Built { tower: EntityId, cost: u32 },
    Upgraded { tower: EntityId, level: u32, cost: u32 },
    WaveStarted { wave: u32 },
    Reset,
}
