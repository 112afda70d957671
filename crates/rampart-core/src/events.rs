//! Events emitted by the simulation for audio, UI, and log feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, GridCell};

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    TowerBuilt {
        tower: EntityId,
        archetype: TowerArchetype,
        cell: GridCell,
    },
    TowerUpgraded { tower: EntityId, level: u32 },
    TowerFired { tower: EntityId, target: EntityId },
    /// The attack was negated by evasion.
    Evaded { enemy: EntityId },
    /// The enemy shrugged off the attack's status effect.
    Immune { enemy: EntityId, effect: EffectTag },
    Hit { enemy: EntityId, damage: f32 },
    Killed {
        enemy: EntityId,
        archetype: EnemyArchetype,
        reward: u32,
    },
    /// An enemy reached the end of the path.
    Leaked {
        enemy: EntityId,
        archetype: EnemyArchetype,
        lives_lost: u32,
    },
    /// A splitter or brood produced extra enemies.
    Spawned {
        parent: EnemyArchetype,
        child: EnemyArchetype,
        count: u32,
    },
    WaveStarted { wave: u32, enemies: u32 },
    WaveCleared { wave: u32 },
    EventActivated { kind: RandomEventKind },
    EventExpired { kind: RandomEventKind },
    MatchCompleted,
    MatchFailed,
}
