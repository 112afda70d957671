//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tower archetype. Defines base stats and targeting bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerArchetype {
    /// Generalist single-target shooter.
    Basic,
    /// Slow cannon whose shells splash around the impact point.
    Area,
    /// Frost emitter that slows what it hits.
    Slow,
    /// Long-range hitscan rifle with armor pierce; never evaded.
    Precision,
    /// Instant arc that jumps between nearby enemies.
    Chain,
}

/// Enemy archetype. Defines base stats and which capabilities an enemy carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    Normal,
    Fast,
    Tank,
    /// Armored, slow-immune, regenerates and buffs nearby enemies.
    Boss,
    /// Heals allies around it.
    Healer,
    /// Evasive and periodically invisible.
    Ghost,
    /// Splits into minions on death.
    Splitter,
    /// Drops minions when damaged.
    Brood,
    /// Hardens against repeated hits.
    Adaptive,
    Minion,
}

/// Status-effect tag carried by an attack. Immunities are expressed in tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTag {
    Slow,
    Splash,
    Chain,
}

/// Match / scheduler phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Between waves; the countdown to the next wave is running.
    #[default]
    Idle,
    /// A wave's spawn queue is being drained.
    Spawning,
    /// Every wave was cleared with lives remaining.
    Completed,
    /// Lives reached zero. Terminal until reset.
    Failed,
}

impl MatchPhase {
    /// Whether the match has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Completed | MatchPhase::Failed)
    }
}

/// Kind of random global modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomEventKind {
    /// All towers disabled.
    TowerBlackout,
    /// Tower range multiplied by the event magnitude.
    RangeFog,
    /// Enemy armor raised by the event magnitude.
    IronHide,
    /// Enemy base speed multiplied by the event magnitude.
    Frenzy,
    /// One tower corrupted and unable to fire.
    Corruption,
    /// Instantly spawns a batch of fast enemies along the path.
    Ambush,
}
