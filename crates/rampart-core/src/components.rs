//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Optional enemy abilities are
//! separate capability components so systems query by capability instead of
//! inspecting archetypes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, GridCell};

/// Status effect carried by an attack, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Multiply movement speed by `factor` for `duration_secs`.
    Slow { factor: f32, duration_secs: f32 },
    /// Damage everything within `radius` of the impact point.
    Splash { radius: f32 },
    /// Jump to up to `hops` further enemies within `hop_radius` of the last
    /// victim, multiplying damage by `falloff` per hop.
    Chain {
        hops: u32,
        hop_radius: f32,
        falloff: f32,
    },
}

impl Effect {
    pub fn tag(&self) -> EffectTag {
        match self {
            Effect::Slow { .. } => EffectTag::Slow,
            Effect::Splash { .. } => EffectTag::Splash,
            Effect::Chain { .. } => EffectTag::Chain,
        }
    }
}

/// Everything the damage pipeline needs to know about one attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub damage: f32,
    pub effect: Option<Effect>,
    /// Fraction subtracted from the target's armor before mitigation.
    pub armor_pierce: f32,
    pub ignores_evasion: bool,
}

/// A player-placed defense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub archetype: TowerArchetype,
    pub cell: GridCell,
    pub attack: AttackProfile,
    /// Engagement range in world units.
    pub range: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    /// Seconds accumulated toward the next shot.
    pub fire_timer: f32,
    /// Projectile speed in world units per second. Zero means instant hit.
    pub projectile_speed: f32,
    pub level: u32,
    /// Currency spent on building and upgrading this tower.
    pub invested: u32,
    /// Current engagement target (non-owning).
    pub target: Option<EntityId>,
    pub disabled: bool,
    pub corrupted: bool,
}

/// A mobile adversary walking the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    pub health: f32,
    pub max_health: f32,
    /// Speed before slows and aura bonuses (world units per second).
    pub base_speed: f32,
    /// Current slow multiplier (1.0 = not slowed).
    pub slow_multiplier: f32,
    pub slow_remaining_secs: f32,
    /// Fractional speed bonus granted by a nearby aura this tick.
    pub aura_speed_bonus: f32,
    /// Armor bonus granted by a nearby aura this tick.
    pub aura_armor_bonus: f32,
    /// Distance travelled along the path.
    pub progress: f32,
    /// Index of the path segment currently walked.
    pub segment: usize,
    pub reward: u32,
    /// Lives lost when this enemy reaches the end of the path.
    pub life_cost: u32,
    /// Wave number this enemy belongs to.
    pub wave: u32,
    /// Body radius used for hit detection.
    pub radius: f32,
}

/// Flat armor fraction (0.0 - 0.9).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Armored {
    pub armor: f32,
}

/// Probability that an attack is negated entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Evasive {
    pub chance: f32,
}

/// Effect tags this enemy ignores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Immunities(pub Vec<EffectTag>);

/// Passive health regeneration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Regenerating {
    pub per_sec: f32,
}

/// Buff granted to other enemies within `radius`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aura {
    pub radius: f32,
    /// Fractional speed bonus (0.15 = +15%).
    pub speed_bonus: f32,
    pub armor_bonus: f32,
}

/// Heals allies (and optionally itself) within `radius`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Healer {
    pub radius: f32,
    pub per_sec: f32,
    pub heals_self: bool,
}

/// Resistance that grows with each damaging hit taken.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Adaptive {
    /// Number of damaging hits observed.
    pub counter: u32,
    /// Resistance gained per hit.
    pub per_hit: f32,
    /// Maximum resistance.
    pub cap: f32,
}

/// Alternates between hidden (untargetable) and visible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stealth {
    pub hidden: bool,
    /// Seconds left in the current hidden/visible stretch.
    pub timer: f32,
    pub hidden_secs: f32,
    pub visible_secs: f32,
}

/// Splits into `count` enemies of `child` archetype on death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Splitter {
    pub child: EnemyArchetype,
    pub count: u32,
}

/// Drops minions when damaged and bursts on death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Brood {
    pub minion: EnemyArchetype,
    /// Spawn probability per point of health lost, relative to max health.
    pub chance_per_health: f32,
    /// Minion slots rolled on death.
    pub burst: u32,
}

/// Health observed at the end of the previous behaviour pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DamageTracker {
    pub last_health: f32,
}

/// An in-flight attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub attack: AttackProfile,
    pub speed: f32,
    /// Target being homed on (non-owning). `None` when flying unguided.
    pub target: Option<EntityId>,
    pub predicted_impact: Option<Vec2>,
    pub lifetime_secs: f32,
}
