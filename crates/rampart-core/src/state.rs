//! Simulation snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{EntityId, GridCell, SimTime};

/// Complete read-only state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub economy: EconomyView,
    pub wave: WaveView,
    pub towers: Vec<TowerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub markers: Vec<EffectMarker>,
    pub active_events: Vec<ActiveEventView>,
    /// Events that occurred since the previous snapshot.
    pub events: Vec<CombatEvent>,
}

/// Player currency and lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyView {
    pub currency: u32,
    pub lives: u32,
}

/// Wave progress for the HUD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Number of the current (or last started) wave, 1-based. 0 before the first wave.
    pub current: u32,
    pub total: u32,
    /// Queued spawns plus live enemies of the current wave.
    pub enemies_remaining: u32,
    /// Seconds until the next wave starts on its own (Idle only).
    pub countdown_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: EntityId,
    pub archetype: TowerArchetype,
    pub cell: GridCell,
    pub position: Vec2,
    pub level: u32,
    /// Currency spent on this tower so far (build plus upgrades).
    pub invested: u32,
    pub range: f32,
    pub target: Option<EntityId>,
    pub disabled: bool,
    pub corrupted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
    pub slowed: bool,
    pub hidden: bool,
    pub buffed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub predicted_impact: Option<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveEventView {
    pub kind: RandomEventKind,
    pub remaining_secs: f32,
    pub duration_secs: f32,
}

/// Shape of a transient visual marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum MarkerShape {
    Circle { radius: f32 },
    Text { text: String },
    Line { to: Vec2 },
}

/// A short-lived visual effect for the presentation layer to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectMarker {
    pub shape: MarkerShape,
    pub position: Vec2,
    pub remaining_secs: f32,
}
