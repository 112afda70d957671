//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only work) plus explicit borrows of engine state. They do not own
//! state; everything persistent lives in components or in the engine.

use rampart_core::events::CombatEvent;
use rampart_core::state::EffectMarker;

use crate::economy::Economy;
use crate::world_setup::PendingSpawn;

pub mod damage;
pub mod enemy_ai;
pub mod fire_control;
pub mod markers;
pub mod movement;
pub mod projectiles;
pub mod random_events;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;

/// Engine state the combat systems write to during a tick.
pub struct TickContext<'a> {
    pub economy: &'a mut Economy,
    pub events: &'a mut Vec<CombatEvent>,
    pub markers: &'a mut Vec<EffectMarker>,
    pub pending: &'a mut Vec<PendingSpawn>,
}
