//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::MatchPhase;
use rampart_core::events::CombatEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime, Velocity};

use crate::economy::Economy;
use crate::ids::id_of;
use crate::systems::random_events::EventDirector;
use crate::systems::wave_spawner::{enemies_remaining, WaveScheduler};

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    economy: &Economy,
    scheduler: &WaveScheduler,
    director: &EventDirector,
    markers: &[EffectMarker],
    events: Vec<CombatEvent>,
) -> SimSnapshot {
    let phase = scheduler.phase();
    SimSnapshot {
        time: *time,
        phase,
        economy: economy.view(),
        wave: WaveView {
            current: scheduler.current_wave(),
            total: scheduler.total_waves(),
            enemies_remaining: enemies_remaining(world, scheduler),
            countdown_secs: if phase == MatchPhase::Idle {
                scheduler.countdown_secs().max(0.0)
            } else {
                0.0
            },
        },
        towers: build_towers(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        markers: markers.to_vec(),
        active_events: director.active().iter().map(|e| e.view()).collect(),
        events,
    }
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(entity, (tower, pos))| TowerView {
            id: id_of(entity),
            archetype: tower.archetype,
            cell: tower.cell,
            position: pos.0,
            level: tower.level,
            invested: tower.invested,
            range: tower.range,
            target: tower.target,
            disabled: tower.disabled,
            corrupted: tower.corrupted,
        })
        .collect();
    towers.sort_by_key(|t| t.cell);
    towers
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(f32, EnemyView)> = world
        .query::<(&Enemy, &Position, Option<&Stealth>)>()
        .iter()
        .map(|(entity, (enemy, pos, stealth))| {
            let view = EnemyView {
                id: id_of(entity),
                archetype: enemy.archetype,
                position: pos.0,
                health: enemy.health,
                max_health: enemy.max_health,
                radius: enemy.radius,
                slowed: enemy.slow_multiplier < 1.0,
                hidden: stealth.is_some_and(|s| s.hidden),
                buffed: enemy.aura_speed_bonus > 0.0 || enemy.aura_armor_bonus > 0.0,
            };
            (enemy.progress, view)
        })
        .collect();
    // Furthest along first, so the renderer draws leaders on top.
    enemies.sort_by(|a, b| b.0.total_cmp(&a.0));
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (projectile, pos, vel))| ProjectileView {
            id: id_of(entity),
            position: pos.0,
            velocity: vel.0,
            predicted_impact: projectile.predicted_impact,
        })
        .collect()
}
