//! Enemy behaviour system: applies the per-archetype behaviours from
//! `rampart-enemy-ai` to the world.
//!
//! Order within the pass: damage observation (adaptive hardening, brood
//! drops), slow expiry, stealth cycling, regeneration, healing, auras, and
//! finally re-syncing the damage trackers so healing is not mistaken for
//! (negative) damage next tick.

use glam::Vec2;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use rampart_core::components::*;
use rampart_core::events::CombatEvent;
use rampart_core::types::Position;
use rampart_enemy_ai::behaviors::{self, AuraSource};

use crate::ids::id_of;
use crate::systems::wave_spawner::StatOverrides;
use crate::systems::TickContext;
use crate::world_setup::PendingSpawn;

/// Run all enemy behaviours for one tick.
pub fn run<R: Rng + ?Sized>(world: &mut World, ctx: &mut TickContext<'_>, rng: &mut R, dt: f32) {
    observe_damage(world, ctx, rng);

    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        behaviors::tick_slow(enemy, dt);
    }
    for (_entity, stealth) in world.query_mut::<&mut Stealth>() {
        behaviors::advance_stealth(stealth, dt);
    }
    for (_entity, (enemy, regen)) in world.query_mut::<(&mut Enemy, &Regenerating)>() {
        behaviors::regenerate(enemy, regen.per_sec, dt);
    }

    apply_healing(world, dt);
    apply_auras(world);

    for (_entity, (enemy, tracker)) in world.query_mut::<(&Enemy, &mut DamageTracker)>() {
        tracker.last_health = enemy.health;
    }
}

/// Compare health against the tracker: adaptive enemies harden once per
/// damaged tick, broods may drop a minion.
fn observe_damage<R: Rng + ?Sized>(world: &mut World, ctx: &mut TickContext<'_>, rng: &mut R) {
    for (_entity, (enemy, tracker, adaptive, brood)) in world.query_mut::<(
        &Enemy,
        &mut DamageTracker,
        Option<&mut Adaptive>,
        Option<&Brood>,
    )>() {
        let taken = behaviors::observe_damage(tracker, enemy.health);
        if taken <= 0.0 || enemy.health <= 0.0 {
            continue;
        }
        if let Some(adaptive) = adaptive {
            adaptive.counter += 1;
        }
        if let Some(brood) = brood {
            let chance = behaviors::brood_spawn_chance(brood, taken, enemy.max_health);
            if chance > 0.0 && rng.gen_bool(chance) {
                debug!("{:?} dropped a {:?}", enemy.archetype, brood.minion);
                ctx.pending.push(PendingSpawn {
                    archetype: brood.minion,
                    count: 1,
                    progress: enemy.progress,
                    wave: enemy.wave,
                    health_scale: 1.0,
                    overrides: StatOverrides::default(),
                });
                ctx.events.push(CombatEvent::Spawned {
                    parent: enemy.archetype,
                    child: brood.minion,
                    count: 1,
                });
            }
        }
    }
}

fn apply_healing(world: &mut World, dt: f32) {
    let healers: Vec<(Entity, Vec2, Healer)> = world
        .query::<(&Healer, &Position)>()
        .iter()
        .map(|(entity, (healer, pos))| (entity, pos.0, *healer))
        .collect();
    if healers.is_empty() {
        return;
    }

    for (entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &Position)>() {
        for (owner, center, healer) in &healers {
            if *owner == entity && !healer.heals_self {
                continue;
            }
            if pos.0.distance(*center) <= healer.radius {
                behaviors::heal(enemy, healer.per_sec * dt);
            }
        }
    }
}

fn apply_auras(world: &mut World) {
    let sources: Vec<AuraSource> = world
        .query::<(&Aura, &Position)>()
        .iter()
        .map(|(entity, (aura, pos))| AuraSource {
            owner: id_of(entity),
            position: pos.0,
            aura: *aura,
        })
        .collect();

    for (entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &Position)>() {
        let (speed, armor) = behaviors::aura_bonus(id_of(entity), pos.0, &sources);
        enemy.aura_speed_bonus = speed;
        enemy.aura_armor_bonus = armor;
    }
}
