//! Fire control system: advances tower fire timers, keeps or reacquires
//! targets, and fires (instant hits or projectiles).

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::PROJECTILE_LIFETIME_SECS;
use rampart_core::events::CombatEvent;
use rampart_core::types::{Position, Velocity};

use crate::guidance::{launch_velocity, predict_intercept};
use crate::ids::id_of;
use crate::systems::targeting::{collect_candidates, in_range, select_target, Candidate};
use crate::systems::{damage, markers, TickContext};

/// A shot decided this tick, executed once tower borrows are released.
struct FireOrder {
    tower: Entity,
    origin: Vec2,
    target: Entity,
    target_pos: Vec2,
    target_vel: Vec2,
    attack: AttackProfile,
    projectile_speed: f32,
}

/// Run fire control for one tick.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
    path_length: f32,
    targeting_jitter: f32,
    dt: f32,
) {
    let candidates = collect_candidates(world);
    let mut orders = Vec::new();

    for (entity, (tower, pos)) in world.query_mut::<(&mut Tower, &Position)>() {
        // Idle towers keep their target; it is revalidated once they resume.
        if tower.disabled || tower.corrupted {
            continue;
        }
        tower.fire_timer = (tower.fire_timer + dt).min(tower.fire_interval);

        // Keep the current target while it is alive, visible and in range.
        let kept = tower.target.and_then(|id| {
            candidates
                .iter()
                .find(|c| c.id == id && in_range(pos.0, tower, c))
        });
        let target: Option<&Candidate> = match kept {
            Some(c) => Some(c),
            None => select_target(pos.0, tower, &candidates, path_length, targeting_jitter, rng),
        };
        tower.target = target.map(|c| c.id);

        let Some(target) = target else {
            continue;
        };
        if tower.fire_timer < tower.fire_interval {
            continue;
        }
        tower.fire_timer = 0.0;
        orders.push(FireOrder {
            tower: entity,
            origin: pos.0,
            target: target.entity,
            target_pos: target.position,
            target_vel: target.velocity,
            attack: tower.attack,
            projectile_speed: tower.projectile_speed,
        });
    }

    for order in orders {
        fire(world, order, ctx, rng);
    }
}

fn fire<R: Rng + ?Sized>(world: &mut World, order: FireOrder, ctx: &mut TickContext<'_>, rng: &mut R) {
    ctx.events.push(CombatEvent::TowerFired {
        tower: id_of(order.tower),
        target: id_of(order.target),
    });

    if order.projectile_speed > 0.0 {
        let (aim, _) = predict_intercept(
            order.origin,
            order.target_pos,
            order.target_vel,
            order.projectile_speed,
        );
        let velocity = launch_velocity(order.origin, aim, order.projectile_speed);
        world.spawn((
            Projectile {
                attack: order.attack,
                speed: order.projectile_speed,
                target: Some(id_of(order.target)),
                predicted_impact: Some(aim),
                lifetime_secs: PROJECTILE_LIFETIME_SECS,
            },
            Position(order.origin),
            Velocity(velocity),
        ));
    } else {
        ctx.markers.push(markers::line(order.origin, order.target_pos));
        damage::deliver(
            world,
            Some(order.target),
            order.target_pos,
            &order.attack,
            ctx,
            rng,
        );
    }
}
