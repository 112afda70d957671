//! Projectile system: homing, retargeting, collision and expiry.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::types::{Position, Velocity};

use crate::guidance::{distance_to_segment, predict_intercept, steer};
use crate::ids::{entity_of, id_of};
use crate::systems::{damage, TickContext};

/// Enemy state as seen by projectiles this tick.
#[derive(Debug, Clone, Copy)]
struct EnemyTrack {
    entity: Entity,
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    hidden: bool,
}

impl EnemyTrack {
    fn hit_radius(&self) -> f32 {
        PROJECTILE_RADIUS + self.radius
    }
}

/// World-space rectangle outside which projectiles are discarded.
#[derive(Debug, Clone, Copy)]
pub struct Playfield {
    pub min: Vec2,
    pub max: Vec2,
}

impl Playfield {
    /// Grid bounds grown by `PLAYFIELD_MARGIN` on every side.
    pub fn for_grid(width: u32, height: u32) -> Self {
        Self {
            min: Vec2::splat(-PLAYFIELD_MARGIN),
            max: Vec2::new(
                width as f32 * CELL_SIZE + PLAYFIELD_MARGIN,
                height as f32 * CELL_SIZE + PLAYFIELD_MARGIN,
            ),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Advance every projectile by one tick.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
    playfield: &Playfield,
    dt: f32,
) {
    let projectiles: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    let mut enemies = track_enemies(world);
    for entity in projectiles {
        if step(world, entity, &enemies, ctx, rng, playfield, dt) {
            // The hit may have killed or split enemies.
            enemies = track_enemies(world);
        }
    }
}

fn track_enemies(world: &World) -> Vec<EnemyTrack> {
    world
        .query::<(&Enemy, &Position, &Velocity, Option<&Stealth>)>()
        .iter()
        .map(|(entity, (enemy, pos, vel, stealth))| EnemyTrack {
            entity,
            position: pos.0,
            velocity: vel.0,
            radius: enemy.radius,
            hidden: stealth.is_some_and(|s| s.hidden),
        })
        .collect()
}

/// Move one projectile. Returns `true` if it delivered its attack.
#[allow(clippy::too_many_arguments)]
fn step<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    enemies: &[EnemyTrack],
    ctx: &mut TickContext<'_>,
    rng: &mut R,
    playfield: &Playfield,
    dt: f32,
) -> bool {
    let Ok((projectile, pos, vel)) =
        world.query_one_mut::<(&mut Projectile, &mut Position, &mut Velocity)>(entity)
    else {
        return false;
    };

    projectile.lifetime_secs -= dt;
    if projectile.lifetime_secs <= 0.0 {
        let _ = world.despawn(entity);
        return false;
    }

    // Resolve the target, retargeting if it is gone.
    let mut target = projectile
        .target
        .and_then(entity_of)
        .and_then(|e| enemies.iter().find(|t| t.entity == e));
    if target.is_none() && projectile.target.is_some() {
        target = enemies
            .iter()
            .filter(|t| !t.hidden && t.position.distance(pos.0) <= RETARGET_RADIUS)
            .min_by(|a, b| {
                a.position
                    .distance(pos.0)
                    .total_cmp(&b.position.distance(pos.0))
            });
    }
    projectile.target = target.map(|t| id_of(t.entity));

    if let Some(track) = target {
        let (aim, _) = predict_intercept(pos.0, track.position, track.velocity, projectile.speed);
        projectile.predicted_impact = Some(aim);
        vel.0 = steer(vel.0, pos.0, aim, projectile.speed, STEER_FACTOR);
    } else {
        projectile.predicted_impact = None;
    }

    let from = pos.0;
    let to = from + vel.0 * dt;
    pos.0 = to;

    let struck = match target {
        Some(track) => (distance_to_segment(track.position, from, to) <= track.hit_radius())
            .then_some(*track),
        None => enemies
            .iter()
            .filter(|t| distance_to_segment(t.position, from, to) <= t.hit_radius())
            .min_by(|a, b| a.position.distance(from).total_cmp(&b.position.distance(from)))
            .copied(),
    };

    if let Some(track) = struck {
        let attack = projectile.attack;
        let _ = world.despawn(entity);
        damage::deliver(world, Some(track.entity), track.position, &attack, ctx, rng);
        return true;
    }

    if !playfield.contains(to) {
        let _ = world.despawn(entity);
    }
    false
}
