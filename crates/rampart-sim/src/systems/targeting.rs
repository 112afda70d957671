//! Target selection: scores every visible in-range enemy for a tower and
//! picks the best one.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::enums::*;
use rampart_core::types::{EntityId, Position, Velocity};
use rampart_enemy_ai::behaviors::current_speed;

use crate::ids::id_of;

/// A targetable enemy as seen by fire control this tick.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub entity: Entity,
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub progress: f32,
    pub speed: f32,
    pub slowed: bool,
    pub slow_immune: bool,
}

/// Snapshot all live, visible enemies.
pub fn collect_candidates(world: &World) -> Vec<Candidate> {
    world
        .query::<(&Enemy, &Position, &Velocity, Option<&Stealth>, Option<&Immunities>)>()
        .iter()
        .filter(|(_, (enemy, _, _, stealth, _))| {
            enemy.health > 0.0 && !stealth.is_some_and(|s| s.hidden)
        })
        .map(|(entity, (enemy, pos, vel, _, immunities))| Candidate {
            entity,
            id: id_of(entity),
            archetype: enemy.archetype,
            position: pos.0,
            velocity: vel.0,
            health: enemy.health,
            max_health: enemy.max_health,
            progress: enemy.progress,
            speed: current_speed(enemy),
            slowed: enemy.slow_multiplier < 1.0,
            slow_immune: immunities.is_some_and(|i| i.0.contains(&EffectTag::Slow)),
        })
        .collect()
}

/// Deterministic part of a candidate's score (everything but jitter).
pub fn score(
    tower_pos: Vec2,
    tower: &Tower,
    candidate: &Candidate,
    candidates: &[Candidate],
    path_length: f32,
) -> f32 {
    let progress = if path_length > 0.0 {
        candidate.progress / path_length
    } else {
        0.0
    };
    let mut score = TARGET_PROGRESS_WEIGHT * progress;

    score += match tower.archetype {
        TowerArchetype::Precision => {
            let mut bias = candidate.health.min(600.0) / 10.0;
            if matches!(candidate.archetype, EnemyArchetype::Boss | EnemyArchetype::Tank) {
                bias += 40.0;
            }
            bias
        }
        TowerArchetype::Area => {
            let radius = match tower.attack.effect {
                Some(Effect::Splash { radius }) => radius,
                _ => AREA_SPLASH_RADIUS,
            };
            let neighbours = candidates
                .iter()
                .filter(|other| {
                    other.entity != candidate.entity
                        && other.position.distance(candidate.position) <= radius
                })
                .count();
            let mut bias = 12.0 * neighbours as f32;
            if matches!(
                candidate.archetype,
                EnemyArchetype::Normal | EnemyArchetype::Fast | EnemyArchetype::Minion
            ) {
                bias += 15.0;
            }
            bias
        }
        TowerArchetype::Slow => {
            let mut bias = if candidate.archetype == EnemyArchetype::Fast {
                30.0
            } else {
                0.0
            };
            bias += if candidate.slowed { -20.0 } else { 25.0 };
            if candidate.slow_immune {
                bias -= 50.0;
            }
            bias
        }
        TowerArchetype::Basic | TowerArchetype::Chain => {
            let fraction = if candidate.max_health > 0.0 {
                candidate.health / candidate.max_health
            } else {
                1.0
            };
            30.0 * (1.0 - fraction)
        }
    };

    if tower.archetype != TowerArchetype::Precision && tower.range > 0.0 {
        let distance = tower_pos.distance(candidate.position);
        score += TARGET_PROXIMITY_WEIGHT * (1.0 - distance / tower.range).max(0.0);
    }

    score + TARGET_SPEED_WEIGHT * candidate.speed
}

/// Whether a candidate is within the tower's engagement range.
pub fn in_range(tower_pos: Vec2, tower: &Tower, candidate: &Candidate) -> bool {
    tower_pos.distance(candidate.position) <= tower.range
}

/// Pick the highest-scoring in-range candidate. A jitter in
/// `[0, jitter)` is added to every score so towers with identical views
/// do not all fixate on the same enemy.
pub fn select_target<'a, R: Rng + ?Sized>(
    tower_pos: Vec2,
    tower: &Tower,
    candidates: &'a [Candidate],
    path_length: f32,
    jitter: f32,
    rng: &mut R,
) -> Option<&'a Candidate> {
    let mut best: Option<(&Candidate, f32)> = None;
    for candidate in candidates.iter().filter(|c| in_range(tower_pos, tower, c)) {
        let noise = if jitter > 0.0 {
            rng.gen_range(0.0..jitter)
        } else {
            0.0
        };
        let total = score(tower_pos, tower, candidate, candidates, path_length) + noise;
        if best.map_or(true, |(_, s)| total > s) {
            best = Some((candidate, total));
        }
    }
    best.map(|(c, _)| c)
}
