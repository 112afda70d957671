//! Path following for enemies, including leaks at the path end.

use hecs::{Entity, World};
use log::debug;

use rampart_core::components::Enemy;
use rampart_core::events::CombatEvent;
use rampart_core::types::{Position, Velocity};
use rampart_enemy_ai::behaviors::current_speed;

use crate::ids::id_of;
use crate::path::Path;
use crate::systems::TickContext;

/// Advance every enemy along the path. Enemies that reach the end are
/// removed and cost the player their life cost.
///
/// Returns true if the player ran out of lives.
pub fn run(world: &mut World, path: &Path, ctx: &mut TickContext<'_>, dt: f32) -> bool {
    let total = path.total_length();
    let mut leaked: Vec<Entity> = Vec::new();

    for (entity, (enemy, pos, vel)) in world.query_mut::<(&mut Enemy, &mut Position, &mut Velocity)>() {
        let speed = current_speed(enemy);
        enemy.progress += speed * dt;
        if enemy.progress >= total {
            enemy.progress = total;
            pos.0 = path.exit();
            leaked.push(entity);
            continue;
        }
        let (position, segment) = path.sample(enemy.progress);
        pos.0 = position;
        enemy.segment = segment;
        vel.0 = path.direction(segment) * speed;
    }

    let mut out_of_lives = false;
    for entity in leaked {
        let Ok(enemy) = world.get::<&Enemy>(entity).map(|e| (e.archetype, e.life_cost)) else {
            continue;
        };
        let (archetype, life_cost) = enemy;
        debug!("{archetype:?} leaked, costing {life_cost} lives");
        out_of_lives |= ctx.economy.lose_lives(life_cost);
        ctx.events.push(CombatEvent::Leaked {
            enemy: id_of(entity),
            archetype,
            lives_lost: life_cost,
        });
        let _ = world.despawn(entity);
    }
    out_of_lives
}
