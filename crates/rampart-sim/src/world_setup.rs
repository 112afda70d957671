//! Entity spawn factories.
//!
//! Creates towers and enemies with the component bundles their archetype
//! profiles call for.

use hecs::{Entity, EntityBuilder, World};

use rampart_core::components::*;
use rampart_core::constants::SPAWN_SCATTER;
use rampart_core::enums::*;
use rampart_core::types::{GridCell, Position, Velocity};
use rampart_enemy_ai::profiles::get_profile;

use crate::armory::tower_profile;
use crate::path::Path;
use crate::systems::wave_spawner::StatOverrides;

/// An enemy creation requested mid-tick, materialised in the spawn stage.
#[derive(Debug, Clone)]
pub struct PendingSpawn {
    pub archetype: EnemyArchetype,
    pub count: u32,
    /// Path distance of the first enemy; the rest trail behind it.
    pub progress: f32,
    pub wave: u32,
    /// Multiplier on profile health (wave scaling).
    pub health_scale: f32,
    pub overrides: StatOverrides,
}

/// Spawn a level-1 tower on `cell`.
pub fn spawn_tower(world: &mut World, archetype: TowerArchetype, cell: GridCell) -> Entity {
    let profile = tower_profile(archetype);
    let tower = Tower {
        archetype,
        cell,
        attack: profile.attack,
        range: profile.range,
        fire_interval: profile.fire_interval,
        fire_timer: 0.0,
        projectile_speed: profile.projectile_speed,
        level: 1,
        invested: profile.cost,
        target: None,
        disabled: false,
        corrupted: false,
    };
    world.spawn((tower, Position(cell.center())))
}

/// Spawn one enemy at `progress` along the path.
///
/// Capability components are attached only when the archetype's profile
/// (or the overrides) calls for them.
pub fn spawn_enemy(
    world: &mut World,
    path: &Path,
    archetype: EnemyArchetype,
    progress: f32,
    wave: u32,
    health_scale: f32,
    overrides: &StatOverrides,
) -> Entity {
    let profile = get_profile(archetype);
    let max_health = (profile.max_health * health_scale * overrides.health_mult.unwrap_or(1.0)).max(1.0);
    let base_speed = profile.speed * overrides.speed_mult.unwrap_or(1.0);
    let reward = (profile.reward as f32 * overrides.reward_mult.unwrap_or(1.0)).round() as u32;
    let progress = progress.clamp(0.0, path.total_length());
    let (position, segment) = path.sample(progress);

    let enemy = Enemy {
        archetype,
        health: max_health,
        max_health,
        base_speed,
        slow_multiplier: 1.0,
        slow_remaining_secs: 0.0,
        aura_speed_bonus: 0.0,
        aura_armor_bonus: 0.0,
        progress,
        segment,
        reward,
        life_cost: profile.life_cost,
        wave,
        radius: profile.radius,
    };

    let mut builder = EntityBuilder::new();
    builder.add(enemy);
    builder.add(Position(position));
    builder.add(Velocity(path.direction(segment) * base_speed));
    builder.add(DamageTracker {
        last_health: max_health,
    });

    let armor = overrides.armor.unwrap_or(profile.armor);
    if armor > 0.0 {
        builder.add(Armored { armor });
    }
    if profile.evasion > 0.0 {
        builder.add(Evasive {
            chance: profile.evasion,
        });
    }
    if !profile.immunities.is_empty() {
        builder.add(Immunities(profile.immunities.to_vec()));
    }
    if profile.regen_per_sec > 0.0 {
        builder.add(Regenerating {
            per_sec: profile.regen_per_sec,
        });
    }
    if let Some(aura) = profile.aura {
        builder.add(aura);
    }
    if let Some(heal) = profile.heal {
        builder.add(heal);
    }
    if let Some(stealth) = profile.stealth {
        builder.add(stealth);
    }
    if let Some(adaptive) = profile.adaptive {
        builder.add(adaptive);
    }
    if let Some(split) = profile.split {
        builder.add(split);
    }
    if let Some(brood) = profile.brood {
        builder.add(brood);
    }

    world.spawn(builder.build())
}

/// Materialise a pending spawn. The group trails back along the path from
/// the requested progress so members do not overlap.
pub fn spawn_group(world: &mut World, path: &Path, pending: &PendingSpawn) -> Vec<Entity> {
    (0..pending.count)
        .map(|i| {
            let progress = (pending.progress - i as f32 * SPAWN_SCATTER).max(0.0);
            spawn_enemy(
                world,
                path,
                pending.archetype,
                progress,
                pending.wave,
                pending.health_scale,
                &pending.overrides,
            )
        })
        .collect()
}
