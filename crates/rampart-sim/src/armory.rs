//! Tower archetype stats, costs and upgrade scaling.

use rampart_core::components::{AttackProfile, Effect, Tower};
use rampart_core::constants::*;
use rampart_core::enums::TowerArchetype;

/// Level-1 stats of a tower archetype.
#[derive(Debug, Clone, Copy)]
pub struct TowerProfile {
    pub cost: u32,
    pub attack: AttackProfile,
    pub range: f32,
    pub fire_interval: f32,
    /// Zero for instant-hit archetypes.
    pub projectile_speed: f32,
}

/// Get the profile for a tower archetype.
pub fn tower_profile(archetype: TowerArchetype) -> TowerProfile {
    match archetype {
        TowerArchetype::Basic => TowerProfile {
            cost: BASIC_COST,
            attack: AttackProfile {
                damage: BASIC_DAMAGE,
                effect: None,
                armor_pierce: 0.0,
                ignores_evasion: false,
            },
            range: BASIC_RANGE,
            fire_interval: BASIC_FIRE_INTERVAL,
            projectile_speed: BASIC_PROJECTILE_SPEED,
        },
        TowerArchetype::Area => TowerProfile {
            cost: AREA_COST,
            attack: AttackProfile {
                damage: AREA_DAMAGE,
                effect: Some(Effect::Splash {
                    radius: AREA_SPLASH_RADIUS,
                }),
                armor_pierce: 0.0,
                ignores_evasion: false,
            },
            range: AREA_RANGE,
            fire_interval: AREA_FIRE_INTERVAL,
            projectile_speed: AREA_PROJECTILE_SPEED,
        },
        TowerArchetype::Slow => TowerProfile {
            cost: SLOW_COST,
            attack: AttackProfile {
                damage: SLOW_DAMAGE,
                effect: Some(Effect::Slow {
                    factor: SLOW_FACTOR,
                    duration_secs: SLOW_DURATION_SECS,
                }),
                armor_pierce: 0.0,
                ignores_evasion: false,
            },
            range: SLOW_RANGE,
            fire_interval: SLOW_FIRE_INTERVAL,
            projectile_speed: SLOW_PROJECTILE_SPEED,
        },
        TowerArchetype::Precision => TowerProfile {
            cost: PRECISION_COST,
            attack: AttackProfile {
                damage: PRECISION_DAMAGE,
                effect: None,
                armor_pierce: PRECISION_ARMOR_PIERCE,
                ignores_evasion: true,
            },
            range: PRECISION_RANGE,
            fire_interval: PRECISION_FIRE_INTERVAL,
            projectile_speed: 0.0,
        },
        TowerArchetype::Chain => TowerProfile {
            cost: CHAIN_COST,
            attack: AttackProfile {
                damage: CHAIN_DAMAGE,
                effect: Some(Effect::Chain {
                    hops: CHAIN_HOPS,
                    hop_radius: CHAIN_HOP_RADIUS,
                    falloff: CHAIN_FALLOFF,
                }),
                armor_pierce: 0.0,
                ignores_evasion: false,
            },
            range: CHAIN_RANGE,
            fire_interval: CHAIN_FIRE_INTERVAL,
            projectile_speed: 0.0,
        },
    }
}

/// Build cost of an archetype.
pub fn build_cost(archetype: TowerArchetype) -> u32 {
    tower_profile(archetype).cost
}

/// Cost of raising `tower` one level, or `None` at max level.
pub fn upgrade_cost(tower: &Tower) -> Option<u32> {
    if tower.level >= MAX_TOWER_LEVEL {
        return None;
    }
    let base = build_cost(tower.archetype) as f32;
    Some((base * UPGRADE_COST_FACTOR * tower.level as f32).round() as u32)
}

/// Raise a tower one level. Returns the range multiplier applied, so
/// range-altering events can rescale what they stored.
pub fn apply_upgrade(tower: &mut Tower) -> f32 {
    tower.level += 1;
    tower.attack.damage *= UPGRADE_DAMAGE_FACTOR;
    tower.range *= UPGRADE_RANGE_FACTOR;
    tower.fire_interval *= UPGRADE_INTERVAL_FACTOR;
    tower.fire_timer = tower.fire_timer.min(tower.fire_interval);
    if let Some(Effect::Splash { radius }) = &mut tower.attack.effect {
        *radius *= UPGRADE_RANGE_FACTOR;
    }
    UPGRADE_RANGE_FACTOR
}
