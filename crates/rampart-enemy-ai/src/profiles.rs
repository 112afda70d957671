//! Archetype-specific stat and capability profiles.
//!
//! Consolidates per-archetype parameters used when spawning enemies.

use rampart_core::components::{Adaptive, Aura, Brood, Healer, Splitter, Stealth};
use rampart_core::enums::{EffectTag, EnemyArchetype};

/// Base stats and optional capabilities of an enemy archetype.
#[derive(Debug, Clone)]
pub struct EnemyProfile {
    pub max_health: f32,
    /// Base walking speed (world units per second).
    pub speed: f32,
    pub reward: u32,
    /// Lives lost when this archetype leaks.
    pub life_cost: u32,
    pub radius: f32,
    /// Armor fraction; 0.0 means no `Armored` capability.
    pub armor: f32,
    /// Evasion chance; 0.0 means no `Evasive` capability.
    pub evasion: f32,
    pub immunities: &'static [EffectTag],
    /// Health regenerated per second; 0.0 means no `Regenerating` capability.
    pub regen_per_sec: f32,
    pub aura: Option<Aura>,
    pub heal: Option<Healer>,
    pub stealth: Option<Stealth>,
    pub adaptive: Option<Adaptive>,
    pub split: Option<Splitter>,
    pub brood: Option<Brood>,
}

impl EnemyProfile {
    /// A profile with no capabilities.
    fn plain(max_health: f32, speed: f32, reward: u32, life_cost: u32, radius: f32) -> Self {
        Self {
            max_health,
            speed,
            reward,
            life_cost,
            radius,
            armor: 0.0,
            evasion: 0.0,
            immunities: &[],
            regen_per_sec: 0.0,
            aura: None,
            heal: None,
            stealth: None,
            adaptive: None,
            split: None,
            brood: None,
        }
    }
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyProfile {
    match archetype {
        EnemyArchetype::Normal => EnemyProfile::plain(40.0, 60.0, 5, 1, 10.0),
        EnemyArchetype::Fast => EnemyProfile {
            evasion: 0.1,
            ..EnemyProfile::plain(25.0, 110.0, 6, 1, 8.0)
        },
        EnemyArchetype::Tank => EnemyProfile {
            armor: 0.4,
            ..EnemyProfile::plain(160.0, 35.0, 15, 2, 14.0)
        },
        EnemyArchetype::Boss => EnemyProfile {
            armor: 0.3,
            immunities: &[EffectTag::Slow],
            regen_per_sec: 4.0,
            aura: Some(Aura {
                radius: 100.0,
                speed_bonus: 0.15,
                armor_bonus: 0.1,
            }),
            ..EnemyProfile::plain(900.0, 30.0, 100, 10, 20.0)
        },
        EnemyArchetype::Healer => EnemyProfile {
            heal: Some(Healer {
                radius: 90.0,
                per_sec: 6.0,
                heals_self: false,
            }),
            ..EnemyProfile::plain(60.0, 55.0, 12, 1, 10.0)
        },
        EnemyArchetype::Ghost => EnemyProfile {
            evasion: 0.35,
            immunities: &[EffectTag::Slow],
            stealth: Some(Stealth {
                hidden: false,
                timer: 3.0,
                hidden_secs: 2.0,
                visible_secs: 3.0,
            }),
            ..EnemyProfile::plain(35.0, 80.0, 10, 1, 9.0)
        },
        EnemyArchetype::Splitter => EnemyProfile {
            split: Some(Splitter {
                child: EnemyArchetype::Minion,
                count: 2,
            }),
            ..EnemyProfile::plain(80.0, 50.0, 10, 1, 12.0)
        },
        EnemyArchetype::Brood => EnemyProfile {
            immunities: &[EffectTag::Chain],
            brood: Some(Brood {
                minion: EnemyArchetype::Minion,
                chance_per_health: 1.5,
                burst: 3,
            }),
            ..EnemyProfile::plain(140.0, 40.0, 20, 2, 14.0)
        },
        EnemyArchetype::Adaptive => EnemyProfile {
            adaptive: Some(Adaptive {
                counter: 0,
                per_hit: 0.03,
                cap: 0.5,
            }),
            ..EnemyProfile::plain(120.0, 50.0, 18, 2, 12.0)
        },
        EnemyArchetype::Minion => EnemyProfile::plain(15.0, 90.0, 1, 1, 7.0),
    }
}
