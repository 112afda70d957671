//! Scenario data: the path enemies walk, the wave list and the random event
//! catalog. A map generator supplies real scenarios; `Scenario::standard()`
//! is the built-in one used by tests and headless runs.

use serde::{Deserialize, Serialize};

use rampart_core::constants::AMBUSH_SIZE;
use rampart_core::enums::{EnemyArchetype, RandomEventKind};
use rampart_core::types::GridCell;

use crate::config::ConfigError;
use crate::systems::random_events::RandomEventDef;
use crate::systems::wave_spawner::{EnemyGroup, StatOverrides, WaveDefinition};

/// Everything a match needs besides tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Orthogonal waypoints from entry to exit.
    pub path: Vec<GridCell>,
    pub waves: Vec<WaveDefinition>,
    #[serde(default)]
    pub events: Vec<RandomEventDef>,
}

impl Scenario {
    /// The built-in ten-wave scenario.
    pub fn standard() -> Self {
        Self {
            path: standard_path(),
            waves: standard_waves(),
            events: standard_events(),
        }
    }

    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        if scenario.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        Ok(scenario)
    }
}

/// A winding path across the default 20x12 grid.
pub fn standard_path() -> Vec<GridCell> {
    vec![
        GridCell::new(0, 2),
        GridCell::new(6, 2),
        GridCell::new(6, 8),
        GridCell::new(13, 8),
        GridCell::new(13, 3),
        GridCell::new(19, 3),
    ]
}

fn group(archetype: EnemyArchetype, count: u32, delay: f32) -> EnemyGroup {
    EnemyGroup {
        archetype,
        count,
        delay,
        start_offset: 0.0,
        batch_size: 1,
        overrides: StatOverrides::default(),
    }
}

fn wave(groups: Vec<EnemyGroup>) -> WaveDefinition {
    WaveDefinition { groups }
}

/// Ten waves of escalating difficulty.
pub fn standard_waves() -> Vec<WaveDefinition> {
    use EnemyArchetype::*;
    vec![
        wave(vec![group(Normal, 10, 1.0)]),
        wave(vec![
            group(Normal, 10, 0.9),
            EnemyGroup {
                start_offset: 4.0,
                ..group(Fast, 6, 0.6)
            },
        ]),
        wave(vec![
            group(Normal, 8, 0.8),
            EnemyGroup {
                start_offset: 3.0,
                ..group(Tank, 3, 2.5)
            },
            EnemyGroup {
                start_offset: 6.0,
                ..group(Healer, 2, 3.0)
            },
        ]),
        wave(vec![
            EnemyGroup {
                batch_size: 3,
                ..group(Fast, 12, 1.5)
            },
            EnemyGroup {
                start_offset: 2.0,
                ..group(Ghost, 4, 2.0)
            },
        ]),
        wave(vec![
            group(Tank, 4, 2.0),
            EnemyGroup {
                start_offset: 1.0,
                ..group(Splitter, 5, 1.8)
            },
            EnemyGroup {
                start_offset: 5.0,
                ..group(Healer, 2, 4.0)
            },
        ]),
        wave(vec![
            group(Normal, 15, 0.6),
            EnemyGroup {
                start_offset: 3.0,
                ..group(Brood, 3, 3.0)
            },
            EnemyGroup {
                start_offset: 6.0,
                ..group(Adaptive, 3, 2.5)
            },
        ]),
        wave(vec![
            EnemyGroup {
                batch_size: 2,
                ..group(Ghost, 8, 1.5)
            },
            EnemyGroup {
                start_offset: 2.0,
                ..group(Splitter, 6, 1.4)
            },
            EnemyGroup {
                start_offset: 4.0,
                overrides: StatOverrides {
                    armor: Some(0.5),
                    ..Default::default()
                },
                ..group(Tank, 3, 2.0)
            },
        ]),
        wave(vec![
            group(Adaptive, 6, 1.6),
            EnemyGroup {
                start_offset: 2.0,
                ..group(Brood, 4, 2.5)
            },
            EnemyGroup {
                start_offset: 4.0,
                batch_size: 4,
                ..group(Fast, 16, 2.0)
            },
        ]),
        wave(vec![
            group(Tank, 6, 1.5),
            EnemyGroup {
                start_offset: 1.0,
                ..group(Healer, 4, 2.5)
            },
            EnemyGroup {
                start_offset: 3.0,
                ..group(Ghost, 8, 1.0)
            },
            EnemyGroup {
                start_offset: 5.0,
                ..group(Splitter, 6, 1.2)
            },
        ]),
        wave(vec![
            EnemyGroup {
                start_offset: 4.0,
                ..group(Boss, 1, 0.0)
            },
            group(Normal, 20, 0.5),
            EnemyGroup {
                start_offset: 6.0,
                overrides: StatOverrides {
                    health_mult: Some(1.5),
                    reward_mult: Some(2.0),
                    ..Default::default()
                },
                ..group(Adaptive, 4, 2.0)
            },
        ]),
    ]
}

/// The default random event catalog.
pub fn standard_events() -> Vec<RandomEventDef> {
    vec![
        RandomEventDef {
            kind: RandomEventKind::TowerBlackout,
            magnitude: 0.0,
            duration_secs: 10.0,
            min_wave: 3,
            affects_new_enemies: false,
        },
        RandomEventDef {
            kind: RandomEventKind::RangeFog,
            magnitude: 0.7,
            duration_secs: 15.0,
            min_wave: 2,
            affects_new_enemies: false,
        },
        RandomEventDef {
            kind: RandomEventKind::IronHide,
            magnitude: 0.2,
            duration_secs: 20.0,
            min_wave: 4,
            affects_new_enemies: true,
        },
        RandomEventDef {
            kind: RandomEventKind::Frenzy,
            magnitude: 1.3,
            duration_secs: 15.0,
            min_wave: 3,
            affects_new_enemies: true,
        },
        RandomEventDef {
            kind: RandomEventKind::Corruption,
            magnitude: 0.0,
            duration_secs: 12.0,
            min_wave: 5,
            affects_new_enemies: false,
        },
        RandomEventDef {
            kind: RandomEventKind::Ambush,
            magnitude: AMBUSH_SIZE as f32,
            duration_secs: 0.0,
            min_wave: 2,
            affects_new_enemies: false,
        },
    ]
}
