//! Wave spawning system: expands wave definitions into a timed spawn queue
//! and drains it while a wave is in progress.

use std::collections::VecDeque;

use hecs::World;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use rampart_core::components::Enemy;
use rampart_core::enums::{EnemyArchetype, MatchPhase};
use rampart_core::error::CommandError;
use rampart_core::events::CombatEvent;

use crate::world_setup::PendingSpawn;

/// Per-group adjustments on top of the archetype profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatOverrides {
    pub health_mult: Option<f32>,
    pub speed_mult: Option<f32>,
    pub reward_mult: Option<f32>,
    /// Replaces the profile armor.
    pub armor: Option<f32>,
}

fn default_batch_size() -> u32 {
    1
}

/// A run of identical enemies within a wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyGroup {
    pub archetype: EnemyArchetype,
    pub count: u32,
    /// Seconds between consecutive batches.
    pub delay: f32,
    /// Seconds after wave start before the first batch.
    #[serde(default)]
    pub start_offset: f32,
    /// Enemies spawned together per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    #[serde(default)]
    pub overrides: StatOverrides,
}

/// One wave: groups spawned in parallel, each on its own cadence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub groups: Vec<EnemyGroup>,
}

impl WaveDefinition {
    /// Total number of enemies the wave spawns.
    pub fn enemy_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }
}

/// A scheduled spawn, relative to wave start.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnEvent {
    pub at_secs: f32,
    pub archetype: EnemyArchetype,
    pub count: u32,
    pub overrides: StatOverrides,
}

/// Expand a wave definition into one time-sorted spawn queue.
///
/// Each group's batches land at `start_offset + k * delay`, shifted by a
/// uniform jitter in `[-jitter, jitter]` and clamped to zero.
pub fn expand<R: Rng + ?Sized>(wave: &WaveDefinition, jitter: f32, rng: &mut R) -> VecDeque<SpawnEvent> {
    let mut events = Vec::new();
    for group in &wave.groups {
        let batch_size = group.batch_size.max(1);
        let mut remaining = group.count;
        let mut k = 0u32;
        while remaining > 0 {
            let count = remaining.min(batch_size);
            let offset = if jitter > 0.0 {
                rng.gen_range(-jitter..=jitter)
            } else {
                0.0
            };
            events.push(SpawnEvent {
                at_secs: (group.start_offset + k as f32 * group.delay + offset).max(0.0),
                archetype: group.archetype,
                count,
                overrides: group.overrides.clone(),
            });
            remaining -= count;
            k += 1;
        }
    }
    events.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
    events.into()
}

/// Wave progression state machine.
#[derive(Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<WaveDefinition>,
    phase: MatchPhase,
    /// 1-based number of the current (or last started) wave.
    current_wave: u32,
    countdown_secs: f32,
    elapsed_secs: f32,
    queue: VecDeque<SpawnEvent>,
    inter_wave_delay: f32,
}

impl WaveScheduler {
    pub fn new(waves: Vec<WaveDefinition>, first_wave_delay: f32, inter_wave_delay: f32) -> Self {
        Self {
            waves,
            phase: MatchPhase::Idle,
            current_wave: 0,
            countdown_secs: first_wave_delay,
            elapsed_secs: 0.0,
            queue: VecDeque::new(),
            inter_wave_delay,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }

    /// Seconds until the next wave starts on its own (meaningful in Idle).
    pub fn countdown_secs(&self) -> f32 {
        self.countdown_secs
    }

    /// Spawn events not yet dequeued.
    pub fn queue(&self) -> &VecDeque<SpawnEvent> {
        &self.queue
    }

    /// Enemies still waiting in the queue.
    pub fn queued_enemies(&self) -> u32 {
        self.queue.iter().map(|e| e.count).sum()
    }

    /// Start the next wave now. Only valid while Idle with waves remaining.
    pub fn start_next_wave<R: Rng + ?Sized>(
        &mut self,
        jitter: f32,
        rng: &mut R,
        events: &mut Vec<CombatEvent>,
    ) -> Result<u32, CommandError> {
        match self.phase {
            MatchPhase::Spawning => return Err(CommandError::WaveInProgress),
            MatchPhase::Completed | MatchPhase::Failed => return Err(CommandError::MatchOver),
            MatchPhase::Idle => {}
        }
        let index = self.current_wave as usize;
        let Some(definition) = self.waves.get(index) else {
            return Err(CommandError::MatchOver);
        };

        self.queue = expand(definition, jitter, rng);
        self.current_wave += 1;
        self.elapsed_secs = 0.0;
        self.countdown_secs = 0.0;
        self.phase = MatchPhase::Spawning;

        let enemies = self.queued_enemies();
        info!("wave {} started with {} enemies", self.current_wave, enemies);
        events.push(CombatEvent::WaveStarted {
            wave: self.current_wave,
            enemies,
        });
        Ok(self.current_wave)
    }

    /// Enter the terminal failure state.
    pub fn fail(&mut self) {
        self.phase = MatchPhase::Failed;
        self.queue.clear();
    }

    /// Health multiplier for enemies of the current wave.
    pub fn health_scale(&self, per_wave: f32) -> f32 {
        1.0 + per_wave * self.current_wave.saturating_sub(1) as f32
    }

    /// Move every due spawn event into `pending`.
    fn drain_due(&mut self, per_wave_scaling: f32, pending: &mut Vec<PendingSpawn>) {
        let health_scale = self.health_scale(per_wave_scaling);
        while self
            .queue
            .front()
            .is_some_and(|e| e.at_secs <= self.elapsed_secs)
        {
            let Some(event) = self.queue.pop_front() else {
                break;
            };
            pending.push(PendingSpawn {
                archetype: event.archetype,
                count: event.count,
                progress: 0.0,
                wave: self.current_wave,
                health_scale,
                overrides: event.overrides,
            });
        }
    }
}

/// Advance the countdown or the spawn clock.
///
/// Due spawns are pushed to `pending`; the engine materialises them at the
/// path entry right after this system runs.
pub fn run<R: Rng + ?Sized>(
    scheduler: &mut WaveScheduler,
    rng: &mut R,
    pending: &mut Vec<PendingSpawn>,
    events: &mut Vec<CombatEvent>,
    spawn_jitter: f32,
    wave_health_scaling: f32,
    dt: f32,
) {
    match scheduler.phase {
        MatchPhase::Idle => {
            scheduler.countdown_secs -= dt;
            if scheduler.countdown_secs <= 0.0
                && scheduler.start_next_wave(spawn_jitter, rng, events).is_ok()
            {
                scheduler.drain_due(wave_health_scaling, pending);
            }
        }
        MatchPhase::Spawning => {
            scheduler.elapsed_secs += dt;
            scheduler.drain_due(wave_health_scaling, pending);
        }
        MatchPhase::Completed | MatchPhase::Failed => {}
    }
}

/// Live enemies belonging to `wave`.
pub fn live_enemies_of_wave(world: &World, wave: u32) -> u32 {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.wave == wave)
        .count() as u32
}

/// Queued spawns plus live enemies of the current wave.
pub fn enemies_remaining(world: &World, scheduler: &WaveScheduler) -> u32 {
    if scheduler.current_wave == 0 {
        return 0;
    }
    scheduler.queued_enemies() + live_enemies_of_wave(world, scheduler.current_wave)
}

/// Close the current wave once its queue is empty and none of its enemies
/// are alive. Must run after pending spawns have been materialised.
pub fn check_drained(world: &World, scheduler: &mut WaveScheduler, events: &mut Vec<CombatEvent>) {
    if scheduler.phase != MatchPhase::Spawning || !scheduler.queue.is_empty() {
        return;
    }
    if live_enemies_of_wave(world, scheduler.current_wave) > 0 {
        return;
    }

    let wave = scheduler.current_wave;
    info!("wave {wave} cleared");
    events.push(CombatEvent::WaveCleared { wave });

    if wave >= scheduler.total_waves() {
        info!("all {wave} waves cleared, match completed");
        scheduler.phase = MatchPhase::Completed;
        events.push(CombatEvent::MatchCompleted);
    } else {
        scheduler.phase = MatchPhase::Idle;
        scheduler.countdown_secs = scheduler.inter_wave_delay;
    }
}
