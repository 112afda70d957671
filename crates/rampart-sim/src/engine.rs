//! Simulation engine: the composition root of the combat simulation.
//!
//! `SimulationEngine` owns the hecs ECS world and all match state, applies
//! player commands, runs the systems in a fixed order, and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::HashMap;

use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::{CommandOutcome, PlayerCommand};
use rampart_core::components::Tower;
use rampart_core::constants::MAX_TICK_DT;
use rampart_core::enums::{MatchPhase, TowerArchetype};
use rampart_core::error::CommandError;
use rampart_core::events::CombatEvent;
use rampart_core::state::{EffectMarker, SimSnapshot};
use rampart_core::types::{EntityId, GridCell, SimTime};

use crate::armory::{apply_upgrade, build_cost, upgrade_cost};
use crate::config::{ConfigError, SimConfig};
use crate::economy::Economy;
use crate::ids::{entity_of, id_of};
use crate::path::Path;
use crate::scenario::Scenario;
use crate::systems::projectiles::Playfield;
use crate::systems::random_events::EventDirector;
use crate::systems::wave_spawner::WaveScheduler;
use crate::systems::{self, TickContext};
use crate::world_setup::{self, PendingSpawn};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    scenario: Scenario,
    path: Path,
    playfield: Playfield,
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    economy: Economy,
    scheduler: WaveScheduler,
    director: EventDirector,
    /// Build cells holding a tower.
    occupied: HashMap<GridCell, Entity>,
    markers: Vec<EffectMarker>,
    pending: Vec<PendingSpawn>,
    events: Vec<CombatEvent>,
}

impl SimulationEngine {
    /// Create an engine for `scenario`, validating both inputs.
    pub fn new(config: SimConfig, scenario: Scenario) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!("rejected simulation config: {err}");
            return Err(err);
        }
        if scenario.waves.is_empty() {
            warn!("rejected scenario without waves");
            return Err(ConfigError::NoWaves);
        }
        let path = Path::new(scenario.path.clone(), config.grid_width, config.grid_height)?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        info!(
            "simulation ready: {} waves, path length {:.0}, seed {:?}",
            scenario.waves.len(),
            path.total_length(),
            config.seed
        );

        Ok(Self {
            playfield: Playfield::for_grid(config.grid_width, config.grid_height),
            economy: Economy::new(config.starting_currency, config.starting_lives),
            scheduler: WaveScheduler::new(
                scenario.waves.clone(),
                config.first_wave_delay,
                config.inter_wave_delay,
            ),
            director: EventDirector::new(scenario.events.clone()),
            world: World::new(),
            time: SimTime::default(),
            occupied: HashMap::new(),
            markers: Vec::new(),
            pending: Vec::new(),
            events: Vec::new(),
            rng,
            path,
            scenario,
            config,
        })
    }

    /// Create an engine for the built-in scenario.
    pub fn with_standard_scenario(config: SimConfig) -> Result<Self, ConfigError> {
        Self::new(config, Scenario::standard())
    }

    /// Apply a player command immediately.
    ///
    /// A rejected command leaves the simulation unchanged. Once the match has
    /// ended only `Reset` is accepted.
    pub fn execute(&mut self, command: PlayerCommand) -> Result<CommandOutcome, CommandError> {
        match command {
            PlayerCommand::Reset => {
                self.reset();
                Ok(CommandOutcome::Reset)
            }
            _ if self.phase().is_terminal() => Err(CommandError::MatchOver),
            PlayerCommand::BuildTower { cell, archetype } => self.build_tower(cell, archetype),
            PlayerCommand::UpgradeTower { tower } => self.upgrade_tower(tower),
            PlayerCommand::StartWave => self
                .scheduler
                .start_next_wave(self.config.spawn_jitter, &mut self.rng, &mut self.events)
                .map(|wave| CommandOutcome::WaveStarted { wave }),
        }
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Frames longer than `MAX_TICK_DT` run as several sub-steps; a negative
    /// or non-finite `dt` advances nothing. Sub-stepping stops early if the
    /// match ends. Once the match has ended, ticks only report state.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        let mut remaining = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if !self.phase().is_terminal() {
            let mut simulated = 0.0;
            loop {
                let step = remaining.min(MAX_TICK_DT);
                self.run_systems(step);
                simulated += step;
                remaining -= step;
                if remaining <= 0.0 || self.phase().is_terminal() {
                    break;
                }
            }
            self.time.advance(simulated);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.economy,
            &self.scheduler,
            &self.director,
            &self.markers,
            events,
        )
    }

    /// Discard the match and start over with the same config and scenario.
    /// A seeded engine replays identically after reset.
    pub fn reset(&mut self) {
        info!("match reset");
        self.world = World::new();
        self.time = SimTime::default();
        if let Some(seed) = self.config.seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        self.economy = Economy::new(self.config.starting_currency, self.config.starting_lives);
        self.scheduler = WaveScheduler::new(
            self.scenario.waves.clone(),
            self.config.first_wave_delay,
            self.config.inter_wave_delay,
        );
        self.director = EventDirector::new(self.scenario.events.clone());
        self.occupied.clear();
        self.markers.clear();
        self.pending.clear();
        self.events.clear();
    }

    /// Get the current match phase.
    pub fn phase(&self) -> MatchPhase {
        self.scheduler.phase()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn economy(&self) -> Economy {
        self.economy
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn director(&self) -> &EventDirector {
        &self.director
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Tower standing on `cell`, if any.
    pub fn tower_at(&self, cell: GridCell) -> Option<EntityId> {
        self.occupied.get(&cell).copied().map(id_of)
    }

    /// Get a mutable reference to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Set currency and lives directly (for tests).
    #[cfg(test)]
    pub fn set_economy(&mut self, currency: u32, lives: u32) {
        self.economy = Economy::new(currency, lives);
    }

    /// Spawn one enemy of the current wave at `progress`, with active
    /// event effects applied (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        archetype: rampart_core::enums::EnemyArchetype,
        progress: f32,
    ) -> Entity {
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            &self.path,
            archetype,
            progress,
            self.scheduler.current_wave(),
            1.0,
            &Default::default(),
        );
        self.director.on_enemy_spawned(&mut self.world, entity);
        entity
    }

    /// Force a random event to activate now (for tests).
    #[cfg(test)]
    pub fn activate_event(&mut self, def: systems::random_events::RandomEventDef) {
        let mut ctx = TickContext {
            economy: &mut self.economy,
            events: &mut self.events,
            markers: &mut self.markers,
            pending: &mut self.pending,
        };
        self.director.activate(
            def,
            &mut self.world,
            &self.path,
            self.scheduler.current_wave(),
            &mut ctx,
            &mut self.rng,
        );
    }

    fn build_tower(&mut self, cell: GridCell, archetype: TowerArchetype) -> Result<CommandOutcome, CommandError> {
        if !cell.in_bounds(self.config.grid_width, self.config.grid_height) {
            return Err(CommandError::OutOfBounds);
        }
        if self.path.contains(cell) {
            return Err(CommandError::CellOnPath);
        }
        if self.occupied.contains_key(&cell) {
            return Err(CommandError::CellOccupied);
        }
        let cost = build_cost(archetype);
        if !self.economy.try_spend(cost) {
            return Err(CommandError::InsufficientFunds {
                needed: cost,
                available: self.economy.currency,
            });
        }

        let entity = world_setup::spawn_tower(&mut self.world, archetype, cell);
        self.occupied.insert(cell, entity);
        self.director.on_tower_built(&mut self.world, entity);

        let tower = id_of(entity);
        debug!("built {archetype:?} tower at ({}, {}) for {cost}", cell.col, cell.row);
        self.events.push(CombatEvent::TowerBuilt {
            tower,
            archetype,
            cell,
        });
        Ok(CommandOutcome::Built { tower, cost })
    }

    fn upgrade_tower(&mut self, id: EntityId) -> Result<CommandOutcome, CommandError> {
        let entity = entity_of(id).ok_or(CommandError::TowerNotFound)?;
        let cost = {
            let tower = self
                .world
                .get::<&Tower>(entity)
                .map_err(|_| CommandError::TowerNotFound)?;
            upgrade_cost(&tower).ok_or(CommandError::MaxLevel)?
        };
        if !self.economy.try_spend(cost) {
            return Err(CommandError::InsufficientUpgradeFunds {
                needed: cost,
                available: self.economy.currency,
            });
        }

        let (level, range_factor) = {
            let mut tower = self
                .world
                .get::<&mut Tower>(entity)
                .map_err(|_| CommandError::TowerNotFound)?;
            let factor = apply_upgrade(&mut tower);
            tower.invested += cost;
            (tower.level, factor)
        };
        self.director.on_tower_upgraded(entity, range_factor);

        debug!("upgraded tower {id:?} to level {level} for {cost}");
        self.events.push(CombatEvent::TowerUpgraded { tower: id, level });
        Ok(CommandOutcome::Upgraded {
            tower: id,
            level,
            cost,
        })
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let path_length = self.path.total_length();

        let out_of_lives = {
            let mut ctx = TickContext {
                economy: &mut self.economy,
                events: &mut self.events,
                markers: &mut self.markers,
                pending: &mut self.pending,
            };
            // 1. Towers: fire timers, targeting, instant hits, launches
            systems::fire_control::run(
                &mut self.world,
                &mut ctx,
                &mut self.rng,
                path_length,
                self.config.targeting_jitter,
                dt,
            );
            // 2. Enemies: behaviours, then movement and leaks
            systems::enemy_ai::run(&mut self.world, &mut ctx, &mut self.rng, dt);
            let out_of_lives = systems::movement::run(&mut self.world, &self.path, &mut ctx, dt);
            if !out_of_lives {
                // 3. Projectiles
                systems::projectiles::run(
                    &mut self.world,
                    &mut ctx,
                    &mut self.rng,
                    &self.playfield,
                    dt,
                );
            }
            out_of_lives
        };
        if out_of_lives {
            self.fail();
            return;
        }

        // 4. Effects
        systems::markers::run(&mut self.markers, dt);

        // 5. Spawn queue
        systems::wave_spawner::run(
            &mut self.scheduler,
            &mut self.rng,
            &mut self.pending,
            &mut self.events,
            self.config.spawn_jitter,
            self.config.wave_health_scaling,
            dt,
        );
        self.flush_pending();
        systems::wave_spawner::check_drained(&self.world, &mut self.scheduler, &mut self.events);
        if self.phase().is_terminal() {
            self.director.expire_all(&mut self.world, &mut self.events);
            return;
        }

        // 6. Active events
        let mut ctx = TickContext {
            economy: &mut self.economy,
            events: &mut self.events,
            markers: &mut self.markers,
            pending: &mut self.pending,
        };
        systems::random_events::run(
            &mut self.director,
            &mut self.world,
            &self.path,
            &mut ctx,
            &mut self.rng,
            self.scheduler.current_wave(),
            self.scheduler.phase(),
            self.config.event_chance_per_sec,
            self.config.events_min_wave,
            dt,
        );
    }

    /// Materialise enemies requested during the tick.
    fn flush_pending(&mut self) {
        for spawn in std::mem::take(&mut self.pending) {
            for entity in world_setup::spawn_group(&mut self.world, &self.path, &spawn) {
                self.director.on_enemy_spawned(&mut self.world, entity);
            }
        }
    }

    fn fail(&mut self) {
        info!(
            "lives exhausted during wave {}, match failed",
            self.scheduler.current_wave()
        );
        self.scheduler.fail();
        self.pending.clear();
        self.events.push(CombatEvent::MatchFailed);
        self.director.expire_all(&mut self.world, &mut self.events);
    }
}
