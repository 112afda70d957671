//! Random events: global modifiers that trigger mid-match.
//!
//! Durational events store what they changed and restore it exactly on
//! expiry. Instantaneous events (ambushes) act once and are never reversed.

use hecs::{Entity, World};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use rampart_core::components::{Armored, Enemy, Tower};
use rampart_core::enums::{EnemyArchetype, MatchPhase, RandomEventKind};
use rampart_core::events::CombatEvent;
use rampart_core::state::ActiveEventView;

use crate::path::Path;
use crate::systems::wave_spawner::StatOverrides;
use crate::systems::TickContext;
use crate::world_setup::PendingSpawn;

/// A random event as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEventDef {
    pub kind: RandomEventKind,
    /// Kind-specific strength: a multiplier (fog, frenzy), an additive
    /// armor bonus (iron hide) or an enemy count (ambush).
    pub magnitude: f32,
    /// Zero for instantaneous events.
    pub duration_secs: f32,
    /// Earliest wave during which the event may trigger.
    pub min_wave: u32,
    /// Also applies to enemies spawned while the event is active.
    #[serde(default)]
    pub affects_new_enemies: bool,
}

impl RandomEventDef {
    pub fn is_instantaneous(&self) -> bool {
        self.duration_secs <= 0.0
    }
}

/// Values overwritten by a durational event, per entity.
#[derive(Debug, Clone, Default)]
pub enum EventUndo {
    #[default]
    Nothing,
    /// Previous `disabled` flag of each tower.
    Disabled(Vec<(Entity, bool)>),
    /// Previous range of each tower.
    Ranges(Vec<(Entity, f32)>),
    /// Previous armor of each enemy; `None` when the event added the component.
    Armor(Vec<(Entity, Option<f32>)>),
    /// Previous base speed of each enemy.
    Speed(Vec<(Entity, f32)>),
    /// The corrupted tower and its previous flag.
    Corrupted(Option<(Entity, bool)>),
}

/// A durational event currently in effect.
#[derive(Debug, Clone)]
pub struct ActiveEvent {
    pub def: RandomEventDef,
    pub remaining_secs: f32,
    undo: EventUndo,
}

impl ActiveEvent {
    pub fn view(&self) -> ActiveEventView {
        ActiveEventView {
            kind: self.def.kind,
            remaining_secs: self.remaining_secs.max(0.0),
            duration_secs: self.def.duration_secs,
        }
    }
}

/// Owns the event catalog and the active event list.
#[derive(Debug, Clone, Default)]
pub struct EventDirector {
    catalog: Vec<RandomEventDef>,
    active: Vec<ActiveEvent>,
}

impl EventDirector {
    pub fn new(catalog: Vec<RandomEventDef>) -> Self {
        Self {
            catalog,
            active: Vec::new(),
        }
    }

    pub fn active(&self) -> &[ActiveEvent] {
        &self.active
    }

    /// End every active event now, newest first, restoring what each one
    /// changed.
    pub fn expire_all(&mut self, world: &mut World, events: &mut Vec<CombatEvent>) {
        while let Some(event) = self.active.pop() {
            info!("random event {:?} ended with the match", event.def.kind);
            events.push(CombatEvent::EventExpired {
                kind: event.def.kind,
            });
            revert(world, event.undo);
        }
    }

    /// Catalog entries allowed during `wave`.
    pub fn eligible(&self, wave: u32) -> Vec<&RandomEventDef> {
        self.catalog.iter().filter(|d| d.min_wave <= wave).collect()
    }

    /// Apply an event now. Durational events join the active list.
    pub fn activate<R: Rng + ?Sized>(
        &mut self,
        def: RandomEventDef,
        world: &mut World,
        path: &Path,
        wave: u32,
        ctx: &mut TickContext<'_>,
        rng: &mut R,
    ) {
        info!(
            "random event {:?} (magnitude {}, {}s)",
            def.kind, def.magnitude, def.duration_secs
        );
        ctx.events.push(CombatEvent::EventActivated { kind: def.kind });

        let undo = match def.kind {
            RandomEventKind::TowerBlackout => {
                let mut saved = Vec::new();
                for (entity, tower) in world.query_mut::<&mut Tower>() {
                    saved.push((entity, tower.disabled));
                    tower.disabled = true;
                }
                EventUndo::Disabled(saved)
            }
            RandomEventKind::RangeFog => {
                let mut saved = Vec::new();
                for (entity, tower) in world.query_mut::<&mut Tower>() {
                    saved.push((entity, tower.range));
                    tower.range *= def.magnitude;
                }
                EventUndo::Ranges(saved)
            }
            RandomEventKind::IronHide => {
                let enemies: Vec<Entity> = world
                    .query::<&Enemy>()
                    .iter()
                    .map(|(entity, _)| entity)
                    .collect();
                let saved = enemies
                    .into_iter()
                    .map(|entity| (entity, harden(world, entity, def.magnitude)))
                    .collect();
                EventUndo::Armor(saved)
            }
            RandomEventKind::Frenzy => {
                let mut saved = Vec::new();
                for (entity, enemy) in world.query_mut::<&mut Enemy>() {
                    saved.push((entity, enemy.base_speed));
                    enemy.base_speed *= def.magnitude;
                }
                EventUndo::Speed(saved)
            }
            RandomEventKind::Corruption => {
                let towers: Vec<Entity> = world
                    .query::<&Tower>()
                    .iter()
                    .filter(|(_, tower)| !tower.corrupted)
                    .map(|(entity, _)| entity)
                    .collect();
                let picked = if towers.is_empty() {
                    None
                } else {
                    Some(towers[rng.gen_range(0..towers.len())])
                };
                EventUndo::Corrupted(picked.and_then(|entity| {
                    let mut tower = world.get::<&mut Tower>(entity).ok()?;
                    let previous = tower.corrupted;
                    tower.corrupted = true;
                    Some((entity, previous))
                }))
            }
            RandomEventKind::Ambush => {
                let count = def.magnitude.round().max(0.0) as u32;
                let last_index = path.waypoints().len().saturating_sub(1).max(1);
                for _ in 0..count {
                    let index = rng.gen_range(0..last_index);
                    ctx.pending.push(PendingSpawn {
                        archetype: EnemyArchetype::Fast,
                        count: 1,
                        progress: path.distance_at_waypoint(index),
                        wave,
                        health_scale: 1.0,
                        overrides: StatOverrides::default(),
                    });
                }
                debug!("ambush of {count} fast enemies");
                EventUndo::Nothing
            }
        };

        if def.is_instantaneous() {
            return;
        }
        self.active.push(ActiveEvent {
            remaining_secs: def.duration_secs,
            def,
            undo,
        });
    }

    /// Apply active "new enemy" effects to a freshly spawned enemy.
    pub fn on_enemy_spawned(&mut self, world: &mut World, entity: Entity) {
        for event in self.active.iter_mut().filter(|e| e.def.affects_new_enemies) {
            match &mut event.undo {
                EventUndo::Armor(saved) => {
                    saved.push((entity, harden(world, entity, event.def.magnitude)));
                }
                EventUndo::Speed(saved) => {
                    if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
                        saved.push((entity, enemy.base_speed));
                        enemy.base_speed *= event.def.magnitude;
                    }
                }
                _ => {}
            }
        }
    }

    /// Apply active tower-wide effects to a freshly built tower.
    pub fn on_tower_built(&mut self, world: &mut World, entity: Entity) {
        let Ok(mut tower) = world.get::<&mut Tower>(entity) else {
            return;
        };
        for event in &mut self.active {
            match &mut event.undo {
                EventUndo::Disabled(saved) => {
                    saved.push((entity, tower.disabled));
                    tower.disabled = true;
                }
                EventUndo::Ranges(saved) => {
                    saved.push((entity, tower.range));
                    tower.range *= event.def.magnitude;
                }
                _ => {}
            }
        }
    }

    /// Keep stored ranges in step with an upgrade applied during fog.
    pub fn on_tower_upgraded(&mut self, entity: Entity, range_factor: f32) {
        for event in &mut self.active {
            if let EventUndo::Ranges(saved) = &mut event.undo {
                for (_, range) in saved.iter_mut().filter(|(e, _)| *e == entity) {
                    *range *= range_factor;
                }
            }
        }
    }
}

/// Raise an enemy's armor by `amount`, adding the component if needed.
/// Returns the previous armor (`None` if it had none).
fn harden(world: &mut World, entity: Entity, amount: f32) -> Option<f32> {
    if let Ok(mut armored) = world.get::<&mut Armored>(entity) {
        let previous = armored.armor;
        armored.armor += amount;
        return Some(previous);
    }
    let _ = world.insert_one(entity, Armored { armor: amount });
    None
}

/// Restore everything a durational event changed. Entities that no longer
/// exist are skipped.
fn revert(world: &mut World, undo: EventUndo) {
    match undo {
        EventUndo::Nothing => {}
        EventUndo::Disabled(saved) => {
            for (entity, disabled) in saved {
                if let Ok(mut tower) = world.get::<&mut Tower>(entity) {
                    tower.disabled = disabled;
                }
            }
        }
        EventUndo::Ranges(saved) => {
            for (entity, range) in saved {
                if let Ok(mut tower) = world.get::<&mut Tower>(entity) {
                    tower.range = range;
                }
            }
        }
        EventUndo::Armor(saved) => {
            for (entity, armor) in saved {
                match armor {
                    Some(armor) => {
                        if let Ok(mut armored) = world.get::<&mut Armored>(entity) {
                            armored.armor = armor;
                        }
                    }
                    None => {
                        let _ = world.remove_one::<Armored>(entity);
                    }
                }
            }
        }
        EventUndo::Speed(saved) => {
            for (entity, speed) in saved {
                if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
                    enemy.base_speed = speed;
                }
            }
        }
        EventUndo::Corrupted(saved) => {
            if let Some((entity, corrupted)) = saved {
                if let Ok(mut tower) = world.get::<&mut Tower>(entity) {
                    tower.corrupted = corrupted;
                }
            }
        }
    }
}

/// Tick active events down, revert expired ones, and maybe trigger a new one.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    director: &mut EventDirector,
    world: &mut World,
    path: &Path,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
    wave: u32,
    phase: MatchPhase,
    chance_per_sec: f32,
    min_wave: u32,
    dt: f32,
) {
    for event in &mut director.active {
        event.remaining_secs -= dt;
    }
    let (expired, active): (Vec<ActiveEvent>, Vec<ActiveEvent>) = std::mem::take(&mut director.active)
        .into_iter()
        .partition(|e| e.remaining_secs <= 0.0);
    director.active = active;
    for event in expired {
        info!("random event {:?} expired", event.def.kind);
        ctx.events.push(CombatEvent::EventExpired {
            kind: event.def.kind,
        });
        revert(world, event.undo);
    }

    let can_trigger = director.active.is_empty()
        && matches!(phase, MatchPhase::Idle | MatchPhase::Spawning)
        && wave >= min_wave
        && chance_per_sec > 0.0;
    if !can_trigger {
        return;
    }
    if !rng.gen_bool(f64::from((chance_per_sec * dt).clamp(0.0, 1.0))) {
        return;
    }
    let eligible = director.eligible(wave);
    if eligible.is_empty() {
        return;
    }
    let def = eligible[rng.gen_range(0..eligible.len())].clone();
    director.activate(def, world, path, wave, ctx, rng);
}
