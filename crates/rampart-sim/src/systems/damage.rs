//! Damage resolution: evasion, armor, immunities, status effects, health,
//! and death handling.
//!
//! `apply_attack` is the pure per-enemy pipeline. `strike`, `splash`, `chain`
//! and `deliver` wrap it for the ECS world and record the resulting events,
//! markers, rewards and follow-up spawns.

use glam::Vec2;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::events::CombatEvent;
use rampart_core::types::Position;
use rampart_enemy_ai::behaviors::{adaptive_resistance, apply_slow, brood_spawn_chance};

use crate::ids::id_of;
use crate::systems::markers;
use crate::systems::wave_spawner::StatOverrides;
use crate::systems::TickContext;
use crate::world_setup::PendingSpawn;

/// The defensive side of one enemy, borrowed for a single attack.
pub struct Defenses<'a> {
    pub enemy: &'a mut Enemy,
    pub armor: Option<&'a Armored>,
    pub evasion: Option<&'a Evasive>,
    pub immunities: Option<&'a Immunities>,
    pub adaptive: Option<&'a Adaptive>,
}

/// What happened to one enemy when an attack reached it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Negated entirely; no damage, no effect.
    Evaded,
    Landed {
        /// Health removed after mitigation and clamping.
        damage: f32,
        /// The attack's effect was skipped because of an immunity.
        effect_blocked: bool,
        /// This hit took the enemy from alive to zero health.
        killed: bool,
    },
}

impl AttackOutcome {
    /// Whether a chaining attack may continue past this enemy.
    pub fn propagates(&self) -> bool {
        matches!(
            self,
            AttackOutcome::Landed {
                effect_blocked: false,
                ..
            }
        )
    }
}

/// Armor left after bonuses and pierce, capped at `MAX_EFFECTIVE_ARMOR`.
pub fn effective_armor(base: f32, aura_bonus: f32, adaptive: f32, pierce: f32) -> f32 {
    (base + aura_bonus + adaptive - pierce).clamp(0.0, MAX_EFFECTIVE_ARMOR)
}

/// Damage remaining after armor. Armored targets always take at least 1.
pub fn mitigate(damage: f32, armor: f32) -> f32 {
    if armor <= 0.0 || damage <= 0.0 {
        return damage.max(0.0);
    }
    (damage * (1.0 - armor)).floor().max(1.0)
}

/// Run one attack through an enemy's defenses.
pub fn apply_attack<R: Rng + ?Sized>(defenses: Defenses<'_>, attack: &AttackProfile, rng: &mut R) -> AttackOutcome {
    let Defenses {
        enemy,
        armor,
        evasion,
        immunities,
        adaptive,
    } = defenses;

    if !attack.ignores_evasion {
        if let Some(evasive) = evasion {
            if evasive.chance > 0.0 && rng.gen_bool(f64::from(evasive.chance.clamp(0.0, 1.0))) {
                return AttackOutcome::Evaded;
            }
        }
    }

    let armor = effective_armor(
        armor.map_or(0.0, |a| a.armor),
        enemy.aura_armor_bonus,
        adaptive.map_or(0.0, adaptive_resistance),
        attack.armor_pierce,
    );
    let damage = mitigate(attack.damage, armor);

    let mut effect_blocked = false;
    if let Some(effect) = attack.effect {
        if immunities.is_some_and(|i| i.0.contains(&effect.tag())) {
            effect_blocked = true;
        } else if let Effect::Slow {
            factor,
            duration_secs,
        } = effect
        {
            apply_slow(enemy, factor, duration_secs);
        }
    }

    let was_alive = enemy.health > 0.0;
    let before = enemy.health;
    enemy.health = (enemy.health - damage).clamp(0.0, enemy.max_health);

    AttackOutcome::Landed {
        damage: before - enemy.health,
        effect_blocked,
        killed: was_alive && enemy.health <= 0.0,
    }
}

/// Apply `attack` to one enemy in the world, recording events and markers.
/// Resolves the death if the hit was lethal. Returns `None` when the
/// entity is no longer a live enemy.
pub fn strike<R: Rng + ?Sized>(
    world: &mut World,
    target: Entity,
    attack: &AttackProfile,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
) -> Option<AttackOutcome> {
    let (outcome, position) = {
        let (enemy, pos, armor, evasion, immunities, adaptive) = world
            .query_one_mut::<(
                &mut Enemy,
                &Position,
                Option<&Armored>,
                Option<&Evasive>,
                Option<&Immunities>,
                Option<&Adaptive>,
            )>(target)
            .ok()?;
        let defenses = Defenses {
            enemy,
            armor,
            evasion,
            immunities,
            adaptive,
        };
        (apply_attack(defenses, attack, rng), pos.0)
    };

    let id = id_of(target);
    match outcome {
        AttackOutcome::Evaded => {
            ctx.events.push(CombatEvent::Evaded { enemy: id });
            ctx.markers.push(markers::text(position, "evaded"));
        }
        AttackOutcome::Landed {
            damage,
            effect_blocked,
            killed,
        } => {
            ctx.events.push(CombatEvent::Hit { enemy: id, damage });
            if effect_blocked {
                if let Some(effect) = attack.effect {
                    ctx.events.push(CombatEvent::Immune {
                        enemy: id,
                        effect: effect.tag(),
                    });
                    ctx.markers.push(markers::text(position, "immune"));
                }
            }
            if killed {
                resolve_death(world, target, damage, ctx, rng);
            }
        }
    }
    Some(outcome)
}

/// Grant the reward, queue on-death spawns and remove the enemy.
/// `lethal_damage` is the health the killing blow removed; a brood's burst
/// grows with it.
pub fn resolve_death<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    lethal_damage: f32,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
) {
    let Ok((enemy, pos, split, brood)) =
        world.query_one_mut::<(&Enemy, &Position, Option<&Splitter>, Option<&Brood>)>(entity)
    else {
        return;
    };
    let archetype = enemy.archetype;
    let reward = enemy.reward;
    let progress = enemy.progress;
    let wave = enemy.wave;
    let radius = enemy.radius;
    let max_health = enemy.max_health;
    let position = pos.0;
    let split = split.copied();
    let brood = brood.copied();

    ctx.economy.earn(reward);
    ctx.events.push(CombatEvent::Killed {
        enemy: id_of(entity),
        archetype,
        reward,
    });
    ctx.markers.push(markers::circle(position, radius * 1.5));

    if let Some(split) = split.filter(|s| s.count > 0) {
        debug!("{archetype:?} split into {} {:?}", split.count, split.child);
        ctx.pending.push(PendingSpawn {
            archetype: split.child,
            count: split.count,
            progress,
            wave,
            health_scale: 1.0,
            overrides: StatOverrides::default(),
        });
        ctx.events.push(CombatEvent::Spawned {
            parent: archetype,
            child: split.child,
            count: split.count,
        });
    }

    if let Some(brood) = brood {
        let chance = brood_spawn_chance(&brood, lethal_damage, max_health);
        let count = (0..brood.burst).filter(|_| rng.gen_bool(chance)).count() as u32;
        if count > 0 {
            debug!("{archetype:?} burst into {count} {:?}", brood.minion);
            ctx.pending.push(PendingSpawn {
                archetype: brood.minion,
                count,
                progress,
                wave,
                health_scale: 1.0,
                overrides: StatOverrides::default(),
            });
            ctx.events.push(CombatEvent::Spawned {
                parent: archetype,
                child: brood.minion,
                count,
            });
        }
    }

    let _ = world.despawn(entity);
}

/// Hit every enemy within `radius` of `center`, attenuated by distance.
/// Returns the number of enemies reached.
pub fn splash<R: Rng + ?Sized>(
    world: &mut World,
    center: Vec2,
    radius: f32,
    attack: &AttackProfile,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
) -> usize {
    let victims: Vec<(Entity, f32)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, pos.0.distance(center)))
        .filter(|&(_, distance)| distance <= radius)
        .collect();

    ctx.markers.push(markers::circle(center, radius));
    for &(entity, distance) in &victims {
        let falloff = if radius > 0.0 {
            (1.0 - distance / radius).max(SPLASH_MIN_FRACTION)
        } else {
            1.0
        };
        let scaled = AttackProfile {
            damage: attack.damage * falloff,
            ..*attack
        };
        strike(world, entity, &scaled, ctx, rng);
    }
    victims.len()
}

/// Hit `first`, then jump up to `hops` times to the nearest visible enemy
/// within `hop_radius` of the previous victim. Each enemy is hit at most
/// once; damage is multiplied by `falloff` per jump. The chain stops at an
/// enemy that evades or is immune to chaining.
#[allow(clippy::too_many_arguments)]
pub fn chain<R: Rng + ?Sized>(
    world: &mut World,
    first: Entity,
    attack: &AttackProfile,
    hops: u32,
    hop_radius: f32,
    falloff: f32,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
) {
    let Ok(start) = world.get::<&Position>(first).map(|p| p.0) else {
        return;
    };
    let mut visited = vec![first];
    let outcome = strike(world, first, attack, ctx, rng);
    if !outcome.is_some_and(|o| o.propagates()) {
        return;
    }

    let mut last = start;
    let mut damage = attack.damage;
    for _ in 0..hops {
        damage *= falloff;
        let next = world
            .query::<(&Enemy, &Position, Option<&Stealth>)>()
            .iter()
            .filter(|(entity, (_, _, stealth))| {
                !visited.contains(entity) && !stealth.is_some_and(|s| s.hidden)
            })
            .map(|(entity, (_, pos, _))| (entity, pos.0, pos.0.distance(last)))
            .filter(|&(_, _, distance)| distance <= hop_radius)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(entity, pos, _)| (entity, pos));
        let Some((entity, position)) = next else {
            break;
        };

        visited.push(entity);
        ctx.markers.push(markers::line(last, position));
        let hop = AttackProfile { damage, ..*attack };
        let outcome = strike(world, entity, &hop, ctx, rng);
        last = position;
        if !outcome.is_some_and(|o| o.propagates()) {
            break;
        }
    }
}

/// Resolve an attack arriving at `impact`, dispatching on its effect.
/// `target` is the enemy the attack was aimed at, if any.
pub fn deliver<R: Rng + ?Sized>(
    world: &mut World,
    target: Option<Entity>,
    impact: Vec2,
    attack: &AttackProfile,
    ctx: &mut TickContext<'_>,
    rng: &mut R,
) {
    match attack.effect {
        Some(Effect::Splash { radius }) => {
            splash(world, impact, radius, attack, ctx, rng);
        }
        Some(Effect::Chain {
            hops,
            hop_radius,
            falloff,
        }) => {
            if let Some(target) = target {
                chain(world, target, attack, hops, hop_radius, falloff, ctx, rng);
            }
        }
        Some(Effect::Slow { .. }) | None => {
            if let Some(target) = target {
                strike(world, target, attack, ctx, rng);
            }
        }
    }
}
