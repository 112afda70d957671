//! Per-tick enemy behaviours.
//!
//! Pure functions over component data. The simulation decides which
//! entities they apply to; nothing here touches the ECS.

use glam::Vec2;

use rampart_core::components::{Adaptive, Aura, Brood, DamageTracker, Enemy, Stealth};
use rampart_core::constants::MAX_EFFECTIVE_ARMOR;
use rampart_core::types::EntityId;

/// An aura emitter as seen by the aura pass.
#[derive(Debug, Clone, Copy)]
pub struct AuraSource {
    pub owner: EntityId,
    pub position: Vec2,
    pub aura: Aura,
}

/// Current walking speed after slows and aura bonuses.
pub fn current_speed(enemy: &Enemy) -> f32 {
    enemy.base_speed * enemy.slow_multiplier * (1.0 + enemy.aura_speed_bonus)
}

/// Count down an active slow; restores full speed when it runs out.
pub fn tick_slow(enemy: &mut Enemy, dt: f32) {
    if enemy.slow_remaining_secs <= 0.0 {
        enemy.slow_multiplier = 1.0;
        return;
    }
    enemy.slow_remaining_secs -= dt;
    if enemy.slow_remaining_secs <= 0.0 {
        enemy.slow_remaining_secs = 0.0;
        enemy.slow_multiplier = 1.0;
    }
}

/// Apply a slow. Stronger and longer slows win; weaker ones never shorten
/// or weaken an active slow.
pub fn apply_slow(enemy: &mut Enemy, factor: f32, duration_secs: f32) {
    enemy.slow_multiplier = enemy.slow_multiplier.min(factor.clamp(0.0, 1.0));
    enemy.slow_remaining_secs = enemy.slow_remaining_secs.max(duration_secs);
}

/// Add health, clamped to max. Returns the amount actually restored.
pub fn heal(enemy: &mut Enemy, amount: f32) -> f32 {
    if enemy.health <= 0.0 || amount <= 0.0 {
        return 0.0;
    }
    let before = enemy.health;
    enemy.health = (enemy.health + amount).min(enemy.max_health);
    enemy.health - before
}

/// Passive regeneration for one tick.
pub fn regenerate(enemy: &mut Enemy, per_sec: f32, dt: f32) -> f32 {
    heal(enemy, per_sec * dt)
}

/// Speed and armor bonus granted to `target` by the strongest auras in reach.
///
/// Auras do not stack: the largest speed bonus and the largest armor bonus
/// among covering auras apply. An emitter never buffs itself.
pub fn aura_bonus(target: EntityId, position: Vec2, sources: &[AuraSource]) -> (f32, f32) {
    let mut speed = 0.0_f32;
    let mut armor = 0.0_f32;
    for source in sources {
        if source.owner == target {
            continue;
        }
        if source.position.distance(position) <= source.aura.radius {
            speed = speed.max(source.aura.speed_bonus);
            armor = armor.max(source.aura.armor_bonus);
        }
    }
    (speed, armor)
}

/// Advance the hidden/visible cycle. Returns true when visibility flipped.
pub fn advance_stealth(stealth: &mut Stealth, dt: f32) -> bool {
    stealth.timer -= dt;
    if stealth.timer > 0.0 {
        return false;
    }
    stealth.hidden = !stealth.hidden;
    let stretch = if stealth.hidden {
        stealth.hidden_secs
    } else {
        stealth.visible_secs
    };
    // Carry the overshoot so long frames don't drift the cycle.
    stealth.timer += stretch.max(f32::EPSILON);
    true
}

/// Resistance currently granted by adaptation.
pub fn adaptive_resistance(adaptive: &Adaptive) -> f32 {
    (adaptive.counter as f32 * adaptive.per_hit)
        .min(adaptive.cap)
        .min(MAX_EFFECTIVE_ARMOR)
}

/// Compare health against the last observation. Returns damage taken since
/// then (0.0 when healed or unchanged) and records the new value.
pub fn observe_damage(tracker: &mut DamageTracker, health: f32) -> f32 {
    let delta = tracker.last_health - health;
    tracker.last_health = health;
    delta.max(0.0)
}

/// Probability that a brood drops a minion after losing `damage` health.
pub fn brood_spawn_chance(brood: &Brood, damage: f32, max_health: f32) -> f64 {
    if max_health <= 0.0 || damage <= 0.0 {
        return 0.0;
    }
    f64::from(damage / max_health * brood.chance_per_health).clamp(0.0, 1.0)
}
