//! Predictive aiming for projectiles.
//!
//! Provides the lead intercept point used when a tower fires and the light
//! steering applied each tick while a projectile homes on its target.

use glam::Vec2;

use rampart_core::constants::INTERCEPT_ITERATIONS;

/// Predict where a target moving at constant `target_vel` will be when a
/// projectile launched from `shooter` at `speed` reaches it.
///
/// Iterative: aim at the target, compute flight time to that point, re-aim
/// at where the target will be after that time. Returns the aim point and
/// the estimated flight time.
pub fn predict_intercept(shooter: Vec2, target_pos: Vec2, target_vel: Vec2, speed: f32) -> (Vec2, f32) {
    if speed <= 0.0 {
        return (target_pos, 0.0);
    }
    let mut aim = target_pos;
    let mut tof = 0.0;
    for _ in 0..INTERCEPT_ITERATIONS {
        tof = shooter.distance(aim) / speed;
        aim = target_pos + target_vel * tof;
    }
    (aim, tof)
}

/// Turn `velocity` part of the way toward `aim` while keeping `speed`.
///
/// `factor` is the fraction of the gap between the current heading and the
/// heading to `aim` closed in one call (0 = no correction, 1 = snap).
pub fn steer(velocity: Vec2, position: Vec2, aim: Vec2, speed: f32, factor: f32) -> Vec2 {
    let desired = (aim - position).normalize_or_zero();
    if desired == Vec2::ZERO {
        return velocity;
    }
    let current = velocity.normalize_or_zero();
    if current == Vec2::ZERO {
        return desired * speed;
    }
    let heading = current.lerp(desired, factor.clamp(0.0, 1.0));
    // Exactly opposed headings cancel out; fall back to the desired one.
    let heading = heading.try_normalize().unwrap_or(desired);
    heading * speed
}

/// Launch velocity from `origin` toward `aim` at `speed`.
pub fn launch_velocity(origin: Vec2, aim: Vec2, speed: f32) -> Vec2 {
    (aim - origin).normalize_or_zero() * speed
}

/// Closest distance from `point` to the segment `a`–`b`.
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
