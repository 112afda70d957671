//! Simulation constants and tuning parameters.

/// Nominal frame rate used by tests and headless runners (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal frame rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Largest time step the systems integrate at once (seconds).
/// Longer frames are split into sub-steps of at most this length.
pub const MAX_TICK_DT: f32 = 0.1;

// --- World ---

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: f32 = 40.0;

/// Margin beyond the grid at which projectiles are considered off the playfield.
pub const PLAYFIELD_MARGIN: f32 = 80.0;

// --- Towers ---

/// Highest upgrade level a tower can reach.
pub const MAX_TOWER_LEVEL: u32 = 4;

/// Upgrade cost as a fraction of build cost, per current level.
pub const UPGRADE_COST_FACTOR: f32 = 0.75;

/// Damage multiplier applied per upgrade.
pub const UPGRADE_DAMAGE_FACTOR: f32 = 1.35;

/// Range multiplier applied per upgrade.
pub const UPGRADE_RANGE_FACTOR: f32 = 1.1;

/// Fire interval multiplier applied per upgrade.
pub const UPGRADE_INTERVAL_FACTOR: f32 = 0.9;

pub const BASIC_COST: u32 = 50;
pub const BASIC_DAMAGE: f32 = 10.0;
pub const BASIC_RANGE: f32 = 120.0;
pub const BASIC_FIRE_INTERVAL: f32 = 0.6;
pub const BASIC_PROJECTILE_SPEED: f32 = 320.0;

pub const AREA_COST: u32 = 100;
pub const AREA_DAMAGE: f32 = 18.0;
pub const AREA_RANGE: f32 = 110.0;
pub const AREA_FIRE_INTERVAL: f32 = 1.4;
pub const AREA_PROJECTILE_SPEED: f32 = 220.0;
pub const AREA_SPLASH_RADIUS: f32 = 60.0;

pub const SLOW_COST: u32 = 75;
pub const SLOW_DAMAGE: f32 = 4.0;
pub const SLOW_RANGE: f32 = 100.0;
pub const SLOW_FIRE_INTERVAL: f32 = 1.0;
pub const SLOW_PROJECTILE_SPEED: f32 = 260.0;
pub const SLOW_FACTOR: f32 = 0.5;
pub const SLOW_DURATION_SECS: f32 = 2.0;

pub const PRECISION_COST: u32 = 150;
pub const PRECISION_DAMAGE: f32 = 60.0;
pub const PRECISION_RANGE: f32 = 260.0;
pub const PRECISION_FIRE_INTERVAL: f32 = 2.2;
pub const PRECISION_ARMOR_PIERCE: f32 = 0.3;

pub const CHAIN_COST: u32 = 125;
pub const CHAIN_DAMAGE: f32 = 14.0;
pub const CHAIN_RANGE: f32 = 130.0;
pub const CHAIN_FIRE_INTERVAL: f32 = 1.1;
pub const CHAIN_HOPS: u32 = 3;
pub const CHAIN_HOP_RADIUS: f32 = 80.0;
pub const CHAIN_FALLOFF: f32 = 0.7;

// --- Targeting ---

/// Weight of path progress (0..1) in the targeting score.
pub const TARGET_PROGRESS_WEIGHT: f32 = 100.0;

/// Maximum proximity bonus (target at the tower's feet).
pub const TARGET_PROXIMITY_WEIGHT: f32 = 20.0;

/// Score per unit of current enemy speed.
pub const TARGET_SPEED_WEIGHT: f32 = 0.05;

// --- Damage ---

/// Upper bound on effective armor after all bonuses.
pub const MAX_EFFECTIVE_ARMOR: f32 = 0.9;

/// Splash damage never attenuates below this fraction of full damage.
pub const SPLASH_MIN_FRACTION: f32 = 0.35;

/// Spread (in path distance) of minions and clones around their parent.
pub const SPAWN_SCATTER: f32 = 12.0;

// --- Projectiles ---

/// Collision half-size of a projectile.
pub const PROJECTILE_RADIUS: f32 = 4.0;

/// Upper bound on projectile flight time (seconds).
pub const PROJECTILE_LIFETIME_SECS: f32 = 4.0;

/// Radius searched for a new target when the original target dies.
pub const RETARGET_RADIUS: f32 = 150.0;

/// Fraction of the way the velocity direction turns toward the aim point per tick.
pub const STEER_FACTOR: f32 = 0.25;

/// Refinement passes of the intercept prediction.
pub const INTERCEPT_ITERATIONS: usize = 2;

// --- Random events ---

/// Number of fast enemies in a default ambush.
pub const AMBUSH_SIZE: u32 = 4;

// --- Display ---

/// Lifetime of floating text markers (seconds).
pub const TEXT_MARKER_SECS: f32 = 0.8;

/// Lifetime of circle markers (explosions, deaths).
pub const CIRCLE_MARKER_SECS: f32 = 0.4;

/// Lifetime of line markers (hitscan traces, chain arcs).
pub const LINE_MARKER_SECS: f32 = 0.15;
