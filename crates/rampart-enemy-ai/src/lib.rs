//! Enemy behaviour for RAMPART.
//!
//! Archetype profiles and the pure per-tick behaviours (regeneration,
//! healing, auras, stealth, adaptive resistance, brood spawning).
//! No ECS dependency; everything operates on plain component data.

pub mod behaviors;
pub mod profiles;

pub use rampart_core as core;

#[cfg(test)]
mod tests;
