//! Combat simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, runs the combat systems once per `tick(dt)`,
//! and produces `SimSnapshot`s for the presentation layer.

pub mod armory;
pub mod config;
pub mod economy;
pub mod engine;
pub mod guidance;
pub mod ids;
pub mod path;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use rampart_core as core;
pub use scenario::Scenario;
