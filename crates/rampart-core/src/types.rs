//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::CELL_SIZE;

/// 2D position in world units. x grows with grid columns, y with grid rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// A cell of the build grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

/// Stable, generation-checked handle to a simulation entity.
///
/// Holding an `EntityId` never keeps the entity alive; resolving an id whose
/// entity has been removed yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed while the match was running.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

impl GridCell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// World-space center of this cell.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.col as f32 + 0.5) * CELL_SIZE,
            (self.row as f32 + 0.5) * CELL_SIZE,
        )
    }

    /// Whether this cell lies inside a `width` x `height` grid.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.col >= 0 && self.row >= 0 && (self.col as u32) < width && (self.row as u32) < height
    }
}

impl SimTime {
    /// Record one tick that simulated `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
