//! The enemy path: an ordered list of grid waypoints supplied by the map
//! generator, with the arc-length bookkeeping enemies walk along.

use std::collections::HashSet;

use glam::Vec2;

use rampart_core::types::GridCell;

use crate::config::ConfigError;

/// An orthogonal polyline through grid cell centers.
#[derive(Debug, Clone)]
pub struct Path {
    waypoints: Vec<GridCell>,
    points: Vec<Vec2>,
    /// Distance from the entry to each waypoint.
    cumulative: Vec<f32>,
    cells: HashSet<GridCell>,
}

impl Path {
    /// Build a path from waypoints, validating it against a
    /// `width` x `height` grid.
    pub fn new(waypoints: Vec<GridCell>, width: u32, height: u32) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::InvalidPath(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if let Some(cell) = waypoints.iter().find(|c| !c.in_bounds(width, height)) {
            return Err(ConfigError::InvalidPath(format!(
                "waypoint ({}, {}) lies outside the {width}x{height} grid",
                cell.col, cell.row
            )));
        }

        let mut cells = HashSet::new();
        for pair in waypoints.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                return Err(ConfigError::InvalidPath(format!(
                    "repeated waypoint ({}, {})",
                    a.col, a.row
                )));
            }
            if a.col != b.col && a.row != b.row {
                return Err(ConfigError::InvalidPath(format!(
                    "segment ({}, {}) -> ({}, {}) is not axis-aligned",
                    a.col, a.row, b.col, b.row
                )));
            }
            let step_col = (b.col - a.col).signum();
            let step_row = (b.row - a.row).signum();
            let mut cell = a;
            cells.insert(cell);
            while cell != b {
                cell = GridCell::new(cell.col + step_col, cell.row + step_row);
                cells.insert(cell);
            }
        }

        let points: Vec<Vec2> = waypoints.iter().map(GridCell::center).collect();
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Ok(Self {
            waypoints,
            points,
            cumulative,
            cells,
        })
    }

    pub fn waypoints(&self) -> &[GridCell] {
        &self.waypoints
    }

    /// Total walking distance from entry to exit.
    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn exit(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Path distance at waypoint `index` (clamped to the last waypoint).
    pub fn distance_at_waypoint(&self, index: usize) -> f32 {
        self.cumulative[index.min(self.cumulative.len() - 1)]
    }

    /// Whether a build cell is covered by the path.
    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Position at `progress` along the path and the index of the segment
    /// it falls on. Progress is clamped to the path.
    pub fn sample(&self, progress: f32) -> (Vec2, usize) {
        let progress = progress.clamp(0.0, self.total_length());
        // First waypoint strictly beyond `progress`; the segment ends there.
        let end = self
            .cumulative
            .partition_point(|&d| d <= progress)
            .clamp(1, self.points.len() - 1);
        let segment = end - 1;
        let start_dist = self.cumulative[segment];
        let len = self.cumulative[end] - start_dist;
        let t = if len > 0.0 {
            (progress - start_dist) / len
        } else {
            0.0
        };
        (self.points[segment].lerp(self.points[end], t), segment)
    }

    /// Unit direction of travel along `segment`.
    pub fn direction(&self, segment: usize) -> Vec2 {
        let segment = segment.min(self.segment_count() - 1);
        (self.points[segment + 1] - self.points[segment]).normalize_or_zero()
    }
}
