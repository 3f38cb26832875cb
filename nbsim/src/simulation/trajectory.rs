//! Position history recorded by the integrator
//!
//! Snapshot `k` holds the N x 3 positions after `k` steps and is stamped with
//! time `k * dt`. Snapshots are only ever appended.

use nalgebra::DMatrix;

/// Number of trailing snapshots a renderer shows by default
pub const DEFAULT_TRAIL_LENGTH: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    snapshots: Vec<DMatrix<f64>>,
    times: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
            times: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, time: f64, positions: &DMatrix<f64>) {
        self.times.push(time);
        self.snapshots.push(positions.clone());
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshot(&self, k: usize) -> Option<&DMatrix<f64>> {
        self.snapshots.get(k)
    }

    pub fn time(&self, k: usize) -> Option<f64> {
        self.times.get(k).copied()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn last(&self) -> Option<&DMatrix<f64>> {
        self.snapshots.last()
    }

    pub fn final_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Snapshots in recording order, paired with their times
    pub fn iter(&self) -> impl Iterator<Item = (f64, &DMatrix<f64>)> + '_ {
        self.times.iter().copied().zip(self.snapshots.iter())
    }

    /// Up to `window` snapshots ending at (and including) snapshot `end`.
    /// `end` past the last snapshot is clamped.
    pub fn trail(&self, end: usize, window: usize) -> &[DMatrix<f64>] {
        if self.snapshots.is_empty() || window == 0 {
            return &[];
        }
        let stop = end.min(self.snapshots.len() - 1) + 1;
        let start = stop.saturating_sub(window);
        &self.snapshots[start..stop]
    }
}
