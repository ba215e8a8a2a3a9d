use serde::{Deserialize, Serialize};

use crate::constants::solver::FRAME_TIME_INTERVAL;

/// Animation frame: an index and the length of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub index: i64,
    pub time_interval_in_seconds: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0, FRAME_TIME_INTERVAL)
    }
}

impl Frame {
    pub fn new(index: i64, time_interval_in_seconds: f64) -> Self {
        Self {
            index,
            time_interval_in_seconds,
        }
    }

    /// Elapsed time at the start of this frame
    pub fn time_in_seconds(&self) -> f64 {
        self.index as f64 * self.time_interval_in_seconds
    }

    /// Saturates at `i64::MAX`
    pub fn advance(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    pub fn advance_by(&mut self, delta: i64) {
        self.index = self.index.saturating_add(delta);
    }
}

impl Iterator for Frame {
    type Item = Frame;

    /// Yields the current frame, then advances
    fn next(&mut self) -> Option<Frame> {
        let current = *self;
        self.advance();
        Some(current)
    }
}
