//! Difficulty parameters consumed by the converter

use serde::{Deserialize, Serialize};

/// Approach-rate driven preempt range (AR0, AR5, AR10) in milliseconds
pub const PREEMPT_RANGE: (f64, f64, f64) = (1800.0, 1200.0, 450.0);

/// Precomputed difficulty settings of the source beatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyInfo {
    pub approach_rate: f32,
}

impl Default for DifficultyInfo {
    fn default() -> Self {
        Self { approach_rate: 5.0 }
    }
}

impl DifficultyInfo {
    pub fn new(approach_rate: f32) -> Self {
        Self { approach_rate }
    }

    /// Time before the hit at which the object appears
    pub fn preempt(&self) -> f64 {
        let (min, mid, max) = PREEMPT_RANGE;
        difficulty_range(self.approach_rate as f64, min, mid, max)
    }
}

/// Map a 0-10 difficulty value through (min, mid, max)
///
/// 0 maps to `min`, 5 to `mid`, 10 to `max`, linear in between.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid + (mid - min) * (difficulty - 5.0) / 5.0
    } else {
        mid
    }
}
