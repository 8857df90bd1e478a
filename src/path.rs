//! Angular slider paths

use serde::{Deserialize, Serialize};

/// A point on a polar slider path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderNode {
    /// Offset from the slider's start time in milliseconds
    pub time: f64,
    /// Angle relative to the slider head, in degrees
    pub angle: f32,
}

impl SliderNode {
    pub fn new(time: f64, angle: f32) -> Self {
        Self { time, angle }
    }
}

/// Angular position of a slider over its duration
///
/// Nodes are ordered by time. A path built by the converter always starts
/// at time 0 and ends at the slider's full duration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarSliderPath {
    nodes: Vec<SliderNode>,
}

impl PolarSliderPath {
    pub fn new(nodes: Vec<SliderNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[SliderNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Time of the last node
    pub fn duration(&self) -> f64 {
        self.nodes.last().map(|n| n.time).unwrap_or(0.0)
    }

    pub fn end_angle(&self) -> f32 {
        self.nodes.last().map(|n| n.angle).unwrap_or(0.0)
    }

    /// Relative angle at `time`, linearly interpolated and clamped to the path
    pub fn angle_at(&self, time: f64) -> f32 {
        let (first, last) = match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if time <= first.time {
            return first.angle;
        }
        if time >= last.time {
            return last.angle;
        }

        let idx = self.nodes.partition_point(|n| n.time <= time);
        let (a, b) = (self.nodes[idx - 1], self.nodes[idx]);
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.angle;
        }

        let frac = ((time - a.time) / span) as f32;
        a.angle + (b.angle - a.angle) * frac
    }
}
