//! Core types for source (planar) and target (angular) hit objects

use rosu_map::util::Pos;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::PathCurve;
use crate::path::PolarSliderPath;

/// Name of a hit sample, mirroring the default osu! hitsound set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleName {
    Normal,
    Whistle,
    Finish,
    Clap,
    /// Custom sample file
    File(String),
}

/// A single audio sample attached to a hit object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitSample {
    pub name: SampleName,
    pub bank: String,
    pub volume: i32,
}

impl HitSample {
    pub fn new(name: SampleName) -> Self {
        Self {
            name,
            bank: "Normal".to_string(),
            volume: 100,
        }
    }

    /// Finish samples mark an accented object
    pub fn is_finish(&self) -> bool {
        self.name == SampleName::Finish
    }
}

/// Path-bearing part of a source object (sliders)
pub struct SourcePath {
    /// Head position of the object on the playfield
    pub pos: Pos,
    /// Total duration in milliseconds, repeats included
    pub duration: f64,
    pub repeat_count: i32,
    /// Samples per slider node (head, repeats, tail)
    pub node_samples: Vec<Vec<HitSample>>,
    /// Offset from `pos` at a given progress along the path
    pub curve: Box<dyn PathCurve>,
}

impl SourcePath {
    /// Absolute playfield position at the given progress
    pub fn position_at(&self, progress: f64) -> Pos {
        let offset = self.curve.position_at(progress);
        Pos {
            x: self.pos.x + offset.x,
            y: self.pos.y + offset.y,
        }
    }
}

impl fmt::Debug for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcePath")
            .field("pos", &self.pos)
            .field("duration", &self.duration)
            .field("repeat_count", &self.repeat_count)
            .field("node_samples", &self.node_samples.len())
            .finish_non_exhaustive()
    }
}

/// Positional capability exposed by a source object
#[derive(Debug)]
pub enum SourceShape {
    /// Full playfield position
    Position(Pos),
    /// Only an x coordinate (e.g. mania columns)
    XOnly(f32),
    /// Only a y coordinate
    YOnly(f32),
    /// Already expressed as an angle in degrees
    Angle(f32),
    /// Curved path with repeats
    Path(SourcePath),
    /// No positional data at all
    Bare,
}

/// A planar hit object to be converted
#[derive(Debug)]
pub struct SourceHitObject {
    /// Start time in milliseconds
    pub start_time: f64,
    pub samples: Vec<HitSample>,
    pub shape: SourceShape,
}

impl SourceHitObject {
    pub fn new(start_time: f64, shape: SourceShape) -> Self {
        Self {
            start_time,
            samples: Vec::new(),
            shape,
        }
    }

    pub fn with_samples(mut self, samples: Vec<HitSample>) -> Self {
        self.samples = samples;
        self
    }

    pub fn path(&self) -> Option<&SourcePath> {
        match &self.shape {
            SourceShape::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// Converted hit object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TauHitObject {
    /// Start time in milliseconds
    pub start_time: f64,
    pub samples: Vec<HitSample>,
    pub kind: TauHitObjectKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TauHitObjectKind {
    Beat {
        /// Angle in degrees, continuous with the previous object
        angle: f32,
    },
    HardBeat,
    Slider(TauSlider),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TauSlider {
    /// Absolute angle of the slider head
    pub angle: f32,
    pub repeat_count: i32,
    pub node_samples: Vec<Vec<HitSample>>,
    /// Node angles relative to `angle`
    pub path: PolarSliderPath,
}

impl TauSlider {
    pub fn span_count(&self) -> i32 {
        self.repeat_count + 1
    }

    pub fn duration(&self) -> f64 {
        self.path.duration()
    }
}

impl TauHitObject {
    pub fn angle(&self) -> Option<f32> {
        match &self.kind {
            TauHitObjectKind::Beat { angle } => Some(*angle),
            TauHitObjectKind::HardBeat => None,
            TauHitObjectKind::Slider(slider) => Some(slider.angle),
        }
    }

    pub fn end_time(&self) -> f64 {
        match &self.kind {
            TauHitObjectKind::Slider(slider) => self.start_time + slider.duration(),
            TauHitObjectKind::Beat { .. } | TauHitObjectKind::HardBeat => self.start_time,
        }
    }

    pub fn is_slider(&self) -> bool {
        matches!(self.kind, TauHitObjectKind::Slider(_))
    }
}
