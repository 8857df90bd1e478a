//! Picks the kind of tau object a source object becomes

use crate::angle::{hit_object_angle, remap, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::types::{HitSample, SourceHitObject, SourceShape};

/// Target kind selected for a source object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    Beat,
    HardBeat,
    /// Candidate only, the discretizer may still demote it
    Slider,
}

/// Selects target kinds and derives raw beat angles
#[derive(Debug, Clone, Copy)]
pub struct ObjectClassifier {
    allow_hard_beats: bool,
}

impl ObjectClassifier {
    pub fn new(allow_hard_beats: bool) -> Self {
        Self { allow_hard_beats }
    }

    /// Whether the object carries a finish accent
    ///
    /// Path-bearing objects are judged by their head node samples.
    pub fn is_accented(source: &SourceHitObject) -> bool {
        let samples: &[HitSample] = match source.path() {
            Some(path) => path
                .node_samples
                .first()
                .map(Vec::as_slice)
                .unwrap_or(source.samples.as_slice()),
            None => &source.samples,
        };

        samples.iter().any(HitSample::is_finish)
    }

    pub fn classify(&self, source: &SourceHitObject, accented: bool) -> ObjectClass {
        if source.path().is_some() {
            ObjectClass::Slider
        } else {
            self.beat_class(accented)
        }
    }

    /// Kind used for non-path objects and for demoted sliders
    pub fn beat_class(&self, accented: bool) -> ObjectClass {
        if accented && self.allow_hard_beats {
            ObjectClass::HardBeat
        } else {
            ObjectClass::Beat
        }
    }

    /// Raw angle of a beat before continuity resolution
    pub fn beat_angle(source: &SourceHitObject) -> f32 {
        match &source.shape {
            SourceShape::Position(pos) => hit_object_angle(*pos),
            SourceShape::Path(path) => hit_object_angle(path.pos),
            SourceShape::XOnly(x) => remap(*x, 0.0, PLAYFIELD_WIDTH, 0.0, 360.0),
            SourceShape::YOnly(y) => remap(*y, 0.0, PLAYFIELD_HEIGHT, 0.0, 360.0),
            SourceShape::Angle(angle) => *angle,
            SourceShape::Bare => 0.0,
        }
    }
}
