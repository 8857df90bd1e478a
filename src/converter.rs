//! Drives conversion of a whole hit object sequence

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::classifier::{ObjectClass, ObjectClassifier};
use crate::config::ConverterConfig;
use crate::difficulty::DifficultyInfo;
use crate::error::{ConvertError, Result};
use crate::slider::SliderDiscretizer;
use crate::tracker::AngleTracker;
use crate::types::{SourceHitObject, TauHitObject, TauHitObjectKind};

/// Shared flag used to stop a running conversion between objects
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Converts planar hit objects into tau hit objects
///
/// Holds the rotational continuity state of one sequence. Use a fresh
/// converter for every beatmap.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    difficulty: DifficultyInfo,
    classifier: ObjectClassifier,
    discretizer: SliderDiscretizer,
    tracker: AngleTracker,
}

impl Converter {
    pub fn new(config: ConverterConfig, difficulty: DifficultyInfo) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: ObjectClassifier::new(config.allow_hard_beats),
            discretizer: SliderDiscretizer::new(&config),
            tracker: AngleTracker::new(config.locked_direction),
            config,
            difficulty,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn tracker(&self) -> &AngleTracker {
        &self.tracker
    }

    /// Convert one source object
    ///
    /// Always yields exactly one object today.
    pub fn convert(&mut self, source: &SourceHitObject) -> Vec<TauHitObject> {
        vec![self.convert_one(source)]
    }

    /// Convert a time-sorted sequence, checking `cancel` before each object
    pub fn convert_all<'a, I>(
        &mut self,
        sources: I,
        cancel: &CancellationToken,
    ) -> Result<Vec<TauHitObject>>
    where
        I: IntoIterator<Item = &'a SourceHitObject>,
    {
        let mut converted = Vec::new();

        for source in sources {
            if cancel.is_cancelled() {
                return Err(ConvertError::Cancelled);
            }
            converted.extend(self.convert(source));
        }

        Ok(converted)
    }

    fn convert_one(&mut self, source: &SourceHitObject) -> TauHitObject {
        let accented = ObjectClassifier::is_accented(source);

        let kind = match (self.classifier.classify(source, accented), source.path()) {
            (ObjectClass::Slider, Some(path)) => {
                match self.discretizer.discretize(path, &self.difficulty, &mut self.tracker) {
                    Ok(slider) => TauHitObjectKind::Slider(slider),
                    Err(demotion) => {
                        log::debug!("Slider at {}ms demoted: {}", source.start_time, demotion);
                        let class = self.classifier.beat_class(accented);
                        self.beat_kind(source, class)
                    }
                }
            }
            (class, _) => self.beat_kind(source, class),
        };

        let object = TauHitObject {
            start_time: source.start_time,
            samples: source.samples.clone(),
            kind,
        };
        log::trace!("Converted object at {}ms: {:?}", object.start_time, object.kind);
        object
    }

    fn beat_kind(&mut self, source: &SourceHitObject, class: ObjectClass) -> TauHitObjectKind {
        match class {
            ObjectClass::HardBeat => TauHitObjectKind::HardBeat,
            ObjectClass::Beat | ObjectClass::Slider => TauHitObjectKind::Beat {
                angle: self.tracker.resolve(ObjectClassifier::beat_angle(source)),
            },
        }
    }
}
