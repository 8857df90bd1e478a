//! tau-converter: Convert osu! beatmaps into angular tau beatmaps
//!
//! Planar hit objects are mapped onto angles around the playfield centre.
//! Sliders are sampled into polar paths when they can be followed, and
//! degrade to beats when they cannot.

pub mod angle;
pub mod beatmap;
pub mod classifier;
pub mod config;
pub mod converter;
pub mod curve;
pub mod difficulty;
pub mod error;
pub mod path;
pub mod slider;
pub mod tracker;
pub mod types;

pub use types::*;
pub use beatmap::{BeatmapConverter, TauBeatmap};
pub use classifier::{ObjectClass, ObjectClassifier};
pub use config::{ConverterConfig, RotationDirection, SliderPolicy};
pub use converter::{CancellationToken, Converter};
pub use curve::{PathCurve, PolylineCurve};
pub use difficulty::DifficultyInfo;
pub use error::ConvertError;
pub use path::{PolarSliderPath, SliderNode};
pub use slider::{Demotion, SliderDiscretizer};
pub use tracker::AngleTracker;
