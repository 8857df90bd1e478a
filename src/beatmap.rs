//! Beatmap conversion from parsed osu! beatmaps

use rosu_map::section::hit_objects::hit_samples::{
    HitSampleDefaultName, HitSampleInfo, HitSampleInfoName, SampleBank,
};
use rosu_map::section::hit_objects::{CurveBuffers, HitObject, HitObjectKind};
use rosu_map::Beatmap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ConverterConfig;
use crate::converter::{CancellationToken, Converter};
use crate::curve::PolylineCurve;
use crate::difficulty::DifficultyInfo;
use crate::error::{ConvertError, Result};
use crate::types::*;

/// A break period in the beatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakPeriod {
    pub start_time: f64,
    pub end_time: f64,
}

/// A converted beatmap ready for the tau ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TauBeatmap {
    pub title: String,
    pub artist: String,
    pub version: String,
    pub creator: String,
    pub approach_rate: f32,
    pub breaks: Vec<BreakPeriod>,
    /// Converted objects, sorted by start time
    pub hit_objects: Vec<TauHitObject>,
}

impl TauBeatmap {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn slider_count(&self) -> usize {
        self.hit_objects.iter().filter(|h| h.is_slider()).count()
    }
}

/// Converter for whole osu! beatmaps
pub struct BeatmapConverter;

impl BeatmapConverter {
    /// Parse a .osu file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Beatmap> {
        let path = path.as_ref();
        rosu_map::from_path(path).map_err(|e| ConvertError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Convert a parsed beatmap with a fresh converter
    pub fn convert(
        mut beatmap: Beatmap,
        config: &ConverterConfig,
        cancel: &CancellationToken,
    ) -> Result<TauBeatmap> {
        let difficulty = DifficultyInfo::new(beatmap.approach_rate);
        let mut converter = Converter::new(config.clone(), difficulty)?;

        let sources = Self::source_objects(&mut beatmap);
        let mut hit_objects = converter.convert_all(&sources, cancel)?;
        hit_objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let tau = TauBeatmap {
            title: beatmap.title,
            artist: beatmap.artist,
            version: beatmap.version,
            creator: beatmap.creator,
            approach_rate: beatmap.approach_rate,
            breaks: beatmap
                .breaks
                .iter()
                .map(|b| BreakPeriod {
                    start_time: b.start_time,
                    end_time: b.end_time,
                })
                .collect(),
            hit_objects,
        };

        log::info!(
            "Converted {} - {} [{}]: {} objects, {} sliders",
            tau.artist,
            tau.title,
            tau.version,
            tau.hit_objects.len(),
            tau.slider_count()
        );

        Ok(tau)
    }

    /// Extract the source objects of a beatmap in order
    pub fn source_objects(beatmap: &mut Beatmap) -> Vec<SourceHitObject> {
        let mut curve_buffers = CurveBuffers::default();

        beatmap
            .hit_objects
            .iter_mut()
            .map(|hit_object| Self::source_object(hit_object, &mut curve_buffers))
            .collect()
    }

    fn source_object(
        hit_object: &mut HitObject,
        curve_buffers: &mut CurveBuffers,
    ) -> SourceHitObject {
        let shape = match &mut hit_object.kind {
            HitObjectKind::Circle(circle) => SourceShape::Position(circle.pos),
            HitObjectKind::Spinner(spinner) => SourceShape::Position(spinner.pos),
            HitObjectKind::Hold(hold) => SourceShape::XOnly(hold.pos_x),
            HitObjectKind::Slider(slider) => {
                let duration = slider.duration_with_bufs(curve_buffers);
                let points = slider.path.curve_with_bufs(curve_buffers).path().to_vec();

                SourceShape::Path(SourcePath {
                    pos: slider.pos,
                    duration,
                    repeat_count: slider.repeat_count,
                    node_samples: slider
                        .node_samples
                        .iter()
                        .map(|samples| samples.iter().map(Self::hit_sample).collect())
                        .collect(),
                    curve: Box::new(PolylineCurve::new(points)),
                })
            }
        };

        SourceHitObject {
            start_time: hit_object.start_time,
            samples: hit_object.samples.iter().map(Self::hit_sample).collect(),
            shape,
        }
    }

    fn hit_sample(info: &HitSampleInfo) -> HitSample {
        let name = match &info.name {
            HitSampleInfoName::Default(HitSampleDefaultName::Normal) => SampleName::Normal,
            HitSampleInfoName::Default(HitSampleDefaultName::Whistle) => SampleName::Whistle,
            HitSampleInfoName::Default(HitSampleDefaultName::Finish) => SampleName::Finish,
            HitSampleInfoName::Default(HitSampleDefaultName::Clap) => SampleName::Clap,
            HitSampleInfoName::File(file) => SampleName::File(file.clone()),
        };

        HitSample {
            name,
            bank: Self::bank_name(info.bank).to_string(),
            volume: info.volume,
        }
    }

    fn bank_name(bank: SampleBank) -> &'static str {
        match bank {
            SampleBank::None => "None",
            SampleBank::Normal => "Normal",
            SampleBank::Soft => "Soft",
            SampleBank::Drum => "Drum",
        }
    }
}
