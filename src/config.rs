//! Converter configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};

/// Rotation direction a converted map can be locked into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Whether a signed angular delta moves in this direction
    ///
    /// A zero delta counts as counter-clockwise, so it matches
    /// `CounterClockwise` and not `Clockwise`.
    pub fn matches(self, delta: f32) -> bool {
        (delta > 0.0) == (self == RotationDirection::Clockwise)
    }
}

/// Sampling rules for slider discretization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderPolicy {
    /// Time between path samples in milliseconds
    pub sample_step: f64,
    /// Fastest allowed angular speed between samples, in degrees per millisecond
    pub max_angular_speed: f32,
}

impl Default for SliderPolicy {
    fn default() -> Self {
        Self {
            sample_step: 20.0,
            max_angular_speed: 0.6,
        }
    }
}

/// Options fixed for the lifetime of a converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Turn accented (finish) objects into hard beats
    pub allow_hard_beats: bool,
    /// Turn sliders into angular sliders instead of beats
    pub allow_sliders: bool,
    /// Keep sliders even when they turn faster than the policy allows
    pub allow_impossible_sliders: bool,
    /// Divides the approach-rate based minimum slider duration
    pub slider_sample_divisor: u32,
    /// Force every object to keep rotating in one direction
    pub locked_direction: Option<RotationDirection>,
    pub slider_policy: SliderPolicy,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            allow_hard_beats: true,
            allow_sliders: true,
            allow_impossible_sliders: false,
            slider_sample_divisor: 4,
            locked_direction: None,
            slider_policy: SliderPolicy::default(),
        }
    }
}

impl ConverterConfig {
    /// Load a configuration from a JSON file, missing fields take defaults
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |message: String| ConvertError::Load {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slider_sample_divisor < 1 {
            return Err(ConvertError::InvalidConfig(
                "slider_sample_divisor must be at least 1".to_string(),
            ));
        }

        let step = self.slider_policy.sample_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConvertError::InvalidConfig(format!(
                "sample_step must be a positive number, got {}",
                step
            )));
        }

        let speed = self.slider_policy.max_angular_speed;
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConvertError::InvalidConfig(format!(
                "max_angular_speed must be a non-negative number, got {}",
                speed
            )));
        }

        Ok(())
    }
}
