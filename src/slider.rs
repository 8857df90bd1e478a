//! Discretization of curved paths into angular sliders

use std::fmt;

use crate::angle::{delta_angle, hit_object_angle};
use crate::config::{ConverterConfig, SliderPolicy};
use crate::difficulty::DifficultyInfo;
use crate::path::{PolarSliderPath, SliderNode};
use crate::tracker::AngleTracker;
use crate::types::{SourcePath, TauSlider};

/// Why a path-bearing object was turned into a beat instead
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Demotion {
    /// Slider conversion is switched off
    Disabled,
    /// Shorter than the approach-rate based minimum
    TooShort { duration: f64, min_duration: f64 },
    /// Turns faster than the policy allows between two samples
    TooFast { time: f64, speed: f32 },
}

impl fmt::Display for Demotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Demotion::Disabled => write!(f, "sliders disabled"),
            Demotion::TooShort { duration, min_duration } => {
                write!(f, "duration {:.1}ms below minimum {:.1}ms", duration, min_duration)
            }
            Demotion::TooFast { time, speed } => {
                write!(f, "angular speed {:.3}°/ms at {:.1}ms", speed, time)
            }
        }
    }
}

/// Samples slider paths into polar slider paths
#[derive(Debug, Clone, Copy)]
pub struct SliderDiscretizer {
    allow_sliders: bool,
    allow_impossible_sliders: bool,
    sample_divisor: u32,
    policy: SliderPolicy,
}

impl SliderDiscretizer {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            allow_sliders: config.allow_sliders,
            allow_impossible_sliders: config.allow_impossible_sliders,
            sample_divisor: config.slider_sample_divisor.max(1),
            policy: config.slider_policy,
        }
    }

    /// Shortest path duration that is still converted into a slider
    pub fn min_duration(&self, difficulty: &DifficultyInfo) -> f64 {
        difficulty.preempt() / self.sample_divisor as f64
    }

    /// Convert `path` into an angular slider
    ///
    /// On demotion the tracker is left exactly as it was before the call.
    pub fn discretize(
        &self,
        path: &SourcePath,
        difficulty: &DifficultyInfo,
        tracker: &mut AngleTracker,
    ) -> Result<TauSlider, Demotion> {
        if !self.allow_sliders {
            return Err(Demotion::Disabled);
        }

        let min_duration = self.min_duration(difficulty);
        // Also rejects NaN and infinite durations
        if !(path.duration.is_finite() && path.duration >= min_duration) {
            return Err(Demotion::TooShort {
                duration: path.duration,
                min_duration,
            });
        }

        let snapshot = tracker.snapshot();
        let result = self.sample(path, tracker);
        if result.is_err() {
            tracker.restore(snapshot);
        }
        result
    }

    fn sample(&self, path: &SourcePath, tracker: &mut AngleTracker) -> Result<TauSlider, Demotion> {
        let duration = path.duration;
        let step = self.policy.sample_step;

        let mut nodes = Vec::new();
        let mut base_angle = 0.0;
        let mut last: Option<SliderNode> = None;

        let mut index = 0u64;
        loop {
            let time = index as f64 * step;
            if time >= duration {
                break;
            }

            let angle = tracker.resolve(hit_object_angle(path.position_at(time / duration)));
            if index == 0 {
                base_angle = angle;
            }

            let node = SliderNode::new(time, delta_angle(angle, base_angle));
            self.check_speed(last, node)?;

            nodes.push(node);
            last = Some(node);
            index += 1;
        }

        let end_angle = tracker.resolve(hit_object_angle(path.position_at(1.0)));
        let end = SliderNode::new(duration, delta_angle(end_angle, base_angle));
        self.check_speed(last, end)?;
        nodes.push(end);

        Ok(TauSlider {
            angle: base_angle,
            repeat_count: path.repeat_count,
            node_samples: path.node_samples.clone(),
            path: PolarSliderPath::new(nodes),
        })
    }

    fn check_speed(&self, prev: Option<SliderNode>, next: SliderNode) -> Result<(), Demotion> {
        if self.allow_impossible_sliders {
            return Ok(());
        }

        let Some(prev) = prev else {
            return Ok(());
        };

        let elapsed = (next.time - prev.time).abs() as f32;
        let speed = delta_angle(next.angle, prev.angle).abs() / elapsed;
        if speed > self.policy.max_angular_speed {
            return Err(Demotion::TooFast {
                time: next.time,
                speed,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotationDirection;
    use assert_approx_eq::assert_approx_eq;
    use rosu_map::util::Pos;

    /// Point on a circle around the playfield centre at `angle` degrees
    fn on_circle(radius: f32, angle: f32) -> Pos {
        let rad = angle.to_radians();
        Pos {
            x: 256.0 + radius * rad.sin(),
            y: 192.0 - radius * rad.cos(),
        }
    }

    /// Circular arc around the centre, sweeping `sweep` degrees over `duration`
    fn arc(start: f32, sweep: f32, duration: f64) -> SourcePath {
        let origin = on_circle(100.0, start);
        SourcePath {
            pos: origin,
            duration,
            repeat_count: 1,
            node_samples: vec![vec![], vec![], vec![]],
            curve: Box::new(move |progress: f64| {
                let p = on_circle(100.0, start + sweep * progress as f32);
                Pos {
                    x: p.x - origin.x,
                    y: p.y - origin.y,
                }
            }),
        }
    }

    fn discretizer(config: ConverterConfig) -> SliderDiscretizer {
        SliderDiscretizer::new(&config)
    }

    #[test]
    fn constant_speed_arc_becomes_slider() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();

        // 120° over 400ms is 0.3°/ms
        let slider = d
            .discretize(&arc(0.0, 120.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker)
            .unwrap();

        let nodes = slider.path.nodes();
        assert_eq!(nodes.len(), 21);
        assert_eq!(nodes[0].time, 0.0);
        assert_eq!(nodes[20].time, 400.0);
        assert_approx_eq!(nodes[0].angle, 0.0, 1e-4);
        for (i, pair) in nodes.windows(2).enumerate() {
            assert!(pair[1].angle > pair[0].angle, "node {} not increasing", i);
            assert_approx_eq!(pair[1].angle - pair[0].angle, 6.0, 1e-2);
        }
        assert_approx_eq!(slider.path.end_angle(), 120.0, 1e-2);
        assert_eq!(slider.repeat_count, 1);
        assert_eq!(slider.node_samples.len(), 3);
    }

    #[test]
    fn slider_angle_is_absolute_head_angle() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();

        let slider = d
            .discretize(&arc(90.0, 60.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker)
            .unwrap();

        assert_approx_eq!(slider.angle, 90.0, 1e-3);
        assert_approx_eq!(slider.path.nodes()[0].angle, 0.0, 1e-4);
        // Tracker ends on the absolute tail angle
        assert_approx_eq!(tracker.last_angle().unwrap(), 150.0, 1e-2);
    }

    #[test]
    fn final_node_lands_on_duration() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();

        let slider = d
            .discretize(&arc(0.0, 60.0, 410.0), &DifficultyInfo::new(5.0), &mut tracker)
            .unwrap();

        let nodes = slider.path.nodes();
        assert_eq!(nodes.len(), 22);
        assert_eq!(nodes[20].time, 400.0);
        assert_eq!(nodes[21].time, 410.0);
        assert_eq!(slider.duration(), 410.0);
    }

    #[test]
    fn too_short_is_demoted() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();

        // AR5 gives 1200ms, divided by 4
        assert_approx_eq!(d.min_duration(&DifficultyInfo::new(5.0)), 300.0);

        let result =
            d.discretize(&arc(0.0, 10.0, 299.0), &DifficultyInfo::new(5.0), &mut tracker);
        assert!(matches!(result, Err(Demotion::TooShort { .. })));
        assert_eq!(tracker.last_angle(), None);
    }

    #[test]
    fn malformed_durations_are_demoted() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();

        for duration in [0.0, -100.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result =
                d.discretize(&arc(0.0, 10.0, duration), &DifficultyInfo::new(5.0), &mut tracker);
            assert!(matches!(result, Err(Demotion::TooShort { .. })), "{}", duration);
        }
        assert_eq!(tracker.last_angle(), None);
    }

    #[test]
    fn disabled_sliders_are_demoted() {
        let d = discretizer(ConverterConfig {
            allow_sliders: false,
            ..Default::default()
        });
        let mut tracker = AngleTracker::default();

        let result =
            d.discretize(&arc(0.0, 120.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker);
        assert_eq!(result.unwrap_err(), Demotion::Disabled);
    }

    #[test]
    fn fast_turns_are_demoted_and_tracker_restored() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();
        tracker.resolve(33.0);

        // 30° every 20ms is 1.5°/ms
        let result =
            d.discretize(&arc(0.0, 600.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker);
        match result {
            Err(Demotion::TooFast { time, speed }) => {
                assert_eq!(time, 20.0);
                assert_approx_eq!(speed, 1.5, 1e-2);
            }
            other => panic!("expected TooFast, got {:?}", other),
        }
        assert_eq!(tracker.last_angle(), Some(33.0));
    }

    #[test]
    fn impossible_sliders_can_be_kept() {
        let d = discretizer(ConverterConfig {
            allow_impossible_sliders: true,
            ..Default::default()
        });
        let mut tracker = AngleTracker::default();

        let slider = d
            .discretize(&arc(0.0, 600.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker)
            .unwrap();
        assert_eq!(slider.path.len(), 21);
    }

    #[test]
    fn fast_tail_is_demoted() {
        let d = discretizer(ConverterConfig::default());
        let mut tracker = AngleTracker::default();

        // Smooth until 400ms, then the tail jumps to the opposite side
        let origin = on_circle(100.0, 0.0);
        let path = SourcePath {
            pos: origin,
            duration: 410.0,
            repeat_count: 0,
            node_samples: Vec::new(),
            curve: Box::new(move |progress: f64| {
                let angle = if progress >= 1.0 { 180.0 } else { 40.0 * progress as f32 };
                let p = on_circle(100.0, angle);
                Pos {
                    x: p.x - origin.x,
                    y: p.y - origin.y,
                }
            }),
        };

        let result = d.discretize(&path, &DifficultyInfo::new(5.0), &mut tracker);
        assert!(matches!(result, Err(Demotion::TooFast { time, .. }) if time == 410.0));
        assert_eq!(tracker.last_angle(), None);
    }

    #[test]
    fn locked_direction_keeps_matching_slider() {
        let config = ConverterConfig {
            locked_direction: Some(RotationDirection::Clockwise),
            ..Default::default()
        };
        let d = discretizer(config);
        let mut tracker = AngleTracker::new(Some(RotationDirection::Clockwise));

        let slider = d
            .discretize(&arc(0.0, 120.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker)
            .unwrap();
        assert_eq!(slider.path.len(), 21);
        assert_approx_eq!(slider.path.end_angle(), 120.0, 1e-2);
    }

    #[test]
    fn locked_direction_demotes_reversing_slider() {
        let config = ConverterConfig {
            locked_direction: Some(RotationDirection::Clockwise),
            ..Default::default()
        };
        let d = discretizer(config);
        let mut tracker = AngleTracker::new(Some(RotationDirection::Clockwise));

        // Each mirrored sample pushes further ahead than the last
        let result =
            d.discretize(&arc(180.0, -120.0, 400.0), &DifficultyInfo::new(5.0), &mut tracker);
        assert!(matches!(result, Err(Demotion::TooFast { .. })));
        assert_eq!(tracker.last_angle(), None);
    }

    #[test]
    fn divisor_scales_minimum_duration() {
        let d = discretizer(ConverterConfig {
            slider_sample_divisor: 1,
            ..Default::default()
        });
        assert_approx_eq!(d.min_duration(&DifficultyInfo::new(10.0)), 450.0);
        assert_approx_eq!(d.min_duration(&DifficultyInfo::new(0.0)), 1800.0);
    }
}
