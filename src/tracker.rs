//! Rotational continuity across converted objects

use crate::angle::delta_angle;
use crate::config::RotationDirection;

/// Resolves raw angles into a direction-consistent sequence
///
/// One tracker spans a whole converted beatmap. It is never shared between
/// unrelated beatmaps.
#[derive(Debug, Clone, Default)]
pub struct AngleTracker {
    last_angle: Option<f32>,
    locked_direction: Option<RotationDirection>,
}

impl AngleTracker {
    pub fn new(locked_direction: Option<RotationDirection>) -> Self {
        Self {
            last_angle: None,
            locked_direction,
        }
    }

    pub fn locked_direction(&self) -> Option<RotationDirection> {
        self.locked_direction
    }

    /// Last angle produced, if any
    pub fn last_angle(&self) -> Option<f32> {
        self.last_angle
    }

    /// Capture the continuity state so it can be restored later
    pub fn snapshot(&self) -> Option<f32> {
        self.last_angle
    }

    pub fn restore(&mut self, snapshot: Option<f32>) {
        self.last_angle = snapshot;
    }

    /// Resolve `target` against the previous angle and record the result
    pub fn resolve(&mut self, target: f32) -> f32 {
        let (last, direction) = match (self.last_angle, self.locked_direction) {
            (Some(last), Some(direction)) => (last, direction),
            _ => {
                self.last_angle = Some(target);
                return target;
            }
        };

        let diff = delta_angle(target, last);
        let resolved = if direction.matches(diff) {
            target
        } else {
            // Keep turning the locked way instead of snapping back
            last - diff
        };

        self.last_angle = Some(resolved);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn free_rotation_is_identity() {
        let mut tracker = AngleTracker::new(None);
        for angle in [0.0, 350.0, 10.0, 180.0, 179.0, -40.0, 720.5] {
            assert_eq!(tracker.resolve(angle), angle);
        }
        assert_eq!(tracker.last_angle(), Some(720.5));
    }

    #[test]
    fn first_locked_angle_passes_through() {
        let mut tracker = AngleTracker::new(Some(RotationDirection::Clockwise));
        assert_eq!(tracker.resolve(123.0), 123.0);
    }

    #[test]
    fn clockwise_lock_mirrors_reversals() {
        let mut tracker = AngleTracker::new(Some(RotationDirection::Clockwise));
        tracker.resolve(90.0);
        // Moving clockwise is kept
        assert_approx_eq!(tracker.resolve(120.0), 120.0, 1e-4);
        // 30° counter-clockwise becomes 30° further clockwise
        assert_approx_eq!(tracker.resolve(90.0), 150.0, 1e-4);
    }

    #[test]
    fn counter_clockwise_lock_mirrors_reversals() {
        let mut tracker = AngleTracker::new(Some(RotationDirection::CounterClockwise));
        tracker.resolve(0.0);
        assert_approx_eq!(tracker.resolve(350.0), 350.0, 1e-4);
        assert_approx_eq!(tracker.resolve(10.0), 330.0, 1e-4);
    }

    #[test]
    fn zero_delta_under_clockwise_lock_keeps_last_angle() {
        let mut tracker = AngleTracker::new(Some(RotationDirection::Clockwise));
        tracker.resolve(10.0);
        assert_eq!(tracker.resolve(10.0), 10.0);
        // A full turn away is the same direction, the stored angle is kept
        assert_eq!(tracker.resolve(370.0), 10.0);
        assert_eq!(tracker.last_angle(), Some(10.0));
    }

    #[test]
    fn zero_delta_under_counter_clockwise_lock_takes_target() {
        let mut tracker = AngleTracker::new(Some(RotationDirection::CounterClockwise));
        tracker.resolve(10.0);
        assert_approx_eq!(tracker.resolve(30.0), -10.0, 1e-4);
        // Same direction as -10 but a full turn apart, the raw target wins
        assert_eq!(tracker.resolve(350.0), 350.0);
        assert_eq!(tracker.last_angle(), Some(350.0));
    }

    #[test]
    fn locked_sequence_never_reverses() {
        let raw = [
            0.0, 45.0, 10.0, 300.0, 200.0, 210.0, 90.0, 91.0, 12.0, 350.0, 170.0, 190.0,
        ];

        for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let mut tracker = AngleTracker::new(Some(direction));
            let resolved: Vec<f32> = raw.iter().map(|&a| tracker.resolve(a)).collect();

            for pair in resolved.windows(2) {
                let delta = delta_angle(pair[1], pair[0]);
                // Half turns have no direction
                if (delta.abs() - 180.0).abs() < 1e-3 {
                    continue;
                }
                match direction {
                    RotationDirection::Clockwise => assert!(delta >= 0.0, "{:?}", pair),
                    RotationDirection::CounterClockwise => assert!(delta <= 0.0, "{:?}", pair),
                }
            }
        }
    }

    #[test]
    fn restore_resets_baseline() {
        let mut tracker = AngleTracker::new(Some(RotationDirection::Clockwise));
        tracker.resolve(10.0);
        let snapshot = tracker.snapshot();

        tracker.resolve(100.0);
        tracker.resolve(170.0);
        tracker.restore(snapshot);

        assert_eq!(tracker.last_angle(), Some(10.0));
        assert_approx_eq!(tracker.resolve(0.0), 20.0, 1e-4);
    }
}
