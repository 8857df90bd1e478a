//! Positional sampling along a slider's curve

use rosu_map::util::Pos;

/// A curve that can be sampled by progress along its length
///
/// Positions are offsets from the object's head position.
pub trait PathCurve: Send + Sync {
    /// Offset at `progress` in [0, 1]
    fn position_at(&self, progress: f64) -> Pos;
}

impl<F> PathCurve for F
where
    F: Fn(f64) -> Pos + Send + Sync,
{
    fn position_at(&self, progress: f64) -> Pos {
        self(progress)
    }
}

/// Arc-length parameterised polyline over precomputed path points
#[derive(Debug, Clone, Default)]
pub struct PolylineCurve {
    points: Vec<Pos>,
    /// Cumulative length up to each point
    lengths: Vec<f64>,
}

impl PolylineCurve {
    pub fn new(points: Vec<Pos>) -> Self {
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;

        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                let prev = points[i - 1];
                let dx = (point.x - prev.x) as f64;
                let dy = (point.y - prev.y) as f64;
                total += (dx * dx + dy * dy).sqrt();
            }
            lengths.push(total);
        }

        Self { points, lengths }
    }

    pub fn points(&self) -> &[Pos] {
        &self.points
    }

    /// Total length of the polyline in osu!pixels
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }
}

impl PathCurve for PolylineCurve {
    fn position_at(&self, progress: f64) -> Pos {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Pos { x: 0.0, y: 0.0 },
        };

        let total = self.length();
        if total <= 0.0 || progress.is_nan() {
            return first;
        }

        let distance = progress.clamp(0.0, 1.0) * total;

        // First point whose cumulative length reaches the target distance
        let idx = self.lengths.partition_point(|&len| len < distance);
        if idx == 0 {
            return first;
        }
        if idx >= self.points.len() {
            return last;
        }

        let (p0, p1) = (self.points[idx - 1], self.points[idx]);
        let (d0, d1) = (self.lengths[idx - 1], self.lengths[idx]);
        let span = d1 - d0;
        let frac = if span > 0.0 { ((distance - d0) / span) as f32 } else { 0.0 };

        Pos {
            x: p0.x + (p1.x - p0.x) * frac,
            y: p0.y + (p1.y - p0.y) * frac,
        }
    }
}
