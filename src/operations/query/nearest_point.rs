use crate::error::Result;
use crate::geometry::Curve;
use crate::math::Point;
use crate::params::step_count;

/// Result of a nearest point query.
#[derive(Debug, Clone, Copy)]
pub struct NearestPointResult {
    /// The nearest sampled point on the curve.
    pub point: Point,
    /// Global percent of the nearest sample.
    pub percent: f32,
    /// Squared distance from the query point to `point`.
    pub distance_squared: f32,
}

/// Finds the sampled curve point closest to a given point.
///
/// This is a linear scan over `1 / step` samples; coarser steps trade
/// accuracy for speed.
pub struct NearestPoint {
    point: Point,
    step: Option<f32>,
}

impl NearestPoint {
    /// Creates a new `NearestPoint` query using the curve's default step.
    #[must_use]
    pub fn new(point: Point) -> Self {
        Self { point, step: None }
    }

    /// Overrides the sampling step (in percent).
    #[must_use]
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = Some(step);
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than two keys.
    pub fn execute(&self, curve: &Curve) -> Result<NearestPointResult> {
        curve.ensure_valid()?;
        let steps = step_count(self.step.unwrap_or(curve.params().nearest_step));

        let start = curve.evaluate_by_percent(0.0);
        let mut best = NearestPointResult {
            point: start,
            percent: 0.0,
            distance_squared: (start - self.point).length_squared(),
        };

        for i in 1..=steps {
            #[allow(clippy::cast_precision_loss)]
            let percent = i as f32 / steps as f32;
            let sample = curve.evaluate_by_percent(percent);
            let distance_squared = (sample - self.point).length_squared();
            if distance_squared < best.distance_squared {
                best = NearestPointResult {
                    point: sample,
                    percent,
                    distance_squared,
                };
            }
        }

        Ok(best)
    }
}
