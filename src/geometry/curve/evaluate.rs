use crate::math::{remap, Point};

use super::Curve;

/// Segment bracketing an evaluation query.
///
/// `first` and `last` are consecutive key ids; `t` is the local parameter in
/// `[0, 1]` within that segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationKeys {
    pub first: usize,
    pub last: usize,
    pub t: f32,
}

impl Curve {
    /// Position used when an evaluation is attempted on an invalid curve.
    fn degenerate_point(&self) -> Point {
        self.keys.first().map_or(Point::ZERO, |k| k.control)
    }

    /// Maps a global percent `t` to its segment and local parameter.
    ///
    /// `t` is clamped to `[0, 1]`; the curve must be valid.
    #[must_use]
    pub fn find_evaluation_keys_id_by_percent(&self, t: f32) -> EvaluationKeys {
        debug_assert!(self.is_valid(), "evaluation requires at least 2 keys");
        let segments = self.segments_count().max(1);
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        #[allow(clippy::cast_precision_loss)]
        let scaled = t * segments as f32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segment = (scaled.floor() as usize).min(segments - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = scaled - segment as f32;

        EvaluationKeys {
            first: segment,
            last: segment + 1,
            t: local,
        }
    }

    /// Evaluates the curve at global percent `t` in `[0, 1]`.
    ///
    /// The curve must be valid; on an invalid curve this returns the single
    /// key's control, or the origin when empty.
    #[must_use]
    pub fn evaluate_by_percent(&self, t: f32) -> Point {
        debug_assert!(self.is_valid(), "evaluate_by_percent on a curve with < 2 keys");
        if !self.is_valid() {
            return self.degenerate_point();
        }
        let keys = self.find_evaluation_keys_id_by_percent(t);
        self.segment_unchecked(keys.first).eval(keys.t)
    }

    /// Derivative of the curve with respect to the local segment parameter
    /// at global percent `t`.
    #[must_use]
    pub fn evaluate_tangent_by_percent(&self, t: f32) -> Point {
        debug_assert!(self.is_valid(), "evaluate_tangent_by_percent on a curve with < 2 keys");
        if !self.is_valid() {
            return Point::ZERO;
        }
        let keys = self.find_evaluation_keys_id_by_percent(t);
        self.segment_unchecked(keys.first).derivative(keys.t)
    }

    /// Maps an arc-length distance to its segment and local parameter.
    ///
    /// `distance` is clamped to `[0, length]`. The local parameter is the
    /// linear remap of the distance between the bracketing key distances, so
    /// the cached length must be up to date.
    #[must_use]
    pub fn find_evaluation_keys_id_by_distance(&self, distance: f32) -> EvaluationKeys {
        debug_assert!(self.is_valid(), "evaluation requires at least 2 keys");
        debug_assert!(
            !self.length.is_dirty(),
            "distance evaluation on a curve with a stale length"
        );
        let length = self.length().max(0.0);
        let distance = if distance.is_nan() {
            0.0
        } else {
            distance.clamp(0.0, length)
        };

        let upper = self.keys.partition_point(|k| k.distance <= distance);
        let first = upper.saturating_sub(1).min(self.segments_count().max(1) - 1);
        let (start, end) = (self.keys[first].distance, self.keys[first + 1].distance);

        EvaluationKeys {
            first,
            last: first + 1,
            t: remap(distance, start, end, 0.0, 1.0).clamp(0.0, 1.0),
        }
    }

    /// Evaluates the curve at arc-length `distance` from its start.
    ///
    /// Uses the cached key distances; call [`Curve::compute_length`] (or
    /// [`Curve::get_length`]) after mutating the curve.
    #[must_use]
    pub fn evaluate_by_distance(&self, distance: f32) -> Point {
        debug_assert!(self.is_valid(), "evaluate_by_distance on a curve with < 2 keys");
        if !self.is_valid() {
            return self.degenerate_point();
        }
        let keys = self.find_evaluation_keys_id_by_distance(distance);
        #[allow(clippy::cast_precision_loss)]
        let percent = (keys.first as f32 + keys.t) / self.segments_count() as f32;
        self.evaluate_by_percent(percent)
    }

    /// Finds the segment whose control X values straddle `time`.
    ///
    /// The returned `t` is the linear estimate of the local parameter, used as
    /// a fallback by [`Curve::evaluate_by_time`]. Control X values must be
    /// non-decreasing along the curve.
    #[must_use]
    pub fn find_evaluation_keys_id_by_time(&self, time: f32) -> EvaluationKeys {
        debug_assert!(self.is_valid(), "evaluation requires at least 2 keys");
        let upper = self.keys.partition_point(|k| k.control.x <= time);
        let first = upper.saturating_sub(1).min(self.segments_count().max(1) - 1);
        let (start, end) = (self.keys[first].control.x, self.keys[first + 1].control.x);

        EvaluationKeys {
            first,
            last: first + 1,
            t: remap(time, start, end, 0.0, 1.0).clamp(0.0, 1.0),
        }
    }

    /// Evaluates the curve as a function graph `y = f(time)` over the X axis.
    ///
    /// Times before the first key or after the last key clamp to that key's
    /// control. Inside the curve, `X(t) = time` is solved by bisection using
    /// the curve's [`SamplingParams`](crate::SamplingParams); when it does not
    /// converge, the linear estimate of `t` is used instead.
    #[must_use]
    pub fn evaluate_by_time(&self, time: f32) -> Point {
        debug_assert!(self.is_valid(), "evaluate_by_time on a curve with < 2 keys");
        if !self.is_valid() {
            return self.degenerate_point();
        }
        let first = self.keys[0].control;
        let last = self.keys[self.keys.len() - 1].control;
        if time.is_nan() || time <= first.x {
            return first;
        }
        if time >= last.x {
            return last;
        }

        let keys = self.find_evaluation_keys_id_by_time(time);
        let segment = self.segment_unchecked(keys.first);
        let t = match segment.solve_t_for_x(
            time,
            self.params.time_max_iterations,
            self.params.time_epsilon,
        ) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(
                    %err,
                    time,
                    segment = keys.first,
                    "time inversion failed, using linear estimate"
                );
                keys.t
            }
        };
        segment.eval(t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::geometry::{Curve, CurveKey, TangentMode};
    use crate::math::Point;

    fn flat_line() -> Curve {
        Curve::from_keys(vec![
            CurveKey::from_control(Point::new(0.0, 0.0)),
            CurveKey::from_control(Point::new(10.0, 0.0)),
        ])
    }

    fn wavy() -> Curve {
        Curve::from_keys(vec![
            CurveKey::new(
                Point::new(0.0, 0.0),
                Point::new(-2.0, 0.0),
                Point::new(2.0, 4.0),
                TangentMode::Mirrored,
            ),
            CurveKey::new(
                Point::new(5.0, 2.0),
                Point::new(-1.0, 1.0),
                Point::new(1.0, -3.0),
                TangentMode::Broken,
            ),
            CurveKey::from_control(Point::new(12.0, -1.0)),
            CurveKey::new(
                Point::new(15.0, 6.0),
                Point::new(-3.0, 0.0),
                Point::new(3.0, 0.0),
                TangentMode::Aligned,
            ),
        ])
    }

    #[test]
    fn flat_line_midpoint() {
        let p = flat_line().evaluate_by_percent(0.5);
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn endpoints_interpolate_controls() {
        let curve = wavy();
        assert_eq!(curve.evaluate_by_percent(0.0), curve.keys()[0].control);
        assert_eq!(curve.evaluate_by_percent(1.0), curve.keys()[3].control);
    }

    #[test]
    fn interior_keys_are_hit() {
        let curve = wavy();
        let p = curve.evaluate_by_percent(1.0 / 3.0);
        assert!(p.approx_eq(curve.keys()[1].control, 1e-4), "{p:?}");
        let p = curve.evaluate_by_percent(2.0 / 3.0);
        assert!(p.approx_eq(curve.keys()[2].control, 1e-4), "{p:?}");
    }

    #[test]
    fn percent_is_clamped() {
        let curve = wavy();
        assert_eq!(curve.evaluate_by_percent(-3.0), curve.keys()[0].control);
        assert_eq!(curve.evaluate_by_percent(7.0), curve.keys()[3].control);
    }

    #[test]
    fn find_keys_by_percent() {
        let curve = wavy();
        let keys = curve.find_evaluation_keys_id_by_percent(0.5);
        assert_eq!((keys.first, keys.last), (1, 2));
        assert_abs_diff_eq!(keys.t, 0.5, epsilon = 1e-6);

        let keys = curve.find_evaluation_keys_id_by_percent(1.0);
        assert_eq!((keys.first, keys.last), (2, 3));
        assert_abs_diff_eq!(keys.t, 1.0);

        let keys = curve.find_evaluation_keys_id_by_percent(0.0);
        assert_eq!((keys.first, keys.last), (0, 1));
        assert_abs_diff_eq!(keys.t, 0.0);
    }

    #[test]
    fn tangent_of_flat_line_points_along_x() {
        let d = flat_line().evaluate_tangent_by_percent(0.0);
        assert_abs_diff_eq!(d.x, 3.0);
        assert_abs_diff_eq!(d.y, 0.0);
    }

    #[test]
    fn distance_endpoints_and_clamping() {
        let mut curve = wavy();
        let length = curve.get_length();
        let start = curve.evaluate_by_distance(0.0);
        let end = curve.evaluate_by_distance(length);
        assert!(start.approx_eq(curve.keys()[0].control, 1e-5));
        assert!(end.approx_eq(curve.keys()[3].control, 1e-5));
        assert_eq!(curve.evaluate_by_distance(-5.0), start);
        assert_eq!(curve.evaluate_by_distance(length * 2.0), end);
    }

    #[test]
    fn distance_on_straight_line_is_uniform() {
        let mut curve = Curve::from_keys(vec![
            CurveKey::new(
                Point::new(0.0, 0.0),
                Point::ZERO,
                Point::new(10.0 / 3.0, 0.0),
                TangentMode::Broken,
            ),
            CurveKey::new(
                Point::new(10.0, 0.0),
                Point::new(-10.0 / 3.0, 0.0),
                Point::ZERO,
                TangentMode::Broken,
            ),
        ]);
        assert_abs_diff_eq!(curve.get_length(), 10.0, epsilon = 1e-3);
        let p = curve.evaluate_by_distance(2.5);
        assert_abs_diff_eq!(p.x, 2.5, epsilon = 1e-3);
    }

    #[test]
    fn distance_at_key_hits_key() {
        let mut curve = wavy();
        curve.compute_length();
        let d = curve.keys()[2].distance;
        let p = curve.evaluate_by_distance(d);
        assert!(p.approx_eq(curve.keys()[2].control, 1e-3), "{p:?}");
    }

    fn ease_in_out() -> Curve {
        Curve::from_keys(vec![
            CurveKey::new(
                Point::new(0.0, 0.0),
                Point::ZERO,
                Point::new(0.42, 0.0),
                TangentMode::Broken,
            ),
            CurveKey::new(
                Point::new(1.0, 1.0),
                Point::new(-0.42, 0.0),
                Point::ZERO,
                TangentMode::Broken,
            ),
        ])
    }

    #[test]
    fn time_evaluation_matches_x() {
        let curve = ease_in_out();
        for i in 1..10 {
            #[allow(clippy::cast_precision_loss)]
            let time = i as f32 / 10.0;
            let p = curve.evaluate_by_time(time);
            assert_abs_diff_eq!(p.x, time, epsilon = 1e-4);
        }
    }

    #[test]
    fn time_evaluation_is_symmetric() {
        let curve = ease_in_out();
        let mid = curve.evaluate_by_time(0.5);
        assert_abs_diff_eq!(mid.y, 0.5, epsilon = 1e-4);
        let a = curve.evaluate_by_time(0.2).y;
        let b = curve.evaluate_by_time(0.8).y;
        assert_abs_diff_eq!(a + b, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn time_outside_range_clamps() {
        let curve = ease_in_out();
        assert_eq!(curve.evaluate_by_time(-1.0), Point::new(0.0, 0.0));
        assert_eq!(curve.evaluate_by_time(2.0), Point::new(1.0, 1.0));
        assert_eq!(curve.evaluate_by_time(f32::NAN), Point::new(0.0, 0.0));
    }

    #[test]
    fn time_selects_correct_segment() {
        let curve = Curve::from_keys(vec![
            CurveKey::from_control(Point::new(0.0, 0.0)),
            CurveKey::from_control(Point::new(1.0, 2.0)),
            CurveKey::from_control(Point::new(3.0, 2.0)),
        ]);
        let keys = curve.find_evaluation_keys_id_by_time(2.0);
        assert_eq!((keys.first, keys.last), (1, 2));
        let p = curve.evaluate_by_time(1.0);
        assert!(p.approx_eq(Point::new(1.0, 2.0), 1e-4), "{p:?}");
        let p = curve.evaluate_by_time(2.0);
        assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-4);
    }
}
