//! Cubic Bezier segment math.
//!
//! Evaluation uses the Bernstein basis on nalgebra vectors. The curve layer
//! builds one [`CubicSegment`] per pair of consecutive keys.

use crate::error::{NumericError, Result};

use super::{Point, Vector2, TOLERANCE};

/// Bernstein basis weights `[(1-t)^3, 3(1-t)^2 t, 3(1-t) t^2, t^3]`.
#[must_use]
pub fn bernstein(t: f32) -> [f32; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * s * s * t, 3.0 * s * t * t, t * t * t]
}

/// Four control points of a cubic Bezier segment, in global space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Vector2,
    pub p1: Vector2,
    pub p2: Vector2,
    pub p3: Vector2,
}

impl CubicSegment {
    /// Creates a segment from its four control points.
    #[must_use]
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Evaluates the segment at local parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn eval(&self, t: f32) -> Point {
        let [a, b, c, d] = bernstein(t);
        (self.p0 * a + self.p1 * b + self.p2 * c + self.p3 * d).into()
    }

    /// Evaluates only the X component at `t`.
    #[must_use]
    pub fn eval_x(&self, t: f32) -> f32 {
        let [a, b, c, d] = bernstein(t);
        self.p0.x * a + self.p1.x * b + self.p2.x * c + self.p3.x * d
    }

    /// First derivative with respect to `t`.
    #[must_use]
    pub fn derivative(&self, t: f32) -> Point {
        let s = 1.0 - t;
        let d = (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t);
        d.into()
    }

    /// Parameters in the open interval `(0, 1)` where either coordinate of
    /// the derivative vanishes.
    #[must_use]
    pub fn axis_extrema(&self) -> Vec<f32> {
        let a = self.p1 - self.p0;
        let b = self.p2 - self.p1;
        let c = self.p3 - self.p2;

        let mut params = Vec::with_capacity(4);
        for axis in 0..2 {
            // B'(t) / 3 = (a - 2b + c) t^2 + 2 (b - a) t + a
            let qa = a[axis] - 2.0 * b[axis] + c[axis];
            let qb = 2.0 * (b[axis] - a[axis]);
            let qc = a[axis];
            params.extend(
                quadratic_roots(qa, qb, qc)
                    .into_iter()
                    .flatten()
                    .filter(|t| *t > 0.0 && *t < 1.0),
            );
        }
        params
    }

    /// Tight axis-aligned bounds of the segment as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Point, Point) {
        let start: Point = self.p0.into();
        let end: Point = self.p3.into();
        let mut min = start.min(end);
        let mut max = start.max(end);
        for t in self.axis_extrema() {
            let p = self.eval(t);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Finds the parameter `t` with `X(t) == x` by bisection.
    ///
    /// `X` is assumed to move from `p0.x` to `p3.x` without folding back; the
    /// bracket is oriented from the sign of `p3.x - p0.x`. The convergence
    /// test scales `epsilon` by the segment's X span, so the accepted error is
    /// relative to the span however narrow it is. The tolerance never drops
    /// below a few ulps of the X coordinates, which `f32` cannot resolve.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NonConvergent`] if the residual is still above
    /// the tolerance after `max_iterations` halvings.
    pub fn solve_t_for_x(&self, x: f32, max_iterations: u32, epsilon: f32) -> Result<f32> {
        let increasing = self.p3.x >= self.p0.x;
        let span = (self.p3.x - self.p0.x).abs();
        let magnitude = self.p0.x.abs().max(self.p3.x.abs());
        let tolerance = (epsilon * span)
            .max(4.0 * f32::EPSILON * magnitude)
            .max(f32::MIN_POSITIVE);

        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        for _ in 0..max_iterations {
            let mid = 0.5 * (lo + hi);
            let value = self.eval_x(mid);
            if (value - x).abs() <= tolerance {
                return Ok(mid);
            }
            if (value < x) == increasing {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let mid = 0.5 * (lo + hi);
        let residual = (self.eval_x(mid) - x).abs();
        if residual <= tolerance {
            Ok(mid)
        } else {
            Err(NumericError::NonConvergent {
                iterations: max_iterations,
                residual,
            }
            .into())
        }
    }
}

/// Real roots of `a t^2 + b t + c`, degrading to the linear case.
fn quadratic_roots(a: f32, b: f32, c: f32) -> [Option<f32>; 2] {
    if a.abs() < TOLERANCE {
        if b.abs() < TOLERANCE {
            return [None, None];
        }
        return [Some(-c / b), None];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let sq = disc.sqrt();
    [Some((-b + sq) / (2.0 * a)), Some((-b - sq) / (2.0 * a))]
}
