pub mod bezier;
pub mod point;

pub use point::{ParsePointError, Point, PointSpace};

/// 2D vector type used for segment arithmetic.
pub type Vector2 = nalgebra::Vector2<f32>;

/// 2D nalgebra point type, convertible to and from [`Point`].
pub type Point2 = nalgebra::Point2<f32>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f32 = 1e-6;

/// Linearly maps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// A degenerate input range maps everything to `out_min`.
#[must_use]
pub fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() < f32::EPSILON {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_midpoint() {
        assert!((remap(5.0, 0.0, 10.0, 100.0, 200.0) - 150.0).abs() < TOLERANCE);
    }

    #[test]
    fn remap_inverted_output_range() {
        assert!((remap(0.25, 0.0, 1.0, 1.0, 0.0) - 0.75).abs() < TOLERANCE);
    }

    #[test]
    fn remap_degenerate_input_range() {
        assert!((remap(3.0, 2.0, 2.0, 7.0, 9.0) - 7.0).abs() < TOLERANCE);
    }
}
