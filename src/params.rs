/// Parameters controlling sampling accuracy of curve queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Percent increment used when accumulating arc length.
    pub length_step: f32,
    /// Percent increment used by nearest-point searches.
    pub nearest_step: f32,
    /// Maximum bisection iterations when inverting `X(t)` for time evaluation.
    pub time_max_iterations: u32,
    /// Convergence tolerance for time evaluation, relative to the segment's X span.
    pub time_epsilon: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            length_step: 1.0 / 100.0,
            nearest_step: 1.0 / 30.0,
            time_max_iterations: 32,
            time_epsilon: 1e-5,
        }
    }
}

/// Upper bound on samples per query.
pub const MAX_STEP_COUNT: usize = 1 << 20;

/// Number of samples needed to cover `[0, 1]` with increments of `step`.
///
/// Non-positive or non-finite steps fall back to a single interval.
#[must_use]
pub(crate) fn step_count(step: f32) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 1;
    }
    // 1 / 0.01 is slightly above 100 in f32; snap near-integers before ceil.
    let exact = 1.0 / step;
    let rounded = exact.round();
    let n = if (exact - rounded).abs() < 1e-3 {
        rounded
    } else {
        exact.ceil()
    };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let n = n.min(MAX_STEP_COUNT as f32) as usize;
    n.max(1)
}
