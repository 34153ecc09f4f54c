use crate::params::step_count;

use super::Curve;

impl Curve {
    /// Recomputes the arc length with the curve's default length step.
    pub fn compute_length(&mut self) {
        self.compute_length_with_step(self.params.length_step);
    }

    /// Recomputes the arc length by sampling at `step` percent increments.
    ///
    /// Accumulates chord lengths between consecutive samples. Each key's
    /// `distance` becomes the accumulated length at the sample nearest to the
    /// key's percent position. On an invalid curve the length and all key
    /// distances are zero.
    pub fn compute_length_with_step(&mut self, step: f32) {
        if !self.is_valid() {
            for key in &mut self.keys {
                key.distance = 0.0;
            }
            self.length.set(0.0);
            return;
        }

        let steps = step_count(step);
        let segments = self.segments_count();
        // Sample index nearest to key k, at percent k / segments.
        let key_sample = |k: usize| (k * steps + segments / 2) / segments;

        let mut distances = vec![0.0_f32; self.keys.len()];
        let mut next_key = 0;
        let mut total = 0.0_f32;
        let mut previous = self.evaluate_by_percent(0.0);

        for i in 0..=steps {
            if i > 0 {
                #[allow(clippy::cast_precision_loss)]
                let current = self.evaluate_by_percent(i as f32 / steps as f32);
                total += previous.distance_to(current);
                previous = current;
            }
            while next_key < distances.len() && key_sample(next_key) == i {
                distances[next_key] = total;
                next_key += 1;
            }
        }

        for (key, distance) in self.keys.iter_mut().zip(distances) {
            key.distance = distance;
        }
        self.length.set(total);
        tracing::debug!(
            length = total,
            keys = self.keys.len(),
            steps,
            "curve length computed"
        );
    }

    /// Returns the arc length, recomputing it first if stale.
    pub fn get_length(&mut self) -> f32 {
        if self.length.is_dirty() {
            self.compute_length();
        }
        *self.length.cached()
    }

    /// Returns the last computed arc length without recomputing.
    ///
    /// The value is stale after any mutation until [`Curve::compute_length`]
    /// or [`Curve::get_length`] runs.
    #[must_use]
    pub fn length(&self) -> f32 {
        *self.length.cached()
    }

    /// Returns `true` if the cached length is stale.
    #[must_use]
    pub fn is_length_dirty(&self) -> bool {
        self.length.is_dirty()
    }

    /// Arc-length distance of global percent `t`, interpolated linearly
    /// between the cached distances of the bracketing keys.
    #[must_use]
    pub fn distance_at_percent(&self, t: f32) -> f32 {
        if !self.is_valid() {
            return 0.0;
        }
        let keys = self.find_evaluation_keys_id_by_percent(t);
        let start = self.keys[keys.first].distance;
        let end = self.keys[keys.last].distance;
        start + (end - start) * keys.t
    }
}
