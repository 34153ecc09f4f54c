mod evaluate;
pub mod index;
mod length;

pub use evaluate::EvaluationKeys;
pub use index::{key_to_point_id, point_to_key_id, PointKind};

use crate::error::{CurveError, Result};
use crate::math::bezier::CubicSegment;
use crate::math::{Point, PointSpace};
use crate::operations::query::{Aabb, BoundingBox, NearestPoint};
use crate::params::SamplingParams;

use super::{CurveKey, Dirty, TangentMode, TangentSide};

/// A piecewise cubic Bezier curve.
///
/// Keys are stored in path order. Points (controls and tangents) are not
/// stored separately; they are addressed through the index scheme in
/// [`index`].
///
/// Any structural or positional mutation marks the cached length dirty. Read
/// paths that depend on arc length (`evaluate_by_distance`,
/// `get_nearest_distance_to`) use the cached key distances, so callers sharing
/// a curve by reference should compute the length first.
#[derive(Debug, Clone, Default)]
pub struct Curve {
    keys: Vec<CurveKey>,
    length: Dirty<f32>,
    params: SamplingParams,
}

impl FromIterator<CurveKey> for Curve {
    fn from_iter<I: IntoIterator<Item = CurveKey>>(iter: I) -> Self {
        Self::from_keys(iter.into_iter().collect())
    }
}

impl Curve {
    /// Creates an empty curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a curve from keys in path order.
    #[must_use]
    pub fn from_keys(keys: Vec<CurveKey>) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }

    /// Replaces the sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the sampling parameters used by default-step operations.
    #[must_use]
    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    /// Returns all keys in path order.
    #[must_use]
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn get_keys_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of addressable points (controls and tangents).
    #[must_use]
    pub fn get_points_count(&self) -> usize {
        index::points_count(self.keys.len())
    }

    // --- Validity ---

    /// Returns `true` if the curve has at least two keys.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.keys.len() >= 2
    }

    /// Returns `true` if `key_id` addresses an existing key.
    #[must_use]
    pub fn is_valid_key_id(&self, key_id: usize) -> bool {
        key_id < self.keys.len()
    }

    /// Returns `true` if `point_id` addresses an existing point.
    #[must_use]
    pub fn is_valid_point_id(&self, point_id: usize) -> bool {
        point_id < self.get_points_count()
    }

    /// Returns `true` if `point_id` addresses a control point.
    #[must_use]
    pub fn is_control_point_id(&self, point_id: usize) -> bool {
        index::is_control_point_id(point_id)
    }

    /// Checks that the curve can be evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveState`] if the curve has fewer than two keys.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CurveError::InvalidCurveState {
                keys: self.keys.len(),
            }
            .into())
        }
    }

    fn check_key_id(&self, key_id: usize) -> Result<()> {
        if self.is_valid_key_id(key_id) {
            Ok(())
        } else {
            Err(CurveError::InvalidIndex {
                kind: "key",
                index: key_id,
                len: self.keys.len(),
            }
            .into())
        }
    }

    fn check_point_id(&self, point_id: usize) -> Result<()> {
        if self.is_valid_point_id(point_id) {
            Ok(())
        } else {
            Err(CurveError::InvalidIndex {
                kind: "point",
                index: point_id,
                len: self.get_points_count(),
            }
            .into())
        }
    }

    // --- Keys ---

    /// Returns the key at `key_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `key_id` is out of range.
    pub fn get_key(&self, key_id: usize) -> Result<&CurveKey> {
        self.check_key_id(key_id)?;
        Ok(&self.keys[key_id])
    }

    /// Replaces the key at `key_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `key_id` is out of range.
    pub fn set_key(&mut self, key_id: usize, key: CurveKey) -> Result<()> {
        self.check_key_id(key_id)?;
        self.keys[key_id] = key;
        self.length.invalidate();
        Ok(())
    }

    /// Appends a key at the end of the curve.
    pub fn add_key(&mut self, key: CurveKey) {
        self.keys.push(key);
        self.length.invalidate();
    }

    /// Inserts a key before position `index` (`index == len` appends).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `index > len`.
    pub fn insert_key(&mut self, index: usize, key: CurveKey) -> Result<()> {
        if index > self.keys.len() {
            return Err(CurveError::InvalidIndex {
                kind: "insert position",
                index,
                len: self.keys.len(),
            }
            .into());
        }
        self.keys.insert(index, key);
        self.length.invalidate();
        Ok(())
    }

    /// Removes and returns the key at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `index >= len`.
    pub fn remove_key(&mut self, index: usize) -> Result<CurveKey> {
        self.check_key_id(index)?;
        let key = self.keys.remove(index);
        self.length.invalidate();
        Ok(key)
    }

    /// Returns the tangent mode of `key_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `key_id` is out of range.
    pub fn get_tangent_mode(&self, key_id: usize) -> Result<TangentMode> {
        Ok(self.get_key(key_id)?.tangent_mode)
    }

    /// Changes the tangent mode of `key_id`.
    ///
    /// With `apply_constraint`, the left tangent is re-derived from the right
    /// tangent; the right tangent is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `key_id` is out of range.
    pub fn set_tangent_mode(
        &mut self,
        key_id: usize,
        mode: TangentMode,
        apply_constraint: bool,
    ) -> Result<()> {
        self.check_key_id(key_id)?;
        self.keys[key_id].set_tangent_mode(mode, apply_constraint);
        if apply_constraint {
            self.length.invalidate();
        }
        Ok(())
    }

    // --- Points ---

    /// Returns point `point_id` in the requested space.
    ///
    /// Control points are always global. Tangents are returned as offsets in
    /// `Local` space, or as `control + tangent` in `Global` space.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `point_id` is out of range.
    pub fn get_point(&self, point_id: usize, space: PointSpace) -> Result<Point> {
        self.check_point_id(point_id)?;
        let key = &self.keys[point_to_key_id(point_id)];
        Ok(match (index::point_kind(point_id), space) {
            (PointKind::Control, _) => key.control,
            (PointKind::Tangent(side), PointSpace::Local) => key.tangent(side),
            (PointKind::Tangent(side), PointSpace::Global) => key.tangent_global(side),
        })
    }

    /// Moves point `point_id` to the global position `value`.
    ///
    /// Moving a control point translates the whole key; its tangent offsets
    /// are kept. Moving a tangent goes through [`Curve::set_tangent_point`]
    /// and applies the key's tangent constraint.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `point_id` is out of range.
    pub fn set_point(&mut self, point_id: usize, value: Point) -> Result<()> {
        self.check_point_id(point_id)?;
        if index::is_control_point_id(point_id) {
            self.keys[point_to_key_id(point_id)].control = value;
            self.length.invalidate();
            Ok(())
        } else {
            self.set_tangent_point(point_id, value, PointSpace::Global)
        }
    }

    /// Sets the tangent addressed by `point_id`.
    ///
    /// `value` is converted to local space first when given in `Global`
    /// space, then the key's tangent constraint is applied.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if `point_id` is out of range or
    /// addresses a control point.
    pub fn set_tangent_point(
        &mut self,
        point_id: usize,
        value: Point,
        space: PointSpace,
    ) -> Result<()> {
        self.check_point_id(point_id)?;
        let PointKind::Tangent(side) = index::point_kind(point_id) else {
            return Err(CurveError::InvalidIndex {
                kind: "tangent point",
                index: point_id,
                len: self.get_points_count(),
            }
            .into());
        };
        let key = &mut self.keys[point_to_key_id(point_id)];
        let local = match space {
            PointSpace::Local => value,
            PointSpace::Global => value - key.control,
        };
        match side {
            TangentSide::Left => key.set_left_tangent(local),
            TangentSide::Right => key.set_right_tangent(local),
        }
        self.length.invalidate();
        Ok(())
    }

    // --- Segments ---

    /// Returns the Bezier control points of segment `index` (between keys
    /// `index` and `index + 1`).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidIndex`] if the segment does not exist.
    pub fn segment(&self, index: usize) -> Result<CubicSegment> {
        if index + 1 >= self.keys.len() {
            return Err(CurveError::InvalidIndex {
                kind: "segment",
                index,
                len: self.keys.len().saturating_sub(1),
            }
            .into());
        }
        Ok(self.segment_unchecked(index))
    }

    /// Number of segments.
    #[must_use]
    pub fn segments_count(&self) -> usize {
        self.keys.len().saturating_sub(1)
    }

    fn segment_unchecked(&self, index: usize) -> CubicSegment {
        let start = &self.keys[index];
        let end = &self.keys[index + 1];
        CubicSegment::new(
            start.control,
            start.tangent_global(TangentSide::Right),
            end.tangent_global(TangentSide::Left),
            end.control,
        )
    }

    // --- Queries ---

    /// Returns the sampled curve point closest to `point`, using the default
    /// nearest-point step.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveState`] if the curve is not valid.
    pub fn get_nearest_point_to(&self, point: Point) -> Result<Point> {
        Ok(NearestPoint::new(point).execute(self)?.point)
    }

    /// Returns the arc-length distance along the curve of the sampled point
    /// closest to `point`.
    ///
    /// Uses the cached key distances, so the length must have been computed
    /// with [`Curve::get_length`] or [`Curve::compute_length`] after the last
    /// change.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveState`] if the curve is not valid and
    /// [`CurveError::LengthNotComputed`] if the cached length is stale.
    pub fn get_nearest_distance_to(&self, point: Point) -> Result<f32> {
        let nearest = NearestPoint::new(point).execute(self)?;
        if self.length.is_dirty() {
            return Err(CurveError::LengthNotComputed.into());
        }
        Ok(self.distance_at_percent(nearest.percent))
    }

    /// Returns the tight axis-aligned bounds of the curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidCurveState`] if the curve is not valid.
    pub fn get_extrems(&self) -> Result<Aabb> {
        BoundingBox::new().execute(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CurvexError;

    fn three_key_curve() -> Curve {
        Curve::from_keys(vec![
            CurveKey::from_control(Point::new(0.0, 0.0)),
            CurveKey::from_control(Point::new(10.0, 5.0)),
            CurveKey::from_control(Point::new(20.0, 0.0)),
        ])
    }

    fn is_invalid_index(err: &CurvexError) -> bool {
        matches!(err, CurvexError::Curve(CurveError::InvalidIndex { .. }))
    }

    #[test]
    fn empty_and_single_key_curves_are_invalid() {
        let mut curve = Curve::new();
        assert!(!curve.is_valid());
        assert_eq!(curve.get_points_count(), 0);
        curve.add_key(CurveKey::default());
        assert!(!curve.is_valid());
        assert!(matches!(
            curve.ensure_valid(),
            Err(CurvexError::Curve(CurveError::InvalidCurveState { keys: 1 }))
        ));
    }

    #[test]
    fn remove_first_of_three_keys() {
        let mut curve = three_key_curve();
        let removed = curve.remove_key(0).unwrap();
        assert_eq!(removed.control, Point::new(0.0, 0.0));
        assert_eq!(curve.get_keys_count(), 2);
        assert!(curve.is_valid());
    }

    #[test]
    fn remove_key_out_of_range() {
        let mut curve = three_key_curve();
        assert!(is_invalid_index(&curve.remove_key(3).unwrap_err()));
    }

    #[test]
    fn insert_key_bounds() {
        let mut curve = three_key_curve();
        curve
            .insert_key(3, CurveKey::from_control(Point::new(30.0, 0.0)))
            .unwrap();
        curve
            .insert_key(0, CurveKey::from_control(Point::new(-10.0, 0.0)))
            .unwrap();
        assert_eq!(curve.get_keys_count(), 5);
        assert_eq!(curve.keys()[0].control, Point::new(-10.0, 0.0));
        assert_eq!(curve.keys()[4].control, Point::new(30.0, 0.0));

        let err = curve.insert_key(6, CurveKey::default()).unwrap_err();
        assert!(is_invalid_index(&err));
    }

    #[test]
    fn mutations_mark_length_dirty() {
        let mut curve = three_key_curve();
        curve.compute_length();
        assert!(!curve.is_length_dirty());

        curve.add_key(CurveKey::from_control(Point::new(30.0, 0.0)));
        assert!(curve.is_length_dirty());
        curve.compute_length();

        curve.set_point(3, Point::new(10.0, 6.0)).unwrap();
        assert!(curve.is_length_dirty());
        curve.compute_length();

        curve
            .set_tangent_point(4, Point::new(2.0, 2.0), PointSpace::Local)
            .unwrap();
        assert!(curve.is_length_dirty());
        curve.compute_length();

        curve.remove_key(3).unwrap();
        assert!(curve.is_length_dirty());
    }

    #[test]
    fn get_point_by_space() {
        let curve = three_key_curve();
        // Point 3 is key 1's control; 2 its left tangent; 4 its right tangent.
        assert_eq!(curve.get_point(3, PointSpace::Local).unwrap(), Point::new(10.0, 5.0));
        assert_eq!(curve.get_point(3, PointSpace::Global).unwrap(), Point::new(10.0, 5.0));
        assert_eq!(curve.get_point(2, PointSpace::Local).unwrap(), Point::new(-1.0, 0.0));
        assert_eq!(curve.get_point(2, PointSpace::Global).unwrap(), Point::new(9.0, 5.0));
        assert_eq!(curve.get_point(4, PointSpace::Global).unwrap(), Point::new(11.0, 5.0));
    }

    #[test]
    fn get_point_out_of_range() {
        let curve = three_key_curve();
        assert_eq!(curve.get_points_count(), 7);
        assert!(curve.get_point(6, PointSpace::Global).is_ok());
        assert!(is_invalid_index(
            &curve.get_point(7, PointSpace::Global).unwrap_err()
        ));
    }

    #[test]
    fn set_control_point_translates_handles() {
        let mut curve = three_key_curve();
        curve.set_point(3, Point::new(12.0, 8.0)).unwrap();
        assert_eq!(curve.get_point(2, PointSpace::Global).unwrap(), Point::new(11.0, 8.0));
        assert_eq!(curve.get_point(4, PointSpace::Local).unwrap(), Point::new(1.0, 0.0));
    }

    #[test]
    fn set_point_on_tangent_is_global() {
        let mut curve = three_key_curve();
        curve.set_point(4, Point::new(10.0, 8.0)).unwrap();
        assert_eq!(curve.get_point(4, PointSpace::Local).unwrap(), Point::new(0.0, 3.0));
        // Mirrored peer.
        assert_eq!(curve.get_point(2, PointSpace::Local).unwrap(), Point::new(0.0, -3.0));
    }

    #[test]
    fn set_tangent_point_global_converts_to_local() {
        let mut curve = three_key_curve();
        curve
            .set_tangent_point(2, Point::new(7.0, 5.0), PointSpace::Global)
            .unwrap();
        assert_eq!(curve.keys()[1].left_tangent, Point::new(-3.0, 0.0));
        assert_eq!(curve.keys()[1].right_tangent, Point::new(3.0, 0.0));
    }

    #[test]
    fn set_tangent_point_rejects_control_id() {
        let mut curve = three_key_curve();
        let err = curve
            .set_tangent_point(3, Point::ZERO, PointSpace::Local)
            .unwrap_err();
        assert!(is_invalid_index(&err));
    }

    #[test]
    fn first_and_last_keys_have_one_tangent() {
        let curve = three_key_curve();
        // Point 1 is the first key's right tangent; the last key's right
        // tangent would be point 7, which does not exist.
        assert_eq!(point_to_key_id(1), 0);
        assert_eq!(curve.get_point(1, PointSpace::Local).unwrap(), Point::new(1.0, 0.0));
        assert!(!curve.is_valid_point_id(7));
    }

    #[test]
    fn set_tangent_mode_uses_right_tangent() {
        let mut curve = Curve::from_keys(vec![
            CurveKey::new(
                Point::ZERO,
                Point::new(0.0, 4.0),
                Point::new(2.0, 0.0),
                TangentMode::Broken,
            ),
            CurveKey::from_control(Point::new(10.0, 0.0)),
        ]);
        curve.set_tangent_mode(0, TangentMode::Mirrored, true).unwrap();
        assert_eq!(curve.get_tangent_mode(0).unwrap(), TangentMode::Mirrored);
        assert_eq!(curve.keys()[0].right_tangent, Point::new(2.0, 0.0));
        assert_eq!(curve.keys()[0].left_tangent, Point::new(-2.0, 0.0));
        assert!(curve.set_tangent_mode(2, TangentMode::Broken, true).is_err());
    }

    #[test]
    fn set_tangent_mode_aligned_uses_right_direction() {
        let mut curve = Curve::from_keys(vec![
            CurveKey::new(
                Point::ZERO,
                Point::new(-4.0, 1.0),
                Point::new(0.0, 2.0),
                TangentMode::Broken,
            ),
            CurveKey::from_control(Point::new(10.0, 0.0)),
        ]);
        curve.compute_length();
        curve.set_tangent_mode(0, TangentMode::Aligned, true).unwrap();

        let key = curve.keys()[0];
        assert_eq!(key.right_tangent, Point::new(0.0, 2.0));
        assert!(key.left_tangent.approx_eq(Point::new(0.0, -(17.0_f32.sqrt())), 1e-5));
        assert!(curve.is_length_dirty());
    }

    #[test]
    fn segment_control_points() {
        let curve = three_key_curve();
        let seg = curve.segment(1).unwrap();
        assert_eq!(Point::from(seg.p0), Point::new(10.0, 5.0));
        assert_eq!(Point::from(seg.p1), Point::new(11.0, 5.0));
        assert_eq!(Point::from(seg.p2), Point::new(19.0, 0.0));
        assert_eq!(Point::from(seg.p3), Point::new(20.0, 0.0));
        assert_eq!(curve.segments_count(), 2);
        assert!(curve.segment(2).is_err());
    }

    #[test]
    fn collect_from_keys() {
        let curve: Curve = (0..4)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f32;
                CurveKey::from_control(Point::new(x, 0.0))
            })
            .collect();
        assert_eq!(curve.get_keys_count(), 4);
        assert_eq!(curve.get_points_count(), 10);
    }
}
