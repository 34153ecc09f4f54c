//! Point/key index arithmetic.
//!
//! Each key `k` owns up to three points: its left tangent at `3k - 1`, its
//! control at `3k` and its right tangent at `3k + 1`. The first key has no
//! left tangent and the last key no right tangent, so a curve of `n >= 1`
//! keys exposes `3n - 2` points.

use crate::geometry::TangentSide;

/// What a point index addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Control,
    Tangent(TangentSide),
}

/// Key owning point `point_id`.
#[must_use]
pub fn point_to_key_id(point_id: usize) -> usize {
    (point_id + 1) / 3
}

/// Point index of the control point of `key_id`.
#[must_use]
pub fn key_to_point_id(key_id: usize) -> usize {
    3 * key_id
}

/// Number of points exposed by `keys_count` keys.
#[must_use]
pub fn points_count(keys_count: usize) -> usize {
    if keys_count == 0 {
        0
    } else {
        3 * keys_count - 2
    }
}

/// Returns `true` if `point_id` addresses a control point.
#[must_use]
pub fn is_control_point_id(point_id: usize) -> bool {
    point_id % 3 == 0
}

/// Classifies `point_id` without range checking.
#[must_use]
pub fn point_kind(point_id: usize) -> PointKind {
    match point_id % 3 {
        0 => PointKind::Control,
        1 => PointKind::Tangent(TangentSide::Right),
        _ => PointKind::Tangent(TangentSide::Left),
    }
}
