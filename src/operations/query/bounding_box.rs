use crate::error::Result;
use crate::geometry::{Curve, TangentSide};
use crate::math::Point;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point,
    /// Maximum corner of the bounding box.
    pub max: Point,
}

impl Aabb {
    /// Creates a box containing a single point.
    #[must_use]
    pub fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grows the box to include `point`.
    pub fn include(&mut self, point: Point) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Width along X.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height along Y.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Computes the axis-aligned bounds of a curve.
///
/// By default the bounds are tight: segment endpoints plus every interior
/// extremum of each cubic. With handles included, the global tangent
/// positions are added as well, which is what an editor needs to frame a
/// curve together with its handles.
#[derive(Debug, Default)]
pub struct BoundingBox {
    include_handles: bool,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also include tangent handle positions.
    #[must_use]
    pub fn with_handles(mut self, include_handles: bool) -> Self {
        self.include_handles = include_handles;
        self
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than two keys.
    pub fn execute(&self, curve: &Curve) -> Result<Aabb> {
        curve.ensure_valid()?;
        let keys = curve.keys();
        let mut aabb = Aabb::from_point(keys[0].control);

        for index in 0..curve.segments_count() {
            let (min, max) = curve.segment(index)?.bounds();
            aabb.include(min);
            aabb.include(max);
        }

        if self.include_handles {
            let last = keys.len() - 1;
            for (id, key) in keys.iter().enumerate() {
                if id > 0 {
                    aabb.include(key.tangent_global(TangentSide::Left));
                }
                if id < last {
                    aabb.include(key.tangent_global(TangentSide::Right));
                }
            }
        }

        Ok(aabb)
    }
}
