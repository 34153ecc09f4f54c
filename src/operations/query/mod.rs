mod bounding_box;
mod nearest_point;

pub use bounding_box::{Aabb, BoundingBox};
pub use nearest_point::{NearestPoint, NearestPointResult};
