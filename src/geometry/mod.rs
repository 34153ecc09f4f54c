pub mod curve;
mod dirty;
mod key;

pub use curve::{Curve, EvaluationKeys, PointKind};
pub use dirty::Dirty;
pub use key::{CurveKey, TangentMode, TangentSide, DISTANCE_NOT_COMPUTED};
