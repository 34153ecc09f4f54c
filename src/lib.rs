pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod params;
pub mod serialization;

pub use error::{CurvexError, Result};
pub use geometry::{Curve, CurveKey, TangentMode};
pub use math::{Point, PointSpace};
pub use params::SamplingParams;
pub use serialization::CurveSerializer;
