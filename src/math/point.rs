use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use thiserror::Error;

use crate::error::{NumericError, Result};

use super::{Point2, Vector2};

/// Coordinate space of a point.
///
/// Control points live in `Global` space. Tangents are stored in `Local`
/// space, as offsets from their control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointSpace {
    /// Offset relative to a control point.
    Local,
    /// Absolute position.
    #[default]
    Global,
}

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// Produces NaN components for a zero-length point; use
    /// [`Point::try_normalize`] or [`Point::normalize_or_zero`] when the
    /// input may be degenerate.
    #[must_use]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::ZeroLength`] if the point has (near) zero length.
    pub fn try_normalize(self) -> Result<Self> {
        let len = self.length();
        if len < super::TOLERANCE {
            return Err(NumericError::ZeroLength.into());
        }
        Ok(self / len)
    }

    /// Returns the unit vector, or [`Point::ZERO`] for a degenerate input.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Component-wise linear remap of `self` from the box `[in_min, in_max]`
    /// to the box `[out_min, out_max]`.
    #[must_use]
    pub fn remap(self, in_min: Self, in_max: Self, out_min: Self, out_max: Self) -> Self {
        Self::new(
            super::remap(self.x, in_min.x, in_max.x, out_min.x, out_max.x),
            super::remap(self.y, in_min.y, in_max.y, out_min.y, out_max.y),
        )
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Returns `true` if both components are within `tolerance` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for f32 {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl MulAssign<f32> for Point {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Point {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl DivAssign<f32> for Point {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<Point2> for Point {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for Point2 {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Renders as `x=<float>;y=<float>`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={};y={}", self.x, self.y)
    }
}

/// Error returned when a string is not of the form `x=<float>;y=<float>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed point `{0}`")]
pub struct ParsePointError(pub String);

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || ParsePointError(s.to_owned());
        let (x_part, y_part) = s.trim().split_once(';').ok_or_else(malformed)?;
        let x = x_part
            .trim()
            .strip_prefix("x=")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .ok_or_else(malformed)?;
        let y = y_part
            .trim()
            .strip_prefix("y=")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .ok_or_else(malformed)?;
        Ok(Self::new(x, y))
    }
}
