use crate::math::{Point, TOLERANCE};

/// Policy linking the two tangents of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TangentMode {
    /// The peer is the exact opposite of the edited tangent.
    #[default]
    Mirrored = 0,
    /// The peer points opposite to the edited tangent but keeps its length.
    Aligned = 1,
    /// Tangents are independent.
    Broken = 2,
}

impl TangentMode {
    /// Ordinal used by the text format.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TangentMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Mirrored),
            1 => Ok(Self::Aligned),
            2 => Ok(Self::Broken),
            other => Err(other),
        }
    }
}

/// Which tangent of a key is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TangentSide {
    Left,
    Right,
}

impl TangentSide {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Marker stored in [`CurveKey::distance`] until the curve length is computed.
pub const DISTANCE_NOT_COMPUTED: f32 = -1.0;

/// One knot of a curve.
///
/// `control` is a global position. `left_tangent` and `right_tangent` are
/// offsets relative to `control`. `distance` is the arc length from the curve
/// start to this key, or [`DISTANCE_NOT_COMPUTED`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveKey {
    pub control: Point,
    pub left_tangent: Point,
    pub right_tangent: Point,
    pub tangent_mode: TangentMode,
    pub distance: f32,
}

impl Default for CurveKey {
    fn default() -> Self {
        Self::from_control(Point::ZERO)
    }
}

impl CurveKey {
    /// Creates a key with flat default tangents `(-1, 0)` / `(1, 0)`.
    #[must_use]
    pub fn from_control(control: Point) -> Self {
        Self {
            control,
            left_tangent: Point::new(-1.0, 0.0),
            right_tangent: Point::new(1.0, 0.0),
            tangent_mode: TangentMode::Mirrored,
            distance: DISTANCE_NOT_COMPUTED,
        }
    }

    /// Creates a key from all of its parts.
    ///
    /// The left tangent is re-derived from the right one according to `mode`,
    /// so the returned key always satisfies its tangent constraint.
    #[must_use]
    pub fn new(control: Point, left_tangent: Point, right_tangent: Point, mode: TangentMode) -> Self {
        let key = Self {
            control,
            left_tangent,
            right_tangent,
            tangent_mode: mode,
            distance: DISTANCE_NOT_COMPUTED,
        };
        key.with_tangent(TangentSide::Right, right_tangent)
    }

    /// Returns the tangent on `side`, in local space.
    #[must_use]
    pub fn tangent(&self, side: TangentSide) -> Point {
        match side {
            TangentSide::Left => self.left_tangent,
            TangentSide::Right => self.right_tangent,
        }
    }

    /// Returns the tangent on `side` as a global position.
    #[must_use]
    pub fn tangent_global(&self, side: TangentSide) -> Point {
        self.control + self.tangent(side)
    }

    fn tangent_mut(&mut self, side: TangentSide) -> &mut Point {
        match side {
            TangentSide::Left => &mut self.left_tangent,
            TangentSide::Right => &mut self.right_tangent,
        }
    }

    /// Returns the key with the tangent on `side` set to `value` (local
    /// space) and the peer tangent updated according to the tangent mode.
    #[must_use]
    pub fn with_tangent(mut self, side: TangentSide, value: Point) -> Self {
        *self.tangent_mut(side) = value;
        let peer_side = side.opposite();
        let peer_before = self.tangent(peer_side);

        let peer = match self.tangent_mode {
            TangentMode::Mirrored => -value,
            TangentMode::Aligned => match value.try_normalize() {
                Ok(dir) => -dir * peer_before.length(),
                Err(_) => {
                    tracing::trace!(?side, "zero-length tangent on aligned key, peer kept");
                    peer_before
                }
            },
            TangentMode::Broken => peer_before,
        };
        *self.tangent_mut(peer_side) = peer;
        self
    }

    /// Sets the left tangent (local space) and propagates the constraint.
    pub fn set_left_tangent(&mut self, value: Point) {
        *self = self.with_tangent(TangentSide::Left, value);
    }

    /// Sets the right tangent (local space) and propagates the constraint.
    pub fn set_right_tangent(&mut self, value: Point) {
        *self = self.with_tangent(TangentSide::Right, value);
    }

    /// Changes the tangent mode.
    ///
    /// With `apply_constraint`, the left tangent is re-derived from the right
    /// tangent, which is treated as authoritative. `Mirrored` copies the
    /// negated right tangent; `Aligned` keeps the left tangent's length and
    /// points it away from the right tangent.
    pub fn set_tangent_mode(&mut self, mode: TangentMode, apply_constraint: bool) {
        self.tangent_mode = mode;
        if apply_constraint {
            *self = self.with_tangent(TangentSide::Right, self.right_tangent);
        }
    }

    /// Returns `true` if the tangents satisfy the key's mode within `tolerance`.
    #[must_use]
    pub fn satisfies_constraint(&self, tolerance: f32) -> bool {
        match self.tangent_mode {
            TangentMode::Mirrored => self.left_tangent.approx_eq(-self.right_tangent, tolerance),
            TangentMode::Aligned => {
                let (l, r) = (self.left_tangent, self.right_tangent);
                if l.length() < TOLERANCE || r.length() < TOLERANCE {
                    return true;
                }
                l.normalize().approx_eq(-r.normalize(), tolerance)
            }
            TangentMode::Broken => true,
        }
    }
}
