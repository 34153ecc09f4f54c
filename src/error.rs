use thiserror::Error;

/// Top-level error type for the curvex curve engine.
#[derive(Debug, Error)]
pub enum CurvexError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to curve structure and indexing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("{kind} index {index} is out of range (len {len})")]
    InvalidIndex {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("curve needs at least 2 keys, has {keys}")]
    InvalidCurveState { keys: usize },

    #[error("curve length has not been computed since the last change")]
    LengthNotComputed,
}

/// Errors related to numeric degeneracies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("zero-length vector")]
    ZeroLength,

    #[error("root search did not converge after {iterations} iterations (residual {residual})")]
    NonConvergent { iterations: u32, residual: f32 },
}

/// Errors raised while reading the `cvx` text format.
///
/// Every variant carrying a `line` refers to a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing `{0}` header")]
    MissingHeader(&'static str),

    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("line {line}: invalid header `{text}`")]
    InvalidHeader { line: usize, text: String },

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: duplicate field `{field}`")]
    DuplicateField { line: usize, field: String },

    #[error("line {line}: unknown field `{field}`")]
    UnknownField { line: usize, field: String },

    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: unknown tangent mode {value}")]
    UnknownTangentMode { line: usize, value: u8 },

    #[error("line {line}: malformed point `{text}`")]
    MalformedPoint { line: usize, text: String },

    #[error("line {line}: expected a key record, found `{text}`")]
    UnexpectedRecord { line: usize, text: String },

    #[error("expected {expected} key records, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("line {line}: trailing data after last key record")]
    TrailingData { line: usize },
}

/// Convenience type alias for results using [`CurvexError`].
pub type Result<T> = std::result::Result<T, CurvexError>;
