//! Text persistence for curves (`.cvx` files).
//!
//! ```text
//! version=1
//! keys=2
//! key control=x=0;y=0 left=x=-1;y=0 right=x=1;y=0 mode=0
//! key control=x=10;y=0 left=x=-1;y=0 right=x=1;y=0 mode=0
//! ```
//!
//! Points use the `x=<float>;y=<float>` form of [`Point`](crate::math::Point)'s
//! `Display`. `mode` is the [`TangentMode`](crate::geometry::TangentMode)
//! ordinal. Blank lines and lines starting with `#` are ignored. Cached arc
//! lengths are not stored.

mod parser;

use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::geometry::Curve;

/// Current text format version.
pub const FORMAT_VERSION: u32 = 1;

/// Canonical file extension of serialized curves.
pub const FILE_EXTENSION: &str = "cvx";

/// Converts curves to and from the `cvx` text format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveSerializer;

impl CurveSerializer {
    /// Renders `curve` as text.
    #[must_use]
    pub fn serialize(curve: &Curve) -> String {
        let mut out = format!(
            "version={FORMAT_VERSION}\nkeys={}\n",
            curve.get_keys_count()
        );
        for key in curve.keys() {
            out.push_str(&format!(
                "key control={} left={} right={} mode={}\n",
                key.control,
                key.left_tangent,
                key.right_tangent,
                key.tangent_mode.ordinal()
            ));
        }
        out
    }

    /// Parses a curve from text.
    ///
    /// Keys are rebuilt with [`CurveKey::new`](crate::geometry::CurveKey::new),
    /// so each key satisfies its tangent mode after loading. A key saved while
    /// breaking its mode (after `set_tangent_mode(.., false)`) comes back with
    /// its left tangent re-derived from the right one, and the curve shape
    /// changes. Apply the constraint or switch such keys to
    /// [`TangentMode::Broken`](crate::geometry::TangentMode::Broken) before
    /// saving to round-trip them exactly.
    ///
    /// # Errors
    ///
    /// Returns a parse error for a missing or unsupported version header,
    /// truncated or trailing records, and malformed fields.
    pub fn unserialize(text: &str) -> Result<Curve> {
        let curve = parser::parse_curve(text)?;
        tracing::debug!(keys = curve.get_keys_count(), "curve unserialized");
        Ok(curve)
    }

    /// Writes the serialized curve to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write(curve: &Curve, mut writer: impl Write) -> Result<()> {
        writer.write_all(Self::serialize(curve).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a curve from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the text is not a valid curve.
    pub fn read(mut reader: impl Read) -> Result<Curve> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::unserialize(&text)
    }

    /// Returns `true` if `path` has the `cvx` extension.
    #[must_use]
    pub fn is_curve_file(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION))
    }
}
