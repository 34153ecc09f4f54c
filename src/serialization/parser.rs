use std::str::FromStr;

use crate::error::ParseError;
use crate::geometry::{Curve, CurveKey, TangentMode};
use crate::math::Point;

use super::FORMAT_VERSION;

/// Non-blank, non-comment lines with their 1-based line numbers.
fn significant_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

pub(super) fn parse_curve(text: &str) -> Result<Curve, ParseError> {
    let mut lines = significant_lines(text);

    let version: u32 = parse_header(lines.next(), "version")?;
    if version != FORMAT_VERSION {
        return Err(ParseError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    let count: usize = parse_header(lines.next(), "keys")?;

    let mut keys = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let Some((line, record)) = lines.next() else {
            return Err(ParseError::Truncated {
                expected: count,
                found: keys.len(),
            });
        };
        keys.push(parse_key(line, record)?);
    }

    if let Some((line, _)) = lines.next() {
        return Err(ParseError::TrailingData { line });
    }

    Ok(Curve::from_keys(keys))
}

fn parse_header<T: FromStr>(
    entry: Option<(usize, &str)>,
    name: &'static str,
) -> Result<T, ParseError> {
    let (line, text) = entry.ok_or(ParseError::MissingHeader(name))?;
    let value = text
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .map(str::trim)
        .ok_or_else(|| ParseError::InvalidHeader {
            line,
            text: text.to_owned(),
        })?;
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: value.to_owned(),
    })
}

fn parse_key(line: usize, record: &str) -> Result<CurveKey, ParseError> {
    let mut tokens = record.split_whitespace();
    if tokens.next() != Some("key") {
        return Err(ParseError::UnexpectedRecord {
            line,
            text: record.to_owned(),
        });
    }

    let mut control = None;
    let mut left = None;
    let mut right = None;
    let mut mode = None;

    for token in tokens {
        let Some((field, value)) = token.split_once('=') else {
            return Err(ParseError::UnknownField {
                line,
                field: token.to_owned(),
            });
        };
        match field {
            "control" => set_once(&mut control, parse_point(line, value)?, line, field)?,
            "left" => set_once(&mut left, parse_point(line, value)?, line, field)?,
            "right" => set_once(&mut right, parse_point(line, value)?, line, field)?,
            "mode" => set_once(&mut mode, parse_mode(line, value)?, line, field)?,
            _ => {
                return Err(ParseError::UnknownField {
                    line,
                    field: field.to_owned(),
                })
            }
        }
    }

    Ok(CurveKey::new(
        control.ok_or(ParseError::MissingField {
            line,
            field: "control",
        })?,
        left.ok_or(ParseError::MissingField { line, field: "left" })?,
        right.ok_or(ParseError::MissingField {
            line,
            field: "right",
        })?,
        mode.ok_or(ParseError::MissingField { line, field: "mode" })?,
    ))
}

fn set_once<T>(slot: &mut Option<T>, value: T, line: usize, field: &str) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::DuplicateField {
            line,
            field: field.to_owned(),
        });
    }
    *slot = Some(value);
    Ok(())
}

fn parse_point(line: usize, value: &str) -> Result<Point, ParseError> {
    let malformed = || ParseError::MalformedPoint {
        line,
        text: value.to_owned(),
    };
    let point: Point = value.parse().map_err(|_| malformed())?;
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(malformed());
    }
    Ok(point)
}

fn parse_mode(line: usize, value: &str) -> Result<TangentMode, ParseError> {
    let ordinal: u8 = value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: value.to_owned(),
    })?;
    TangentMode::try_from(ordinal).map_err(|value| ParseError::UnknownTangentMode { line, value })
}
