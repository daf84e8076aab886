//! # Transform attribute parsing
//!
//! Turns an SVG `transform` attribute into an ordered list of [`TransformOp`]s and a single
//! composed [`AffineMatrix`].
//!
//! Supports:
//! - `translate(tx [ty])`, `ty` defaults to 0
//! - `scale(sx [sy])`, `sy` defaults to `sx`
//! - `rotate(angle [cx cy])`
//! - `matrix(a b c d e f)`
//!
//! Arguments may be separated by commas and/or whitespace, or by the sign of the next number
//! (`translate(10-5)`). Functions are separated by commas and/or whitespace.
//! A malformed or unknown function is skipped (it contributes the identity) and reported as a
//! [`TransformError`]; parsing continues with the next function.

use inkmap_core::{compose, AffineMatrix, TransformError};

use crate::numbers::parse_number_list;

/// One elementary transform function
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate { dx: f64, dy: f64 },
    Scale { sx: f64, sy: f64 },
    /// Angle in degrees, optional pivot
    Rotate { angle: f64, pivot: Option<(f64, f64)> },
    Matrix(AffineMatrix),
}

impl TransformOp {
    pub fn to_matrix(&self) -> AffineMatrix {
        match *self {
            Self::Translate { dx, dy } => AffineMatrix::translate(dx, dy),
            Self::Scale { sx, sy } => AffineMatrix::scale(sx, sy),
            Self::Rotate { angle, pivot: None } => AffineMatrix::rotate(angle),
            Self::Rotate {
                angle,
                pivot: Some((cx, cy)),
            } => AffineMatrix::rotate_about(angle, cx, cy),
            Self::Matrix(m) => m,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "translate",
            Self::Scale { .. } => "scale",
            Self::Rotate { .. } => "rotate",
            Self::Matrix(_) => "matrix",
        }
    }
}

/// Result of parsing one `transform` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTransform {
    pub ops: Vec<TransformOp>,
    /// Functions that were skipped
    pub errors: Vec<TransformError>,
}

impl ParsedTransform {
    /// Fold the ops left to right into one matrix.
    pub fn matrix(&self) -> AffineMatrix {
        self.ops
            .iter()
            .fold(AffineMatrix::IDENTITY, |acc, op| compose(&acc, &op.to_matrix()))
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A `name(args)` call as it appears in the source text
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawCall<'a> {
    name: &'a str,
    args: &'a str,
}

/// Split a transform list into raw calls. Stray text and an unterminated call are reported
/// through `errors`; an unterminated call ends the scan.
fn split_calls<'a>(input: &'a str, errors: &mut Vec<TransformError>) -> Vec<RawCall<'a>> {
    let mut calls = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() {
            break;
        }

        let Some(open) = rest.find('(') else {
            errors.push(TransformError::UnexpectedText {
                text: rest.trim_end().to_string(),
            });
            break;
        };

        let head = rest[..open].trim_end();
        // anything before the identifier (e.g. "junk rotate(") is stray text
        let name_start = head
            .char_indices()
            .rev()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let stray = head[..name_start].trim_matches(|c: char| c.is_whitespace() || c == ',');
        if !stray.is_empty() {
            errors.push(TransformError::UnexpectedText {
                text: stray.to_string(),
            });
        }
        let name = &head[name_start..];

        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(')') else {
            errors.push(TransformError::Unterminated {
                name: name.to_string(),
            });
            break;
        };

        calls.push(RawCall {
            name,
            args: &after_open[..close],
        });
        rest = &after_open[close + 1..];
    }

    calls
}

fn parse_args(call: &RawCall<'_>) -> Result<Vec<f64>, TransformError> {
    parse_number_list(call.args).map_err(|argument| TransformError::InvalidArgument {
        name: call.name.to_string(),
        argument: argument.to_string(),
    })
}

fn parse_call(call: &RawCall<'_>) -> Result<TransformOp, TransformError> {
    let expected = match call.name {
        "translate" | "scale" => "1 or 2",
        "rotate" => "1 or 3",
        "matrix" => "6",
        _ => {
            return Err(TransformError::UnknownFunction {
                name: call.name.to_string(),
            })
        }
    };

    let args = parse_args(call)?;
    let op = match (call.name, args.as_slice()) {
        ("translate", &[dx]) => TransformOp::Translate { dx, dy: 0.0 },
        ("translate", &[dx, dy]) => TransformOp::Translate { dx, dy },
        ("scale", &[s]) => TransformOp::Scale { sx: s, sy: s },
        ("scale", &[sx, sy]) => TransformOp::Scale { sx, sy },
        ("rotate", &[angle]) => TransformOp::Rotate { angle, pivot: None },
        ("rotate", &[angle, cx, cy]) => TransformOp::Rotate {
            angle,
            pivot: Some((cx, cy)),
        },
        ("matrix", &[a, b, c, d, e, f]) => {
            TransformOp::Matrix(AffineMatrix::new(a, b, c, d, e, f))
        }
        _ => {
            return Err(TransformError::ArgumentCount {
                name: call.name.to_string(),
                expected,
                actual: args.len(),
            })
        }
    };
    Ok(op)
}

/// Parse a full `transform` attribute.
pub fn parse_transform(input: &str) -> ParsedTransform {
    let mut parsed = ParsedTransform::default();
    let calls = split_calls(input, &mut parsed.errors);

    for call in &calls {
        match parse_call(call) {
            Ok(op) => parsed.ops.push(op),
            Err(e) => parsed.errors.push(e),
        }
    }

    parsed
}

/// Read the rotation angle straight from the attribute text.
///
/// Only answers when the attribute is a single, well-formed `rotate(...)` call; the angle is
/// returned as written, without normalisation. Any other function chained with the rotation
/// (including translate) makes the reading ambiguous, so `None` is returned and callers fall
/// back to the composed matrix.
pub fn direct_rotation(input: &str) -> Option<f64> {
    let mut errors = Vec::new();
    let calls = split_calls(input, &mut errors);
    if !errors.is_empty() {
        return None;
    }

    match calls.as_slice() {
        [call] if call.name == "rotate" => match parse_call(call) {
            Ok(TransformOp::Rotate { angle, .. }) => Some(angle),
            _ => None,
        },
        _ => None,
    }
}
