//! Number scanning for SVG attribute micro-syntaxes
//!
//! Path data and point lists pack numbers with almost no separators: `M10-5.5.5e1`
//! is three numbers (`10`, `-5.5`, `.5e1`). The scanner follows the SVG number grammar,
//! so a sign or a second decimal point always starts a new number and command letters
//! are skipped.

use inkmap_core::Point;
use regex::Regex;
use std::sync::OnceLock;

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("invalid number regex")
    })
}

/// Every number in `input`, in order. Non-finite results are discarded.
pub fn scan_numbers(input: &str) -> Vec<f64> {
    number_regex()
        .find_iter(input)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Numbers of a list where only separators may sit between them, such as transform
/// arguments (`10-5`, `1e2,3 4`).
///
/// Fails with the first run of text that is neither a number nor a separator, or with a
/// number that overflows.
pub fn parse_number_list(input: &str) -> Result<Vec<f64>, &str> {
    let mut values = Vec::new();
    let mut end = 0;
    for m in number_regex().find_iter(input) {
        if let Some(stray) = stray_text(&input[end..m.start()]) {
            return Err(stray);
        }
        let value = m
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(m.as_str())?;
        values.push(value);
        end = m.end();
    }
    match stray_text(&input[end..]) {
        Some(stray) => Err(stray),
        None => Ok(values),
    }
}

fn stray_text(gap: &str) -> Option<&str> {
    let text = gap.trim_matches(|c: char| c == ',' || c.is_whitespace());
    (!text.is_empty()).then_some(text)
}

/// Pair consecutive numbers into points. A trailing unpaired value is dropped.
pub fn scan_points(input: &str) -> Vec<Point> {
    scan_numbers(input)
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Parse a single scalar attribute such as `width="14"` or `x="10.5px"`.
pub fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Leading number of a value that may carry a unit or a list (`"210mm"`, `"10 20 30"`).
pub fn leading_number(value: &str) -> Option<f64> {
    let m = number_regex().find(value.trim_start())?;
    if m.start() != 0 {
        return None;
    }
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_mixed_separators() {
        assert_eq!(scan_numbers("10,20 30\t40,,50"), vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_minus_starts_new_number() {
        assert_eq!(scan_numbers("M10-20L-5-6"), vec![10.0, -20.0, -5.0, -6.0]);
    }

    #[test]
    fn test_second_decimal_point_starts_new_number() {
        assert_eq!(scan_numbers("0.5.5"), vec![0.5, 0.5]);
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(scan_numbers("1e2,-2.5E-1 +3"), vec![100.0, -0.25, 3.0]);
    }

    #[test]
    fn test_scan_points_drops_dangling_value() {
        assert_eq!(
            scan_points("1,2 3,4 5"),
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]
        );
        assert!(scan_points("7").is_empty());
    }

    #[test]
    fn test_number_list_uses_signs_as_separators() {
        assert_eq!(parse_number_list("10-5"), Ok(vec![10.0, -5.0]));
        assert_eq!(parse_number_list(" 1e2, 3 .5 "), Ok(vec![100.0, 3.0, 0.5]));
        assert_eq!(parse_number_list(""), Ok(vec![]));
    }

    #[test]
    fn test_number_list_rejects_other_text() {
        assert_eq!(parse_number_list("10px,5"), Err("px"));
        assert_eq!(parse_number_list("a,b"), Err("a,b"));
        assert_eq!(parse_number_list("1e999"), Err("1e999"));
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length(" 14 "), Some(14.0));
        assert_eq!(parse_length("10.5px"), Some(10.5));
        assert_eq!(parse_length("wide"), None);
        assert_eq!(parse_length("NaN"), None);
        assert_eq!(parse_length(""), None);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("210mm"), Some(210.0));
        assert_eq!(leading_number("10 20 30"), Some(10.0));
        assert_eq!(leading_number("auto"), None);
    }
}
