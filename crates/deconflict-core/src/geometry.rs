//! Euclidean geometry helpers and strict text parsers.
//!
//! Conflict locations travel between components as the textual tuple
//! `"(x, y, z)"`. The parsers here accept only that fixed shape (plus
//! surrounding brackets/whitespace) and never evaluate input as
//! anything else.

use std::fmt;

use crate::error::EngineError;

/// A point in mission-local 3D coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub fn distance_sq(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance in the horizontal (x, y) plane only.
    pub fn horizontal_distance(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

fn tuple_parts(text: &str) -> Vec<&str> {
    text.trim()
        .trim_start_matches(|c| c == '(' || c == '[')
        .trim_end_matches(|c| c == ')' || c == ']')
        .split(',')
        .map(str::trim)
        .collect()
}

/// Parse a `"(x, y, z)"` tuple, tolerating enclosing parentheses,
/// brackets, and whitespace. Exactly three numerics are required.
pub fn parse_point3(text: &str) -> Result<Point3, EngineError> {
    let parts = tuple_parts(text);
    if parts.len() != 3 {
        return Err(EngineError::LocationParse(text.to_string()));
    }
    let mut values = [0.0f64; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|_| EngineError::LocationParse(text.to_string()))?;
    }
    Ok(Point3::new(values[0], values[1], values[2]))
}

/// Parse an `"x,y"` pair from advisor path text. Extra components are
/// ignored; fewer than two is an error.
pub fn parse_xy(text: &str) -> Result<(f64, f64), EngineError> {
    let parts = tuple_parts(text);
    if parts.len() < 2 {
        return Err(EngineError::PathParse(text.to_string()));
    }
    let x = parts[0]
        .parse()
        .map_err(|_| EngineError::PathParse(text.to_string()))?;
    let y = parts[1]
        .parse()
        .map_err(|_| EngineError::PathParse(text.to_string()))?;
    Ok((x, y))
}

/// Parse a numeric value, stripping a trailing unit word such as
/// `"120 meters"` or `"5minutes"`.
pub fn parse_scalar(text: &str) -> Result<f64, EngineError> {
    let numeric = text
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic())
        .trim_end();
    numeric
        .parse()
        .map_err(|_| EngineError::NumericParse(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_interchange_format() {
        assert_eq!(Point3::new(0.0, 0.0, 100.0).to_string(), "(0, 0, 100)");
        assert_eq!(Point3::new(1.5, -2.0, 0.25).to_string(), "(1.5, -2, 0.25)");
    }

    #[test]
    fn parse_point3_tolerates_wrappers() {
        for text in ["(1, 2, 3)", "[1,2,3]", "  1 , 2 , 3  ", "(1, 2, 3]"] {
            let point = parse_point3(text).unwrap();
            assert_eq!(point, Point3::new(1.0, 2.0, 3.0), "input {text:?}");
        }
    }

    #[test]
    fn parse_point3_rejects_other_shapes() {
        for text in ["", "(1, 2)", "(1, 2, 3, 4)", "(a, b, c)", "1 + 2, 3, 4"] {
            assert!(
                matches!(parse_point3(text), Err(EngineError::LocationParse(_))),
                "input {text:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_xy_takes_first_two_components() {
        assert_eq!(parse_xy("5,5").unwrap(), (5.0, 5.0));
        assert_eq!(parse_xy("(15.5, 25.5)").unwrap(), (15.5, 25.5));
        assert_eq!(parse_xy("1, 2, 3").unwrap(), (1.0, 2.0));
        assert!(matches!(parse_xy("7"), Err(EngineError::PathParse(_))));
        assert!(matches!(parse_xy("x,y"), Err(EngineError::PathParse(_))));
    }

    #[test]
    fn parse_scalar_strips_unit_suffixes() {
        assert_eq!(parse_scalar("105").unwrap(), 105.0);
        assert_eq!(parse_scalar("120 meters").unwrap(), 120.0);
        assert_eq!(parse_scalar("5minutes").unwrap(), 5.0);
        assert_eq!(parse_scalar(" -2.5 m ").unwrap(), -2.5);
        assert!(matches!(
            parse_scalar("none"),
            Err(EngineError::NumericParse(_))
        ));
    }

    #[test]
    fn distances() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 12.0);
        assert_eq!(a.distance(&b), 13.0);
        assert_eq!(a.distance_sq(&b), 169.0);
        assert_eq!(a.horizontal_distance(3.0, 4.0), 5.0);
    }
}
