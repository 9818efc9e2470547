//! Core data models for mission deconfliction.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;
use crate::geometry::{parse_point3, Point3};

/// Identifier used for the primary mission in conflict records.
pub const PRIMARY_FLIGHT_ID: &str = "primary";

/// A single point along a trajectory.
///
/// `time_index` is the coarse schedule slot used by the detectors
/// (multiples of the configured tick, offset from the flight's window
/// start); `timestamp` is the absolute time used by the resolution
/// engine when applying delays. Either may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default, alias = "time", skip_serializing_if = "Option::is_none")]
    pub time_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Waypoint {
    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Declared operating window of a flight, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Open-interval overlap test: touching windows do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Overlap interval of two windows, `None` when they do not overlap.
    pub fn intersection(&self, other: &TimeWindow) -> Option<TimeInterval> {
        self.overlaps(other).then(|| TimeInterval {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    pub fn shift(&mut self, delta: chrono::Duration) {
        self.start += delta;
        self.end += delta;
    }
}

/// The primary drone's mission plan.
///
/// A resolved mission is structurally identical; resolution always
/// works on its own deep copy and never aliases this data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
}

/// One of the other known trajectories sharing the airspace.
///
/// `waypoints` and `time_window` default when absent so a structurally
/// incomplete record degrades the pair instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub drone_id: String,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
}

/// The trajectory-set record: all non-primary flights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightSchedule {
    #[serde(default)]
    pub flights: Vec<Flight>,
}

/// Time span attached to a conflict, carried on the wire as the
/// string `"<start> to <end>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

impl From<TimeInterval> for String {
    fn from(interval: TimeInterval) -> String {
        interval.to_string()
    }
}

impl TryFrom<String> for TimeInterval {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (start, end) = value
            .split_once(" to ")
            .ok_or_else(|| format!("time interval {value:?} is not \"<start> to <end>\""))?;
        let parse = |text: &str| {
            DateTime::parse_from_rfc3339(text.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|err| format!("bad timestamp {text:?} in time interval: {err}"))
        };
        Ok(Self {
            start: parse(start)?,
            end: parse(end)?,
        })
    }
}

/// A detected unsafe proximity between two trajectories.
///
/// `location` is the `"(x, y, z)"` textual tuple shared with the
/// resolution engine and downstream consumers; `involved_flights` is
/// normalized to lexical order so the pair is unordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub location: String,
    pub time: Option<TimeInterval>,
    pub involved_flights: [String; 2],
}

impl Conflict {
    pub fn new(location: Point3, time: Option<TimeInterval>, first: &str, second: &str) -> Self {
        let involved_flights = if first <= second {
            [first.to_string(), second.to_string()]
        } else {
            [second.to_string(), first.to_string()]
        };
        Self {
            location: location.to_string(),
            time,
            involved_flights,
        }
    }

    /// Parse the textual location back into a 3D point.
    pub fn location_point(&self) -> Result<Point3, EngineError> {
        parse_point3(&self.location)
    }
}

/// A proposed numeric adjustment from the external advisor.
///
/// Fields arrive as free-form text and may carry unit suffixes
/// ("120 meters", "5 minutes"); the engine strips and parses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub reason: String,
}

/// A conflict paired with the suggestion meant to resolve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictSolution {
    pub conflict: Conflict,
    pub suggestion: Suggestion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn window_overlap_is_open_interval() {
        let a = TimeWindow { start: at(10, 0), end: at(11, 0) };
        let b = TimeWindow { start: at(11, 0), end: at(12, 0) };
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = TimeWindow { start: at(10, 30), end: at(11, 30) };
        assert!(a.overlaps(&c));
        let overlap = a.intersection(&c).unwrap();
        assert_eq!(overlap.start, at(10, 30));
        assert_eq!(overlap.end, at(11, 0));
    }

    #[test]
    fn conflict_normalizes_involved_pair() {
        let location = Point3::new(1.0, 2.0, 3.0);
        let conflict = Conflict::new(location, None, "DRONE-B", "DRONE-A");
        assert_eq!(conflict.involved_flights, ["DRONE-A", "DRONE-B"]);
        assert_eq!(conflict.location, "(1, 2, 3)");
    }

    #[test]
    fn time_interval_round_trips_as_string() {
        let interval = TimeInterval { start: at(10, 0), end: at(10, 30) };
        let encoded = serde_json::to_string(&interval).unwrap();
        assert_eq!(encoded, "\"2024-06-01T10:00:00Z to 2024-06-01T10:30:00Z\"");
        let decoded: TimeInterval = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, interval);
    }

    #[test]
    fn waypoint_defaults_altitude_and_accepts_time_alias() {
        let wp: Waypoint = serde_json::from_str(r#"{"x": 1.0, "y": 2.0, "time": 3}"#).unwrap();
        assert_eq!(wp.z, 0.0);
        assert_eq!(wp.time_index, Some(3.0));
        assert!(wp.timestamp.is_none());
    }

    #[test]
    fn incomplete_flight_record_degrades_instead_of_failing() {
        let flight: Flight = serde_json::from_str(r#"{"drone_id": "DRONE-X"}"#).unwrap();
        assert!(flight.waypoints.is_empty());
        assert!(flight.time_window.is_none());
    }
}
