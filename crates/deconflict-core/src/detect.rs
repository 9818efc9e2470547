//! Pairwise conflict detection between a primary mission and other
//! known trajectories.
//!
//! Both detectors examine every unordered pair of trajectories exactly
//! once and take the full waypoint cross product within a pair. The
//! O(pairs x waypoints^2) scan is fine at mission scale (tens of
//! waypoints); a spatial index could be substituted without changing
//! external behavior if counts grow.

use chrono::{DateTime, Duration, Utc};

use crate::dedupe::dedupe_conflicts;
use crate::models::{
    Conflict, Flight, Mission, TimeInterval, TimeWindow, Waypoint, PRIMARY_FLIGHT_ID,
};
use crate::rules::SeparationRules;

/// Borrowed view of one trajectory, primary or otherwise.
struct Track<'a> {
    drone_id: &'a str,
    waypoints: &'a [Waypoint],
    time_window: Option<&'a TimeWindow>,
}

fn collect_tracks<'a>(primary: &'a Mission, others: &'a [Flight]) -> Vec<Track<'a>> {
    let mut tracks = Vec::with_capacity(others.len() + 1);
    tracks.push(Track {
        drone_id: PRIMARY_FLIGHT_ID,
        waypoints: &primary.waypoints,
        time_window: primary.time_window.as_ref(),
    });
    for flight in others {
        tracks.push(Track {
            drone_id: &flight.drone_id,
            waypoints: &flight.waypoints,
            time_window: flight.time_window.as_ref(),
        });
    }
    tracks
}

/// Flags conflicts from raw 3D proximity, independent of timing.
#[derive(Debug, Clone)]
pub struct SpatialConflictDetector {
    /// Distance below which two waypoints conflict
    pub safety_buffer: f64,
    /// Minutes per waypoint time-index tick
    pub tick_minutes: f64,
}

impl Default for SpatialConflictDetector {
    fn default() -> Self {
        let rules = SeparationRules::default();
        Self {
            safety_buffer: rules.spatial_buffer,
            tick_minutes: rules.tick_minutes,
        }
    }
}

impl SpatialConflictDetector {
    pub fn new(safety_buffer: f64) -> Self {
        Self {
            safety_buffer,
            ..Self::default()
        }
    }

    pub fn detect(&self, primary: &Mission, others: &[Flight]) -> Vec<Conflict> {
        let tracks = collect_tracks(primary, others);
        let mut conflicts = Vec::new();

        for i in 0..tracks.len() {
            for j in i + 1..tracks.len() {
                let (first, second) = (&tracks[i], &tracks[j]);
                for wp1 in first.waypoints {
                    for wp2 in second.waypoints {
                        let p1 = wp1.position();
                        if p1.distance(&wp2.position()) >= self.safety_buffer {
                            continue;
                        }
                        let time = self.conflict_interval(
                            wp1,
                            wp2,
                            first.time_window,
                            second.time_window,
                        );
                        conflicts.push(Conflict::new(p1, time, first.drone_id, second.drone_id));
                    }
                }
            }
        }

        tracing::debug!(
            buffer = self.safety_buffer,
            total = conflicts.len(),
            "spatial conflict scan complete"
        );
        conflicts
    }

    /// Interval spanned by the two conflicting waypoints' schedule
    /// slots. Absent unless both waypoints carry a time index and both
    /// flights declare a window start.
    fn conflict_interval(
        &self,
        wp1: &Waypoint,
        wp2: &Waypoint,
        window1: Option<&TimeWindow>,
        window2: Option<&TimeWindow>,
    ) -> Option<TimeInterval> {
        let t1 = self.tick_time(wp1, window1)?;
        let t2 = self.tick_time(wp2, window2)?;
        Some(TimeInterval {
            start: t1.min(t2),
            end: t1.max(t2),
        })
    }

    fn tick_time(&self, wp: &Waypoint, window: Option<&TimeWindow>) -> Option<DateTime<Utc>> {
        let index = wp.time_index?;
        let window = window?;
        let offset_secs = index * self.tick_minutes * 60.0;
        Some(window.start + Duration::seconds(offset_secs.round() as i64))
    }
}

/// Flags conflicts only between trajectories whose time windows
/// overlap, using a tighter proximity threshold.
#[derive(Debug, Clone)]
pub struct TemporalConflictDetector {
    /// Distance below which two waypoints conflict
    pub safety_buffer: f64,
}

impl Default for TemporalConflictDetector {
    fn default() -> Self {
        Self {
            safety_buffer: SeparationRules::default().temporal_buffer,
        }
    }
}

impl TemporalConflictDetector {
    pub fn new(safety_buffer: f64) -> Self {
        Self { safety_buffer }
    }

    pub fn detect(&self, primary: &Mission, others: &[Flight]) -> Vec<Conflict> {
        let tracks = collect_tracks(primary, others);
        let mut conflicts = Vec::new();

        for i in 0..tracks.len() {
            for j in i + 1..tracks.len() {
                let (first, second) = (&tracks[i], &tracks[j]);
                // Temporal screening is a prerequisite: pairs without
                // two known, overlapping windows are never reported.
                let (Some(w1), Some(w2)) = (first.time_window, second.time_window) else {
                    continue;
                };
                let Some(overlap) = w1.intersection(w2) else {
                    continue;
                };

                for wp1 in first.waypoints {
                    for wp2 in second.waypoints {
                        let p1 = wp1.position();
                        if p1.distance(&wp2.position()) >= self.safety_buffer {
                            continue;
                        }
                        conflicts.push(Conflict::new(
                            p1,
                            Some(overlap.clone()),
                            first.drone_id,
                            second.drone_id,
                        ));
                    }
                }
            }
        }

        tracing::debug!(
            buffer = self.safety_buffer,
            total = conflicts.len(),
            "temporal conflict scan complete"
        );
        conflicts
    }
}

/// Run both default detectors and dedupe their combined output into
/// the canonical conflict list.
pub fn scan_for_conflicts(primary: &Mission, others: &[Flight]) -> Vec<Conflict> {
    let mut conflicts = SpatialConflictDetector::default().detect(primary, others);
    conflicts.extend(TemporalConflictDetector::default().detect(primary, others));
    dedupe_conflicts(conflicts)
}
