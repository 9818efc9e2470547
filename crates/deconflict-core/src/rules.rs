//! Separation thresholds and resolution policy knobs.

use serde::{Deserialize, Serialize};

/// Configuration for detection buffers and resolution minimums.
///
/// Distances are in mission-local units, delays in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparationRules {
    /// Proximity threshold for the spatial detector
    pub spatial_buffer: f64,
    /// Tighter proximity threshold for the temporal detector
    pub temporal_buffer: f64,
    /// Minimum vertical separation enforced on altitude edits
    pub min_vertical_separation: f64,
    /// Minimum horizontal separation enforced on path edits
    pub min_horizontal_separation: f64,
    /// Minimum delay enforced on temporal edits (minutes)
    pub min_delay_minutes: f64,
    /// Radius around a conflict within which waypoints are eligible for edits
    pub affected_radius: f64,
    /// Forced climb applied when no eligible waypoint remains
    pub fallback_climb: f64,
    /// Altitude gap above which the post-pass smooths the next waypoint
    pub smoothing_threshold: f64,
    /// Minutes per waypoint time-index tick
    pub tick_minutes: f64,
    /// Where untimed conflicts sort relative to timed ones
    pub untimed_order: UntimedOrder,
}

impl Default for SeparationRules {
    fn default() -> Self {
        Self {
            spatial_buffer: 2.0,
            temporal_buffer: 1.0,
            min_vertical_separation: 20.0,
            min_horizontal_separation: 10.0,
            min_delay_minutes: 5.0,
            affected_radius: 5.0,
            fallback_climb: 25.0,
            smoothing_threshold: 10.0,
            tick_minutes: 10.0,
            untimed_order: UntimedOrder::First,
        }
    }
}

/// Chronological-sort placement for conflicts with no time interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntimedOrder {
    /// Untimed conflicts are treated as earliest
    #[default]
    First,
    /// Untimed conflicts are treated as latest
    Last,
}
