//! Resolution engine: applies advisor suggestions to a copy of the
//! primary mission until minimum separation from each conflict is
//! restored.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Duration;

use crate::error::EngineError;
use crate::geometry::{parse_point3, parse_scalar, parse_xy, Point3};
use crate::models::{Conflict, ConflictSolution, Mission, Suggestion};
use crate::rules::{SeparationRules, UntimedOrder};

/// Result of one resolution run.
///
/// `mission` owns its own waypoint data and never aliases the input.
/// `unresolved` lists conflicts that were skipped (unparseable
/// location, or no unmodified waypoint left for the fallback).
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    pub mission: Mission,
    pub modified_indices: BTreeSet<usize>,
    pub unresolved: Vec<Conflict>,
}

/// Applies a sequence of conflict/suggestion pairs to the primary
/// mission, enforcing the configured separation minimums.
#[derive(Debug, Clone, Default)]
pub struct ResolutionEngine {
    pub rules: SeparationRules,
}

impl ResolutionEngine {
    pub fn new(rules: SeparationRules) -> Self {
        Self { rules }
    }

    /// Produce a resolved mission from the primary plan and the
    /// advisor's suggestions.
    ///
    /// Edits are applied in chronological conflict order, each
    /// waypoint at most once per run. Per-conflict and per-edit
    /// failures are logged and recovered; the only hard failure is a
    /// primary mission with no waypoints.
    pub fn resolve(
        &self,
        primary: &Mission,
        solutions: &[ConflictSolution],
    ) -> Result<ResolutionOutcome, EngineError> {
        if primary.waypoints.is_empty() {
            return Err(EngineError::EmptyMission);
        }

        let mut mission = primary.clone();
        let mut ordered: Vec<&ConflictSolution> = solutions.iter().collect();
        ordered.sort_by(|a, b| self.chronological(&a.conflict, &b.conflict));

        let mut modified: BTreeSet<usize> = BTreeSet::new();
        let mut unresolved: Vec<Conflict> = Vec::new();
        let mut window_shifted = false;

        for solution in ordered {
            let center = match parse_point3(&solution.conflict.location) {
                Ok(point) => point,
                Err(err) => {
                    tracing::warn!(%err, "skipping conflict with unparseable location");
                    unresolved.push(solution.conflict.clone());
                    continue;
                }
            };

            let affected = self.affected_waypoints(&mission, &center, &modified);
            if affected.is_empty() {
                if !self.force_vertical_separation(&mut mission, &center, &mut modified) {
                    tracing::warn!(
                        location = %solution.conflict.location,
                        "every waypoint already modified; conflict left unresolved"
                    );
                    unresolved.push(solution.conflict.clone());
                }
                continue;
            }

            for (idx, distance) in affected {
                tracing::debug!(waypoint = idx, distance, "applying suggestion");
                self.apply_suggestion(
                    &mut mission,
                    idx,
                    &center,
                    &solution.suggestion,
                    &mut window_shifted,
                );
                modified.insert(idx);
            }
        }

        self.smooth_transitions(&mut mission, &modified);

        Ok(ResolutionOutcome {
            mission,
            modified_indices: modified,
            unresolved,
        })
    }

    /// Chronological order on conflict intervals; conflicts with no
    /// interval sort per the configured policy.
    fn chronological(&self, a: &Conflict, b: &Conflict) -> Ordering {
        match (&a.time, &b.time) {
            (Some(ta), Some(tb)) => ta.start.cmp(&tb.start),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match self.rules.untimed_order {
                UntimedOrder::First => Ordering::Less,
                UntimedOrder::Last => Ordering::Greater,
            },
            (Some(_), None) => match self.rules.untimed_order {
                UntimedOrder::First => Ordering::Greater,
                UntimedOrder::Last => Ordering::Less,
            },
        }
    }

    /// Not-yet-modified waypoints strictly within the affected radius,
    /// ascending by distance to the conflict.
    fn affected_waypoints(
        &self,
        mission: &Mission,
        center: &Point3,
        modified: &BTreeSet<usize>,
    ) -> Vec<(usize, f64)> {
        let mut affected: Vec<(usize, f64)> = mission
            .waypoints
            .iter()
            .enumerate()
            .filter(|(idx, _)| !modified.contains(idx))
            .filter_map(|(idx, wp)| {
                let distance = wp.position().distance(center);
                (distance < self.rules.affected_radius).then_some((idx, distance))
            })
            .collect();
        affected.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        affected
    }

    /// Apply the altitude, path, and delay edits present in the
    /// suggestion, in that fixed order, each independently recovered
    /// on parse failure.
    fn apply_suggestion(
        &self,
        mission: &mut Mission,
        idx: usize,
        center: &Point3,
        suggestion: &Suggestion,
        window_shifted: &mut bool,
    ) {
        if let Some(text) = suggestion.altitude.as_deref() {
            match parse_scalar(text) {
                Ok(proposed) => self.apply_altitude(mission, idx, center, proposed),
                Err(err) => tracing::warn!(%err, waypoint = idx, "skipping altitude edit"),
            }
        }

        if let Some(text) = suggestion.path.as_deref() {
            match parse_xy(text) {
                Ok((x, y)) => self.apply_path(mission, idx, center, x, y),
                Err(err) => tracing::warn!(%err, waypoint = idx, "skipping path edit"),
            }
        }

        if let Some(text) = suggestion.delay.as_deref() {
            match parse_scalar(text) {
                Ok(minutes) => self.apply_delay(mission, idx, minutes, window_shifted),
                Err(err) => tracing::warn!(%err, waypoint = idx, "skipping delay edit"),
            }
        }
    }

    /// Set the waypoint altitude, clamped so vertical separation from
    /// the conflict altitude never drops below the minimum.
    fn apply_altitude(&self, mission: &mut Mission, idx: usize, center: &Point3, proposed: f64) {
        let min_sep = self.rules.min_vertical_separation;
        let wp = &mut mission.waypoints[idx];
        if (proposed - center.z).abs() >= min_sep {
            wp.z = proposed;
        } else if proposed >= center.z {
            wp.z = center.z + min_sep;
        } else {
            wp.z = center.z - min_sep;
        }
    }

    /// Move the waypoint to the proposed (x, y), scaling the offset
    /// from the conflict outward to the minimum horizontal separation
    /// when the proposal is too close.
    fn apply_path(&self, mission: &mut Mission, idx: usize, center: &Point3, x: f64, y: f64) {
        let min_sep = self.rules.min_horizontal_separation;
        let dx = x - center.x;
        let dy = y - center.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let wp = &mut mission.waypoints[idx];
        if distance >= min_sep {
            wp.x = x;
            wp.y = y;
        } else if distance > 0.0 {
            let scale = min_sep / distance;
            wp.x = center.x + dx * scale;
            wp.y = center.y + dy * scale;
        } else {
            // Proposal coincides with the conflict point, so the
            // offset direction is undefined; push due +x instead.
            tracing::debug!(waypoint = idx, "degenerate path proposal, using fixed direction");
            wp.x = center.x + min_sep;
            wp.y = center.y;
        }
    }

    /// Delay the waypoint timestamp by at least the minimum delay. The
    /// first delay applied in a run also shifts the mission window.
    fn apply_delay(&self, mission: &mut Mission, idx: usize, minutes: f64, window_shifted: &mut bool) {
        let minutes = minutes.max(self.rules.min_delay_minutes);
        let delta = Duration::seconds((minutes * 60.0).round() as i64);

        let Some(timestamp) = mission.waypoints[idx].timestamp else {
            tracing::debug!(waypoint = idx, "waypoint has no timestamp, delay skipped");
            return;
        };
        mission.waypoints[idx].timestamp = Some(timestamp + delta);

        if !*window_shifted {
            if let Some(window) = mission.time_window.as_mut() {
                window.shift(delta);
            }
            *window_shifted = true;
        }
    }

    /// Fallback for conflicts with no eligible nearby waypoint: force
    /// the nearest unmodified waypoint up by the configured climb.
    /// Returns false when every waypoint is already modified.
    fn force_vertical_separation(
        &self,
        mission: &mut Mission,
        center: &Point3,
        modified: &mut BTreeSet<usize>,
    ) -> bool {
        let mut nearest: Option<(usize, f64)> = None;
        for (idx, wp) in mission.waypoints.iter().enumerate() {
            if modified.contains(&idx) {
                continue;
            }
            let distance_sq = wp.position().distance_sq(center);
            // Strict < keeps the first index on ties.
            if nearest.map_or(true, |(_, best)| distance_sq < best) {
                nearest = Some((idx, distance_sq));
            }
        }

        let Some((idx, _)) = nearest else {
            return false;
        };
        mission.waypoints[idx].z += self.rules.fallback_climb;
        modified.insert(idx);
        tracing::debug!(waypoint = idx, "applied fallback vertical separation");
        true
    }

    /// One post-pass over adjacent waypoints: where an edited waypoint
    /// is followed by an untouched one and the altitude gap exceeds
    /// the threshold, pull the untouched one to the midpoint.
    fn smooth_transitions(&self, mission: &mut Mission, modified: &BTreeSet<usize>) {
        for i in 0..mission.waypoints.len().saturating_sub(1) {
            if !modified.contains(&i) || modified.contains(&(i + 1)) {
                continue;
            }
            let current = mission.waypoints[i].z;
            let next = mission.waypoints[i + 1].z;
            if (current - next).abs() > self.rules.smoothing_threshold {
                mission.waypoints[i + 1].z = (current + next) / 2.0;
            }
        }
    }
}
