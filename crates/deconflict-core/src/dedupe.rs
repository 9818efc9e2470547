//! Merging of detector outputs into one canonical conflict list.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::models::Conflict;

/// Collapse conflicts that share a (location, involved-pair) key.
///
/// The spatial and temporal detectors commonly rediscover the same
/// physical conflict. Output order is first-seen key order. For
/// duplicates, a record carrying a time interval wins over one
/// without; otherwise the first encountered is kept.
pub fn dedupe_conflicts(conflicts: Vec<Conflict>) -> Vec<Conflict> {
    let mut unique: Vec<Conflict> = Vec::with_capacity(conflicts.len());
    let mut seen: HashMap<(String, [String; 2]), usize> = HashMap::new();

    for conflict in conflicts {
        // involved_flights is normalized at construction, so the key
        // is canonical for the unordered pair.
        let key = (conflict.location.clone(), conflict.involved_flights.clone());
        match seen.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(conflict);
            }
            Entry::Occupied(slot) => {
                let kept = &mut unique[*slot.get()];
                if kept.time.is_none() && conflict.time.is_some() {
                    *kept = conflict;
                }
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::models::TimeInterval;
    use chrono::{TimeZone, Utc};

    fn conflict(x: f64, a: &str, b: &str, timed: bool) -> Conflict {
        let time = timed.then(|| TimeInterval {
            start: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap(),
        });
        Conflict::new(Point3::new(x, 0.0, 0.0), time, a, b)
    }

    #[test]
    fn keeps_first_seen_order() {
        let deduped = dedupe_conflicts(vec![
            conflict(1.0, "primary", "DRONE-A", false),
            conflict(2.0, "primary", "DRONE-B", false),
            conflict(1.0, "primary", "DRONE-A", false),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].location, "(1, 0, 0)");
        assert_eq!(deduped[1].location, "(2, 0, 0)");
    }

    #[test]
    fn prefers_timed_duplicates() {
        let deduped = dedupe_conflicts(vec![
            conflict(1.0, "primary", "DRONE-A", false),
            conflict(1.0, "primary", "DRONE-A", true),
        ]);
        assert_eq!(deduped.len(), 1);
        assert!(deduped[0].time.is_some());

        // The timed record also wins when it comes first.
        let deduped = dedupe_conflicts(vec![
            conflict(1.0, "primary", "DRONE-A", true),
            conflict(1.0, "primary", "DRONE-A", false),
        ]);
        assert_eq!(deduped.len(), 1);
        assert!(deduped[0].time.is_some());
    }

    #[test]
    fn pair_order_does_not_matter() {
        let deduped = dedupe_conflicts(vec![
            conflict(1.0, "DRONE-A", "primary", false),
            conflict(1.0, "primary", "DRONE-A", false),
        ]);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn is_idempotent() {
        let input = vec![
            conflict(1.0, "primary", "DRONE-A", false),
            conflict(1.0, "primary", "DRONE-A", true),
            conflict(2.0, "primary", "DRONE-B", true),
        ];
        let once = dedupe_conflicts(input);
        let twice = dedupe_conflicts(once.clone());
        assert_eq!(once, twice);
    }
}
