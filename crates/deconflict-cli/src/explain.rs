//! Human-readable conflict explanations for operator output.

use deconflict_core::Conflict;

/// One-line explanation of a conflict.
pub fn explain_conflict(conflict: &Conflict) -> String {
    let time = conflict
        .time
        .as_ref()
        .map(|interval| interval.to_string())
        .unwrap_or_else(|| "an unknown time".to_string());
    format!(
        "Conflict detected at location {} during {}. Involved flights: {}.",
        conflict.location,
        time,
        conflict.involved_flights.join(", ")
    )
}

/// Explanations for a whole conflict list, in order.
pub fn explain_conflicts(conflicts: &[Conflict]) -> Vec<String> {
    conflicts.iter().map(explain_conflict).collect()
}
