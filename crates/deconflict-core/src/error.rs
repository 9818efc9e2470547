//! Error taxonomy for the deconfliction engine.
//!
//! Per-conflict and per-edit failures are recovered locally with
//! best-effort defaults; only a structurally invalid primary mission
//! aborts a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A conflict's location string is not a `"(x, y, z)"` tuple.
    /// That conflict is skipped and reported unresolved.
    #[error("conflict location {0:?} is not a \"(x, y, z)\" tuple")]
    LocationParse(String),

    /// A suggestion's path text is not an `"x,y"` pair. Only the path
    /// edit is skipped; altitude and delay edits still apply.
    #[error("path suggestion {0:?} is not an \"x,y\" coordinate pair")]
    PathParse(String),

    /// An altitude or delay value could not be parsed after stripping
    /// unit suffixes. That single edit is skipped.
    #[error("could not parse a numeric value from {0:?}")]
    NumericParse(String),

    /// The primary mission has no waypoints. The one unrecoverable
    /// input condition.
    #[error("primary mission has no waypoints")]
    EmptyMission,
}
