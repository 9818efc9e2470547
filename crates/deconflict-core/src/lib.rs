//! Core deconfliction engine for UAV mission planning.
//!
//! Determines whether a primary mission's trajectory comes into unsafe
//! proximity with other known trajectories, and applies externally
//! supplied suggestions to produce a resolved mission that restores
//! minimum separation.
//!
//! Pipeline: [`SpatialConflictDetector`] + [`TemporalConflictDetector`]
//! -> [`dedupe_conflicts`] -> (external advisor pairs each conflict
//! with a [`Suggestion`]) -> [`ResolutionEngine::resolve`].
//!
//! Everything here is synchronous, in-memory, and free of I/O;
//! loading, persistence, and presentation live with the callers.

pub mod dedupe;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod models;
pub mod resolve;
pub mod rules;

pub use dedupe::dedupe_conflicts;
pub use detect::{scan_for_conflicts, SpatialConflictDetector, TemporalConflictDetector};
pub use error::EngineError;
pub use geometry::{parse_point3, parse_scalar, parse_xy, Point3};
pub use models::{
    Conflict, ConflictSolution, Flight, FlightSchedule, Mission, Suggestion, TimeInterval,
    TimeWindow, Waypoint, PRIMARY_FLIGHT_ID,
};
pub use resolve::{ResolutionEngine, ResolutionOutcome};
pub use rules::{SeparationRules, UntimedOrder};
