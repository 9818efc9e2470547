//! CLI front-end for the deconfliction engine.
//!
//! Binaries:
//! - check_mission: detect conflicts between a mission and a schedule
//! - resolve_mission: apply advisor suggestions and write the resolved
//!   mission
//!
//! File loading/saving and explanation text live here; the core engine
//! stays free of I/O.

pub mod explain;
pub mod files;
