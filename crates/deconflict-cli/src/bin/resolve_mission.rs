//! Detect conflicts and apply advisor suggestions to produce a
//! resolved mission file.
//!
//! The suggestions file is a JSON array of suggestion records paired
//! by index with the deduplicated conflict list that check_mission
//! reports for the same inputs.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use deconflict_cli::explain::explain_conflict;
use deconflict_cli::files::{load_json, save_json};
use deconflict_core::{
    scan_for_conflicts, ConflictSolution, FlightSchedule, Mission, ResolutionEngine, Suggestion,
};

#[derive(Parser, Debug)]
#[command(version, about = "Apply resolution suggestions to a conflicted mission plan")]
struct Args {
    /// Primary mission JSON file
    #[arg(long)]
    mission: PathBuf,

    /// Flight schedule JSON file
    #[arg(long)]
    flights: PathBuf,

    /// Suggestion records JSON file (one per detected conflict)
    #[arg(long)]
    suggestions: PathBuf,

    /// Where to write the resolved mission
    #[arg(long, default_value = "resolved_mission.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mission: Mission = load_json(&args.mission)?;
    let schedule: FlightSchedule = load_json(&args.flights)?;

    let conflicts = scan_for_conflicts(&mission, &schedule.flights);
    if conflicts.is_empty() {
        println!("No conflicts detected. Mission is safe to execute.");
        return Ok(());
    }
    println!("{} conflict(s) detected.", conflicts.len());

    let suggestions: Vec<Suggestion> = load_json(&args.suggestions)?;
    if suggestions.len() != conflicts.len() {
        tracing::warn!(
            conflicts = conflicts.len(),
            suggestions = suggestions.len(),
            "suggestion count does not match conflict count; pairing by index"
        );
    }
    let solutions: Vec<ConflictSolution> = conflicts
        .into_iter()
        .zip(suggestions)
        .map(|(conflict, suggestion)| ConflictSolution {
            conflict,
            suggestion,
        })
        .collect();

    let outcome = ResolutionEngine::default().resolve(&mission, &solutions)?;
    save_json(&args.output, &outcome.mission)?;

    println!(
        "Resolved mission written to {} ({} waypoint(s) modified).",
        args.output.display(),
        outcome.modified_indices.len()
    );
    for conflict in &outcome.unresolved {
        println!("Unresolved: {}", explain_conflict(conflict));
    }
    Ok(())
}
