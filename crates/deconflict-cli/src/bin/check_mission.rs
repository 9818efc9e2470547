//! Check a primary mission against scheduled traffic for conflicts.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use deconflict_cli::explain::explain_conflicts;
use deconflict_cli::files::load_json;
use deconflict_core::{scan_for_conflicts, FlightSchedule, Mission};

#[derive(Parser, Debug)]
#[command(version, about = "Detect spatial and temporal conflicts for a mission plan")]
struct Args {
    /// Primary mission JSON file
    #[arg(long)]
    mission: PathBuf,

    /// Flight schedule JSON file
    #[arg(long)]
    flights: PathBuf,

    /// Emit raw conflict records as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mission: Mission = load_json(&args.mission)?;
    let schedule: FlightSchedule = load_json(&args.flights)?;

    let conflicts = scan_for_conflicts(&mission, &schedule.flights);
    if conflicts.is_empty() {
        println!("No conflicts detected. Mission is safe to execute.");
        return Ok(ExitCode::SUCCESS);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
    } else {
        println!("Conflicts detected:");
        for line in explain_conflicts(&conflicts) {
            println!("{line}");
        }
    }
    Ok(ExitCode::FAILURE)
}
