//! Bingo CLI
//!
//! Replays scripted games through the win-condition engine and prints the
//! resolved win-condition profiles.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "bingo")]
#[command(about = "Replay bingo games through the win-condition engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file (JSON, or YAML with a .yaml/.yml extension)
    Replay {
        /// Scenario file path
        #[arg(long)]
        scenario: PathBuf,

        /// Seed for the timeout tie-break; random when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a win-condition profile as YAML
    Profile {
        /// classic, race or blackout; defaults to BINGO_WIN_PROFILE
        #[arg(long)]
        name: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { scenario, seed, json } => {
            let loaded = bingo_cli::load_scenario(&scenario)?;
            let report = bingo_cli::replay(&loaded, seed)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&loaded, &report);
            }
        }

        Commands::Profile { name } => {
            let config = match name {
                Some(name) => bingo_core::WinConditionConfig::from_profile(&name)
                    .with_context(|| format!("unknown profile '{}'", name))?,
                None => bingo_core::WinConditionConfig::from_env_or_default(),
            };
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_report(scenario: &bingo_cli::Scenario, report: &bingo_cli::ReplayReport) {
    println!("🎯 Mode: {}", report.mode);
    println!("   Teams: {}", scenario.teams.join(", "));

    for step in &report.steps {
        let outcome = match (&step.decision, &step.timeout) {
            (_, Some(timeout)) => {
                format!("time up -> team#{} ({:?})", timeout.team.0, timeout.reason)
            }
            (Some(decision), None) if !decision.is_none() => format!("{:?}", decision),
            _ if step.sudden_death => "sudden death".to_string(),
            _ => "-".to_string(),
        };
        println!("   #{:<3} {:<40} {}", step.index, format!("{:?}", step.event), outcome);
    }

    for snitch in &report.golden_snitch {
        println!("\n✨ {} caught the Golden Snitch (+{})", snitch.team, snitch.bonus);
    }

    if report.winners.is_empty() {
        println!("\n⏳ No winner yet: {:?}", report.final_status);
    } else {
        println!("\n🏆 Winner(s): {}", report.winners.join(", "));
    }
    if report.skipped_events > 0 {
        println!("   ({} event(s) after the game ended were ignored)", report.skipped_events);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("bingo CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
