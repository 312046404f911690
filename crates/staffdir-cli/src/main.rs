use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use staffdir_cli::commands;
use staffdir_config::LogConfig;
use staffdir_observability::init_console_logging;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "staffdir-cli")]
#[command(about = "Staffdir CLI - Offline checks for the staff directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a staff member's increment status from their dates
    Classify {
        /// Last increment date
        #[arg(short = 'i', long, default_value = "")]
        increment: String,

        /// Joining date
        #[arg(short = 'j', long, default_value = "")]
        joining: String,

        /// Evaluate as of this date instead of today
        #[arg(long)]
        now: Option<String>,
    },
    /// Check whether a permission snapshot allows a capability
    Check {
        /// JSON file holding the snapshot ({"isSuperAdmin", "rights", "branches"})
        #[arg(short = 's', long)]
        snapshot: PathBuf,

        /// Capability key, e.g. canEditStaff
        #[arg(short = 'c', long)]
        capability: String,

        /// Branch the action targets
        #[arg(short = 'b', long)]
        branch: Option<String>,
    },
    /// Search one branch of a saved getInitialData reply
    Search {
        /// JSON file with the reply or its data array
        #[arg(short = 'd', long)]
        data: PathBuf,

        /// Branch to search
        #[arg(short = 'b', long)]
        branch: String,

        /// Text to match against name, designation and tenure
        #[arg(short = 't', long, default_value = "")]
        term: String,

        /// Evaluate tenure as of this date instead of today
        #[arg(long)]
        now: Option<String>,
    },
}

fn run(cli: Cli) -> Result<ExitCode> {
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Classify {
            increment,
            joining,
            now,
        } => {
            let now = commands::resolve_now(now.as_deref(), today)?;
            println!("{}", commands::classify(&increment, &joining, now));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            snapshot,
            capability,
            branch,
        } => {
            let json = fs::read_to_string(&snapshot)
                .with_context(|| format!("Failed to read {}", snapshot.display()))?;
            let allowed = commands::check(&json, &capability, branch.as_deref())?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            Ok(if allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Commands::Search {
            data,
            branch,
            term,
            now,
        } => {
            let now = commands::resolve_now(now.as_deref(), today)?;
            let json = fs::read_to_string(&data)
                .with_context(|| format!("Failed to read {}", data.display()))?;
            let lines = commands::search(&json, &branch, &term, now)?;
            debug!(matches = lines.len(), %branch, "search finished");
            if lines.is_empty() {
                println!("No staff found.");
            }
            for line in lines {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    init_console_logging(&LogConfig::from_env());

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("❌ {:#}", err);
            ExitCode::FAILURE
        }
    }
}
