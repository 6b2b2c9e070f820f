// NRR calculator entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Load config (config/nrr.toml under --base-dir, or defaults)
// 3. Initialize tracing (stderr; stdout carries command output)
// 4. Load the seed table into the read-only base standings
// 5. Dispatch the subcommand

mod format;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use nrr_core::config::{self, Config};
use nrr_core::scenario::{self, ScenarioRequest, Toss};
use nrr_core::seed;
use nrr_core::standings::BaseStandings;

const EXIT_OK: u8 = 0;
/// Exit code for a request that failed validation.
const EXIT_INVALID_REQUEST: u8 = 2;
/// Exit code for a valid request the engine could not satisfy.
const EXIT_UNPROCESSABLE: u8 = 3;

#[derive(Parser)]
#[command(name = "nrr")]
#[command(about = "Work out the result a cricket team needs to reach a table position")]
#[command(version)]
struct Cli {
    /// Directory holding config/nrr.toml (defaults to the current directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the points table in rank order
    Teams {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Find the runs or overs range that puts your team at a table position
    Scenario {
        /// Your team's name (case-insensitive)
        #[arg(long)]
        your_team: String,

        /// The opponent's name (case-insensitive)
        #[arg(long)]
        opponent: String,

        /// Overs per innings
        #[arg(long, default_value_t = 20)]
        overs: u32,

        /// Desired table position (1 = top)
        #[arg(long)]
        position: usize,

        /// batting-first or bowling-first
        #[arg(long)]
        toss: Toss,

        /// Runs scored batting first, or the target when bowling first
        #[arg(long)]
        runs: u32,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.base_dir {
        Some(dir) => config::load_config_from(dir),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;

    init_tracing(&config)?;
    info!(
        "Config loaded: league={}, max_overs={}",
        config.league.name, config.league.max_overs
    );

    let base = seed::load_seed(&config.league).context("failed to load seed table")?;

    match cli.command {
        Commands::Teams { format } => {
            let teams = scenario::ranked_teams(&base);
            match format {
                OutputFormat::Text => print!("{}", format::render_teams(&teams)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "teams": teams }))?
                ),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scenario {
            your_team,
            opponent,
            overs,
            position,
            toss,
            runs,
            format,
        } => {
            let request = ScenarioRequest {
                your_team,
                opponent_team: opponent,
                total_overs: overs,
                desired_position: position,
                toss,
                runs,
            };
            let status = run_scenario(&base, &config, &request, format)?;
            Ok(ExitCode::from(status))
        }
    }
}

/// Validate and run one scenario, printing the outcome. Returns the process
/// exit status.
fn run_scenario(
    base: &BaseStandings,
    config: &Config,
    request: &ScenarioRequest,
    format: OutputFormat,
) -> anyhow::Result<u8> {
    if let Err(errors) = request.validate(config.league.max_overs) {
        warn!("Rejected scenario request: {}", errors);
        match format {
            OutputFormat::Text => {
                for issue in &errors.issues {
                    eprintln!("error: {} {}", issue.field, issue.message);
                }
            }
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "errors": errors.issues }))?
            ),
        }
        return Ok(EXIT_INVALID_REQUEST);
    }

    match scenario::calculate_scenario(base, request) {
        Ok(result) => {
            match format {
                OutputFormat::Text => print!("{}", format::render_scenario(request, &result)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            Ok(EXIT_OK)
        }
        Err(e) => {
            if e.is_no_solution() {
                info!("Scenario not achievable: {}", e);
            } else {
                error!("Scenario failed: {}", e);
            }
            match format {
                OutputFormat::Text => eprintln!("error: {e}"),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "error": e.to_string() }))?
                ),
            }
            Ok(EXIT_UNPROCESSABLE)
        }
    }
}

/// Initialize tracing to stderr. `RUST_LOG` wins over the configured filter.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
