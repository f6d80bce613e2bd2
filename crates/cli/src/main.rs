use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;

use config::Config;
use handlers::Printer;

#[derive(Parser)]
#[command(name = "wod-score")]
#[command(about = "Competition workout score parsing and leaderboard ranking", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one score as typed by an athlete or judge
    Parse {
        input: String,

        #[arg(long)]
        scheme: String,

        /// Time cap in seconds
        #[arg(long, env = "WOD_SCORE_TIME_CAP")]
        time_cap: Option<i64>,

        #[arg(long)]
        tiebreak: Option<String>,
    },
    /// Parse a tie-break value
    Tiebreak {
        input: String,

        #[arg(long)]
        scheme: String,
    },
    /// Validate a JSON score input
    Validate { file: PathBuf },
    /// Parse several rounds and aggregate them
    Rounds {
        #[arg(required = true)]
        inputs: Vec<String>,

        #[arg(long)]
        scheme: String,

        #[arg(long)]
        score_type: Option<String>,

        /// Time cap in seconds
        #[arg(long, env = "WOD_SCORE_TIME_CAP")]
        time_cap: Option<i64>,
    },
    /// Rank a JSON leaderboard request
    Leaderboard { file: PathBuf },
    /// Score a JSON competition request into overall standings per division
    Competition { file: PathBuf },
    /// Compute the workouts a division competed in from a JSON heat query
    Relevance { file: PathBuf },
    /// Check a value against a sample of peer values
    Outlier {
        value: f64,

        #[arg(required = true, allow_negative_numbers = true)]
        sample: Vec<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("wod_score={},scoring={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let printer = Printer::new(config.pretty);

    match cli.command {
        Commands::Parse {
            input,
            scheme,
            time_cap,
            tiebreak,
        } => {
            handlers::handle_parse(&printer, &input, &scheme, time_cap, tiebreak.as_deref())
                .context("Failed to parse score")?;
        }
        Commands::Tiebreak { input, scheme } => {
            handlers::handle_tiebreak(&printer, &input, &scheme)
                .context("Failed to parse tie-break")?;
        }
        Commands::Validate { file } => {
            handlers::handle_validate(&printer, file)
                .await
                .context("Validation failed")?;
        }
        Commands::Rounds {
            inputs,
            scheme,
            score_type,
            time_cap,
        } => {
            handlers::handle_rounds(
                &printer,
                &inputs,
                &scheme,
                score_type.as_deref(),
                time_cap,
            )
            .context("Failed to encode rounds")?;
        }
        Commands::Leaderboard { file } => {
            handlers::handle_leaderboard(&printer, file)
                .await
                .context("Failed to build leaderboard")?;
        }
        Commands::Competition { file } => {
            handlers::handle_competition(&printer, file)
                .await
                .context("Failed to score competition")?;
        }
        Commands::Relevance { file } => {
            handlers::handle_relevance(&printer, file)
                .await
                .context("Failed to compute relevant workouts")?;
        }
        Commands::Outlier { value, sample } => {
            handlers::handle_outlier(&printer, value, &sample)
                .context("Failed to check outlier")?;
        }
    }

    Ok(())
}
