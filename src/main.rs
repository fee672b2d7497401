//! CLI entry point for the cohort grader.
//!
//! Provides subcommands for running the full grading pipeline and for
//! inspecting how a single score sheet is typed.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cohort_grader::config::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, PipelineConfig};
use cohort_grader::output::{print_json, print_pretty};
use cohort_grader::pipeline;
use cohort_grader::table::Table;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cohort_grader")]
#[command(about = "Compute ranked per-cohort final grades", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade every student on the roster and write one report per cohort
    Run {
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Load a score sheet and log its typed rows
    Inspect {
        /// CSV file with an SID column
        #[arg(value_name = "CSV")]
        path: PathBuf,

        /// Only show the row with this SID
        #[arg(short, long)]
        key: Option<String>,
    },
}

#[derive(Args)]
struct PathArgs {
    /// Directory holding the conventionally named input files
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Directory the reports are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Roster JSON (defaults to <DATA_DIR>/students.json)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Homework and exam CSV (defaults to <DATA_DIR>/homework_and_exams.csv)
    #[arg(long)]
    homework: Option<PathBuf>,

    /// First quiz CSV (defaults to <DATA_DIR>/quiz_1_grades.csv)
    #[arg(long)]
    quiz_1: Option<PathBuf>,

    /// Second quiz CSV (defaults to <DATA_DIR>/quiz_2_grades.csv)
    #[arg(long)]
    quiz_2: Option<PathBuf>,
}

impl PathArgs {
    fn into_config(self) -> PipelineConfig {
        let mut config = PipelineConfig::in_dir(&self.data_dir, &self.output_dir);
        if let Some(path) = self.roster {
            config.roster_path = path;
        }
        if let Some(path) = self.homework {
            config.homework_path = path;
        }
        if let Some(path) = self.quiz_1 {
            config.quiz_1_path = path;
        }
        if let Some(path) = self.quiz_2 {
            config.quiz_2_path = path;
        }
        config
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/cohort_grader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cohort_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { paths } => {
            let config = paths.into_config();
            info!(?config, "Starting grading run");

            let summary = pipeline::run(&config).context("grading run failed")?;

            print_pretty(&summary);
            print_json(&summary)?;
        }
        Commands::Inspect { path, key } => {
            let table = Table::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;

            info!(rows = table.len(), "Table summary");

            match key {
                Some(key) => {
                    let record = table.require(&key)?;
                    info!(sid = %key, "{}", serde_json::to_string_pretty(record)?);
                }
                None => {
                    let mut keys: Vec<_> = table.keys().collect();
                    keys.sort_unstable();
                    for key in keys {
                        if let Some(record) = table.get(key) {
                            info!(sid = %key, "{}", serde_json::to_string(record)?);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
