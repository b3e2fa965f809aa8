//! qadiff CLI
//!
//! Command-line interface for comparing QA regression artifacts.
//!
//! Exit codes: 0 equal, 1 different, 2 not comparable or failed.

use clap::{Parser, Subcommand, ValueEnum};
use qadiff_core::errors::DiffError;
use qadiff_core::logging_facility::{self, Profile};
use qadiff_core::report::Verdict;
use qadiff_core_types::RequestId;
use std::path::PathBuf;

mod commands;
mod config;

use config::QadiffConfig;

#[derive(Debug, Parser)]
#[command(name = "qadiff")]
#[command(about = "qadiff - Diff images, JSON documents and tables", long_about = None)]
struct Cli {
    /// Configuration file (default: ./qadiff.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write <stem>.json and <stem>.md reports into this directory
    #[arg(long, global = true)]
    report_dir: Option<PathBuf>,

    /// Log format on stderr (default: from config)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Print the structured report as JSON instead of the Markdown summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two images (jpg, jpeg, png)
    Image(commands::image::ImageArgs),
    /// Compare two JSON documents as key-value trees
    Json(commands::json::JsonArgs),
    /// Compare two tables (csv, xls, xlsx)
    Table(commands::table::TableArgs),
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(verdict) => commands::exit_code(verdict),
        Err(e) => {
            eprintln!("Error: {}", e);
            commands::EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<Verdict, DiffError> {
    let config = QadiffConfig::load(cli.config.as_deref())?;

    let profile = match cli.log_format {
        Some(LogFormat::Human) => Profile::Development,
        Some(LogFormat::Json) => Profile::Production,
        None => config.logging.profile,
    };
    logging_facility::init(profile);

    let request_id = RequestId::new();
    let span = tracing::info_span!("qadiff", request_id = %request_id);
    let _guard = span.enter();

    let output = commands::Output {
        report_dir: cli.report_dir.or_else(|| config.report.dir.clone()),
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Image(args) => commands::image::execute(args, &config, &output),
        Commands::Json(args) => commands::json::execute(args, &output),
        Commands::Table(args) => commands::table::execute(args, &config, &output),
    };
    result.map_err(|e| e.with_request_id(request_id))
}
