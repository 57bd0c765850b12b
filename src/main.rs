use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phpcity::output::read_project_json;
use phpcity::{
    layout_records, write_project_json, CityError, LayoutConfig, ProjectScanner, ProjectSummary,
    RecordMode, ScanConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter (`warn`, `phpcity=debug`, ...)
const LOG_ENV_VAR: &str = "PHPCITY_LOG";

#[derive(Parser)]
#[command(name = "phpcity")]
#[command(about = "Measure PHP types and lay them out as a code city", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PHP project and write its records as JSON
    Run {
        /// Project directory to scan
        project_dir: PathBuf,

        /// Directory the JSON file is written to
        #[arg(default_value = "./output")]
        output_dir: PathBuf,

        /// One record per type declaration instead of one per file
        #[arg(long)]
        all_types: bool,

        /// Parse files one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Compute the city layout for a records JSON file and print it
    Layout {
        /// JSON file written by `run`
        records: PathBuf,

        /// Partial layout configuration (JSON) overriding the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print compact instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    let outcome = match cli.command {
        Commands::Run {
            project_dir,
            output_dir,
            all_types,
            sequential,
        } => run_project(&project_dir, &output_dir, all_types, sequential),
        Commands::Layout {
            records,
            config,
            compact,
        } => print_layout(&records, config.as_deref(), compact),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Last component of the project directory, resolving `.` and `..`
fn project_name(project_dir: &Path) -> String {
    project_dir
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(project_dir)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

fn run_project(
    project_dir: &Path,
    output_dir: &Path,
    all_types: bool,
    sequential: bool,
) -> Result<ExitCode> {
    let scanner = ProjectScanner::new(ScanConfig {
        parallel: !sequential,
        record_mode: if all_types {
            RecordMode::PerDeclaration
        } else {
            RecordMode::PerFile
        },
        ..ScanConfig::default()
    });

    let report = match scanner.scan(project_dir) {
        Ok(report) => report,
        Err(CityError::InvalidInput { .. }) => {
            eprintln!(
                "Error: Directory '{}' does not exist or is not accessible.",
                project_dir.display()
            );
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if !report.failures.is_empty() {
        eprintln!(
            "Warning: skipped {} file(s) that could not be parsed.",
            report.failures.len()
        );
    }

    if report.is_empty() {
        println!("No PHP classes found in the specified directory.");
        return Ok(ExitCode::SUCCESS);
    }

    let path = write_project_json(&report.records, &project_name(project_dir), output_dir)?;

    println!("Successfully parsed {} classes.", report.records.len());
    println!("JSON file generated: {}", path.display());
    println!();
    println!("{}", ProjectSummary::from_records(&report.records));

    Ok(ExitCode::SUCCESS)
}

fn print_layout(
    records_path: &Path,
    config_path: Option<&Path>,
    compact: bool,
) -> Result<ExitCode> {
    let records = read_project_json(records_path)
        .with_context(|| format!("Failed to load records from {}", records_path.display()))?;

    let config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read layout config {}", path.display()))?;
            LayoutConfig::from_json(&json)
                .with_context(|| format!("Invalid layout config {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };

    let layout = layout_records(records, config)?;
    let json = if compact {
        serde_json::to_string(&layout)?
    } else {
        serde_json::to_string_pretty(&layout)?
    };
    println!("{}", json);

    Ok(ExitCode::SUCCESS)
}
