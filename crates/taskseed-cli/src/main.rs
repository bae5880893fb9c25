mod export;

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use taskseed_core::{MemoryStore, SimConfig};
use taskseed_generate::{GenerateOptions, SeedEngine, flavor};

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Config(#[from] taskseed_core::ConfigError),
    #[error("invalid reference time: {0}")]
    ReferenceTime(#[from] chrono::ParseError),
    #[error(transparent)]
    Generation(#[from] taskseed_generate::GenerationError),
    #[error(transparent)]
    Export(#[from] export::ExportError),
}

#[derive(Parser, Debug)]
#[command(name = "taskseed", version, about = "Synthetic project-management seed data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a seed dataset and export it as CSV files.
    Generate(GenerateArgs),
    /// Parse and validate a config file without generating anything.
    CheckConfig(CheckConfigArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML config file; defaults apply for anything unset.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output directory for CSV files and the run report.
    #[arg(long, default_value = "seed-out")]
    out_dir: PathBuf,
    /// Override the config's random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Pin "now" to an RFC 3339 instant for reproducible output.
    #[arg(long, value_name = "RFC3339")]
    reference_time: Option<String>,
}

#[derive(Args, Debug)]
struct CheckConfigArgs {
    #[arg(value_name = "PATH")]
    config: PathBuf,
}

fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::CheckConfig(args) => run_check_config(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.random_seed = seed;
    }

    let reference_time = args
        .reference_time
        .as_deref()
        .map(parse_reference_time)
        .transpose()?;
    let options = GenerateOptions { reference_time };

    let flavor = flavor::from_config(&config.flavor);
    let engine = SeedEngine::new(config, options);
    let mut store = MemoryStore::new();
    let outcome = engine.run(&mut store, flavor.as_ref())?;

    let written = export::write_run_artifacts(&args.out_dir, &store, &outcome.report)?;
    tracing::info!(
        files = written.len(),
        out_dir = %args.out_dir.display(),
        "artifacts written"
    );
    println!(
        "wrote {} files to {} ({} violations)",
        written.len(),
        args.out_dir.display(),
        outcome.report.violations.len()
    );
    Ok(())
}

fn run_check_config(args: CheckConfigArgs) -> Result<(), CliError> {
    let config = load_config(Some(&args.config))?;
    config.validate()?;
    println!(
        "{} ok: {} orgs, {} projects, {} tasks/project, seed {}",
        args.config.display(),
        config.dataset.num_organizations,
        config.dataset.num_projects,
        config.dataset.num_tasks_per_project,
        config.random_seed
    );
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SimConfig, CliError> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(toml::from_str(&raw)?)
        }
        None => Ok(SimConfig::default()),
    }
}

fn parse_reference_time(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
