//! refminer: refactoring detection between two structural snapshots
//!
//! Compares two snapshot documents of a codebase and reports renames,
//! moves, extractions and signature changes.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use refminer::{
    cli,
    config::{AppConfig, ConfigPreset, DiffConfig, DiffPaths, FilterConfig, OutputConfig},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "refminer")]
#[command(version)]
#[command(about = "Detect refactorings between two structural snapshots", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No refactorings reported (or no --fail-on-refactoring)
    1  Refactorings reported with --fail-on-refactoring
    3  Error occurred

EXAMPLES:
    # Summary of everything detected
    refminer diff before.json after.json

    # Only renames, as JSON
    refminer diff before.json after.json --types 'Rename Class,Rename Method' -o json

    # CI gate with known file moves
    refminer diff before.json after.json --hints moves.json --fail-on-refactoring")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "REFMINER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Snapshot document of the earlier revision
    before: PathBuf,

    /// Snapshot document of the later revision
    after: PathBuf,

    /// JSON object of known before -> after class or file renames
    #[arg(long)]
    hints: Option<PathBuf>,

    /// Configuration preset: default, strict, permissive, ci-cd
    #[arg(long)]
    preset: Option<String>,

    /// Only report these refactoring types (comma-separated display names)
    #[arg(long, value_delimiter = ',')]
    types: Vec<String>,

    /// Drop refactorings below this confidence (0.0-1.0)
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any refactoring is reported
    #[arg(long)]
    fail_on_refactoring: bool,

    /// Run matching and detectors on a single thread
    #[arg(long)]
    no_parallel: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect refactorings between two snapshots
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a commented example config file
    InitConfig,

    /// Print the effective configuration (defaults merged with the config file)
    ShowConfig,
}

/// CLI flags as an `AppConfig` layer; unset flags keep their defaults so
/// `AppConfig::merge` leaves file settings alone.
fn cli_overrides(cli: &Cli, args: &DiffArgs) -> Result<AppConfig> {
    let base = match &args.preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                let valid: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                format!("Unknown preset '{name}'. Valid: {}", valid.join(", "))
            })?;
            AppConfig::from_preset(preset)
        }
        None => AppConfig::default(),
    };

    let mut overrides = AppConfig {
        matching: base.matching,
        output: OutputConfig {
            format: args.output.unwrap_or(base.output.format),
            file: args.output_file.clone(),
            no_color: cli.no_color || base.output.no_color,
        },
        filtering: FilterConfig {
            types: args.types.iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect(),
            min_confidence: args.min_confidence,
        },
        behavior: base.behavior,
    };
    overrides.behavior.fail_on_refactoring |= args.fail_on_refactoring;
    overrides.behavior.quiet |= cli.quiet;
    if args.no_parallel {
        overrides.behavior.parallel = false;
    }
    Ok(overrides)
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Diff(args) => {
            let overrides = cli_overrides(&cli, args)?;
            let (app, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::info!("Using config file {}", path.display());
            }

            let paths = DiffPaths {
                before: args.before.clone(),
                after: args.after.clone(),
                hints: args.hints.clone(),
            };
            cli::run_diff(DiffConfig::from_app_config(paths, app))
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "refminer", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = refminer::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema).with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::InitConfig => {
            print!("{}", refminer::config::generate_full_example_config());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ShowConfig => {
            let (config, loaded_from) = refminer::config::load_or_default(cli.config.as_deref());
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}
