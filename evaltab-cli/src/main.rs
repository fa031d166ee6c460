//! evaltab CLI: renders a results file as a structured JSON report or LaTeX.

mod commands;

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use evaltab_core::{EvaltabConfig, OutputFormat};

/// evaltab: model-evaluation results to LaTeX tables and legends
#[derive(Parser, Debug)]
#[command(name = "evaltab", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Results file (JSON array of evaluation records)
    input: Option<PathBuf>,

    /// Output format: json, latex
    #[arg(short, long)]
    format: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over the verbosity flags when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the report, so logs go to stderr only.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

/// Apply CLI flags on top of the loaded configuration.
fn apply_overrides(config: &mut EvaltabConfig, format: Option<&str>) -> anyhow::Result<()> {
    if let Some(format) = format {
        config.output.format = format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}

fn run_report(
    input: &Path,
    config: &EvaltabConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = evaltab_core::render_file(input, config)
        .with_context(|| format!("Failed to build report from {}", input.display()))?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote report");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Handle subcommands
    if let Some(command) = cli.command {
        return commands::handle_command(command, &workspace, cli.config.as_deref());
    }

    let Some(input) = cli.input else {
        anyhow::bail!("No input file given. Usage: evaltab <INPUT> [--format json|latex]");
    };

    let mut config = evaltab_core::load_config(Some(&workspace), cli.config.as_deref())
        .context("Configuration error")?;
    apply_overrides(&mut config, cli.format.as_deref())?;
    tracing::debug!(format = %config.output.format, input = %input.display(), "Rendering report");

    run_report(&input, &config, cli.output.as_deref())
}
