//! CLI entry point for voxbridge.
//!
//! This binary provides the `voxbridge` command with offline subcommands
//! for inspecting captured provider responses and validating daemon
//! configuration files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use voxbridge_daemon::DaemonConfig;
use voxbridge_engine::classify;
use voxbridge_provider::UnderstandResponse;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// voxbridge — voice-intent bridge between a cloud NLU provider and a
/// component-based automation bus.
#[derive(Parser)]
#[command(name = "voxbridge", version, about = "voxbridge — voice-intent bridge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a captured provider response and print the outcome.
    Classify {
        /// Path to a JSON file holding a raw understand response.
        #[arg(long)]
        response: PathBuf,

        /// Confidence threshold for routing without confirmation.
        #[arg(long, default_value_t = 0.7)]
        threshold: f64,
    },

    /// Load and validate a daemon configuration file.
    CheckConfig {
        /// Path to the TOML configuration file.
        #[arg(long)]
        config: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            response,
            threshold,
        } => cmd_classify(&response, threshold),
        Commands::CheckConfig { config } => cmd_check_config(&config),
    }
}

// ---------------------------------------------------------------------------
// Subcommand: classify
// ---------------------------------------------------------------------------

fn cmd_classify(path: &PathBuf, threshold: f64) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let response: UnderstandResponse =
        serde_json::from_str(&raw).context("response is not a valid understand payload")?;

    // Offline classification has no registry to consult; assume every
    // module is alive so the routing decision itself is visible.
    let all_alive = |_: &str| true;
    let outcome = classify(&response, threshold, &all_alive);

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: check-config
// ---------------------------------------------------------------------------

fn cmd_check_config(path: &PathBuf) -> Result<()> {
    let config = DaemonConfig::from_toml_file(path)
        .with_context(|| format!("invalid configuration at {}", path.display()))?;

    println!("configuration ok");
    println!("  language:   {}", config.language);
    println!("  threshold:  {}", config.confidence_threshold);
    println!("  workdir:    {}", config.workdir.display());
    println!("  models dir: {}", config.models_dir().display());
    println!("  mqtt:       {}:{}", config.mqtt.host, config.mqtt.port);
    Ok(())
}
