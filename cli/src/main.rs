//! CLI entrypoint for atelier
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod render;
mod repl;

use anyhow::{Result, bail};
use atelier_application::{Orchestrator, OrchestratorSettings, RunGenerationUseCase};
use atelier_domain::{ModelAssignments, SpecialistRegistry};
use atelier_infrastructure::{ComfyClient, ConfigLoader, OllamaGateway};
use clap::Parser;
use repl::ChatRepl;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atelier", about = "Multi-specialist creative session orchestrator")]
struct Cli {
    /// The creative brief to discuss (omit with --chat for interactive mode)
    message: Option<String>,

    /// Start an interactive chat session
    #[arg(long)]
    chat: bool,

    /// Path to a config file (overrides discovery)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip config discovery and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Override the default model for unassigned roles
    #[arg(long)]
    default_model: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting atelier");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config error: {issue}");
        }
        bail!("invalid configuration ({} issue(s))", issues.len());
    }

    let assignments: ModelAssignments = match &cli.default_model {
        Some(model) => config.models.to_assignments_with_default(model.clone()),
        None => config.models.to_assignments(),
    };

    // === Dependency Injection ===
    let gateway = Arc::new(OllamaGateway::new(&config.ollama.base_url)?);
    let registry = SpecialistRegistry::new(&assignments);
    let settings: OrchestratorSettings = config.orchestrator.to_settings();
    let mut orchestrator = Orchestrator::new(gateway, registry, settings)?;

    if cli.chat {
        let comfy = Arc::new(ComfyClient::new(&config.comfyui.base_url)?);
        let generation = RunGenerationUseCase::new(comfy);
        let mut repl = ChatRepl::new(orchestrator, generation);
        repl.run().await?;
        return Ok(());
    }

    let message = match cli.message {
        Some(m) => m,
        None => bail!("A message is required. Use --chat for interactive mode."),
    };

    repl::run_round(&mut orchestrator, &message).await?;
    Ok(())
}
