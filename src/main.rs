//! Match Outcome Predictor CLI
//!
//! Runs the prediction pipeline over a fixture dataset on disk and prints
//! results as JSON.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use matchcast::{
    config::Config,
    engine::PredictionEngine,
    orchestrator::Orchestrator,
    provider::StaticProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "matchcast")]
#[command(about = "Football match-outcome prediction aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path; omit to use built-in defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Fixture dataset (JSON)
    #[arg(short, long, default_value = "fixtures.json")]
    data: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict a single fixture
    Predict {
        /// Fixture ID to predict
        fixture_id: String,
    },
    /// Predict a batch of fixtures
    Batch {
        /// Fixture IDs to predict
        fixture_ids: Vec<String>,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    if let Commands::Config = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let provider = StaticProvider::from_json_file(&cli.data)?;
    tracing::info!(fixtures = provider.len(), data = %cli.data, "dataset loaded");

    let engine = PredictionEngine::new(config)?;
    let orchestrator = Orchestrator::new(engine, Arc::new(provider));

    match cli.command {
        Commands::Predict { fixture_id } => {
            let result = orchestrator.predict(&fixture_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Batch { fixture_ids } => {
            let outcome = orchestrator.predict_batch(&fixture_ids).await;
            tracing::info!(
                requested = outcome.requested,
                successful = outcome.successful,
                failed = outcome.failed,
                "batch finished"
            );
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Config => unreachable!(),
    }

    Ok(())
}
