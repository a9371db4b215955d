//! `sleuth`: guess the personality you are thinking of.
//!
//! Usage:
//!   sleuth data/personalities.csv
//!   sleuth data/personalities.csv --provider ollama --config sleuth.toml
//!
//! Logs go to stderr; set `SLEUTH_LOG=debug` for per-question detail.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sleuth_core::config::SleuthConfig;
use sleuth_core::traits::IEmbeddingProvider;
use sleuth_embeddings::EmbeddingEngine;
use sleuth_session::Session;
use tracing::{info, warn};

/// Guess the personality you are thinking of.
#[derive(Parser, Debug)]
#[command(name = "sleuth", version, about)]
struct Args {
    /// Dataset CSV (name, gender, country, occupation, birth_date, death_date, image_url, description)
    dataset: PathBuf,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Embedding provider override: tfidf or ollama
    #[arg(long, short = 'p')]
    provider: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn load_config(args: &Args) -> Result<SleuthConfig> {
    let mut config = match &args.config {
        Some(path) => SleuthConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SleuthConfig::default(),
    };
    if let Some(provider) = &args.provider {
        config.embedding.provider = provider.clone();
    }
    if args.json_logs {
        config.observability.json = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    sleuth_observability::init_tracing(&config.observability)?;

    let store = sleuth_loader::load_csv(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))?;

    // Built before the runtime: the Ollama provider uses a blocking client.
    let engine = EmbeddingEngine::new(config.embedding.clone());
    info!(
        candidates = store.len(),
        provider = engine.active_provider(),
        "starting session"
    );
    let provider: Arc<dyn IEmbeddingProvider> = Arc::new(engine);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let mut session = Session::new(Arc::new(store), provider, &config);
    println!("Think of a famous personality and I will try to guess who it is.");

    let stdin = io::stdin();
    let outcome = runtime.block_on(sleuth_cli::console::play(
        &mut session,
        stdin.lock(),
        io::stdout(),
    ))?;

    match outcome {
        Some(outcome) => info!(%outcome, session_id = session.id(), "session over"),
        None => warn!(session_id = session.id(), "input closed before the session ended"),
    }
    Ok(())
}
