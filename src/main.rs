//! CLI for submitting a single thought through the reframe pipeline.
//!
//! Usage:
//!   cargo run -- "I always mess things up" --framework cbt
//!   cargo run -- "I can't do this" --framework stoic --tone direct --premium

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use reframe_core::catalog::{FrameworkId, Tone};
use reframe_core::client::create_backend;
use reframe_core::config::CompletionConfig;
use reframe_core::orchestrator::{ReframeRequest, Reframer};
use reframe_core::quota::QuotaState;
use reframe_core::store::MemoryStore;

#[derive(Parser)]
#[command(name = "reframe")]
#[command(about = "Reframe a negative thought with a therapeutic framework", long_about = None)]
struct Cli {
    /// The negative thought to reframe
    thought: String,

    /// Therapeutic framework (cbt, act, dbt, mindfulness, positive, stoic,
    /// compassion, solution, narrative)
    #[arg(long, default_value = "cbt")]
    framework: String,

    /// Voice adjustment (neutral, warm, direct)
    #[arg(long, default_value = "neutral")]
    tone: String,

    /// Treat the submission as premium-tier (no weekly limit)
    #[arg(long)]
    premium: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reframe_core=info".into()),
        )
        .init();
    reframe_core::load_env();

    let cli = Cli::parse();
    let framework: FrameworkId = cli.framework.parse()?;
    let tone: Tone = cli.tone.parse()?;

    let config = CompletionConfig::load_from_env();
    let backend = create_backend(&config)?;
    let reframer = Reframer::new(backend).with_store(Arc::new(MemoryStore::new()));

    let quota = QuotaState::new(chrono::Utc::now(), cli.premium);
    let request = ReframeRequest::new(cli.thought, framework).with_tone(tone);

    match reframer.submit(&request, quota).await {
        Ok(outcome) => {
            info!(
                remaining = ?outcome.quota.remaining_reframes(),
                "reframe complete"
            );
            println!("Framework: {}", framework.display_name());
            println!();
            println!("{}", outcome.result.supportive_passage);
            println!();
            println!("Reframed thought: {}", outcome.result.reframed_thought);
            if let Some(err) = outcome.storage_error {
                eprintln!("(storage warning: {})", err.user_message());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}
