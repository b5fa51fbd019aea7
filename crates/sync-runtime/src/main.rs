//! # Sync Runtime
//!
//! Entry point for the change-event synchronization pipeline.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `CS_*` environment variables
//! 3. Validate configuration and build components
//! 4. Open the channel and start the listener
//! 5. Run until Ctrl+C, then shut down gracefully

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sync_runtime::{SyncConfig, SyncRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Cross-Sync Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = SyncConfig::from_env().context("failed to load configuration")?;
    info!(?config, "[runtime] Configuration loaded");

    let runtime = SyncRuntime::new(config)?;
    runtime.start()?;

    info!("[runtime] Sync runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    if let Some(stats) = runtime.shutdown().await {
        info!(
            received = stats.received,
            synchronized = stats.synchronized,
            skipped = stats.skipped,
            failed = stats.failed,
            "[runtime] Final event counts"
        );
    }

    Ok(())
}
