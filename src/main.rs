//! CLI entry point for the extension mirror tool.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use vsix_mirror::{MarketplaceClient, QueueRunner, RunnerConfig, logging, read_manifest};

mod cli;

use cli::Args;

/// Exit status when the manifest lists no extensions (-1 as an unsigned byte).
const NO_EXTENSIONS_EXIT_CODE: u8 = 255;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Scoped to this thread; the current-thread runtime keeps every task on it.
    let _log_guard = tracing::subscriber::set_default(logging::subscriber(args.verbose));

    debug!(?args, "CLI arguments parsed");

    let extensions = read_manifest(&args.file)?;
    if extensions.is_empty() {
        info!("no extensions to download");
        return Ok(ExitCode::from(NO_EXTENSIONS_EXIT_CODE));
    }
    debug!(count = extensions.len(), "manifest parsed");

    let client = MarketplaceClient::with_base_url(&args.marketplace_url)?;
    let config = RunnerConfig::new(args.output_dir.clone())
        .with_retry_delay(Duration::from_millis(args.retry_delay_ms));
    let runner = QueueRunner::new(config);

    let summary = runner.run(&extensions, &client).await?;

    info!(
        total = summary.total(),
        downloaded = summary.downloaded(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        rate_limited = summary.rate_limited(),
        "mirror complete"
    );

    Ok(ExitCode::SUCCESS)
}
