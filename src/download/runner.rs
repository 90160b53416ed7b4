//! Queue runner that drives every manifest entry through the fetcher.
//!
//! # Overview
//!
//! The runner owns a FIFO work queue seeded with the manifest entries and
//! processes them one at a time:
//!
//! - If the target package already exists on disk, the entry is done.
//! - Otherwise the [`Fetcher`] is invoked once.
//!   - [`DownloadOutcome::Success`] and [`DownloadOutcome::FatalFailure`]
//!     remove the entry for good.
//!   - [`DownloadOutcome::RetryableFailure`] appends the entry to the tail of
//!     the queue and pauses for the configured retry delay before the next
//!     entry is attempted.
//!
//! There is no retry cap: a persistently rate-limited entry keeps cycling
//! until it succeeds, fails fatally, or the process is stopped.
//!
//! # Example
//!
//! ```no_run
//! use vsix_mirror::download::{MarketplaceClient, QueueRunner, RunnerConfig};
//! use vsix_mirror::manifest::read_manifest;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extensions = read_manifest(Path::new("extensions.txt"))?;
//! let client = MarketplaceClient::new()?;
//! let runner = QueueRunner::new(RunnerConfig::new("./mirror"));
//! let summary = runner.run(&extensions, &client).await?;
//! println!("downloaded {} of {}", summary.downloaded(), summary.total());
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::client::{DownloadOutcome, Fetcher};
use super::constants::DEFAULT_RETRY_DELAY;
use super::error::DownloadError;
use crate::manifest::ExtensionRef;

/// Pauses the runner after a rate-limited attempt.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Configuration for a [`QueueRunner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    output_dir: PathBuf,
    retry_delay: Duration,
}

impl RunnerConfig {
    /// Creates a configuration writing packages into `output_dir` with the
    /// default one-second retry delay.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Sets the fixed pause applied after each rate-limited attempt.
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the retry delay.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the path the package for `extension` is written to.
    #[must_use]
    pub fn target_path(&self, extension: &ExtensionRef) -> PathBuf {
        self.output_dir.join(extension.file_name())
    }
}

/// Counts from one [`QueueRunner::run`] invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    total: usize,
    downloaded: usize,
    skipped: usize,
    failed: usize,
    rate_limited: usize,
}

impl RunSummary {
    /// Number of manifest entries the run started with.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Entries fetched and written during this run.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Entries whose package already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Entries abandoned after a fatal failure.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Rate-limited attempts, each of which requeued its entry.
    #[must_use]
    pub fn rate_limited(&self) -> usize {
        self.rate_limited
    }
}

/// Drives a FIFO work queue of extensions through a [`Fetcher`].
///
/// Strictly sequential: one entry is in flight at a time.
#[derive(Clone)]
pub struct QueueRunner {
    config: RunnerConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for QueueRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueRunner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QueueRunner {
    /// Creates a runner that pauses with the tokio timer.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Creates a runner with a custom [`Sleeper`].
    #[must_use]
    pub fn with_sleeper(config: RunnerConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { config, sleeper }
    }

    /// Returns the runner configuration.
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Processes every extension until the queue is empty.
    ///
    /// Per-item HTTP failures are logged and counted, never returned.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Io`] if the output directory cannot be created
    /// or inspected, or if the fetcher fails to write a package. The run stops
    /// at the first such error.
    #[instrument(skip_all, fields(total = extensions.len(), output_dir = %self.config.output_dir.display()))]
    pub async fn run(
        &self,
        extensions: &[ExtensionRef],
        fetcher: &dyn Fetcher,
    ) -> Result<RunSummary, DownloadError> {
        let total = extensions.len();
        let mut summary = RunSummary {
            total,
            ..RunSummary::default()
        };
        let mut queue: VecDeque<ExtensionRef> = extensions.iter().cloned().collect();

        if !queue.is_empty() {
            tokio::fs::create_dir_all(&self.config.output_dir)
                .await
                .map_err(|e| DownloadError::io(self.config.output_dir.clone(), e))?;
        }

        while let Some(extension) = queue.pop_front() {
            // `queue.len()` is already one short after the pop.
            let index = total - queue.len();
            let target = self.config.target_path(&extension);

            let exists = tokio::fs::try_exists(&target)
                .await
                .map_err(|e| DownloadError::io(target.clone(), e))?;
            if exists {
                info!("{index}/{total}: {extension}: already exists");
                summary.skipped += 1;
                continue;
            }

            info!("{index}/{total}: {extension}: downloading");
            match fetcher.fetch(&extension, &target).await? {
                DownloadOutcome::Success => summary.downloaded += 1,
                DownloadOutcome::FatalFailure => summary.failed += 1,
                DownloadOutcome::RetryableFailure => {
                    summary.rate_limited += 1;
                    debug!(
                        extension = %extension,
                        delay_ms = self.config.retry_delay.as_millis(),
                        "requeued after rate limit"
                    );
                    queue.push_back(extension);
                    self.sleeper.sleep(self.config.retry_delay).await;
                }
            }
        }

        Ok(summary)
    }
}
