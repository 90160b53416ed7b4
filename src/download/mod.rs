//! Package download: the single-item marketplace fetcher and the queue runner.
//!
//! # Features
//!
//! - One GET per attempt against the marketplace package endpoint
//! - HTTP 429 classified as retryable, every other error status as fatal
//! - Packages written via a `.part` file and renamed into place
//! - FIFO queue with tail requeue and a fixed pause after each rate limit
//!
//! # Example
//!
//! ```no_run
//! use vsix_mirror::download::{MarketplaceClient, QueueRunner, RunnerConfig};
//! use vsix_mirror::manifest::ExtensionRef;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MarketplaceClient::new()?;
//! let runner = QueueRunner::new(RunnerConfig::new("."));
//! let extensions = vec![ExtensionRef::new("foo", "bar", "1.2.3")];
//! runner.run(&extensions, &client).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod runner;

pub use client::{DownloadOutcome, Fetcher, MarketplaceClient};
pub use constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_MARKETPLACE_URL, DEFAULT_RETRY_DELAY, READ_TIMEOUT_SECS,
};
pub use error::DownloadError;
pub use runner::{QueueRunner, RunSummary, RunnerConfig, Sleeper, TokioSleeper};
