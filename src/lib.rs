//! Extension mirror core library.
//!
//! Reads a manifest of `publisher.name@version` entries and fetches each
//! package from the extension marketplace into a local directory, skipping
//! packages that are already present and requeueing rate-limited requests.
//!
//! # Architecture
//!
//! - [`manifest`] - Manifest parsing into [`ExtensionRef`] values
//! - [`download`] - Marketplace fetcher and the sequential queue runner
//! - [`logging`] - Verbosity-to-filter mapping for the tracing subscriber

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod logging;
pub mod manifest;
mod user_agent;

// Re-export commonly used types
pub use download::{
    DEFAULT_MARKETPLACE_URL, DEFAULT_RETRY_DELAY, DownloadError, DownloadOutcome, Fetcher,
    MarketplaceClient, QueueRunner, RunSummary, RunnerConfig, Sleeper, TokioSleeper,
};
pub use manifest::{ExtensionRef, ManifestError, parse_manifest, read_manifest};
