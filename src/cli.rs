//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use vsix_mirror::DEFAULT_MARKETPLACE_URL;

/// Mirror editor extension packages listed in a manifest.
///
/// Each manifest line is `publisher.name@version`; the matching package is
/// saved as `publisher.name-version.vsix`. Existing packages are skipped and
/// rate-limited requests are retried at the end of the queue.
#[derive(Parser, Debug)]
#[command(name = "vsix-mirror")]
#[command(author, version, about)]
pub struct Args {
    /// File containing the extension list including versions
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Increase output verbosity (-v for progress, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory the .vsix packages are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Pause after a rate-limited response in milliseconds (max 60000)
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub retry_delay_ms: u64,

    /// Marketplace base URL
    #[arg(long, hide = true, default_value = DEFAULT_MARKETPLACE_URL)]
    pub marketplace_url: String,
}
