//! Log verbosity configuration.
//!
//! The verbosity count from the command line maps onto three levels:
//! no flag shows warnings and errors, `-v` adds progress, `-vv` and above
//! add debug detail such as every parsed manifest entry. `RUST_LOG` wins
//! over the flag when it is set.

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Returns the default filter directive for a verbosity count.
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Builds the filter: `RUST_LOG` if set and valid, otherwise the verbosity default.
#[must_use]
pub fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Builds a subscriber writing timestamped single-line records to stderr.
///
/// The caller decides how to install it; the binary scopes it with
/// [`tracing::subscriber::set_default`].
#[must_use]
pub fn subscriber(verbose: u8) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish()
}
