//! Constants for the download module (marketplace endpoint, timeouts, retry delay).

use std::time::Duration;

/// Default marketplace base URL.
pub const DEFAULT_MARKETPLACE_URL: &str = "https://marketplace.visualstudio.com";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout between reads (5 minutes). Resets on every chunk, so
/// a slow but progressing body is never cut off.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Fixed pause after a rate-limited (429) response.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Suffix of the temporary file a package body is written to before rename.
pub(crate) const PARTIAL_SUFFIX: &str = "part";
