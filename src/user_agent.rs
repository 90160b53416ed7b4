//! User-Agent string sent with marketplace requests.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/vsix-mirror";

/// Default User-Agent for package downloads (identifies the tool and version).
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("vsix-mirror/{version} (+{PROJECT_UA_URL})")
}
