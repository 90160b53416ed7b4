//! Marketplace HTTP client for fetching a single extension package.
//!
//! The client performs exactly one GET per call and classifies the response
//! into a [`DownloadOutcome`]. Only local filesystem failures are returned as
//! errors; HTTP and transport failures are logged and become outcomes so the
//! queue runner can decide what to do with the item.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_MARKETPLACE_URL, PARTIAL_SUFFIX, READ_TIMEOUT_SECS,
};
use super::error::DownloadError;
use crate::manifest::ExtensionRef;
use crate::user_agent;

/// Result of a single fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The package was written to the target path.
    Success,
    /// The marketplace rate-limited the request (HTTP 429); try again later.
    RetryableFailure,
    /// Any other failure; the item is abandoned.
    FatalFailure,
}

/// Fetches one extension package to a target path.
///
/// Implementations must touch no file unless they return
/// [`DownloadOutcome::Success`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Attempts exactly one fetch of `extension` into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] only for failures that should abort the run,
    /// such as an unwritable output directory.
    async fn fetch(
        &self,
        extension: &ExtensionRef,
        output: &Path,
    ) -> Result<DownloadOutcome, DownloadError>;
}

/// HTTP client for the extension marketplace.
///
/// Created once and reused for every package, taking advantage of
/// connection pooling.
///
/// # Example
///
/// ```no_run
/// use vsix_mirror::download::{Fetcher, MarketplaceClient};
/// use vsix_mirror::manifest::ExtensionRef;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MarketplaceClient::new()?;
/// let ext = ExtensionRef::new("rust-lang", "rust-analyzer", "0.3.1850");
/// let outcome = client.fetch(&ext, Path::new(&ext.file_name())).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    client: Client,
    base_url: Url,
}

impl MarketplaceClient {
    /// Creates a client for the public marketplace with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_base_url(DEFAULT_MARKETPLACE_URL)
    }

    /// Creates a client that builds package URLs from `base_url` instead of
    /// the public marketplace (a mirror, or a local test server).
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidBaseUrl`] if `base_url` does not parse
    /// or cannot carry a path, and [`DownloadError::Client`] if the HTTP
    /// client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, DownloadError> {
        Self::with_timeouts(
            base_url,
            Duration::from_secs(CONNECT_TIMEOUT_SECS),
            Duration::from_secs(READ_TIMEOUT_SECS),
        )
    }

    /// Creates a client with explicit connect and read-idle timeouts.
    ///
    /// `read_timeout` bounds the wait for each read, not the whole request:
    /// a body that keeps arriving is read to the end however long it takes.
    ///
    /// # Errors
    ///
    /// Same as [`with_base_url`](Self::with_base_url).
    pub fn with_timeouts(
        base_url: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, DownloadError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| DownloadError::invalid_base_url(base_url, e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(DownloadError::invalid_base_url(
                base_url,
                "URL cannot be a base",
            ));
        }
        let client = build_client(connect_timeout, read_timeout)
            .map_err(|source| DownloadError::Client { source })?;
        debug!(base_url = %parsed, "marketplace client ready");
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Returns the package download URL for `extension`.
    ///
    /// `{base}/_apis/public/gallery/publishers/{publisher}/vsextensions/{name}/{version}/vspackage`
    #[must_use]
    pub fn package_url(&self, extension: &ExtensionRef) -> Url {
        let mut url = self.base_url.clone();
        // `with_base_url` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "_apis",
                "public",
                "gallery",
                "publishers",
                extension.publisher(),
                "vsextensions",
                extension.name(),
                extension.version(),
                "vspackage",
            ]);
        }
        url
    }
}

#[async_trait]
impl Fetcher for MarketplaceClient {
    #[instrument(skip_all, fields(extension = %extension))]
    async fn fetch(
        &self,
        extension: &ExtensionRef,
        output: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let url = self.package_url(extension);
        debug!(url = %url, "requesting package");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(source) => {
                let err = DownloadError::network(url.as_str(), source);
                error!(error = %err, "request failed");
                return Ok(DownloadOutcome::FatalFailure);
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("too many requests, moving to end of queue to retry");
            return Ok(DownloadOutcome::RetryableFailure);
        }
        if !status.is_success() {
            error!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or("unknown"),
                "download failed"
            );
            return Ok(DownloadOutcome::FatalFailure);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => {
                let err = DownloadError::network(url.as_str(), source);
                error!(error = %err, "failed to read response body");
                return Ok(DownloadOutcome::FatalFailure);
            }
        };

        write_package(output, &body).await?;
        info!(path = %output.display(), bytes = body.len(), "download complete");
        Ok(DownloadOutcome::Success)
    }
}

/// Writes `body` beside `output` and renames it into place, so readers never
/// observe a partially written package.
async fn write_package(output: &Path, body: &[u8]) -> Result<(), DownloadError> {
    let partial = partial_path(output);
    if let Err(e) = tokio::fs::write(&partial, body).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(DownloadError::io(partial, e));
    }
    if let Err(e) = tokio::fs::rename(&partial, output).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(DownloadError::io(output, e));
    }
    Ok(())
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

fn build_client(connect_timeout: Duration, read_timeout: Duration) -> Result<Client, reqwest::Error> {
    // Idle timeout per read only; a progressing body is read to the end.
    Client::builder()
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .gzip(true)
        .user_agent(user_agent::default_download_user_agent())
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_package_url_default_marketplace() {
        let client = MarketplaceClient::new().unwrap();
        let ext = ExtensionRef::new("foo", "bar", "1.2.3");
        assert_eq!(
            client.package_url(&ext).as_str(),
            "https://marketplace.visualstudio.com/_apis/public/gallery/publishers/foo/vsextensions/bar/1.2.3/vspackage"
        );
    }

    #[test]
    fn test_package_url_keeps_dotted_name() {
        let client = MarketplaceClient::new().unwrap();
        let ext = ExtensionRef::new("redhat", "vscode.yaml", "1.14.0");
        assert!(
            client
                .package_url(&ext)
                .as_str()
                .contains("/vsextensions/vscode.yaml/1.14.0/vspackage")
        );
    }

    #[test]
    fn test_package_url_with_base_path() {
        let client = MarketplaceClient::with_base_url("http://127.0.0.1:8080/mirror/").unwrap();
        let ext = ExtensionRef::new("foo", "bar", "1.2.3");
        assert_eq!(
            client.package_url(&ext).as_str(),
            "http://127.0.0.1:8080/mirror/_apis/public/gallery/publishers/foo/vsextensions/bar/1.2.3/vspackage"
        );
    }

    #[test]
    fn test_with_base_url_rejects_garbage() {
        let err = MarketplaceClient::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, DownloadError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_with_base_url_rejects_cannot_be_a_base() {
        let err = MarketplaceClient::with_base_url("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, DownloadError::InvalidBaseUrl { .. }));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_write_package_failure_removes_partial_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("foo.bar-1.2.3.vsix");
        let partial = partial_path(&output);
        // every write to /dev/full fails with ENOSPC, like a full disk
        std::os::unix::fs::symlink("/dev/full", &partial).unwrap();

        let err = write_package(&output, b"XYZ").await.unwrap_err();

        assert!(err.is_io(), "expected IO error, got {err:?}");
        assert!(
            std::fs::symlink_metadata(&partial).is_err(),
            "partial file should be removed after a failed write"
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        let partial = partial_path(Path::new("/tmp/out/foo.bar-1.2.3.vsix"));
        assert_eq!(partial, PathBuf::from("/tmp/out/foo.bar-1.2.3.vsix.part"));
    }
}
