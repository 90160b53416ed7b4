//! Manifest reading for extension lists.
//!
//! A manifest is a UTF-8 text file with one `publisher.name@version` entry
//! per line. The line is split once on `@`, then the identifier is split once
//! on the leftmost `.`, so names may themselves contain dots.
//!
//! # Example
//!
//! ```
//! use vsix_mirror::manifest::parse_manifest;
//!
//! let refs = parse_manifest("ms-python.python@2024.2.1\nrust-lang.rust-analyzer@0.3.1850\n").unwrap();
//! assert_eq!(refs.len(), 2);
//! assert_eq!(refs[0].publisher(), "ms-python");
//! assert_eq!(refs[1].name(), "rust-analyzer");
//! ```

mod error;

pub use error::ManifestError;

use std::fmt;
use std::path::Path;

use tracing::{debug, instrument};

/// File extension of downloaded packages.
pub const PACKAGE_EXTENSION: &str = "vsix";

/// Identity of one extension package: publisher, name and version.
///
/// Duplicates are allowed; a manifest listing the same entry twice yields
/// two equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionRef {
    publisher: String,
    name: String,
    version: String,
}

impl ExtensionRef {
    /// Creates a new extension reference.
    #[must_use]
    pub fn new(
        publisher: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parses a single manifest line.
    ///
    /// Trailing and leading whitespace is trimmed first. `line_number` is
    /// only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingVersion`] when the line has no `@`, and
    /// [`ManifestError::MissingPublisher`] when the identifier has no `.`.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self, ManifestError> {
        let line = line.trim();
        let (identifier, version) = line
            .split_once('@')
            .ok_or_else(|| ManifestError::missing_version(line_number, line))?;
        let (publisher, name) = identifier
            .split_once('.')
            .ok_or_else(|| ManifestError::missing_publisher(line_number, line))?;
        Ok(Self::new(publisher, name, version))
    }

    /// Returns the publisher id.
    #[must_use]
    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// Returns the extension name, which may contain dots.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version token as written in the manifest.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the deterministic output filename, `{publisher}.{name}-{version}.vsix`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}-{}.{PACKAGE_EXTENSION}",
            self.publisher, self.name, self.version
        )
    }
}

impl fmt::Display for ExtensionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}@{}", self.publisher, self.name, self.version)
    }
}

/// Parses manifest text into extension references in line order.
///
/// Blank lines are skipped. The first malformed line aborts parsing, so a bad
/// manifest never produces a partial list.
///
/// # Errors
///
/// Returns the [`ManifestError`] for the first malformed line.
pub fn parse_manifest(input: &str) -> Result<Vec<ExtensionRef>, ManifestError> {
    let mut refs = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let extension = ExtensionRef::parse_line(line, index + 1)?;
        debug!(extension = %extension, "found extension");
        refs.push(extension);
    }
    Ok(refs)
}

/// Reads and parses a manifest file.
///
/// # Errors
///
/// Returns [`ManifestError::Read`] if the file cannot be read, or a parse
/// error for the first malformed line.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_manifest(path: &Path) -> Result<Vec<ExtensionRef>, ManifestError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ManifestError::read(path, e))?;
    parse_manifest(&contents)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_publisher_name_version() {
        let ext = ExtensionRef::parse_line("foo.bar@1.2.3", 1).unwrap();
        assert_eq!(ext.publisher(), "foo");
        assert_eq!(ext.name(), "bar");
        assert_eq!(ext.version(), "1.2.3");
    }

    #[test]
    fn test_parse_line_keeps_dots_in_name() {
        let ext = ExtensionRef::parse_line("redhat.vscode.yaml.extra@1.14.0", 1).unwrap();
        assert_eq!(ext.publisher(), "redhat");
        assert_eq!(ext.name(), "vscode.yaml.extra");
        assert_eq!(ext.version(), "1.14.0");
    }

    #[test]
    fn test_parse_line_trims_whitespace() {
        let ext = ExtensionRef::parse_line("  foo.bar@1.2.3 \r", 1).unwrap();
        assert_eq!(ext, ExtensionRef::new("foo", "bar", "1.2.3"));
    }

    #[test]
    fn test_parse_line_version_is_opaque() {
        let ext = ExtensionRef::parse_line("foo.bar@latest-preview", 1).unwrap();
        assert_eq!(ext.version(), "latest-preview");
    }

    #[test]
    fn test_parse_line_missing_at_is_error() {
        let err = ExtensionRef::parse_line("foo.bar", 4).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingVersion { line_number: 4, .. }
        ));
    }

    #[test]
    fn test_parse_line_missing_dot_is_error() {
        let err = ExtensionRef::parse_line("foobar@1", 2).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingPublisher { line_number: 2, .. }
        ));
    }

    #[test]
    fn test_parse_line_dot_only_in_version_is_error() {
        // the '.' must be in the identifier, not the version
        let err = ExtensionRef::parse_line("foobar@1.0.0", 1).unwrap_err();
        assert!(matches!(err, ManifestError::MissingPublisher { .. }));
    }

    #[test]
    fn test_file_name_format() {
        let ext = ExtensionRef::new("foo", "bar", "1.2.3");
        assert_eq!(ext.file_name(), "foo.bar-1.2.3.vsix");
    }

    #[test]
    fn test_display_round_trips_manifest_form() {
        let ext = ExtensionRef::new("ms-vscode", "cpptools", "1.19.4");
        assert_eq!(ext.to_string(), "ms-vscode.cpptools@1.19.4");
    }

    #[test]
    fn test_parse_manifest_preserves_order_and_duplicates() {
        let refs = parse_manifest("b.two@2\na.one@1\nb.two@2\n").unwrap();
        assert_eq!(
            refs,
            vec![
                ExtensionRef::new("b", "two", "2"),
                ExtensionRef::new("a", "one", "1"),
                ExtensionRef::new("b", "two", "2"),
            ]
        );
    }

    #[test]
    fn test_parse_manifest_skips_blank_lines() {
        let refs = parse_manifest("\nfoo.bar@1\n   \n\nbaz.qux@2\n").unwrap();
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_parse_manifest_empty_input() {
        assert!(parse_manifest("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_manifest_reports_line_number_of_bad_line() {
        let err = parse_manifest("foo.bar@1\n\nbroken\n").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingVersion { line_number: 3, .. }
        ));
    }
}
