//! Error types for manifest reading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading an extension manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be opened or read.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// Path of the manifest file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A line has no `@` separating the identifier from the version.
    #[error(
        "line {line_number}: missing '@' in '{line}'\n  Suggestion: Use the form publisher.name@version"
    )]
    MissingVersion {
        /// 1-indexed line number in the manifest.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
    },

    /// The identifier portion of a line has no `.` separating publisher from name.
    #[error(
        "line {line_number}: missing '.' between publisher and name in '{line}'\n  Suggestion: Use the form publisher.name@version"
    )]
    MissingPublisher {
        /// 1-indexed line number in the manifest.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
    },
}

impl ManifestError {
    /// Creates a read error for the given manifest path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a missing-`@` error.
    #[must_use]
    pub fn missing_version(line_number: usize, line: &str) -> Self {
        Self::MissingVersion {
            line_number,
            line: line.to_string(),
        }
    }

    /// Creates a missing-`.` error.
    #[must_use]
    pub fn missing_publisher(line_number: usize, line: &str) -> Self {
        Self::MissingPublisher {
            line_number,
            line: line.to_string(),
        }
    }
}
