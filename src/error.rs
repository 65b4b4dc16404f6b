//! Error types for the `envc` CLI.
//!
//! Messages follow the wording users of the tool already know, e.g.
//! `File './.env' does not exist`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, comparing or rendering env files.
#[derive(Debug, Error)]
pub enum EnvcError {
    /// The requested env file does not exist.
    #[error("File '{path}' does not exist")]
    FileNotFound {
        /// Path that was looked up.
        path: Utf8PathBuf,
    },

    /// The env file exists but could not be read.
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Both ignore and focus patterns were supplied.
    #[error("Cannot read env file while taking both ignore and focus arguments")]
    ConflictingFilters,

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialisation of the report failed.
    #[error("failed to serialise JSON output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for env file operations.
pub type Result<T, E = EnvcError> = std::result::Result<T, E>;
