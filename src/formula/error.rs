//! Error types for manifest validation and archive verification.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::sha256_digest::Sha256Digest;

/// Errors arising from invalid manifest values or archive checks.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// A SHA-256 digest is not a valid 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A manifest field is empty or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the rejected field.
        field: &'static str,
        /// Description of the validation failure.
        reason: String,
    },

    /// The archive digest does not match the manifest.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Digest recorded in the manifest.
        expected: Sha256Digest,
        /// Digest computed from the archive.
        actual: Sha256Digest,
    },

    /// An archive or output file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path of the file involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`FormulaError`].
pub type Result<T> = std::result::Result<T, FormulaError>;
