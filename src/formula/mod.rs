//! Packaging manifest for distributing `envc` through a formula-based
//! package manager.
//!
//! The manifest names the source archive, pins its SHA-256 digest, and
//! describes how the package manager builds and installs the binary. The
//! `envc-formula` binary computes the digest of a local archive and renders
//! the manifest as formula text.
//!
//! # Sub-modules
//!
//! - [`checksum`] - Streamed SHA-256 computation for archives.
//! - [`error`] - Validation and verification errors.
//! - [`manifest`] - Manifest fields, validation and rendering.
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).

pub mod checksum;
pub mod error;
pub mod manifest;
pub mod sha256_digest;

pub use checksum::compute_sha256;
pub use error::FormulaError;
pub use manifest::{FormulaManifest, ManifestParams};
pub use sha256_digest::Sha256Digest;
