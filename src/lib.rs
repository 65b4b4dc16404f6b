//! Env Check library.
//!
//! This crate provides the core functionality behind the `envc` binary: reading
//! `.env` files, filtering variable names, comparing a target file against a
//! source (example) file, and rendering the result. It also carries the
//! packaging manifest used to distribute the binary through a formula-based
//! package manager.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - `list` and `cmp` command handlers
//! - [`envfile`] - `.env` line parser and file reader
//! - [`error`] - Semantic error types
//! - [`formula`] - Package manifest, checksum computation and rendering
//! - [`json`] - JSON output for scripting
//! - [`logging`] - Log backend initialisation
//! - [`palette`] - ANSI colour roles
//! - [`pattern`] - Glob matching and name filters
//! - [`render`] - Human-readable table output
//! - [`table`] - Variable table, status evaluation and interpolation

pub mod cli;
pub mod commands;
pub mod envfile;
pub mod error;
pub mod formula;
pub mod json;
pub mod logging;
pub mod palette;
pub mod pattern;
pub mod render;
pub mod table;
