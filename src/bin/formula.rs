//! Formula generator for `envc` releases.
//!
//! Computes the SHA-256 digest of a local source archive, optionally checks it
//! against a published digest, and writes the rendered formula to stdout or to
//! `--output`. The Makefile `formula` target invokes this binary.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use envc::cli::GlobalArgs;
use envc::formula::manifest::{
    DEFAULT_BINARY, DEFAULT_BUILD_DEPENDENCY, DEFAULT_DESCRIPTION, DEFAULT_HOMEPAGE,
    DEFAULT_LICENSE,
};
use envc::formula::{FormulaError, FormulaManifest, ManifestParams, Sha256Digest, compute_sha256};
use envc::logging::init_logging;
use log::info;
use std::fs;
use std::io::Write;
use thiserror::Error;

/// Render the package formula for an `envc` source archive.
#[derive(Parser, Debug)]
#[command(name = "envc-formula")]
#[command(version, about = "Render the package formula for an envc source archive")]
struct FormulaCli {
    /// Local copy of the source archive the formula points at.
    #[arg(long, value_name = "FILE")]
    archive: Utf8PathBuf,

    /// Download URL of the source archive.
    #[arg(long)]
    url: String,

    /// Package name; decides the formula class name.
    #[arg(long, default_value = "envc")]
    name: String,

    /// One-line description.
    #[arg(long, default_value = DEFAULT_DESCRIPTION)]
    desc: String,

    /// Project homepage.
    #[arg(long, default_value = DEFAULT_HOMEPAGE)]
    homepage: String,

    /// License identifier.
    #[arg(long, default_value = DEFAULT_LICENSE)]
    license: String,

    /// Tool required to build from source.
    #[arg(long, default_value = DEFAULT_BUILD_DEPENDENCY)]
    depends_on: String,

    /// Path of the built binary inside the unpacked archive.
    #[arg(long, default_value = DEFAULT_BINARY)]
    binary: String,

    /// Published digest the archive must match (bare hex, `sha256:<hex>` or a
    /// `sha256sum` line).
    #[arg(long, value_name = "SHA256")]
    expect_sha256: Option<String>,

    /// Write the formula here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

/// Errors returned by the formula CLI.
#[derive(Debug, Error)]
enum FormulaCliError {
    /// Manifest validation or archive verification failed.
    #[error("{0}")]
    Formula(#[from] FormulaError),

    /// The archive given with `--archive` does not exist.
    #[error("archive not found: {0}")]
    ArchiveNotFound(Utf8PathBuf),

    /// Writing the formula failed.
    #[error("failed to write formula to {target}: {source}")]
    Write {
        /// `stdout` or the output path.
        target: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = FormulaCli::parse();
    init_logging(&GlobalArgs {
        quiet: cli.quiet,
        verbosity: cli.verbosity,
        ..GlobalArgs::default()
    });

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = run(&cli, &mut stdout) {
        let mut stderr = std::io::stderr();
        if writeln!(stderr, "error: {err}").is_err() {
            // Nowhere left to report the failure.
        }
        std::process::exit(1);
    }
}

fn run(cli: &FormulaCli, stdout: &mut dyn Write) -> Result<(), FormulaCliError> {
    if !cli.archive.is_file() {
        return Err(FormulaCliError::ArchiveNotFound(cli.archive.clone()));
    }

    let expected = cli
        .expect_sha256
        .as_deref()
        .map(Sha256Digest::try_from)
        .transpose()?;
    let sha256 = match &expected {
        Some(digest) => digest.clone(),
        None => compute_sha256(&cli.archive)?,
    };

    let manifest = FormulaManifest::new(ManifestParams {
        name: cli.name.clone(),
        description: cli.desc.clone(),
        homepage: cli.homepage.clone(),
        url: cli.url.clone(),
        sha256,
        license: cli.license.clone(),
        build_dependency: cli.depends_on.clone(),
        binary: cli.binary.clone(),
    })?;
    if expected.is_some() {
        manifest.verify_archive(&cli.archive)?;
    }

    let rendered = manifest.render();
    match &cli.output {
        Some(path) => write_file(path, &rendered),
        None => stdout
            .write_all(rendered.as_bytes())
            .map_err(|source| FormulaCliError::Write {
                target: "stdout".to_owned(),
                source,
            }),
    }
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<(), FormulaCliError> {
    fs::write(path, contents).map_err(|source| FormulaCliError::Write {
        target: path.to_string(),
        source,
    })?;
    info!("wrote formula to {path}");
    Ok(())
}
