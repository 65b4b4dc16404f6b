//! `list` and `cmp` command handlers.
//!
//! Both commands read their files, build an [`EnvTable`], and write either the
//! human-readable table or the JSON report to the supplied writer.

use log::debug;
use std::io::Write;

use crate::cli::{CompareArgs, ListArgs, OutputArgs};
use crate::envfile::{ensure_exists, read_env_file};
use crate::error::{EnvcError, Result};
use crate::json::format_json;
use crate::palette::Palette;
use crate::render::{View, format_human};
use crate::table::{EnvTable, StatusSelection};

/// Presentation settings resolved from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    /// Colour palette for human output.
    pub palette: Palette,
    /// Suppress normal output.
    pub quiet: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            palette: Palette::plain(),
            quiet: false,
        }
    }
}

/// Lists every variable of the target file, sorted by name.
///
/// A missing target is reported before conflicting name filters.
///
/// # Errors
///
/// Returns an error if:
/// - The target file is missing or unreadable
/// - `--ignore` and `--key` are both given
/// - Writing to stdout fails
pub fn run_list(args: &ListArgs, settings: &OutputSettings, stdout: &mut dyn Write) -> Result<()> {
    ensure_exists(&args.target)?;
    let filter = args.output.key_filter()?;
    let mut table = EnvTable::new();
    table.load_source(read_env_file(&args.target, &filter)?);

    let view = View::Listing {
        target: &args.target,
    };
    emit(table, &view, StatusSelection::default(), &args.output, settings, stdout)
}

/// Compares the target file against the source file.
///
/// The source is checked first, so a missing source is reported ahead of a
/// missing target or conflicting name filters. The filters are checked before
/// the target.
///
/// # Errors
///
/// Returns an error if:
/// - Either file is missing or unreadable
/// - `--ignore` and `--key` are both given
/// - Writing to stdout fails
pub fn run_compare(
    args: &CompareArgs,
    settings: &OutputSettings,
    stdout: &mut dyn Write,
) -> Result<()> {
    ensure_exists(&args.source)?;
    let filter = args.output.key_filter()?;
    let source = read_env_file(&args.source, &filter)?;
    let target = read_env_file(&args.target, &filter)?;

    let mut table = EnvTable::new();
    table.load_source(source);
    table.load_target(target);

    let view = View::Comparison {
        source: &args.source,
        target: &args.target,
    };
    let summary = table.summary();
    debug!(
        "compared {} variables: {} ok, {} missing, {} divergent, {} undefined",
        table.len(),
        summary.ok,
        summary.missing,
        summary.divergent,
        summary.undefined
    );

    emit(
        table,
        &view,
        args.selection.into(),
        &args.output,
        settings,
        stdout,
    )
}

fn emit(
    mut table: EnvTable,
    view: &View<'_>,
    selection: StatusSelection,
    output: &OutputArgs,
    settings: &OutputSettings,
    stdout: &mut dyn Write,
) -> Result<()> {
    if output.interpolate {
        table.interpolate();
    }

    if settings.quiet {
        debug!("quiet mode; skipping output");
        return Ok(());
    }

    let rendered = if output.json {
        let mut json = format_json(&table, view, selection)?;
        json.push('\n');
        json
    } else {
        format_human(&table, view, selection, output.truncate, &settings.palette)
    };

    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| EnvcError::WriteFailed { source: e })
}
