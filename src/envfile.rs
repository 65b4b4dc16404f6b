//! `.env` file parsing.
//!
//! The format is loose: one `NAME=value` pair per line, `#`
//! starts a comment line, and anything without an `=` is skipped. Values may
//! be wrapped in a single pair of matching quotes, and the literals `null` and
//! `(null)` denote an empty value.

use camino::Utf8Path;
use log::{debug, trace};
use std::fs;

use crate::error::{EnvcError, Result};
use crate::pattern::KeyFilter;

/// A single `NAME=value` assignment read from an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Everything before the first `=`, verbatim.
    pub name: String,
    /// The normalised value (unquoted, `null` mapped to empty).
    pub value: String,
}

impl Entry {
    /// Create an entry from a name and an already normalised value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parse one line of an env file.
///
/// Returns `None` for comments, blank lines and lines without `=`.
///
/// # Examples
///
/// ```
/// use envc::envfile::{Entry, parse_line};
///
/// assert_eq!(parse_line("APP_NAME=\"My App\""), Some(Entry::new("APP_NAME", "My App")));
/// assert_eq!(parse_line("DB_PASSWORD=null"), Some(Entry::new("DB_PASSWORD", "")));
/// assert_eq!(parse_line("# APP_NAME=x"), None);
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<Entry> {
    if line.starts_with('#') {
        return None;
    }

    let (name, raw_value) = line.split_once('=')?;
    let value = normalise_value(raw_value.trim_end_matches(['\r', '\n']));

    Some(Entry::new(name, value))
}

/// Unquote a raw value and map the null literals to the empty string.
fn normalise_value(raw: &str) -> &str {
    let unquoted = unquote(raw);
    if is_null_literal(unquoted) {
        ""
    } else {
        unquoted
    }
}

/// Strip one pair of matching single or double quotes.
fn unquote(raw: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| raw.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(raw)
}

fn is_null_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("null") || value.eq_ignore_ascii_case("(null)")
}

/// Parse the contents of an env file, keeping entries the filter accepts.
///
/// Entries are returned in file order; duplicate names are preserved so the
/// caller can decide which occurrence wins.
#[must_use]
pub fn parse_str(contents: &str, filter: &KeyFilter) -> Vec<Entry> {
    contents
        .lines()
        .filter_map(parse_line)
        .filter(|entry| {
            let accepted = filter.accepts(&entry.name);
            if !accepted {
                trace!("skipping filtered variable {}", entry.name);
            }
            accepted
        })
        .collect()
}

/// Fail with [`EnvcError::FileNotFound`] unless `path` exists.
///
/// # Errors
///
/// Returns [`EnvcError::FileNotFound`] when nothing exists at `path`.
pub fn ensure_exists(path: &Utf8Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(EnvcError::FileNotFound {
            path: path.to_owned(),
        })
    }
}

/// Read and parse the env file at `path`.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`EnvcError::FileNotFound`] when `path` does not exist and
/// [`EnvcError::FileRead`] when it cannot be read.
pub fn read_env_file(path: &Utf8Path, filter: &KeyFilter) -> Result<Vec<Entry>> {
    ensure_exists(path)?;

    let bytes = fs::read(path).map_err(|source| EnvcError::FileRead {
        path: path.to_owned(),
        source,
    })?;
    let entries = parse_str(&String::from_utf8_lossy(&bytes), filter);

    debug!("read {} variable(s) from {path}", entries.len());
    Ok(entries)
}
