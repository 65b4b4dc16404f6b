//! Human-readable table output.
//!
//! The table has a title, underlined with `=`, followed by one row per
//! selected variable:
//!
//! ```text
//! Comparing './.env.example' to './.env'
//! ======================================
//!   ! APP_DEBUG    false     true
//!   x MAIL_HOST    smtp      (NULL)
//! ```

use camino::Utf8Path;

use crate::palette::{Palette, Role};
use crate::table::{EnvTable, EnvVar, StatusSelection, VarStatus};

/// Columns never shrink below this many characters.
pub const MIN_COLUMN_WIDTH: usize = 7;

/// Default cap for value columns.
pub const DEFAULT_TRUNCATE: usize = 40;

/// Placeholder shown for absent or empty values.
pub const EMPTY_CELL: &str = "(NULL)";

const ELLIPSIS: &str = "...";

/// What is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// Every variable of a single file.
    Listing {
        /// The listed file.
        target: &'a Utf8Path,
    },
    /// A target file compared against a source file.
    Comparison {
        /// The example file.
        source: &'a Utf8Path,
        /// The real environment file.
        target: &'a Utf8Path,
    },
}

impl View<'_> {
    /// Return true for [`View::Comparison`].
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(self, Self::Comparison { .. })
    }

    /// The title line, without underline.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Listing { target } => target.to_string(),
            Self::Comparison { source, target } => {
                format!("Comparing '{source}' to '{target}'")
            }
        }
    }
}

/// Column widths for a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Width of the name column.
    pub name: usize,
    /// Width of the first value column.
    pub value: usize,
    /// Width of the target value column.
    pub compare_value: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name: MIN_COLUMN_WIDTH,
            value: MIN_COLUMN_WIDTH,
            compare_value: MIN_COLUMN_WIDTH,
        }
    }
}

impl Layout {
    /// Measure the columns needed by `vars`, capping value columns at
    /// `truncate` characters.
    ///
    /// A `truncate` of zero disables the cap; any other value is raised to
    /// [`MIN_COLUMN_WIDTH`]. Names are never truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use envc::render::Layout;
    /// use envc::table::EnvVar;
    ///
    /// let var = EnvVar::new("APP_DESCRIPTION", Some("x".repeat(80)), None);
    /// let layout = Layout::measure([&var], 40);
    /// assert_eq!(layout.name, 15);
    /// assert_eq!(layout.value, 40);
    /// ```
    #[must_use]
    pub fn measure<'a>(vars: impl IntoIterator<Item = &'a EnvVar>, truncate: usize) -> Self {
        let mut layout = vars.into_iter().fold(Self::default(), |layout, var| Self {
            name: layout.name.max(char_len(var.name())),
            value: layout.value.max(var.value().map_or(0, char_len)),
            compare_value: layout
                .compare_value
                .max(var.compare_value().map_or(0, char_len)),
        });

        if truncate > 0 {
            let cap = truncate.max(MIN_COLUMN_WIDTH);
            layout.value = layout.value.min(cap);
            layout.compare_value = layout.compare_value.min(cap);
        }

        layout
    }
}

/// Format the text of a value cell before padding.
///
/// Absent and empty values become [`EMPTY_CELL`]; values longer than
/// `width` are cut and end in `...`.
///
/// # Examples
///
/// ```
/// use envc::render::format_cell;
///
/// assert_eq!(format_cell(None, 10), "(NULL)");
/// assert_eq!(format_cell(Some("abcdefghijkl"), 10), "abcdefg...");
/// assert_eq!(format_cell(Some("short"), 10), "short");
/// ```
#[must_use]
pub fn format_cell(value: Option<&str>, width: usize) -> String {
    match value.filter(|value| !value.is_empty()) {
        None => EMPTY_CELL.to_owned(),
        Some(value) if char_len(value) > width => {
            let keep = width.saturating_sub(ELLIPSIS.len());
            let mut cell: String = value.chars().take(keep).collect();
            cell.push_str(ELLIPSIS);
            cell.chars().take(width).collect()
        }
        Some(value) => value.to_owned(),
    }
}

/// Format one table row, without trailing newline.
#[must_use]
pub fn format_row(var: &EnvVar, layout: &Layout, comparing: bool, palette: &Palette) -> String {
    let mut row = String::from("  ");

    if comparing {
        let marker = var.status().marker().to_string();
        row.push_str(&palette.paint(&marker, marker_role(var.status())));
        row.push(' ');
    }

    row.push_str(&padded(
        var.name(),
        layout.name,
        layout.name + 4,
        Role::Name,
        palette,
    ));

    let value = format_cell(var.value(), layout.value);
    let source_role = value_role(var.value(), Role::EmptySource);
    row.push_str(&padded(
        &value,
        layout.value,
        layout.value + 3,
        source_role,
        palette,
    ));

    if comparing {
        let compare_value = format_cell(var.compare_value(), layout.compare_value);
        let compare_role = value_role(var.compare_value(), Role::EmptyTarget);
        row.push_str(&padded(
            &compare_value,
            layout.compare_value,
            layout.compare_value,
            compare_role,
            palette,
        ));
    }

    row
}

/// Render the title and every variable `selection` shows.
#[must_use]
pub fn format_human(
    table: &EnvTable,
    view: &View<'_>,
    selection: StatusSelection,
    truncate: usize,
    palette: &Palette,
) -> String {
    let title = view.title();
    let mut output = format!("{title}\n{}\n", "=".repeat(char_len(&title)));

    let layout = Layout::measure(table.select(selection), truncate);
    for var in table.select(selection) {
        output.push_str(&format_row(var, &layout, view.is_comparison(), palette));
        output.push('\n');
    }

    output
}

/// Cut `text` to `precision` characters, colour it, and pad it to `width`.
fn padded(text: &str, precision: usize, width: usize, role: Role, palette: &Palette) -> String {
    let visible: String = text.chars().take(precision).collect();
    let padding = width.saturating_sub(char_len(&visible));
    format!("{}{}", palette.paint(&visible, role), " ".repeat(padding))
}

fn value_role(value: Option<&str>, empty_role: Role) -> Role {
    match value.filter(|value| !value.is_empty()) {
        Some(value) => Role::for_value(value),
        None => empty_role,
    }
}

const fn marker_role(status: VarStatus) -> Role {
    match status {
        VarStatus::Missing => Role::Missing,
        VarStatus::Undefined => Role::Undefined,
        VarStatus::Divergent => Role::Divergent,
        VarStatus::Ok => Role::Text,
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
