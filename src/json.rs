//! JSON output for scripting.
//!
//! Values are reported untruncated. In list mode only names and values are
//! emitted; in compare mode every variable also carries its target value and
//! status, and a per-status summary is appended.

use serde::Serialize;

use crate::error::Result;
use crate::render::View;
use crate::table::{EnvTable, EnvVar, StatusSelection, StatusSummary, VarStatus};

/// JSON-serialisable report.
#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    /// `list` or `compare`.
    pub mode: &'static str,
    /// The source file, in compare mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// The listed or compared target file.
    pub target: String,
    /// Selected variables in name order.
    pub variables: Vec<VariableJson<'a>>,
    /// Status counts over all variables, in compare mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StatusSummary>,
}

/// JSON entry for one variable.
#[derive(Debug, Serialize)]
pub struct VariableJson<'a> {
    /// Variable name.
    pub name: &'a str,
    /// Source value (listed value in list mode).
    pub value: Option<&'a str>,
    /// Target value, in compare mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_value: Option<Option<&'a str>>,
    /// Status, in compare mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VarStatus>,
}

impl<'a> VariableJson<'a> {
    fn from_var(var: &'a EnvVar, comparing: bool) -> Self {
        Self {
            name: var.name(),
            value: var.value(),
            compare_value: comparing.then(|| var.compare_value()),
            status: comparing.then(|| var.status()),
        }
    }
}

impl<'a> ReportJson<'a> {
    /// Build the report for `view` from the variables `selection` shows.
    #[must_use]
    pub fn from_table(table: &'a EnvTable, view: &View<'_>, selection: StatusSelection) -> Self {
        let comparing = view.is_comparison();
        let variables = table
            .select(selection)
            .map(|var| VariableJson::from_var(var, comparing))
            .collect();

        match view {
            View::Listing { target } => Self {
                mode: "list",
                source: None,
                target: target.to_string(),
                variables,
                summary: None,
            },
            View::Comparison { source, target } => Self {
                mode: "compare",
                source: Some(source.to_string()),
                target: target.to_string(),
                variables,
                summary: Some(table.summary()),
            },
        }
    }
}

/// Format the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`crate::error::EnvcError::Serialization`] if serialisation fails.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use envc::json::format_json;
/// use envc::render::View;
/// use envc::table::{EnvTable, StatusSelection};
///
/// let table = EnvTable::new();
/// let view = View::Listing { target: Utf8Path::new(".env") };
/// let json = format_json(&table, &view, StatusSelection::default()).unwrap();
/// assert!(json.contains("\"variables\": []"));
/// ```
pub fn format_json(
    table: &EnvTable,
    view: &View<'_>,
    selection: StatusSelection,
) -> Result<String> {
    let report = ReportJson::from_table(table, view, selection);
    Ok(serde_json::to_string_pretty(&report)?)
}
