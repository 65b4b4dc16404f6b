//! Variable table, status evaluation and interpolation.
//!
//! An [`EnvTable`] merges the entries of a source file (the documented
//! example) and a target file (the real environment) into one row per
//! variable name. Each row tracks the value on both sides and a
//! [`VarStatus`] describing how they relate.

use log::trace;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::envfile::Entry;

/// How the target value of a variable relates to its source value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarStatus {
    /// Both sides agree, or the source leaves the value open.
    #[default]
    Ok,
    /// The source defines the variable but the target lacks it or leaves it empty.
    Missing,
    /// Both sides define the variable with different values.
    Divergent,
    /// The target defines a variable the source does not know about.
    Undefined,
}

impl VarStatus {
    /// Single-character marker shown in front of a compared row.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Ok => ' ',
            Self::Missing => 'x',
            Self::Divergent => '!',
            Self::Undefined => '?',
        }
    }
}

/// Evaluate the status of a variable from its source and target values.
///
/// # Examples
///
/// ```
/// use envc::table::{VarStatus, evaluate_status};
///
/// assert_eq!(evaluate_status(Some("x"), None), VarStatus::Missing);
/// assert_eq!(evaluate_status(None, Some("x")), VarStatus::Undefined);
/// assert_eq!(evaluate_status(Some("a"), Some("b")), VarStatus::Divergent);
/// assert_eq!(evaluate_status(Some(""), Some("b")), VarStatus::Ok);
/// ```
#[must_use]
pub fn evaluate_status(value: Option<&str>, compare_value: Option<&str>) -> VarStatus {
    let compare_is_empty = compare_value.is_none_or(str::is_empty);

    match value {
        Some(_) if compare_is_empty => VarStatus::Missing,
        None if compare_value.is_some() => VarStatus::Undefined,
        None => VarStatus::Ok,
        Some(value) if !value.is_empty() && Some(value) != compare_value => VarStatus::Divergent,
        Some(_) => VarStatus::Ok,
    }
}

/// One variable with its values from both files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    name: String,
    value: Option<String>,
    compare_value: Option<String>,
    status: VarStatus,
}

impl EnvVar {
    /// Create a variable and evaluate its status.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: Option<String>,
        compare_value: Option<String>,
    ) -> Self {
        let mut var = Self {
            name: name.into(),
            value,
            compare_value,
            status: VarStatus::Ok,
        };
        var.refresh_status();
        var
    }

    /// The variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value from the source file, or from the listed file in list mode.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value from the target file in compare mode.
    #[must_use]
    pub fn compare_value(&self) -> Option<&str> {
        self.compare_value.as_deref()
    }

    /// The current status.
    #[must_use]
    pub const fn status(&self) -> VarStatus {
        self.status
    }

    fn refresh_status(&mut self) {
        self.status = evaluate_status(self.value(), self.compare_value());
    }
}

/// Which statuses the `-m`, `-u` and `-d` flags select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSelection {
    /// Show missing and empty variables.
    pub missing: bool,
    /// Show variables only present in the target.
    pub undefined: bool,
    /// Show variables with diverging values.
    pub divergent: bool,
}

impl StatusSelection {
    /// Return true when at least one status flag is set.
    #[must_use]
    pub const fn is_selective(&self) -> bool {
        self.missing || self.undefined || self.divergent
    }

    /// Return true when a variable with `status` should be shown.
    ///
    /// Without any flag set every variable is shown.
    #[must_use]
    pub const fn selects(&self, status: VarStatus) -> bool {
        if !self.is_selective() {
            return true;
        }
        match status {
            VarStatus::Missing => self.missing,
            VarStatus::Undefined => self.undefined,
            VarStatus::Divergent => self.divergent,
            VarStatus::Ok => false,
        }
    }
}

/// Number of variables per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    /// Variables in agreement.
    pub ok: usize,
    /// Variables missing from the target.
    pub missing: usize,
    /// Variables with diverging values.
    pub divergent: usize,
    /// Variables unknown to the source.
    pub undefined: usize,
}

impl StatusSummary {
    fn record(&mut self, status: VarStatus) {
        match status {
            VarStatus::Ok => self.ok += 1,
            VarStatus::Missing => self.missing += 1,
            VarStatus::Divergent => self.divergent += 1,
            VarStatus::Undefined => self.undefined += 1,
        }
    }
}

/// Which side of a variable a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Target,
}

/// Variables keyed by name, iterated in ascending byte order of the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvTable {
    vars: BTreeMap<String, EnvVar>,
}

impl EnvTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the entries of the source file, or of the only file in list mode.
    ///
    /// The first occurrence of a name wins.
    pub fn load_source(&mut self, entries: impl IntoIterator<Item = Entry>) {
        for Entry { name, value } in entries {
            if self.vars.contains_key(&name) {
                trace!("ignoring duplicate source variable {name}");
                continue;
            }
            let var = EnvVar::new(name.clone(), Some(value), None);
            self.vars.insert(name, var);
        }
    }

    /// Load the entries of the target file.
    ///
    /// Known variables receive their target value (first occurrence wins);
    /// unknown ones are added with only a target value.
    pub fn load_target(&mut self, entries: impl IntoIterator<Item = Entry>) {
        for Entry { name, value } in entries {
            match self.vars.get_mut(&name) {
                Some(var) if var.compare_value.is_none() => {
                    var.compare_value = Some(value);
                    var.refresh_status();
                }
                Some(_) => trace!("ignoring duplicate target variable {name}"),
                None => {
                    let var = EnvVar::new(name.clone(), None, Some(value));
                    self.vars.insert(name, var);
                }
            }
        }
    }

    /// Replace values of the form `${NAME}` with the value of `NAME` on the
    /// same side, then re-evaluate every status.
    ///
    /// References are followed through chains. Unknown names, references to
    /// a side the other variable lacks, and cycles keep the literal text.
    pub fn interpolate(&mut self) {
        let snapshot = self.vars.clone();

        for var in self.vars.values_mut() {
            if let Some(resolved) = resolve_reference(&snapshot, var.value(), Side::Source) {
                trace!("interpolated source value of {}", var.name);
                var.value = Some(resolved);
            }
            if let Some(resolved) = resolve_reference(&snapshot, var.compare_value(), Side::Target)
            {
                trace!("interpolated target value of {}", var.name);
                var.compare_value = Some(resolved);
            }
            var.refresh_status();
        }
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnvVar> {
        self.vars.get(name)
    }

    /// Iterate over all variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
        self.vars.values()
    }

    /// Iterate over the variables `selection` shows, in name order.
    pub fn select(&self, selection: StatusSelection) -> impl Iterator<Item = &EnvVar> {
        self.iter().filter(move |var| selection.selects(var.status))
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Return true when the table holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Count variables per status.
    #[must_use]
    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for var in self.iter() {
            summary.record(var.status);
        }
        summary
    }
}

/// Return the referenced name when `value` is exactly `${NAME}`.
fn reference_name(value: &str) -> Option<&str> {
    value
        .strip_prefix("${")?
        .strip_suffix('}')
        .filter(|name| !name.is_empty())
}

/// Follow `${NAME}` references from `value` through `snapshot`.
///
/// Returns `None` when `value` is not a reference, the first reference cannot
/// be resolved, or the chain loops.
fn resolve_reference(
    snapshot: &BTreeMap<String, EnvVar>,
    value: Option<&str>,
    side: Side,
) -> Option<String> {
    let original = value?;
    let mut current = original;
    let mut visited = HashSet::new();

    while let Some(name) = reference_name(current) {
        if !visited.insert(name) {
            return None;
        }
        let next = snapshot.get(name).and_then(|var| match side {
            Side::Source => var.value(),
            Side::Target => var.compare_value(),
        });
        match next {
            Some(next) => current = next,
            None => break,
        }
    }

    (current != original).then(|| current.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn entries(pairs: &[(&str, &str)]) -> Vec<Entry> {
        pairs
            .iter()
            .map(|(name, value)| Entry::new(*name, *value))
            .collect()
    }

    #[rstest]
    #[case::missing_absent(Some("x"), None, VarStatus::Missing)]
    #[case::missing_empty(Some("x"), Some(""), VarStatus::Missing)]
    #[case::both_empty(Some(""), Some(""), VarStatus::Missing)]
    #[case::undefined(None, Some("x"), VarStatus::Undefined)]
    #[case::undefined_empty(None, Some(""), VarStatus::Undefined)]
    #[case::nothing(None, None, VarStatus::Ok)]
    #[case::divergent(Some("a"), Some("b"), VarStatus::Divergent)]
    #[case::equal(Some("a"), Some("a"), VarStatus::Ok)]
    #[case::open_example(Some(""), Some("b"), VarStatus::Ok)]
    fn status_rules(
        #[case] value: Option<&str>,
        #[case] compare_value: Option<&str>,
        #[case] expected: VarStatus,
    ) {
        assert_eq!(evaluate_status(value, compare_value), expected);
    }

    #[fixture]
    fn compared() -> EnvTable {
        let mut table = EnvTable::new();
        table.load_source(entries(&[
            ("APP_NAME", "Example"),
            ("APP_DEBUG", "false"),
            ("DB_PASSWORD", ""),
            ("MAIL_HOST", "smtp.example.com"),
            ("APP_NAME", "Ignored duplicate"),
        ]));
        table.load_target(entries(&[
            ("APP_NAME", "Example"),
            ("APP_DEBUG", "true"),
            ("DB_PASSWORD", "hunter2"),
            ("EXTRA", "1"),
            ("APP_DEBUG", "ignored duplicate"),
        ]));
        table
    }

    #[rstest]
    fn merges_both_sides(compared: EnvTable) {
        let status = |name: &str| compared.get(name).map(EnvVar::status);

        assert_eq!(status("APP_NAME"), Some(VarStatus::Ok));
        assert_eq!(status("APP_DEBUG"), Some(VarStatus::Divergent));
        assert_eq!(status("DB_PASSWORD"), Some(VarStatus::Ok));
        assert_eq!(status("MAIL_HOST"), Some(VarStatus::Missing));
        assert_eq!(status("EXTRA"), Some(VarStatus::Undefined));
    }

    #[rstest]
    fn first_occurrence_wins(compared: EnvTable) {
        let app_name = compared.get("APP_NAME").expect("APP_NAME present");
        assert_eq!(app_name.value(), Some("Example"));

        let debug = compared.get("APP_DEBUG").expect("APP_DEBUG present");
        assert_eq!(debug.compare_value(), Some("true"));
    }

    #[rstest]
    fn iterates_in_name_order(compared: EnvTable) {
        let names: Vec<&str> = compared.iter().map(EnvVar::name).collect();
        assert_eq!(
            names,
            vec!["APP_DEBUG", "APP_NAME", "DB_PASSWORD", "EXTRA", "MAIL_HOST"]
        );
    }

    #[rstest]
    #[case::everything(
        StatusSelection::default(),
        &["APP_DEBUG", "APP_NAME", "DB_PASSWORD", "EXTRA", "MAIL_HOST"]
    )]
    #[case::missing(
        StatusSelection { missing: true, ..StatusSelection::default() },
        &["MAIL_HOST"]
    )]
    #[case::undefined(
        StatusSelection { undefined: true, ..StatusSelection::default() },
        &["EXTRA"]
    )]
    #[case::divergent_or_missing(
        StatusSelection { divergent: true, missing: true, undefined: false },
        &["APP_DEBUG", "MAIL_HOST"]
    )]
    fn select_filters_by_status(
        compared: EnvTable,
        #[case] selection: StatusSelection,
        #[case] expected: &[&str],
    ) {
        let names: Vec<&str> = compared.select(selection).map(EnvVar::name).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    fn summary_counts_statuses(compared: EnvTable) {
        assert_eq!(
            compared.summary(),
            StatusSummary {
                ok: 2,
                missing: 1,
                divergent: 1,
                undefined: 1,
            }
        );
    }

    #[test]
    fn interpolation_follows_chains_per_side() {
        let mut table = EnvTable::new();
        table.load_source(entries(&[
            ("APP_URL", "${BASE_URL}"),
            ("BASE_URL", "${HOST}"),
            ("HOST", "http://localhost"),
        ]));
        table.load_target(entries(&[
            ("APP_URL", "${HOST}"),
            ("BASE_URL", "https://example.com"),
            ("HOST", "https://example.com"),
        ]));

        table.interpolate();

        let app_url = table.get("APP_URL").expect("APP_URL present");
        assert_eq!(app_url.value(), Some("http://localhost"));
        assert_eq!(app_url.compare_value(), Some("https://example.com"));
        assert_eq!(app_url.status(), VarStatus::Divergent);
    }

    #[test]
    fn interpolation_keeps_unresolvable_references() {
        let mut table = EnvTable::new();
        table.load_source(entries(&[
            ("A", "${B}"),
            ("B", "${A}"),
            ("C", "${UNKNOWN}"),
            ("D", "${}"),
            ("E", "prefix ${A}"),
        ]));

        table.interpolate();

        let unresolved = [
            ("A", "${B}"),
            ("B", "${A}"),
            ("C", "${UNKNOWN}"),
            ("D", "${}"),
            ("E", "prefix ${A}"),
        ];
        for (name, literal) in unresolved {
            assert_eq!(table.get(name).and_then(EnvVar::value), Some(literal), "{name}");
        }
    }

    #[test]
    fn interpolation_does_not_cross_sides() {
        let mut table = EnvTable::new();
        table.load_source(entries(&[("A", "${B}")]));
        table.load_target(entries(&[("A", "value"), ("B", "value")]));

        table.interpolate();

        let a = table.get("A").expect("A present");
        assert_eq!(a.value(), Some("${B}"));
        assert_eq!(a.status(), VarStatus::Divergent);
    }

    #[test]
    fn interpolation_refreshes_status() {
        let mut table = EnvTable::new();
        table.load_source(entries(&[("A", "${B}"), ("B", "same")]));
        table.load_target(entries(&[("A", "same"), ("B", "same")]));
        assert_eq!(table.get("A").map(EnvVar::status), Some(VarStatus::Divergent));

        table.interpolate();

        assert_eq!(table.get("A").map(EnvVar::status), Some(VarStatus::Ok));
    }

    #[test]
    fn markers_match_statuses() {
        assert_eq!(VarStatus::Ok.marker(), ' ');
        assert_eq!(VarStatus::Missing.marker(), 'x');
        assert_eq!(VarStatus::Divergent.marker(), '!');
        assert_eq!(VarStatus::Undefined.marker(), '?');
    }
}
