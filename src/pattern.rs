//! Glob matching for variable names.
//!
//! Patterns understand two wildcards: `*` matches any run of characters
//! (including none) and `?` matches exactly one character. Every other
//! character matches itself. A pattern must consume the whole name.

use crate::error::{EnvcError, Result};

/// Return true when `name` matches the glob `pattern`.
///
/// # Examples
///
/// ```
/// use envc::pattern::matches;
///
/// assert!(matches("DB_HOST", "DB_*"));
/// assert!(matches("APP_1", "APP_?"));
/// assert!(!matches("APP_10", "APP_?"));
/// ```
#[must_use]
pub fn matches(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let mut n = 0;
    let mut p = 0;
    // Position of the last `*` seen and the name index it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while let Some(&current) = name.get(n) {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&expected) if expected == '?' || expected == current => {
                n += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, anchor)) => {
                    p = star + 1;
                    n = anchor + 1;
                    backtrack = Some((star, anchor + 1));
                }
                None => return false,
            },
        }
    }

    pattern.iter().skip(p).all(|c| *c == '*')
}

/// A list of glob patterns parsed from a comma separated option value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternList(Vec<String>);

impl PatternList {
    /// Parse a comma separated list. Items are trimmed and empty items dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use envc::pattern::PatternList;
    ///
    /// let list = PatternList::parse("DB_*, AWS_*,,");
    /// assert_eq!(list.len(), 2);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Return true when any pattern matches `name`.
    #[must_use]
    pub fn any_match(&self, name: &str) -> bool {
        self.0.iter().any(|pattern| matches(name, pattern))
    }

    /// Number of patterns in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true when the list holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decides which variable names are read from env files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyFilter {
    /// Every name is accepted.
    #[default]
    All,
    /// Names matching any of the patterns are dropped.
    Ignore(PatternList),
    /// Only names matching at least one of the patterns are kept.
    Focus(PatternList),
}

impl KeyFilter {
    /// Build a filter from the raw `--ignore` and `--key` option values.
    ///
    /// # Errors
    ///
    /// Returns [`EnvcError::ConflictingFilters`] when both options contain
    /// at least one pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use envc::pattern::KeyFilter;
    ///
    /// let filter = KeyFilter::from_options(Some("SECRET_*"), None).unwrap();
    /// assert!(!filter.accepts("SECRET_KEY"));
    /// assert!(filter.accepts("APP_NAME"));
    ///
    /// assert!(KeyFilter::from_options(Some("A"), Some("B")).is_err());
    /// ```
    pub fn from_options(ignore: Option<&str>, focus: Option<&str>) -> Result<Self> {
        let ignore = ignore.map(PatternList::parse).unwrap_or_default();
        let focus = focus.map(PatternList::parse).unwrap_or_default();

        match (ignore.is_empty(), focus.is_empty()) {
            (true, true) => Ok(Self::All),
            (false, true) => Ok(Self::Ignore(ignore)),
            (true, false) => Ok(Self::Focus(focus)),
            (false, false) => Err(EnvcError::ConflictingFilters),
        }
    }

    /// Return true when a variable called `name` should be read.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Ignore(patterns) => !patterns.any_match(name),
            Self::Focus(patterns) => patterns.any_match(name),
        }
    }
}
