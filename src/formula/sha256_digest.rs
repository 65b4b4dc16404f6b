//! SHA-256 digest newtype for archive pinning.
//!
//! Digests are stored as 64 lowercase hex characters, the form the formula's
//! `sha256` line uses. Published digests are accepted in the shapes release
//! pages tend to use them: any letter case, an optional `sha256:` prefix, or a
//! `sha256sum` output line (`<digest>  <file>`).

use super::error::{FormulaError, Result};
use std::fmt;
use std::str::FromStr;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

const ALGORITHM_PREFIX: &str = "sha256:";

/// A validated, lowercase hex-encoded SHA-256 digest.
///
/// # Examples
///
/// ```
/// use envc::formula::Sha256Digest;
///
/// let published = format!("{}  envc-1.0.0.tar.gz", "AB".repeat(32));
/// let digest: Sha256Digest = published.parse().unwrap();
/// assert_eq!(digest.as_str(), "ab".repeat(32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Return the digest as a lowercase hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = FormulaError;

    fn try_from(value: &str) -> Result<Self> {
        normalise(value).map(Self)
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = FormulaError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

impl FromStr for Sha256Digest {
    type Err = FormulaError;

    fn from_str(value: &str) -> Result<Self> {
        Self::try_from(value)
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip the accepted decorations from `raw` and lowercase the hex.
fn normalise(raw: &str) -> Result<String> {
    let field = raw.split_whitespace().next().unwrap_or_default();
    let hex = strip_prefix_ignore_case(field, ALGORITHM_PREFIX).unwrap_or(field);

    let count = hex.chars().count();
    if count != DIGEST_HEX_LEN {
        return Err(invalid(format!(
            "expected {DIGEST_HEX_LEN} hex characters, got {count}"
        )));
    }
    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(invalid(format!("non-hex character '{bad}'")));
    }

    Ok(hex.to_ascii_lowercase())
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| text.get(prefix.len()..))
        .flatten()
}

fn invalid(reason: String) -> FormulaError {
    FormulaError::InvalidSha256Digest { reason }
}
