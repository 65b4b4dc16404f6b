//! Formula manifest fields, validation and rendering.
//!
//! A [`FormulaManifest`] is built from [`ManifestParams`] and validated once;
//! afterwards every field is known to be well-formed and [`FormulaManifest::render`]
//! cannot fail.

use camino::Utf8Path;
use log::{debug, info};

use super::checksum::compute_sha256;
use super::error::{FormulaError, Result};
use super::sha256_digest::Sha256Digest;

/// Default one-line description of the package.
pub const DEFAULT_DESCRIPTION: &str =
    "A program that compares two .env files and shows their values and differences.";

/// Default project homepage.
pub const DEFAULT_HOMEPAGE: &str = "https://github.com/michielnijenhuis/env-check";

/// Default license identifier.
pub const DEFAULT_LICENSE: &str = "MIT";

/// Default build dependency.
pub const DEFAULT_BUILD_DEPENDENCY: &str = "make";

/// Default path of the built binary, relative to the unpacked archive.
pub const DEFAULT_BINARY: &str = "bin/envc";

const INDENT: &str = "    ";

/// Inputs for [`FormulaManifest::new`].
#[derive(Debug, Clone)]
pub struct ManifestParams {
    /// Package name, used to derive the formula class name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Project homepage.
    pub homepage: String,
    /// Source archive URL.
    pub url: String,
    /// Digest of the source archive.
    pub sha256: Sha256Digest,
    /// License identifier.
    pub license: String,
    /// Tool required to build from source.
    pub build_dependency: String,
    /// Path of the built binary inside the unpacked archive.
    pub binary: String,
}

impl ManifestParams {
    /// Parameters for `envc` with every default filled in.
    #[must_use]
    pub fn envc(url: impl Into<String>, sha256: Sha256Digest) -> Self {
        Self {
            name: "envc".to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            homepage: DEFAULT_HOMEPAGE.to_owned(),
            url: url.into(),
            sha256,
            license: DEFAULT_LICENSE.to_owned(),
            build_dependency: DEFAULT_BUILD_DEPENDENCY.to_owned(),
            binary: DEFAULT_BINARY.to_owned(),
        }
    }
}

/// A validated package manifest.
///
/// # Examples
///
/// ```
/// use envc::formula::{FormulaManifest, ManifestParams, Sha256Digest};
///
/// let digest = Sha256Digest::try_from("0".repeat(64)).unwrap();
/// let params = ManifestParams::envc("https://example.com/envc-1.0.0.tar.gz", digest);
/// let manifest = FormulaManifest::new(params).unwrap();
/// assert_eq!(manifest.class_name(), "Envc");
/// assert!(manifest.render().contains("depends_on \"make\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaManifest {
    class_name: String,
    description: String,
    homepage: String,
    url: String,
    sha256: Sha256Digest,
    license: String,
    build_dependency: String,
    binary: String,
}

impl FormulaManifest {
    /// Validate `params` into a manifest.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::InvalidField`] when the name, description,
    /// license, build dependency or binary is blank, or when the homepage or
    /// URL is not an `http://` or `https://` URL.
    pub fn new(params: ManifestParams) -> Result<Self> {
        let ManifestParams {
            name,
            description,
            homepage,
            url,
            sha256,
            license,
            build_dependency,
            binary,
        } = params;

        let class_name = class_name_for(&require_text("name", name)?)?;
        let manifest = Self {
            class_name,
            description: require_text("desc", description)?,
            homepage: require_http_url("homepage", homepage)?,
            url: require_http_url("url", url)?,
            sha256,
            license: require_text("license", license)?,
            build_dependency: require_text("depends_on", build_dependency)?,
            binary: require_text("bin.install", binary)?,
        };
        debug!("validated manifest for {}", manifest.class_name);
        Ok(manifest)
    }

    /// The formula class name, e.g. `Envc`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// One-line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Project homepage.
    #[must_use]
    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// Source archive URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pinned digest of the source archive.
    #[must_use]
    pub const fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }

    /// License identifier.
    #[must_use]
    pub fn license(&self) -> &str {
        &self.license
    }

    /// Tool required to build from source.
    #[must_use]
    pub fn build_dependency(&self) -> &str {
        &self.build_dependency
    }

    /// Path of the built binary inside the unpacked archive.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Check that the archive at `path` has the pinned digest.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Io`] if the archive cannot be read and
    /// [`FormulaError::ChecksumMismatch`] if its digest differs.
    pub fn verify_archive(&self, path: &Utf8Path) -> Result<()> {
        let actual = compute_sha256(path)?;
        if actual != self.sha256 {
            return Err(FormulaError::ChecksumMismatch {
                expected: self.sha256.clone(),
                actual,
            });
        }
        info!("archive {path} matches sha256 {actual}");
        Ok(())
    }

    /// Render the manifest as formula text, ending in a newline.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "class {class} < Formula\n\
             {INDENT}desc {desc}\n\
             {INDENT}homepage {homepage}\n\
             {INDENT}url {url}\n\
             {INDENT}sha256 {sha256}\n\
             {INDENT}license {license}\n\
             \n\
             {INDENT}depends_on {dependency}\n\
             \n\
             {INDENT}def install\n\
             {INDENT}{INDENT}system {dependency}\n\
             {INDENT}{INDENT}bin.install {binary}\n\
             {INDENT}end\n\
             end\n",
            class = self.class_name,
            desc = quoted(&self.description),
            homepage = quoted(&self.homepage),
            url = quoted(&self.url),
            sha256 = quoted(self.sha256.as_str()),
            license = quoted(&self.license),
            dependency = quoted(&self.build_dependency),
            binary = quoted(&self.binary),
        )
    }
}

/// Quote `text` as a double-quoted string literal.
fn quoted(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        match c {
            '\\' | '"' | '#' => {
                literal.push('\\');
                literal.push(c);
            }
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Derive a class name from a package name: `env-check` becomes `EnvCheck`.
fn class_name_for(name: &str) -> Result<String> {
    let class_name: String = name
        .split(['-', '_', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();

    let valid = class_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && class_name.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(class_name)
    } else {
        Err(FormulaError::InvalidField {
            field: "name",
            reason: format!("cannot derive a class name from '{name}'"),
        })
    }
}

fn require_text(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormulaError::InvalidField {
            field,
            reason: "must not be empty".to_owned(),
        });
    }
    if trimmed.contains(['\n', '\r']) {
        return Err(FormulaError::InvalidField {
            field,
            reason: "must be a single line".to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

fn require_http_url(field: &'static str, value: String) -> Result<String> {
    let value = require_text(field, value)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => Ok(value),
        _ => Err(FormulaError::InvalidField {
            field,
            reason: format!("'{value}' is not an http(s) URL"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn envc_params() -> ManifestParams {
        let digest = Sha256Digest::try_from(ABC_SHA256).expect("known good digest");
        ManifestParams::envc(
            "https://github.com/michielnijenhuis/env-check/archive/refs/tags/v1.0.0.tar.gz",
            digest,
        )
    }

    #[fixture]
    fn params() -> ManifestParams {
        envc_params()
    }

    #[rstest]
    fn renders_envc_formula(params: ManifestParams) {
        let manifest = FormulaManifest::new(params).expect("valid manifest");

        let expected = concat!(
            "class Envc < Formula\n",
            "    desc \"A program that compares two .env files and shows their values and differences.\"\n",
            "    homepage \"https://github.com/michielnijenhuis/env-check\"\n",
            "    url \"https://github.com/michielnijenhuis/env-check/archive/refs/tags/v1.0.0.tar.gz\"\n",
            "    sha256 \"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\"\n",
            "    license \"MIT\"\n",
            "\n",
            "    depends_on \"make\"\n",
            "\n",
            "    def install\n",
            "        system \"make\"\n",
            "        bin.install \"bin/envc\"\n",
            "    end\n",
            "end\n",
        );
        assert_eq!(manifest.render(), expected);
    }

    #[rstest]
    fn escapes_quotes_and_interpolation(mut params: ManifestParams) {
        params.description = r#"Compares "env" files \ #{values}"#.to_owned();
        let manifest = FormulaManifest::new(params).expect("valid manifest");

        assert!(
            manifest
                .render()
                .contains(r#"desc "Compares \"env\" files \\ \#{values}""#),
            "got: {}",
            manifest.render()
        );
    }

    #[rstest]
    #[case::plain("envc", "Envc")]
    #[case::dashed("env-check", "EnvCheck")]
    #[case::underscored("env_check_2", "EnvCheck2")]
    fn derives_class_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(class_name_for(name).expect("valid name"), expected);
    }

    #[rstest]
    #[case::leading_digit("2env")]
    #[case::symbols("env!")]
    #[case::only_separators("--")]
    fn rejects_unusable_names(#[case] name: &str) {
        assert!(class_name_for(name).is_err());
    }

    #[rstest]
    #[case::empty_desc(
        ManifestParams { description: "  ".to_owned(), ..envc_params() },
        "desc"
    )]
    #[case::empty_license(
        ManifestParams { license: String::new(), ..envc_params() },
        "license"
    )]
    #[case::ftp_url(
        ManifestParams { url: "ftp://example.com/a.tgz".to_owned(), ..envc_params() },
        "url"
    )]
    #[case::bare_homepage(
        ManifestParams { homepage: "example.com".to_owned(), ..envc_params() },
        "homepage"
    )]
    #[case::scheme_only(
        ManifestParams { url: "https://".to_owned(), ..envc_params() },
        "url"
    )]
    #[case::multiline_desc(
        ManifestParams { description: "a\nb".to_owned(), ..envc_params() },
        "desc"
    )]
    fn rejects_invalid_fields(#[case] params: ManifestParams, #[case] expected_field: &str) {
        let err = FormulaManifest::new(params).expect_err("manifest should be rejected");
        match err {
            FormulaError::InvalidField { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[rstest]
    fn trims_surrounding_whitespace(mut params: ManifestParams) {
        params.license = " Apache-2.0 ".to_owned();
        let manifest = FormulaManifest::new(params).expect("valid manifest");
        assert_eq!(manifest.license(), "Apache-2.0");
    }

    #[rstest]
    fn verify_archive_accepts_matching_digest(params: ManifestParams) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("envc.tar.gz")).expect("UTF-8 path");
        std::fs::write(&path, b"abc").expect("failed to write archive");
        let manifest = FormulaManifest::new(params).expect("valid manifest");

        manifest.verify_archive(&path).expect("digest should match");
    }

    #[rstest]
    fn verify_archive_reports_mismatch(params: ManifestParams) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("envc.tar.gz")).expect("UTF-8 path");
        std::fs::write(&path, b"abd").expect("failed to write archive");
        let manifest = FormulaManifest::new(params).expect("valid manifest");

        let err = manifest
            .verify_archive(&path)
            .expect_err("digest should differ");

        match err {
            FormulaError::ChecksumMismatch { expected, actual } => {
                assert_eq!(expected.as_str(), ABC_SHA256);
                assert_ne!(actual, expected);
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }
}
