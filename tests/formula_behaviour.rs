//! End-to-end behaviour tests for the `envc-formula` binary.

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const URL: &str = "https://github.com/michielnijenhuis/env-check/archive/refs/tags/v1.0.0.tar.gz";
const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const ZERO_SHA256: &str = "0000000000000000000000000000000000000000000000000000000000000000";

struct Release {
    _dir: TempDir,
    root: Utf8PathBuf,
    archive: Utf8PathBuf,
}

#[fixture]
fn release() -> Release {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("UTF-8 temp path");
    let archive = root.join("v1.0.0.tar.gz");
    fs::write(&archive, b"abc").expect("failed to write archive");
    Release {
        _dir: dir,
        root,
        archive,
    }
}

fn envc_formula(release: &Release, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envc-formula"))
        .args(["--archive", release.archive.as_str(), "--url", URL])
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run envc-formula")
}

#[rstest]
fn renders_formula_to_stdout(release: Release) {
    let output = envc_formula(&release, &[]);

    assert!(output.status.success());
    let expected = format!(
        "class Envc < Formula\n\
         \x20   desc \"A program that compares two .env files and shows their values and differences.\"\n\
         \x20   homepage \"https://github.com/michielnijenhuis/env-check\"\n\
         \x20   url \"{URL}\"\n\
         \x20   sha256 \"{ABC_SHA256}\"\n\
         \x20   license \"MIT\"\n\
         \n\
         \x20   depends_on \"make\"\n\
         \n\
         \x20   def install\n\
         \x20       system \"make\"\n\
         \x20       bin.install \"bin/envc\"\n\
         \x20   end\n\
         end\n"
    );
    assert_eq!(String::from_utf8(output.stdout).expect("UTF-8 stdout"), expected);
}

#[rstest]
fn writes_formula_file(release: Release) {
    let path = release.root.join("envc.rb");

    let output = envc_formula(&release, &["--output", path.as_str()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let text = fs::read_to_string(&path).expect("formula file");
    assert!(text.contains(&format!("sha256 \"{ABC_SHA256}\"")));
}

#[rstest]
#[case::mismatch(&["--expect-sha256", ZERO_SHA256], "error: checksum mismatch")]
#[case::malformed(&["--expect-sha256", "abc"], "error: invalid SHA-256 digest")]
#[case::bad_homepage(&["--homepage", "example.com"], "error: invalid homepage")]
fn rejects_bad_inputs(release: Release, #[case] extra: &[&str], #[case] message: &str) {
    let output = envc_formula(&release, extra);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("UTF-8 stderr");
    assert!(stderr.starts_with(message), "got: {stderr}");
}

#[rstest]
fn custom_fields_flow_into_formula(release: Release) {
    let output = envc_formula(
        &release,
        &["--name", "env-check", "--license", "Apache-2.0", "--binary", "target/release/envc"],
    );

    let stdout = String::from_utf8(output.stdout).expect("UTF-8 stdout");
    assert!(stdout.starts_with("class EnvCheck < Formula\n"));
    assert!(stdout.contains("    license \"Apache-2.0\"\n"));
    assert!(stdout.contains("        bin.install \"target/release/envc\"\n"));
}
