//! Streamed SHA-256 computation for source archives.

use camino::Utf8Path;
use log::debug;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};

use super::error::{FormulaError, Result};
use super::sha256_digest::Sha256Digest;

const CHUNK_SIZE: usize = 8192;

/// Compute the SHA-256 digest of a file.
///
/// Reads the file at `path` in chunks and returns the lowercase hex digest
/// as a validated [`Sha256Digest`].
///
/// # Errors
///
/// Returns [`FormulaError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<Sha256Digest> {
    let io_error = |source| FormulaError::Io {
        path: path.to_owned(),
        source,
    };

    let file = fs::File::open(path).map_err(io_error)?;
    let digest = digest_reader(file).map_err(io_error)?;
    debug!("computed sha256 {digest} for {path}");
    Ok(digest)
}

/// Hash everything `reader` yields.
///
/// # Errors
///
/// Returns the first read error.
pub fn digest_reader(mut reader: impl Read) -> io::Result<Sha256Digest> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    let hex = format!("{:x}", hasher.finalize());
    Sha256Digest::try_from(hex).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case::empty(b"", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")]
    #[case::abc(b"abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")]
    fn digests_known_vectors(#[case] input: &[u8], #[case] expected: &str) {
        let digest = digest_reader(Cursor::new(input)).expect("in-memory read");
        assert_eq!(digest.as_str(), expected);
    }

    #[test]
    fn digests_inputs_larger_than_one_chunk() {
        let data = vec![0x61u8; CHUNK_SIZE * 3 + 17];
        let streamed = digest_reader(Cursor::new(&data)).expect("in-memory read");
        let direct = format!("{:x}", Sha256::digest(&data));
        assert_eq!(streamed.as_str(), direct);
    }

    #[test]
    fn compute_sha256_reads_files() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("envc.tar.gz")).expect("UTF-8 path");
        std::fs::write(&path, b"abc").expect("failed to write archive");

        let digest = compute_sha256(&path).expect("readable file");

        assert_eq!(
            digest.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn compute_sha256_reports_missing_file() {
        let err = compute_sha256(Utf8Path::new("/nonexistent/envc.tar.gz"))
            .expect_err("missing file should fail");
        assert!(matches!(err, FormulaError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/envc.tar.gz"));
    }
}
