use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

// ---------------------------------------------------------------------------
// SessionError — fatal failures; skips and bad keystrokes are data, not errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Input is not a JSON array of records; reported with line/column.
    #[error("malformed input {path}: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Flat-file persistence — whole-file rewrites, atomic via tmp + rename
// ---------------------------------------------------------------------------

/// Read a JSON array of records. A decode failure here is fatal: one bad
/// record inside an otherwise well-formed array is a skip, but a file that
/// does not decode as an array of objects stops the session before labeling.
pub fn load_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, SessionError> {
    let text = fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SessionError::MalformedInput {
        path: path.to_owned(),
        source,
    })
}

/// Write bytes to `path` via a sibling tmp file and rename, so readers never
/// observe a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SessionError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(|source| SessionError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| SessionError::Write {
        path: path.to_owned(),
        source,
    })
}

pub fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), SessionError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| SessionError::Encode {
        what: "json document",
        source,
    })?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use sl_core::domain::ClassifyRecord;

    #[test]
    fn test_load_records_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.json");
        fs::write(
            &path,
            r#"[{"sentence_base": "b", "sentence_test": "t", "label_semantic_similarity": true}]"#,
        )
        .expect("write fixture");

        let records: Vec<ClassifyRecord> = load_records(&path).expect("load records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sentence_base, "b");
    }

    #[test]
    fn test_load_records_not_an_array_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{"sentence_base": "b"}"#).expect("write fixture");

        let err = load_records::<ClassifyRecord>(&path).unwrap_err();
        assert!(matches!(err, SessionError::MalformedInput { .. }));
        assert!(err.to_string().contains("input.json"));
    }

    #[test]
    fn test_load_records_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_records::<ClassifyRecord>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SessionError::Read { .. }));
    }

    #[test]
    fn test_write_atomic_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        write_atomic(&path, b"[]").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "[]");
        assert!(!dir.path().join("out.tmp").exists());
    }

    #[test]
    fn test_write_json_atomic_pretty_with_trailing_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        write_json_atomic(&path, &serde_json::json!([1, 2])).expect("write");

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.ends_with('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).expect("parse"),
            serde_json::json!([1, 2])
        );
    }
}
