use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

use sl_session::write_json_atomic;

use crate::paths::Paths;

type DedupKey = (String, String, String, String, String, String);

/// Records agreeing on every sentence field and human label are duplicates,
/// whichever task and file they came from.
fn dedup_key(record: &Value) -> DedupKey {
    let text = |field: &str| {
        record
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };
    let label = |field: &str| record.get(field).map(|v| v.to_string()).unwrap_or_default();
    (
        text("sentence_base"),
        text("sentence_test"),
        text("sentence_a"),
        text("sentence_b"),
        label("label_semantic_similarity_human"),
        label("label_more_similar_human"),
    )
}

/// Merge every `*.json` array in the outputs directory into a single
/// deduplicated array under the merged directory. Unreadable files are
/// skipped with a warning; first occurrence wins on duplicates.
pub fn run_merge(paths: &Paths) -> anyhow::Result<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(&paths.outputs)
        .with_context(|| format!("reading {}", paths.outputs.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut merged: Vec<Value> = Vec::new();
    let mut seen: HashSet<DedupKey> = HashSet::new();
    for path in files {
        let records = match read_array(&path) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "skipping unreadable output file");
                continue;
            }
        };
        for record in records {
            if seen.insert(dedup_key(&record)) {
                merged.push(record);
            }
        }
    }

    let out_path = paths
        .outputs_merged
        .join(format!("merged_{}.json", Paths::timestamp()));
    write_json_atomic(&out_path, &merged)?;
    Ok(out_path)
}

fn read_array(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    match value {
        Value::Array(records) => Ok(records),
        _ => anyhow::bail!("not a JSON array"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::DirsConfig;

    fn paths_under(root: &Path) -> Paths {
        Paths::new(&DirsConfig {
            inputs: root.join("inputs"),
            outputs: root.join("outputs"),
            logs: root.join("logs"),
            reports: root.join("reports"),
            outputs_merged: root.join("outputs-merged"),
        })
        .unwrap()
    }

    #[test]
    fn test_merge_dedups_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_under(dir.path());

        let record = serde_json::json!({
            "sentence_base": "b", "sentence_test": "t",
            "label_semantic_similarity_human": true
        });
        let other = serde_json::json!({
            "sentence_base": "b", "sentence_test": "t",
            "label_semantic_similarity_human": false
        });
        fs::write(
            paths.outputs.join("one_HUMAN.json"),
            serde_json::to_string(&serde_json::json!([record.clone(), other])).unwrap(),
        )
        .unwrap();
        fs::write(
            paths.outputs.join("two_HUMAN.json"),
            serde_json::to_string(&serde_json::json!([record])).unwrap(),
        )
        .unwrap();

        let out = run_merge(&paths).unwrap();
        let merged: Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        // Same text with a different human label is a distinct record; the
        // exact duplicate collapses.
        assert_eq!(merged.as_array().unwrap().len(), 2);
        assert!(out.file_name().unwrap().to_str().unwrap().starts_with("merged_"));
    }

    #[test]
    fn test_merge_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_under(dir.path());

        fs::write(paths.outputs.join("bad.json"), "{ not json").unwrap();
        fs::write(
            paths.outputs.join("good.json"),
            r#"[{"sentence_base": "x", "sentence_test": "y",
                 "label_semantic_similarity_human": true}]"#,
        )
        .unwrap();

        let out = run_merge(&paths).unwrap();
        let merged: Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(merged.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_merge_empty_outputs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_under(dir.path());

        let out = run_merge(&paths).unwrap();
        let merged: Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(merged, serde_json::json!([]));
    }
}
