use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use sl_core::domain::{Annotator, MetricsReport, SkipReason};

use crate::store::{write_json_atomic, SessionError};

// ---------------------------------------------------------------------------
// Log entries
// ---------------------------------------------------------------------------

/// One skipped record, validation or operator initiated. Previews are
/// redacted (bounded prefix + digest), never the full text.
#[derive(Clone, Debug, Serialize)]
pub struct SkipEntry {
    pub index: usize,
    pub reason: SkipReason,
    pub record_preview: BTreeMap<&'static str, String>,
}

/// One labeled item. The gold value never reaches the console during the
/// session but is recorded here next to the human answer for scoring.
#[derive(Clone, Debug, Serialize)]
pub struct ItemEntry {
    pub index: usize,
    #[serde(flatten)]
    pub previews: BTreeMap<String, String>,
    pub gold: serde_json::Value,
    pub human: serde_json::Value,
    pub correct: bool,
    pub elapsed_ms: u64,
}

// ---------------------------------------------------------------------------
// SessionLog — structured machine-readable record of one run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SessionLog {
    pub cmd: &'static str,
    pub input: String,
    pub seed: u64,
    pub max_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotator: Option<Annotator>,
    pub session_id: Uuid,
    pub start_ts: DateTime<Utc>,
    pub resumed: bool,
    pub review_mode: bool,
    /// Items already labeled by prior sessions when this one started.
    pub existing_completed: usize,
    pub skips: Vec<SkipEntry>,
    pub items: Vec<ItemEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ts: Option<DateTime<Utc>>,
}

impl SessionLog {
    pub fn new(
        cmd: &'static str,
        input: String,
        seed: u64,
        max_len: usize,
        annotator: Option<Annotator>,
    ) -> Self {
        Self {
            cmd,
            input,
            seed,
            max_len,
            annotator,
            session_id: Uuid::new_v4(),
            start_ts: Utc::now(),
            resumed: false,
            review_mode: false,
            existing_completed: 0,
            skips: Vec::new(),
            items: Vec::new(),
            metrics: None,
            end_ts: None,
        }
    }

    pub fn add_skip(&mut self, entry: SkipEntry) {
        self.skips.push(entry);
    }

    pub fn add_item(&mut self, entry: ItemEntry) {
        self.items.push(entry);
    }

    /// Aggregate skip counts by reason kind, ordered by kind.
    pub fn skip_breakdown(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &self.skips {
            *counts.entry(entry.reason.kind()).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    pub fn user_skip_count(&self) -> usize {
        self.skips
            .iter()
            .filter(|entry| entry.reason.is_user_skip())
            .count()
    }

    /// Attach metrics, stamp the end time, and write the log atomically.
    pub fn finalize(&mut self, metrics: MetricsReport, path: &Path) -> Result<(), SessionError> {
        self.metrics = Some(metrics);
        self.end_ts = Some(Utc::now());
        write_json_atomic(path, self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use sl_core::domain::{metrics_binary, SkipReason};

    fn skip(index: usize, reason: SkipReason) -> SkipEntry {
        SkipEntry {
            index,
            reason,
            record_preview: BTreeMap::new(),
        }
    }

    #[test]
    fn test_skip_breakdown_aggregates_by_kind() {
        let mut log = SessionLog::new("classify", "in.json".to_owned(), 42, 1000, None);
        log.add_skip(skip(0, SkipReason::UserSkip));
        log.add_skip(skip(
            1,
            SkipReason::TooLong {
                field: "sentence_base",
                len: 1200,
                max: 1000,
            },
        ));
        log.add_skip(skip(
            2,
            SkipReason::TooLong {
                field: "sentence_base",
                len: 1500,
                max: 1000,
            },
        ));

        assert_eq!(
            log.skip_breakdown(),
            vec![
                ("too_long:sentence_base".to_owned(), 2),
                ("user_skip".to_owned(), 1),
            ]
        );
        assert_eq!(log.user_skip_count(), 1);
    }

    #[test]
    fn test_finalize_writes_complete_log() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.json");

        let mut log = SessionLog::new("classify", "in.json".to_owned(), 7, 100, None);
        log.add_item(ItemEntry {
            index: 0,
            previews: BTreeMap::from([("base_preview".to_owned(), "b|abc".to_owned())]),
            gold: serde_json::json!(true),
            human: serde_json::json!(true),
            correct: true,
            elapsed_ms: 1200,
        });
        log.finalize(
            MetricsReport::Binary(metrics_binary(&[(true, true)])),
            &path,
        )
        .expect("finalize log");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read log"))
                .expect("parse log");
        assert_eq!(written["cmd"], "classify");
        assert_eq!(written["seed"], 7);
        assert_eq!(written["items"][0]["base_preview"], "b|abc");
        assert_eq!(written["items"][0]["correct"], true);
        assert_eq!(written["metrics"]["accuracy"], 1.0);
        assert!(written["end_ts"].is_string());
        assert!(written["session_id"].is_string());
    }

    #[test]
    fn test_log_without_metrics_omits_optional_fields() {
        let log = SessionLog::new("rank", "in.json".to_owned(), 42, 1000, None);
        let value = serde_json::to_value(&log).expect("serialize log");
        assert!(value.get("metrics").is_none());
        assert!(value.get("end_ts").is_none());
        assert!(value.get("annotator").is_none());
    }
}
