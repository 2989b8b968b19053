use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::redact::content_key;
use crate::domain::validate::ascii7;

// ---------------------------------------------------------------------------
// AbChoice — which candidate sentence is closer to the base
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbChoice {
    #[serde(rename = "a", alias = "A")]
    A,
    #[serde(rename = "b", alias = "B")]
    B,
}

impl fmt::Display for AbChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbChoice::A => f.write_str("a"),
            AbChoice::B => f.write_str("b"),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotator — operator identity attached to output records on request
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Annotator {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.email.is_none()
    }
}

// ---------------------------------------------------------------------------
// Input records, one struct per task, wire names as found in the data files
// ---------------------------------------------------------------------------

/// One sentence pair for binary semantic-similarity labeling.
///
/// `label_semantic_similarity` is the gold value, hidden from the operator;
/// `label_semantic_similarity_human` is appended at label time. Unknown
/// fields pass through untouched so output files keep whatever extra
/// metadata the input carried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifyRecord {
    pub sentence_base: String,
    pub sentence_test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_semantic_similarity: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_semantic_similarity_human: Option<bool>,
    #[serde(rename = "_annotator", default, skip_serializing_if = "Option::is_none")]
    pub annotator: Option<Annotator>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ClassifyRecord {
    /// Identity of the sentence pair, independent of labels and annotator.
    pub fn content_key(&self) -> String {
        let base = ascii7(&self.sentence_base);
        let test = ascii7(&self.sentence_test);
        content_key(&[base.as_str(), test.as_str()])
    }
}

/// One sentence triple for pairwise similarity ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankRecord {
    pub sentence_base: String,
    pub sentence_a: String,
    pub sentence_b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_more_similar: Option<AbChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_more_similar_human: Option<AbChoice>,
    #[serde(rename = "_annotator", default, skip_serializing_if = "Option::is_none")]
    pub annotator: Option<Annotator>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RankRecord {
    pub fn content_key(&self) -> String {
        let base = ascii7(&self.sentence_base);
        let a = ascii7(&self.sentence_a);
        let b = ascii7(&self.sentence_b);
        content_key(&[base.as_str(), a.as_str(), b.as_str()])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
