use serde::de::DeserializeOwned;
use serde::Serialize;

use sl_core::domain::{
    metrics_ab, metrics_binary, AbChoice, Annotator, ClassifyRecord, MetricsReport, RankRecord,
};

// ---------------------------------------------------------------------------
// Workflow — binds a labeling task to its records, grammar, and metrics
// ---------------------------------------------------------------------------

/// One labeling task. The session engine is generic over this trait; each
/// task supplies its wire fields, answer grammar, display strings, and
/// metrics computation.
pub trait Workflow {
    type Record: Clone + Serialize + DeserializeOwned;
    type Label: Copy + PartialEq + Serialize + std::fmt::Debug;

    /// Subcommand name as it appears in logs and reports.
    fn name(&self) -> &'static str;

    /// Required text fields, in validation order (wire names).
    fn field_names(&self) -> &'static [&'static str];

    /// Short field names used for preview keys in the log.
    fn preview_names(&self) -> &'static [&'static str];

    /// Values of the required fields, aligned with `field_names`.
    fn field_values<'r>(&self, record: &'r Self::Record) -> Vec<&'r str>;

    /// Wire name of the gold field, for missing-gold skip reasons.
    fn gold_field(&self) -> &'static str;

    fn gold(&self, record: &Self::Record) -> Option<Self::Label>;

    fn human(&self, record: &Self::Record) -> Option<Self::Label>;

    fn set_human(&self, record: &mut Self::Record, label: Self::Label);

    /// Attach operator identity unless the record already carries one.
    fn set_annotator(&self, record: &mut Self::Record, annotator: &Annotator);

    /// Content identity used to match records across sessions.
    fn content_key(&self, record: &Self::Record) -> String;

    /// Parse an answer token (trimmed, lowercased). `s`/`h` are handled by
    /// the engine before this is consulted.
    fn parse_label(&self, token: &str) -> Option<Self::Label>;

    fn format_label(&self, label: Self::Label) -> String;

    /// Item block printed above the prompt; `position` counts labeled items.
    fn display_item(&self, position: usize, fields: &[String]) -> String;

    fn prompt(&self) -> &'static str;

    fn review_prompt(&self) -> &'static str;

    fn invalid_input_hint(&self) -> &'static str;

    /// One-line reminder printed under the "Loaded N items" banner.
    fn quick_hint(&self) -> &'static str;

    fn intro(&self) -> &'static str;

    fn task_help(&self) -> &'static str;

    fn metrics(&self, pairs: &[(Self::Label, Self::Label)]) -> MetricsReport;
}

const RULE: &str = "------------------------------------------------------------";

// ---------------------------------------------------------------------------
// Classify — binary semantic similarity (True/False)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default)]
pub struct ClassifyWorkflow;

impl Workflow for ClassifyWorkflow {
    type Record = ClassifyRecord;
    type Label = bool;

    fn name(&self) -> &'static str {
        "classify"
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["sentence_base", "sentence_test"]
    }

    fn preview_names(&self) -> &'static [&'static str] {
        &["base", "test"]
    }

    fn field_values<'r>(&self, record: &'r Self::Record) -> Vec<&'r str> {
        vec![record.sentence_base.as_str(), record.sentence_test.as_str()]
    }

    fn gold_field(&self) -> &'static str {
        "label_semantic_similarity"
    }

    fn gold(&self, record: &Self::Record) -> Option<bool> {
        record.label_semantic_similarity
    }

    fn human(&self, record: &Self::Record) -> Option<bool> {
        record.label_semantic_similarity_human
    }

    fn set_human(&self, record: &mut Self::Record, label: bool) {
        record.label_semantic_similarity_human = Some(label);
    }

    fn set_annotator(&self, record: &mut Self::Record, annotator: &Annotator) {
        if record.annotator.is_none() {
            record.annotator = Some(annotator.clone());
        }
    }

    fn content_key(&self, record: &Self::Record) -> String {
        record.content_key()
    }

    fn parse_label(&self, token: &str) -> Option<bool> {
        match token {
            "t" | "true" => Some(true),
            "f" | "false" => Some(false),
            _ => None,
        }
    }

    fn format_label(&self, label: bool) -> String {
        if label { "True" } else { "False" }.to_owned()
    }

    fn display_item(&self, position: usize, fields: &[String]) -> String {
        format!(
            "{RULE}\n[{position}] Base : {}\n      Test : {}",
            fields[0], fields[1]
        )
    }

    fn prompt(&self) -> &'static str {
        "Label (t/f/h or s to skip): "
    }

    fn review_prompt(&self) -> &'static str {
        "Label (t/f) or 's' to skip, Enter to keep current: "
    }

    fn invalid_input_hint(&self) -> &'static str {
        "Please type 't', 'f', 'h', or 's'."
    }

    fn quick_hint(&self) -> &'static str {
        "Label True/False (t/f). 's' to skip, 'h' for help.\n"
    }

    fn intro(&self) -> &'static str {
        CLASSIFY_INTRO
    }

    fn task_help(&self) -> &'static str {
        CLASSIFY_HELP
    }

    fn metrics(&self, pairs: &[(bool, bool)]) -> MetricsReport {
        MetricsReport::Binary(metrics_binary(pairs))
    }
}

const CLASSIFY_INTRO: &str = "\
======================================================================
CLASSIFICATION: semantic similarity labeling
======================================================================
You will label whether sentence pairs are semantically similar.
For each item you will see:
  - a base sentence
  - a test sentence to compare against the base

Your task: decide whether the test sentence means roughly the same
thing as the base sentence.
  t / true  - the sentences ARE semantically similar
  f / false - the sentences are NOT semantically similar
  s         - skip the current item
  h         - show the help menu

Example:
  Base: 'The cat sits on the mat'
  Test: 'A feline is resting on the rug'
  Label: t (similar meaning)

Press Ctrl+C to exit at any time.";

const CLASSIFY_HELP: &str = "\
CLASSIFICATION HELP
----------------------------------------
YOUR TASK:
  Decide whether two sentences have similar semantic meaning.

LABELING OPTIONS:
  t, true  - sentences ARE semantically similar
  f, false - sentences are NOT semantically similar
  s        - skip this item

INPUT FORMAT:
  sentence_base              - the reference sentence
  sentence_test              - the sentence compared against the base
  label_semantic_similarity  - gold label (hidden from you)

EXAMPLES:
  Base: 'The cat sits on the mat'
  Test: 'A feline rests on the rug'
  Label: t (similar meaning)

  Base: 'I love programming'
  Test: 'The weather is cold today'
  Label: f (different meaning)";

// ---------------------------------------------------------------------------
// Rank — pairwise similarity ('a' vs 'b')
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default)]
pub struct RankWorkflow;

impl Workflow for RankWorkflow {
    type Record = RankRecord;
    type Label = AbChoice;

    fn name(&self) -> &'static str {
        "rank"
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["sentence_base", "sentence_a", "sentence_b"]
    }

    fn preview_names(&self) -> &'static [&'static str] {
        &["base", "a", "b"]
    }

    fn field_values<'r>(&self, record: &'r Self::Record) -> Vec<&'r str> {
        vec![
            record.sentence_base.as_str(),
            record.sentence_a.as_str(),
            record.sentence_b.as_str(),
        ]
    }

    fn gold_field(&self) -> &'static str {
        "label_more_similar"
    }

    fn gold(&self, record: &Self::Record) -> Option<AbChoice> {
        record.label_more_similar
    }

    fn human(&self, record: &Self::Record) -> Option<AbChoice> {
        record.label_more_similar_human
    }

    fn set_human(&self, record: &mut Self::Record, label: AbChoice) {
        record.label_more_similar_human = Some(label);
    }

    fn set_annotator(&self, record: &mut Self::Record, annotator: &Annotator) {
        if record.annotator.is_none() {
            record.annotator = Some(annotator.clone());
        }
    }

    fn content_key(&self, record: &Self::Record) -> String {
        record.content_key()
    }

    fn parse_label(&self, token: &str) -> Option<AbChoice> {
        match token {
            "a" => Some(AbChoice::A),
            "b" => Some(AbChoice::B),
            _ => None,
        }
    }

    fn format_label(&self, label: AbChoice) -> String {
        label.to_string()
    }

    fn display_item(&self, position: usize, fields: &[String]) -> String {
        format!(
            "{RULE}\n[{position}] Base : {}\n      (a): {}\n      (b): {}",
            fields[0], fields[1], fields[2]
        )
    }

    fn prompt(&self) -> &'static str {
        "Label ('a'/'b'/'h' or 's' to skip): "
    }

    fn review_prompt(&self) -> &'static str {
        "Label ('a'/'b') or 's' to skip, Enter to keep current: "
    }

    fn invalid_input_hint(&self) -> &'static str {
        "Please type 'a', 'b', 'h', or 's'."
    }

    fn quick_hint(&self) -> &'static str {
        "Choose 'a' or 'b'. 's' to skip, 'h' for help.\n"
    }

    fn intro(&self) -> &'static str {
        RANK_INTRO
    }

    fn task_help(&self) -> &'static str {
        RANK_HELP
    }

    fn metrics(&self, pairs: &[(AbChoice, AbChoice)]) -> MetricsReport {
        MetricsReport::Ab(metrics_ab(pairs))
    }
}

const RANK_INTRO: &str = "\
======================================================================
RANKING: pairwise similarity comparison
======================================================================
You will choose which of two sentences is more similar to a base
sentence. For each item you will see:
  - a base sentence
  - sentence (a): first comparison option
  - sentence (b): second comparison option

Your task: decide which sentence (a or b) is closer in meaning to the
base.
  a - sentence (a) is more similar to the base
  b - sentence (b) is more similar to the base
  s - skip the current item
  h - show the help menu

Example:
  Base: 'The weather is nice today'
  (a): 'It's a beautiful sunny day'
  (b): 'I need to buy groceries'
  Label: a (sentence a is more similar)

Press Ctrl+C to exit at any time.";

const RANK_HELP: &str = "\
RANKING HELP
----------------------------------------
YOUR TASK:
  Choose which sentence is more similar to the base sentence.

LABELING OPTIONS:
  a - sentence (a) is more similar to base
  b - sentence (b) is more similar to base
  s - skip this item

INPUT FORMAT:
  sentence_base      - the reference sentence
  sentence_a         - first comparison option
  sentence_b         - second comparison option
  label_more_similar - gold label (hidden from you)

EXAMPLES:
  Base: 'The weather is nice today'
  (a): 'It's a beautiful sunny day'
  (b): 'I need to buy groceries'
  Label: a";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
