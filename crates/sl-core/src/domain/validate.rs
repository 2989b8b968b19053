use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// SkipReason — why a record is excluded from labeling and scoring
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("missing_or_empty:{field}")]
    MissingOrEmpty { field: &'static str },
    #[error("too_long:{field}:{len}>{max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("user_skip")]
    UserSkip,
}

impl SkipReason {
    /// Reason with the variable length part dropped, for aggregate counts.
    pub fn kind(&self) -> String {
        match self {
            SkipReason::MissingOrEmpty { field } => format!("missing_or_empty:{field}"),
            SkipReason::TooLong { field, .. } => format!("too_long:{field}"),
            SkipReason::UserSkip => "user_skip".to_owned(),
        }
    }

    pub fn is_user_skip(&self) -> bool {
        matches!(self, SkipReason::UserSkip)
    }
}

// Logs store reasons as their display strings ("too_long:sentence_base:1200>1000").
impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// ASCII folding and field validation
// ---------------------------------------------------------------------------

/// Fold text to printable 7-bit ASCII so console rendering cannot break.
/// ASCII whitespace (space, tab, newline) is kept; everything else outside
/// the printable range is dropped.
pub fn ascii7(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n'))
        .collect()
}

/// Check each required `(name, value)` field in order and return the
/// normalized values. The first failing check wins; later fields are not
/// inspected once one has failed.
pub fn validate_fields(
    fields: &[(&'static str, &str)],
    max_len: usize,
) -> Result<Vec<String>, SkipReason> {
    let mut normalized = Vec::with_capacity(fields.len());
    for &(name, value) in fields {
        if value.trim().is_empty() {
            return Err(SkipReason::MissingOrEmpty { field: name });
        }
        let folded = ascii7(value);
        if folded.len() > max_len {
            return Err(SkipReason::TooLong {
                field: name,
                len: folded.len(),
                max: max_len,
            });
        }
        normalized.push(folded);
    }
    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
