use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::store::load_records;
use crate::workflow::Workflow;

/// What a prior output file says about the current input.
pub struct ExistingOutput<R> {
    /// Prior labeled records whose content identity matches an input record.
    pub labeled: HashMap<String, R>,
    /// Prior records matching no current input record; preserved verbatim at
    /// the end of the rewritten output file.
    pub orphans: Vec<R>,
}

impl<R> ExistingOutput<R> {
    /// True when every input record already carries a label.
    pub fn covers(&self, input_keys: &HashSet<String>) -> bool {
        !input_keys.is_empty() && input_keys.iter().all(|key| self.labeled.contains_key(key))
    }
}

/// Inspect the output file from prior sessions, matching records by content
/// identity rather than array position, so edits and reordering of the input
/// do not misattribute labels. An unreadable prior file is treated as absent
/// (the session starts fresh and will overwrite it).
pub fn inspect_existing<W: Workflow>(
    workflow: &W,
    path: &Path,
    input_keys: &HashSet<String>,
) -> Option<ExistingOutput<W::Record>> {
    if !path.exists() {
        return None;
    }

    let prior: Vec<W::Record> = match load_records(path) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "ignoring unreadable prior output");
            return None;
        }
    };

    let mut labeled = HashMap::new();
    let mut orphans = Vec::new();
    for record in prior {
        let key = workflow.content_key(&record);
        if workflow.human(&record).is_some() {
            if input_keys.contains(&key) {
                labeled.insert(key, record);
            } else {
                orphans.push(record);
            }
        } else if !input_keys.contains(&key) {
            orphans.push(record);
        }
        // An unlabeled prior record that matches the input is dropped here;
        // the session will re-present and rewrite it.
    }

    Some(ExistingOutput { labeled, orphans })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
