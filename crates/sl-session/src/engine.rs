use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use sl_core::domain::{
    ascii7, hash_preview, shuffled_indices, validate_fields, Annotator, MetricsReport, SkipReason,
};

use crate::clock::Clock;
use crate::console::Console;
use crate::help::run_help_menu;
use crate::log::{ItemEntry, SessionLog, SkipEntry};
use crate::resume::inspect_existing;
use crate::store::{write_json_atomic, SessionError};
use crate::workflow::Workflow;

// ---------------------------------------------------------------------------
// Session configuration and results
// ---------------------------------------------------------------------------

/// Immutable settings for one labeling run.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub seed: u64,
    pub max_len: usize,
    /// Input path as given, echoed into the log and report.
    pub input_path: String,
    pub annotator: Option<Annotator>,
}

/// Where the session's artifacts land.
#[derive(Clone, Debug)]
pub struct SessionPaths {
    pub output: PathBuf,
    pub log: PathBuf,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionCounts {
    pub input: usize,
    /// Scored items, including ones labeled by prior sessions.
    pub labeled: usize,
    pub validation_skips: usize,
    pub user_skips: usize,
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub metrics: MetricsReport,
    pub counts: SessionCounts,
    /// Skip counts aggregated by reason kind, ordered by kind.
    pub skip_breakdown: Vec<(String, usize)>,
    pub resumed: bool,
    pub review_mode: bool,
    pub existing_completed: usize,
    pub newly_labeled: usize,
}

#[derive(Debug)]
pub enum SessionOutcome {
    /// Every presentable item was answered or skipped; log finalized.
    Completed(SessionSummary),
    /// The input was already fully labeled and the operator declined review.
    DeclinedReview,
    /// Input ended early. Labeled items are already durable on disk; no log
    /// or report is finalized and the next invocation resumes.
    Interrupted { newly_labeled: usize },
}

// ---------------------------------------------------------------------------
// SessionEngine — INIT → RESUME_CHECK → LABELING ↔ HELP_MENU → DONE
// ---------------------------------------------------------------------------

struct ValidItem<L> {
    index: usize,
    /// Normalized field values, aligned with the workflow's field names.
    fields: Vec<String>,
    gold: L,
    key: String,
}

enum Answer<L> {
    Label(L),
    Skip,
}

pub struct SessionEngine<W: Workflow, C: Console> {
    workflow: W,
    console: C,
    clock: Box<dyn Clock>,
    config: SessionConfig,
    paths: SessionPaths,
}

impl<W: Workflow, C: Console> SessionEngine<W, C> {
    pub fn new(
        workflow: W,
        console: C,
        clock: Box<dyn Clock>,
        config: SessionConfig,
        paths: SessionPaths,
    ) -> Self {
        Self {
            workflow,
            console,
            clock,
            config,
            paths,
        }
    }

    /// Drive one full labeling session over `records`.
    pub fn run(mut self, records: Vec<W::Record>) -> Result<SessionOutcome, SessionError> {
        let mut log = SessionLog::new(
            self.workflow.name(),
            self.config.input_path.clone(),
            self.config.seed,
            self.config.max_len,
            self.config.annotator.clone(),
        );

        self.console.print(self.workflow.intro());

        // INIT: validate every record up front; failures become skips now,
        // never aborts. Only valid records enter the shuffle.
        let mut valid: Vec<ValidItem<W::Label>> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match self.validate(index, record) {
                Ok(item) => valid.push(item),
                Err(entry) => log.add_skip(entry),
            }
        }
        let order = shuffled_indices(self.config.seed, valid.len());

        // RESUME_CHECK: match the prior output by content identity.
        let input_keys: HashSet<String> = records
            .iter()
            .map(|record| self.workflow.content_key(record))
            .collect();
        let prior = inspect_existing(&self.workflow, &self.paths.output, &input_keys);
        let is_complete = prior.as_ref().is_some_and(|p| p.covers(&input_keys));
        let (mut prior_labeled, mut orphans) = match prior {
            Some(p) => (p.labeled, p.orphans),
            None => (HashMap::new(), Vec::new()),
        };
        log.existing_completed = prior_labeled.len();

        let mut review_mode = false;
        if is_complete {
            if !self.confirm_review()? {
                self.console.print("Exiting without changes.");
                return Ok(SessionOutcome::DeclinedReview);
            }
            review_mode = true;
            self.console
                .print("Review mode: you can revise any previous labels.");
        } else if log.existing_completed > 0 {
            self.console.print(&format!(
                "Resuming: {} items already completed.",
                log.existing_completed
            ));
        }
        log.review_mode = review_mode;
        log.resumed = !review_mode && log.existing_completed > 0;

        // Prior labels seed the output set; outside review mode they also
        // seed the metrics accumulator so totals cover the whole file.
        let mut out_records: BTreeMap<usize, W::Record> = BTreeMap::new();
        let mut pairs: Vec<(W::Label, W::Label)> = Vec::new();
        for item in &valid {
            if let Some(record) = prior_labeled.remove(&item.key) {
                if !review_mode {
                    if let Some(human) = self.workflow.human(&record) {
                        pairs.push((item.gold, human));
                    }
                }
                out_records.insert(item.index, record);
            }
        }
        // Prior labels whose records are no longer presentable (edited input
        // or new validation failures) stay at the end of the output file.
        let mut leftovers: Vec<(String, W::Record)> = prior_labeled.into_iter().collect();
        leftovers.sort_by(|a, b| a.0.cmp(&b.0));
        orphans.extend(leftovers.into_iter().map(|(_, record)| record));

        self.console.print(&format!(
            "\nLoaded {} items. Shuffled with seed={}.",
            records.len(),
            self.config.seed
        ));
        self.console.print(self.workflow.quick_hint());

        // LABELING
        let mut newly_labeled = 0usize;
        for &slot in &order {
            let item = &valid[slot];
            if !review_mode && out_records.contains_key(&item.index) {
                continue;
            }
            let current = if review_mode {
                out_records
                    .get(&item.index)
                    .and_then(|record| self.workflow.human(record))
            } else {
                None
            };

            let position = pairs.len() + 1;
            self.show_item(item, position, current);

            let started = self.clock.now();
            let Some(answer) = self.prompt_answer(item, position, current)? else {
                self.console.print("");
                return Ok(SessionOutcome::Interrupted { newly_labeled });
            };
            let elapsed_ms = self.clock.elapsed_ms(started);

            match answer {
                Answer::Skip => {
                    let values: Vec<&str> = item.fields.iter().map(String::as_str).collect();
                    log.add_skip(self.skip_entry(item.index, SkipReason::UserSkip, &values));
                    if review_mode && out_records.remove(&item.index).is_some() {
                        // A review skip retracts the stored label.
                        self.flush_output(&out_records, &orphans)?;
                    }
                }
                Answer::Label(label) => {
                    let mut record = records[item.index].clone();
                    self.workflow.set_human(&mut record, label);
                    if let Some(annotator) = &self.config.annotator {
                        self.workflow.set_annotator(&mut record, annotator);
                    }
                    log.add_item(ItemEntry {
                        index: item.index,
                        previews: self.item_previews(item),
                        gold: to_json(&item.gold)?,
                        human: to_json(&label)?,
                        correct: label == item.gold,
                        elapsed_ms,
                    });
                    pairs.push((item.gold, label));
                    out_records.insert(item.index, record);
                    newly_labeled += 1;
                    // Durable before advancing: a crash from here on loses
                    // nothing that was answered.
                    self.flush_output(&out_records, &orphans)?;
                }
            }
        }

        // DONE
        let metrics = self.workflow.metrics(&pairs);
        self.flush_output(&out_records, &orphans)?;
        let user_skips = log.user_skip_count();
        let summary = SessionSummary {
            metrics: metrics.clone(),
            counts: SessionCounts {
                input: records.len(),
                labeled: pairs.len(),
                validation_skips: log.skips.len() - user_skips,
                user_skips,
            },
            skip_breakdown: log.skip_breakdown(),
            resumed: log.resumed,
            review_mode,
            existing_completed: log.existing_completed,
            newly_labeled,
        };
        log.finalize(metrics, &self.paths.log)?;
        Ok(SessionOutcome::Completed(summary))
    }

    // -- INIT helpers --

    fn validate(
        &self,
        index: usize,
        record: &W::Record,
    ) -> Result<ValidItem<W::Label>, SkipEntry> {
        let names = self.workflow.field_names();
        let values = self.workflow.field_values(record);
        let fields: Vec<(&'static str, &str)> =
            names.iter().copied().zip(values.iter().copied()).collect();
        let normalized = match validate_fields(&fields, self.config.max_len) {
            Ok(normalized) => normalized,
            Err(reason) => return Err(self.skip_entry(index, reason, &values)),
        };
        match self.workflow.gold(record) {
            Some(gold) => Ok(ValidItem {
                index,
                fields: normalized,
                gold,
                key: self.workflow.content_key(record),
            }),
            None => Err(self.skip_entry(
                index,
                SkipReason::MissingOrEmpty {
                    field: self.workflow.gold_field(),
                },
                &values,
            )),
        }
    }

    fn skip_entry(&self, index: usize, reason: SkipReason, values: &[&str]) -> SkipEntry {
        let record_preview = self
            .workflow
            .preview_names()
            .iter()
            .copied()
            .zip(values.iter().map(|value| hash_preview(&ascii7(value))))
            .collect();
        SkipEntry {
            index,
            reason,
            record_preview,
        }
    }

    fn item_previews(&self, item: &ValidItem<W::Label>) -> BTreeMap<String, String> {
        self.workflow
            .preview_names()
            .iter()
            .zip(item.fields.iter())
            .map(|(name, value)| (format!("{name}_preview"), hash_preview(value)))
            .collect()
    }

    // -- RESUME_CHECK helpers --

    fn confirm_review(&mut self) -> Result<bool, SessionError> {
        loop {
            let Some(line) = self.console.read_line(
                "This input file has already been completely labeled. Do you want to review/revise? [Y/n]: ",
            )?
            else {
                return Ok(false);
            };
            match line.to_ascii_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.console.print("Please type 'y' or 'n'."),
            }
        }
    }

    // -- LABELING helpers --

    fn show_item(&mut self, item: &ValidItem<W::Label>, position: usize, current: Option<W::Label>) {
        self.console
            .print(&self.workflow.display_item(position, &item.fields));
        if let Some(label) = current {
            self.console.print(&format!(
                "      Current: {}",
                self.workflow.format_label(label)
            ));
        }
    }

    /// One prompt cycle, looping until the grammar accepts the input.
    /// `Ok(None)` means the input ended (EOF). A help excursion returns to
    /// the same prompt with the item re-displayed and the timer untouched.
    fn prompt_answer(
        &mut self,
        item: &ValidItem<W::Label>,
        position: usize,
        current: Option<W::Label>,
    ) -> Result<Option<Answer<W::Label>>, SessionError> {
        loop {
            let prompt = if current.is_some() {
                self.workflow.review_prompt()
            } else {
                self.workflow.prompt()
            };
            let Some(line) = self.console.read_line(prompt)? else {
                return Ok(None);
            };
            let token = line.to_ascii_lowercase();
            match token.as_str() {
                "" => {
                    if let Some(label) = current {
                        return Ok(Some(Answer::Label(label)));
                    }
                    self.console.print(self.workflow.invalid_input_hint());
                }
                "s" | "skip" => return Ok(Some(Answer::Skip)),
                "h" | "help" => {
                    run_help_menu(
                        &mut self.console,
                        self.workflow.intro(),
                        self.workflow.task_help(),
                    )?;
                    self.show_item(item, position, current);
                }
                _ => match self.workflow.parse_label(&token) {
                    Some(label) => return Ok(Some(Answer::Label(label))),
                    None => self.console.print(self.workflow.invalid_input_hint()),
                },
            }
        }
    }

    // -- persistence --

    /// Whole-file rewrite of the output array: labeled records in original
    /// input order, then orphans carried over from prior sessions.
    fn flush_output(
        &self,
        out_records: &BTreeMap<usize, W::Record>,
        orphans: &[W::Record],
    ) -> Result<(), SessionError> {
        let mut all: Vec<&W::Record> = out_records.values().collect();
        all.extend(orphans.iter());
        write_json_atomic(&self.paths.output, &all)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, SessionError> {
    serde_json::to_value(value).map_err(|source| SessionError::Encode {
        what: "label value",
        source,
    })
}
