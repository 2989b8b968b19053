use std::path::Path;

use chrono::Local;

use sl_core::domain::{Annotator, MetricsReport};
use sl_session::SessionSummary;

fn fmt_metric(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| format!("{v:.4}"))
}

/// Assemble the plain-text report in memory; the caller writes it once so an
/// interrupted session never leaves a partial file behind.
pub fn render_report(
    cmd: &str,
    input: &Path,
    seed: u64,
    max_len: usize,
    annotator: Option<&Annotator>,
    summary: &SessionSummary,
    output_path: &Path,
    log_path: &Path,
) -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line(format!("REPORT {cmd} @ {}", Local::now().to_rfc3339()));
    line(format!("Input: {}", input.display()));
    line(format!("Seed: {seed}  MaxLen: {max_len}"));
    if let Some(annotator) = annotator {
        line(format!(
            "Annotator: {} {} <{}>",
            annotator.id.as_deref().unwrap_or("?"),
            annotator.name.as_deref().unwrap_or(""),
            annotator.email.as_deref().unwrap_or(""),
        ));
    }
    if summary.review_mode {
        line("Review mode: previously labeled items re-confirmed".to_owned());
    } else if summary.resumed {
        line(format!(
            "Resumed: {} items were already completed",
            summary.existing_completed
        ));
    }
    line("-".repeat(60));

    let counts = summary.counts;
    line(String::new());
    line("COUNTS".to_owned());
    line(format!("Input records: {}", counts.input));
    line(format!(
        "Labeled: {}  Skipped: {} (validation={}, user={})",
        counts.labeled,
        counts.validation_skips + counts.user_skips,
        counts.validation_skips,
        counts.user_skips
    ));
    if !summary.skip_breakdown.is_empty() {
        line("Skip reasons:".to_owned());
        for (kind, count) in &summary.skip_breakdown {
            line(format!("  {kind}: {count}"));
        }
    }

    line(String::new());
    line("RESULTS".to_owned());
    match &summary.metrics {
        MetricsReport::Binary(m) => {
            line(format!("Accuracy: {}", fmt_metric(m.accuracy)));
            line(format!(
                "Precision(pos): {}  Recall(pos): {}  F1(pos): {}",
                fmt_metric(m.precision_pos),
                fmt_metric(m.recall_pos),
                fmt_metric(m.f1_pos)
            ));
            line(format!(
                "Precision(neg): {}  Recall(neg): {}  F1(neg): {}",
                fmt_metric(m.precision_neg),
                fmt_metric(m.recall_neg),
                fmt_metric(m.f1_neg)
            ));
            let c = m.confusion;
            line(format!(
                "Confusion: TP={} FP={} FN={} TN={}",
                c.true_pos, c.false_pos, c.false_neg, c.true_neg
            ));
        }
        MetricsReport::Ab(m) => {
            line(format!("Accuracy: {}", fmt_metric(m.accuracy)));
            line(format!(
                "Precision(a): {}  Recall(a): {}  F1(a): {}",
                fmt_metric(m.precision_a),
                fmt_metric(m.recall_a),
                fmt_metric(m.f1_a)
            ));
            line(format!(
                "Precision(b): {}  Recall(b): {}  F1(b): {}",
                fmt_metric(m.precision_b),
                fmt_metric(m.recall_b),
                fmt_metric(m.f1_b)
            ));
            let c = m.confusion;
            line(format!(
                "Confusion: a->a={} a->b={} b->a={} b->b={}",
                c.a_to_a, c.a_to_b, c.b_to_a, c.b_to_b
            ));
        }
    }

    line(String::new());
    line(format!("Human output: {}", output_path.display()));
    line(format!("JSON log:     {}", log_path.display()));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
