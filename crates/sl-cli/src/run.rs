use colored::Colorize;

use sl_core::domain::Annotator;
use sl_session::{
    load_records, write_atomic, SessionConfig, SessionEngine, SessionOutcome, SessionPaths,
    StdConsole, SystemClock, Workflow,
};

use crate::paths::Paths;
use crate::report::render_report;

pub struct LabelingArgs<'a> {
    pub input: &'a str,
    pub seed: u64,
    pub max_len: usize,
    pub annotator: Option<Annotator>,
}

/// Load the input, drive one interactive session, and emit the report. A
/// malformed input file fails here, before any labeling or output writes.
pub fn run_labeling<W: Workflow>(
    workflow: W,
    args: LabelingArgs<'_>,
    paths: &Paths,
) -> anyhow::Result<()> {
    let input_path = paths.resolve_input(args.input);
    let records: Vec<W::Record> = load_records(&input_path)?;
    let derived = paths.derive(&input_path);

    let cmd = workflow.name();
    let engine = SessionEngine::new(
        workflow,
        StdConsole,
        Box::new(SystemClock),
        SessionConfig {
            seed: args.seed,
            max_len: args.max_len,
            input_path: input_path.display().to_string(),
            annotator: args.annotator.clone(),
        },
        SessionPaths {
            output: derived.output.clone(),
            log: derived.log.clone(),
        },
    );

    match engine.run(records)? {
        SessionOutcome::Completed(summary) => {
            let report = render_report(
                cmd,
                &input_path,
                args.seed,
                args.max_len,
                args.annotator.as_ref(),
                &summary,
                &derived.output,
                &derived.log,
            );
            write_atomic(&derived.report, report.as_bytes())?;

            println!("\n{}", "Saved:".bright_green());
            println!("  Human labels -> {}", derived.output.display());
            println!("  Log JSON     -> {}", derived.log.display());
            println!("  Report TXT   -> {}\n", derived.report.display());
        }
        SessionOutcome::DeclinedReview => {}
        SessionOutcome::Interrupted { newly_labeled } => {
            println!(
                "{}",
                format!(
                    "\nInput ended early; {newly_labeled} answer(s) from this session are saved. Run again to resume."
                )
                .yellow()
            );
        }
    }
    Ok(())
}
