use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use sl_core::domain::Annotator;
use sl_session::{ClassifyWorkflow, RankWorkflow};

mod config;
mod merge;
mod paths;
mod report;
mod run;

use config::AppConfig;
use paths::Paths;
use run::{run_labeling, LabelingArgs};

#[derive(Parser)]
#[command(
    name = "sl",
    about = "Human labeling tool for sentence classification and pairwise similarity"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Random seed for shuffling items (overrides the config file).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Max characters per field; longer records are skipped.
    #[arg(long, global = true)]
    max_len: Option<usize>,

    /// Annotator id recorded on labeled records.
    #[arg(long, global = true)]
    annotator_id: Option<String>,

    /// Annotator full name.
    #[arg(long, global = true)]
    annotator_name: Option<String>,

    /// Annotator email.
    #[arg(long, global = true)]
    annotator_email: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Binary semantic similarity labeling (True/False).
    Classify {
        /// JSON array with sentence_base, sentence_test,
        /// label_semantic_similarity. A bare filename is looked up in the
        /// inputs directory.
        #[arg(long)]
        input: String,
    },
    /// Pairwise similarity labeling ('a' vs 'b').
    Rank {
        /// JSON array with sentence_base, sentence_a, sentence_b,
        /// label_more_similar.
        #[arg(long)]
        input: String,
    },
    /// Merge labeled output files into one deduplicated array.
    Merge,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", format!("Error: {err:#}").red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(&cli.config)?;
    init_tracing(&config.logging.level);

    let paths = Paths::new(&config.dirs)?;
    let seed = cli.seed.unwrap_or(config.seed);
    let max_len = cli.max_len.unwrap_or(config.max_len);
    let annotator = build_annotator(&cli);

    match &cli.command {
        Command::Classify { input } => run_labeling(
            ClassifyWorkflow,
            LabelingArgs {
                input: input.as_str(),
                seed,
                max_len,
                annotator,
            },
            &paths,
        ),
        Command::Rank { input } => run_labeling(
            RankWorkflow,
            LabelingArgs {
                input: input.as_str(),
                seed,
                max_len,
                annotator,
            },
            &paths,
        ),
        Command::Merge => {
            let out = merge::run_merge(&paths)?;
            println!("Merged -> {}", out.display());
            Ok(())
        }
    }
}

fn build_annotator(cli: &Cli) -> Option<Annotator> {
    let annotator = Annotator {
        id: cli.annotator_id.clone(),
        name: cli.annotator_name.clone(),
        email: cli.annotator_email.clone(),
    };
    (!annotator.is_empty()).then_some(annotator)
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
