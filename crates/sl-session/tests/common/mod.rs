use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::time::Instant;

use sl_session::{Clock, Console, SessionConfig, SessionPaths};

// ---------------------------------------------------------------------------
// ScriptedConsole — replays canned operator input and captures output
// ---------------------------------------------------------------------------

pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub printed: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I>(inputs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            printed: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Every printed line joined, for containment assertions.
    #[allow(dead_code)]
    pub fn transcript(&self) -> String {
        self.printed.join("\n")
    }

    /// Base sentences in the order items were displayed (re-displays after a
    /// help excursion included).
    #[allow(dead_code)]
    pub fn presented_bases(&self) -> Vec<String> {
        self.printed
            .iter()
            .filter_map(|block| {
                block
                    .lines()
                    .find_map(|line| line.split("] Base : ").nth(1).map(str::to_owned))
            })
            .collect()
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.printed.push(text.to_owned());
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_owned());
        // Script exhaustion doubles as EOF.
        Ok(self.inputs.pop_front())
    }
}

// ---------------------------------------------------------------------------
// FakeClock — fixed elapsed time per item
// ---------------------------------------------------------------------------

pub struct FakeClock {
    pub step_ms: u64,
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_ms(&self, _since: Instant) -> u64 {
        self.step_ms
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn session_config(input: &str, seed: u64, max_len: usize) -> SessionConfig {
    SessionConfig {
        seed,
        max_len,
        input_path: input.to_owned(),
        annotator: None,
    }
}

pub fn session_paths(dir: &Path) -> SessionPaths {
    SessionPaths {
        output: dir.join("input_HUMAN.json"),
        log: dir.join("log.json"),
    }
}

#[allow(dead_code)]
pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("read file")).expect("parse json")
}
