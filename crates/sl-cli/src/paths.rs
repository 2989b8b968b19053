use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

use crate::config::DirsConfig;

/// Working directories, created on startup.
#[derive(Debug, Clone)]
pub struct Paths {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
    pub logs: PathBuf,
    pub reports: PathBuf,
    pub outputs_merged: PathBuf,
}

/// Artifact paths derived from one input file.
#[derive(Debug, Clone)]
pub struct DerivedPaths {
    pub output: PathBuf,
    pub log: PathBuf,
    pub report: PathBuf,
}

impl Paths {
    pub fn new(dirs: &DirsConfig) -> anyhow::Result<Self> {
        let paths = Self {
            inputs: dirs.inputs.clone(),
            outputs: dirs.outputs.clone(),
            logs: dirs.logs.clone(),
            reports: dirs.reports.clone(),
            outputs_merged: dirs.outputs_merged.clone(),
        };
        for dir in [
            &paths.inputs,
            &paths.outputs,
            &paths.logs,
            &paths.reports,
            &paths.outputs_merged,
        ] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
        Ok(paths)
    }

    pub fn timestamp() -> String {
        Local::now().format("%Y%m%d_%H%M%S").to_string()
    }

    /// Output goes to `<outputs>/<stem>_HUMAN.<ext>`; log and report get
    /// timestamped names so successive sessions never clobber each other.
    pub fn derive(&self, input: &Path) -> DerivedPaths {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("input");
        let ext = input
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("json");
        let ts = Self::timestamp();
        DerivedPaths {
            output: self.outputs.join(format!("{stem}_HUMAN.{ext}")),
            log: self.logs.join(format!("log_{ts}.json")),
            report: self.reports.join(format!("report_{ts}.txt")),
        }
    }

    /// An existing path is taken as-is; a bare filename resolves against the
    /// inputs directory when present there.
    pub fn resolve_input(&self, arg: &str) -> PathBuf {
        let direct = PathBuf::from(arg);
        if direct.is_file() {
            return direct;
        }
        let candidate = self.inputs.join(arg);
        if candidate.is_file() {
            candidate
        } else {
            direct
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs_under(root: &Path) -> DirsConfig {
        DirsConfig {
            inputs: root.join("inputs"),
            outputs: root.join("outputs"),
            logs: root.join("logs"),
            reports: root.join("reports"),
            outputs_merged: root.join("outputs-merged"),
        }
    }

    #[test]
    fn test_new_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(&dirs_under(dir.path())).unwrap();

        assert!(paths.inputs.is_dir());
        assert!(paths.outputs.is_dir());
        assert!(paths.logs.is_dir());
        assert!(paths.reports.is_dir());
        assert!(paths.outputs_merged.is_dir());
    }

    #[test]
    fn test_derive_output_name() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(&dirs_under(dir.path())).unwrap();

        let derived = paths.derive(Path::new("inputs/sentence_classifier.json"));
        assert_eq!(
            derived.output.file_name().unwrap(),
            "sentence_classifier_HUMAN.json"
        );
        let log_name = derived.log.file_name().unwrap().to_str().unwrap();
        assert!(log_name.starts_with("log_") && log_name.ends_with(".json"));
        let report_name = derived.report.file_name().unwrap().to_str().unwrap();
        assert!(report_name.starts_with("report_") && report_name.ends_with(".txt"));
    }

    #[test]
    fn test_resolve_input_prefers_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(&dirs_under(dir.path())).unwrap();

        let direct = dir.path().join("direct.json");
        fs::write(&direct, "[]").unwrap();
        assert_eq!(
            paths.resolve_input(direct.to_str().unwrap()),
            direct.clone()
        );
    }

    #[test]
    fn test_resolve_input_falls_back_to_inputs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(&dirs_under(dir.path())).unwrap();

        fs::write(paths.inputs.join("data.json"), "[]").unwrap();
        assert_eq!(
            paths.resolve_input("data.json"),
            paths.inputs.join("data.json")
        );

        // Nothing matches: the argument passes through untouched, and the
        // read failure is reported against it.
        assert_eq!(
            paths.resolve_input("missing.json"),
            PathBuf::from("missing.json")
        );
    }
}
