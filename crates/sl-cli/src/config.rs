use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub max_len: usize,
    pub dirs: DirsConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_len: 1000,
            dirs: DirsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// A missing config file means defaults; an unreadable or invalid file
    /// is an error rather than a silent fallback.
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirsConfig {
    pub inputs: PathBuf,
    pub outputs: PathBuf,
    pub logs: PathBuf,
    pub reports: PathBuf,
    pub outputs_merged: PathBuf,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            inputs: PathBuf::from("./inputs"),
            outputs: PathBuf::from("./outputs"),
            logs: PathBuf::from("./logs"),
            reports: PathBuf::from("./reports"),
            outputs_merged: PathBuf::from("./outputs-merged"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
