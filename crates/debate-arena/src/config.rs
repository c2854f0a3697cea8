use anyhow::{Context, Result};
use arena_coordination::DebateConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_LOG_PATH: &str = "ARENA_LOG_PATH";
pub const ENV_VERDICT_PATH: &str = "ARENA_VERDICT_PATH";
pub const ENV_DIAGRAM_PATH: &str = "ARENA_DIAGRAM_PATH";

/// Output locations for one run, plus the fixed debate settings.
///
/// Resolution order for the paths, lowest to highest: built-in defaults,
/// the optional TOML file, `ARENA_*` environment variables, command-line
/// flags. The file may only name paths; any other key is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Audit log, truncated at start.
    pub log_path: PathBuf,
    /// Verdict JSON, written only on success.
    pub verdict_path: PathBuf,
    /// Graphviz diagram.
    pub diagram_path: PathBuf,
    /// Eight rounds and the standard rubric; never read from a file.
    #[serde(skip)]
    pub debate: DebateConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("debate.log"),
            verdict_path: PathBuf::from("final_verdict.json"),
            diagram_path: PathBuf::from("dag.dot"),
            debate: DebateConfig::default(),
        }
    }
}

/// Path overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub log_path: Option<PathBuf>,
    pub verdict_path: Option<PathBuf>,
    pub diagram_path: Option<PathBuf>,
}

impl ArenaConfig {
    /// Load from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).context(format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ArenaConfig = toml::from_str(content).context("Invalid arena config TOML")?;
        Ok(config)
    }

    /// Full resolution: file (or defaults), then process environment, then CLI.
    pub fn resolve(file: Option<&Path>, overrides: &PathOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Apply `ARENA_*` variables using `lookup`. Empty values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        if let Some(path) = read(ENV_LOG_PATH) {
            self.log_path = path;
        }
        if let Some(path) = read(ENV_VERDICT_PATH) {
            self.verdict_path = path;
        }
        if let Some(path) = read(ENV_DIAGRAM_PATH) {
            self.diagram_path = path;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &PathOverrides) {
        if let Some(path) = &overrides.log_path {
            self.log_path = path.clone();
        }
        if let Some(path) = &overrides.verdict_path {
            self.verdict_path = path.clone();
        }
        if let Some(path) = &overrides.diagram_path {
            self.diagram_path = path.clone();
        }
    }
}
