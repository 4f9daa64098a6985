use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::edit::{ConstraintScope, EditMode, Strategy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub mode: EditMode,
    #[serde(default)]
    pub constraints: ConstraintScope,
    /// Worker threads; 0 lets rayon decide.
    #[serde(default)]
    pub threads: usize,
    /// Wall-clock limit per run in seconds; 0 disables it.
    #[serde(default)]
    pub time_limit_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            mode: EditMode::default(),
            constraints: ConstraintScope::default(),
            threads: 0,
            time_limit_secs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

fn default_report_path() -> PathBuf { PathBuf::from("gatex-report.txt") }

/// On-disk shape of `gatex.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GatexToml {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub engine: EngineConfig,
    pub report: ReportConfig,
}
