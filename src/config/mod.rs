// src/config/mod.rs
pub mod types;

pub use self::types::{Config, EngineConfig, GatexToml, ReportConfig};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::batch::RepairRequest;
use crate::cancel::CancelToken;
use crate::error::{GatexError, Result};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "gatex.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `explicit`, or `gatex.toml` if present, or the defaults.
    ///
    /// # Errors
    /// An explicit path that cannot be read, or any file that does not parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("no {DEFAULT_CONFIG_FILE}; using defaults");
                    return Ok(Self::new());
                }
                default
            }
        };
        let content = fs::read_to_string(path).map_err(|e| GatexError::io(e, path))?;
        let config = Self::parse_toml(&content)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// # Errors
    /// Returns [`GatexError::Config`] on malformed TOML or unknown values.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let parsed: GatexToml = toml::from_str(content)?;
        Ok(Self {
            engine: parsed.engine,
            report: parsed.report,
        })
    }

    /// # Errors
    /// Rejects combinations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        self.request().validate()
    }

    #[must_use]
    pub fn request(&self) -> RepairRequest {
        RepairRequest {
            strategy: self.engine.strategy,
            mode: self.engine.mode,
            scope: self.engine.constraints,
        }
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        CancelToken::from_secs(self.engine.time_limit_secs)
    }

    /// Effective configuration in `gatex.toml` form.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        let file = GatexToml {
            engine: self.engine.clone(),
            report: self.report.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| GatexError::Config(e.to_string()))
    }
}
