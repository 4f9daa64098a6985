// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::edit::EditMode;

#[derive(Debug, Error)]
pub enum GatexError {
    #[error("catalog line {line}: {reason}")]
    CatalogParse { line: usize, reason: String },

    #[error("input line {line}: {reason}")]
    InputParse { line: usize, reason: String },

    #[error("no feasible edit exists in {mode} mode")]
    InfeasibleEdit { mode: EditMode },

    #[error("MILP solver unavailable: {0}")]
    SolverUnavailable(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GatexError>;

impl GatexError {
    /// Builds an I/O error carrying the path that failed.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// True for errors caused by malformed user input rather than the engine.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::CatalogParse { .. } | Self::InputParse { .. } | Self::Config(_)
        )
    }
}

// Allow `?` on std::io::Error by converting to GatexError::Io with unknown path.
impl From<std::io::Error> for GatexError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<toml::de::Error> for GatexError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
