//! Detection and minimum-cost repair of forbidden induced subgraphs.

pub mod batch;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod detect;
pub mod edit;
pub mod error;
pub mod exit;
pub mod graph;
pub mod pattern;
pub mod report;

pub use error::{GatexError, Result};
