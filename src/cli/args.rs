use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::edit::{ConstraintScope, EditMode, Strategy};

#[derive(Parser)]
#[command(
    name = "gatex",
    version,
    about = "Find and repair forbidden induced subgraphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Configuration file (default: ./gatex.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Debug-level logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Worker threads (0 = one per core)
    #[arg(long, global = true, value_name = "N")]
    pub threads: Option<usize>,
}

/// Where the forbidden patterns come from.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// graph6 catalog, one pattern per line
    #[arg(long, value_name = "FILE", conflicts_with = "patterns", required_unless_present = "patterns")]
    pub catalog: Option<PathBuf>,
    /// Hand-written `(edges, free)` entries, one per line
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report every forbidden occurrence in each graph of a batch
    Check {
        /// Adjacency-list batch file
        #[arg(long, short, value_name = "FILE")]
        input: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit each graph of a batch until it is compliant
    Repair {
        #[arg(long, short, value_name = "FILE")]
        input: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
        #[arg(long, value_enum)]
        mode: Option<EditMode>,
        /// Cut generation for the exact strategy
        #[arg(long, value_enum)]
        constraints: Option<ConstraintScope>,
        /// Report file to append to
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
        /// Abort after this many seconds (0 = no limit)
        #[arg(long, value_name = "SECS")]
        time_limit: Option<u64>,
    },
    /// Print the effective configuration
    Config,
}

/// Flag overrides for `repair`, applied on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct RepairOverrides {
    pub strategy: Option<Strategy>,
    pub mode: Option<EditMode>,
    pub constraints: Option<ConstraintScope>,
    pub report: Option<PathBuf>,
    pub time_limit: Option<u64>,
}
