// src/cli/handlers.rs
use crate::batch::{self, CheckSummary, GraphOutcome};
use crate::cli::args::CatalogArgs;
use crate::config::Config;
use crate::detect::Detector;
use crate::edit::GoodLpSolver;
use crate::exit::GatexExit;
use crate::graph::adjlist;
use crate::pattern::PatternCatalog;
use crate::report::FileReportSink;
use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

fn load_catalog(args: &CatalogArgs) -> Result<PatternCatalog> {
    let catalog = match (&args.catalog, &args.patterns) {
        (Some(path), _) => PatternCatalog::load_graph6(path)?,
        (None, Some(path)) => PatternCatalog::load_manual(path)?,
        (None, None) => return Err(anyhow!("either --catalog or --patterns is required")),
    };
    if catalog.is_empty() {
        warn!("catalog is empty; every graph complies trivially");
    }
    info!(patterns = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Handles the check command.
///
/// # Errors
/// Returns error if the inputs cannot be read or parsed.
pub fn handle_check(config: &Config, input: &Path, catalog: &CatalogArgs, json: bool) -> Result<GatexExit> {
    let catalog = load_catalog(catalog)?;
    let graphs = adjlist::read_batch_file(input)?;
    let detector = Detector::new(&catalog).with_cancel(config.cancel_token());
    let summaries = batch::check_batch(&graphs, &detector)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_check(&summaries);
    }

    if summaries.iter().all(CheckSummary::is_compliant) {
        Ok(GatexExit::Success)
    } else {
        Ok(GatexExit::Violations)
    }
}

fn print_check(summaries: &[CheckSummary]) {
    for s in summaries {
        let status = if s.is_compliant() {
            "compliant".green()
        } else {
            format!("{} occurrence(s)", s.occurrences.len()).red()
        };
        println!(
            "graph #{}: {} vertices, {} edges: {status}",
            s.index, s.vertices, s.edges
        );
        for occ in &s.occurrences {
            println!("    pattern {} on {:?}", occ.pattern, occ.vertex_set());
        }
    }
    let bad = summaries.iter().filter(|s| !s.is_compliant()).count();
    if bad == 0 {
        println!("{}", "[OK] All graphs are compliant.".green().bold());
    } else {
        println!(
            "{}",
            format!("{bad} of {} graph(s) contain forbidden patterns.", summaries.len())
                .red()
                .bold()
        );
    }
}

/// Handles the repair command.
///
/// # Errors
/// Returns error if inputs are invalid, the solver fails, or the report
/// cannot be written.
pub fn handle_repair(config: &Config, input: &Path, catalog: &CatalogArgs) -> Result<GatexExit> {
    let catalog = load_catalog(catalog)?;
    let graphs = adjlist::read_batch_file(input)?;
    let detector = Detector::new(&catalog).with_cancel(config.cancel_token());
    let outcomes = batch::repair_batch(graphs, &detector, &GoodLpSolver, config.request())?;

    let mut sink = FileReportSink::new(&config.report.path);
    batch::record_outcomes(&outcomes, &mut sink)?;

    for outcome in &outcomes {
        match outcome {
            GraphOutcome::Repaired(r) if r.residual > 0 => println!(
                "graph #{}: {} edge(s) removed, {}",
                r.index,
                r.plan.removed.len(),
                format!("{} occurrence(s) remain", r.residual).yellow()
            ),
            GraphOutcome::Repaired(r) => println!(
                "graph #{}: {} ({} added, {} removed)",
                r.index,
                "repaired".green(),
                r.plan.added.len(),
                r.plan.removed.len()
            ),
            GraphOutcome::Infeasible { index, mode } => println!(
                "graph #{index}: {}",
                format!("no feasible edit in {mode} mode; left unchanged").yellow()
            ),
        }
    }
    println!("Report appended to {}", sink.path().display());

    if outcomes.iter().all(GraphOutcome::is_clean) {
        Ok(GatexExit::Success)
    } else {
        Ok(GatexExit::Unrepaired)
    }
}

/// Handles the config command.
///
/// # Errors
/// Returns error if the configuration cannot be serialized.
pub fn handle_config(config: &Config) -> Result<GatexExit> {
    print!("{}", config.to_toml()?);
    Ok(GatexExit::Success)
}
