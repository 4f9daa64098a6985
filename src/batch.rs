// src/batch.rs
//! Batch checking and repair.
//!
//! Graphs are independent, so each one is handled on the rayon pool.
//! Results come back in input order; reports are written afterwards from a
//! single thread so the file is never interleaved.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::detect::oracle::IsomorphismOracle;
use crate::detect::{Detector, Occurrence};
use crate::edit::{
    ConstraintScope, EditMode, EditPlan, ExactEditor, HeuristicEditor, MilpSolver, Strategy,
};
use crate::error::{GatexError, Result};
use crate::graph::Graph;
use crate::report::{DiffReport, ReportSink};

/// How each graph in a batch is repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepairRequest {
    pub strategy: Strategy,
    pub mode: EditMode,
    pub scope: ConstraintScope,
}

impl RepairRequest {
    /// # Errors
    /// The greedy editor only deletes, so it cannot honour add mode.
    pub fn validate(&self) -> Result<()> {
        if self.strategy == Strategy::Heuristic && self.mode == EditMode::Add {
            return Err(GatexError::Config(
                "the heuristic strategy only deletes edges; use mode \"delete\" or \"edit\"".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairedGraph {
    pub index: usize,
    pub original: Graph,
    pub updated: Graph,
    pub plan: EditPlan,
    /// Occurrences the editor could not remove.
    pub residual: usize,
}

impl RepairedGraph {
    #[must_use]
    pub fn report(&self) -> DiffReport<'_> {
        DiffReport::new(&self.original, &self.updated)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOutcome {
    Repaired(RepairedGraph),
    /// The graph is left unedited.
    Infeasible { index: usize, mode: EditMode },
}

impl GraphOutcome {
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Repaired(r) => r.index,
            Self::Infeasible { index, .. } => *index,
        }
    }

    /// True when the graph now complies with the catalog.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Repaired(r) if r.residual == 0)
    }
}

/// Detection result for one graph of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub index: usize,
    pub vertices: usize,
    pub edges: usize,
    pub occurrences: Vec<Occurrence>,
}

impl CheckSummary {
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// # Errors
/// Propagates cancellation.
pub fn check_batch<O: IsomorphismOracle>(
    graphs: &[Graph],
    detector: &Detector<'_, O>,
) -> Result<Vec<CheckSummary>> {
    graphs
        .par_iter()
        .enumerate()
        .map(|(index, graph)| {
            Ok(CheckSummary {
                index,
                vertices: graph.order(),
                edges: graph.edge_count(),
                occurrences: detector.find_occurrences(graph)?,
            })
        })
        .collect()
}

/// Repairs every graph. Infeasibility is per graph and does not stop the
/// batch; anything else does.
///
/// # Errors
/// Invalid request, cancellation, or solver failure.
pub fn repair_batch<O: IsomorphismOracle, S: MilpSolver>(
    graphs: Vec<Graph>,
    detector: &Detector<'_, O>,
    solver: &S,
    request: RepairRequest,
) -> Result<Vec<GraphOutcome>> {
    request.validate()?;
    let outcomes = graphs
        .into_par_iter()
        .enumerate()
        .map(|(index, graph)| repair_one(index, graph, detector, solver, request))
        .collect::<Result<Vec<_>>>()?;
    let clean = outcomes.iter().filter(|o| o.is_clean()).count();
    info!(graphs = outcomes.len(), clean, "batch repair finished");
    Ok(outcomes)
}

fn repair_one<O: IsomorphismOracle, S: MilpSolver>(
    index: usize,
    graph: Graph,
    detector: &Detector<'_, O>,
    solver: &S,
    request: RepairRequest,
) -> Result<GraphOutcome> {
    let original = graph.clone();
    let mut updated = graph;
    let (plan, residual) = match request.strategy {
        Strategy::Heuristic => {
            let outcome = HeuristicEditor::new(detector).repair(&mut updated)?;
            (outcome.plan, outcome.residual)
        }
        Strategy::Exact => {
            let editor = ExactEditor::new(detector, solver, request.mode).with_scope(request.scope);
            match editor.repair(&mut updated) {
                Ok(outcome) => (outcome.plan, 0),
                Err(GatexError::InfeasibleEdit { mode }) => {
                    warn!(graph = index, %mode, "no feasible edit; graph left unchanged");
                    return Ok(GraphOutcome::Infeasible { index, mode });
                }
                Err(e) => return Err(e),
            }
        }
    };
    Ok(GraphOutcome::Repaired(RepairedGraph {
        index,
        original,
        updated,
        plan,
        residual,
    }))
}

/// Writes a report for every repaired graph, in batch order.
///
/// # Errors
/// Propagates sink failures.
pub fn record_outcomes(outcomes: &[GraphOutcome], sink: &mut dyn ReportSink) -> Result<()> {
    for outcome in outcomes {
        if let GraphOutcome::Repaired(repaired) = outcome {
            sink.record(&repaired.report())?;
        }
    }
    Ok(())
}
