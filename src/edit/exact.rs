// src/edit/exact.rs
//! Minimum-cost repair by 0/1 integer programming.
//!
//! One binary variable per vertex pair. Each labelled copy of a pattern on
//! a vertex set contributes one cut (see [`super::constraints`]). With the
//! exhaustive scope every cut is generated before solving. With the lazy
//! scope only cuts for witnessed occurrences are added; the candidate is
//! re-scanned after each solve and any new occurrence becomes a cut for the
//! next round. Every lazy cut is a valid exhaustive cut, so a clean
//! candidate is optimal for the full program.

use tracing::{debug, info};

use super::constraints::{ConstraintBuilder, ConstraintSet};
use super::model::IlpModel;
use super::solver::MilpSolver;
use super::{ConstraintScope, EditMode, EditPlan};
use crate::detect::oracle::IsomorphismOracle;
use crate::detect::Detector;
use crate::error::{GatexError, Result};
use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq)]
pub struct ExactOutcome {
    pub plan: EditPlan,
    /// Solver invocations.
    pub rounds: usize,
    /// Cuts in the final program.
    pub constraints: usize,
}

pub struct ExactEditor<'d, 'a, O: IsomorphismOracle, S: MilpSolver> {
    detector: &'d Detector<'a, O>,
    solver: &'d S,
    mode: EditMode,
    scope: ConstraintScope,
}

impl<'d, 'a, O: IsomorphismOracle, S: MilpSolver> ExactEditor<'d, 'a, O, S> {
    #[must_use]
    pub fn new(detector: &'d Detector<'a, O>, solver: &'d S, mode: EditMode) -> Self {
        Self {
            detector,
            solver,
            mode,
            scope: ConstraintScope::default(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: ConstraintScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replaces `graph` with an optimal compliant graph for the mode.
    ///
    /// `graph` is only modified on success.
    ///
    /// # Errors
    /// [`GatexError::InfeasibleEdit`] when the mode admits no compliant graph,
    /// [`GatexError::SolverUnavailable`] on backend failure, and
    /// [`GatexError::Cancelled`] when the token trips.
    pub fn repair(&self, graph: &mut Graph) -> Result<ExactOutcome> {
        let cancel = self.detector.cancel_token();
        let builder = ConstraintBuilder::new(self.detector.catalog()).with_cancel(cancel.clone());
        let mut constraints = ConstraintSet::new();

        match self.scope {
            ConstraintScope::Exhaustive => {
                constraints.extend(builder.exhaustive(graph.order())?);
            }
            ConstraintScope::Lazy => {
                let occurrences = self.detector.find_occurrences(graph)?;
                if occurrences.is_empty() {
                    return Ok(ExactOutcome {
                        plan: EditPlan::default(),
                        rounds: 0,
                        constraints: 0,
                    });
                }
                constraints.extend(builder.witnessed(graph, &occurrences));
            }
        }
        debug!(cuts = constraints.len(), scope = ?self.scope, "initial program built");

        let mut rounds = 0;
        let candidate = loop {
            cancel.check()?;
            rounds += 1;
            let model = IlpModel::build(graph, self.mode, constraints.as_slice());
            let assignment = self.solver.solve(&model)?;
            // A feasible assignment violates none of the current cuts, so any
            // occurrence left in the candidate yields a new one.
            if !model.is_feasible(&assignment) {
                return Err(GatexError::SolverUnavailable(
                    "solver returned an assignment violating its own pins or cuts".to_string(),
                ));
            }
            debug!(
                round = rounds,
                objective = model.objective_value(&assignment),
                "solved"
            );
            let candidate = model.apply(graph, &assignment);
            if self.scope == ConstraintScope::Exhaustive {
                break candidate;
            }
            let occurrences = self.detector.find_occurrences(&candidate)?;
            if occurrences.is_empty() {
                break candidate;
            }
            let added = constraints.extend(builder.witnessed(&candidate, &occurrences));
            debug_assert!(added > 0, "occurrence in a feasible candidate repeated a cut");
            debug!(round = rounds, added, total = constraints.len(), "extending program");
        };

        let plan = EditPlan::between(graph, &candidate);
        info!(
            mode = %self.mode,
            added = plan.added.len(),
            removed = plan.removed.len(),
            rounds,
            "exact repair finished"
        );
        *graph = candidate;
        Ok(ExactOutcome {
            plan,
            rounds,
            constraints: constraints.len(),
        })
    }
}
