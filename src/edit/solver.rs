// src/edit/solver.rs
use good_lp::solvers::microlp::microlp;
use good_lp::{
    variable, Expression, IntoAffineExpression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::debug;

use super::model::IlpModel;
use super::Sense;
use crate::error::{GatexError, Result};

/// Any 0/1 MILP backend.
pub trait MilpSolver: Sync {
    /// An optimal assignment of the model's pair variables.
    ///
    /// # Errors
    /// [`GatexError::InfeasibleEdit`] when no assignment satisfies the model,
    /// [`GatexError::SolverUnavailable`] for any other backend failure.
    fn solve(&self, model: &IlpModel<'_>) -> Result<Vec<bool>>;
}

/// Pure-Rust branch and bound through `good_lp`'s microlp backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl MilpSolver for GoodLpSolver {
    #[allow(clippy::indexing_slicing)]
    fn solve(&self, model: &IlpModel<'_>) -> Result<Vec<bool>> {
        let n = model.variable_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut vars = ProblemVariables::new();
        let y: Vec<Variable> = (0..n).map(|_| vars.add(variable().binary())).collect();

        let mut objective: Expression = 0.into();
        for (&v, &c) in y.iter().zip(&model.objective) {
            if c != 0.0 {
                objective += v * c;
            }
        }

        let problem = match model.sense {
            Sense::Minimise => vars.minimise(objective),
            Sense::Maximise => vars.maximise(objective),
        };
        let mut lp = problem.using(microlp);

        for (&v, pin) in y.iter().zip(&model.pins) {
            if let Some(on) = *pin {
                lp.add_constraint(v.into_expression().eq(if on { 1.0 } else { 0.0 }));
            }
        }
        for cut in model.constraints {
            let mut plus: Expression = 0.into();
            let mut minus: Expression = 0.into();
            for &i in cut.include() {
                plus += y[i];
            }
            for &i in cut.exclude() {
                minus += y[i];
            }
            lp.add_constraint((plus - minus).leq(cut.rhs()));
        }

        debug!(
            variables = n,
            cuts = model.constraints.len(),
            mode = %model.mode,
            "invoking MILP solver"
        );
        let solution = lp.solve().map_err(|e| match e {
            ResolutionError::Infeasible => GatexError::InfeasibleEdit { mode: model.mode },
            other => GatexError::SolverUnavailable(other.to_string()),
        })?;
        Ok(y.iter().map(|&v| solution.value(v) > 0.5).collect())
    }
}
