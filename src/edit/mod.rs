// src/edit/mod.rs
//! Graph repair: greedy deletion and exact integer programming.

pub mod constraints;
pub mod exact;
pub mod heuristic;
pub mod model;
pub mod solver;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph};

pub use self::constraints::{ConstraintBuilder, ConstraintSet, LinearConstraint, PairIndex};
pub use self::exact::{ExactEditor, ExactOutcome};
pub use self::heuristic::{HeuristicEditor, HeuristicOutcome};
pub use self::model::IlpModel;
pub use self::solver::{GoodLpSolver, MilpSolver};

/// Optimization direction of the integer program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimise,
    Maximise,
}

/// Which edits the exact editor may make, and what it optimizes.
///
/// Each mode is pure data: an objective sense, a coefficient per variable
/// depending on whether the pair is an edge of the input, and which
/// variables are pinned to their input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Only add edges; minimise the number added.
    Add,
    /// Only delete edges; maximise the number kept.
    Delete,
    /// Add or delete; minimise the symmetric difference.
    #[default]
    Edit,
}

impl EditMode {
    #[must_use]
    pub fn sense(self) -> Sense {
        match self {
            Self::Add | Self::Edit => Sense::Minimise,
            Self::Delete => Sense::Maximise,
        }
    }

    /// Objective coefficient of a pair, given whether it is an input edge.
    #[must_use]
    pub fn coefficient(self, present: bool) -> f64 {
        match (self, present) {
            (Self::Add, true) | (Self::Delete, false) => 0.0,
            (Self::Add | Self::Edit, false) | (Self::Delete, true) => 1.0,
            (Self::Edit, true) => -1.0,
        }
    }

    /// Value the pair is pinned to, if the mode forbids changing it.
    #[must_use]
    pub fn pin(self, present: bool) -> Option<bool> {
        match (self, present) {
            (Self::Add, true) => Some(true),
            (Self::Delete, false) => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Edit => "edit",
        };
        f.write_str(name)
    }
}

/// Which inequalities the exact editor hands to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintScope {
    /// Start from witnessed occurrences; re-detect and extend until clean.
    #[default]
    Lazy,
    /// Every injective mapping of every pattern, up front.
    Exhaustive,
}

/// Repair algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Exact,
    Heuristic,
}

/// Edges added and removed by a repair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditPlan {
    pub added: Vec<Edge>,
    pub removed: Vec<Edge>,
}

impl EditPlan {
    /// Difference between two graphs on the same vertex set.
    #[must_use]
    pub fn between(original: &Graph, updated: &Graph) -> Self {
        debug_assert_eq!(original.vertices(), updated.vertices());
        let n = original.order();
        let mut plan = Self::default();
        for i in 0..n {
            for j in (i + 1)..n {
                let edge = (original.label(i), original.label(j));
                match (original.has_edge_at(i, j), updated.has_edge_at(i, j)) {
                    (false, true) => plan.added.push(edge),
                    (true, false) => plan.removed.push(edge),
                    _ => {}
                }
            }
        }
        plan
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Every changed pair, ascending.
    #[must_use]
    pub fn changed(&self) -> Vec<Edge> {
        let mut changed: Vec<Edge> = self.added.iter().chain(&self.removed).copied().collect();
        changed.sort_unstable();
        changed
    }

    /// Replays the plan onto `graph`.
    pub fn apply(&self, graph: &mut Graph) {
        for &(u, v) in &self.removed {
            graph.remove_edge(u, v);
        }
        for &(u, v) in &self.added {
            graph.add_edge(u, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_pin_the_forbidden_edit_class() {
        assert_eq!(EditMode::Add.pin(true), Some(true));
        assert_eq!(EditMode::Add.pin(false), None);
        assert_eq!(EditMode::Delete.pin(false), Some(false));
        assert_eq!(EditMode::Delete.pin(true), None);
        assert_eq!(EditMode::Edit.pin(true), None);
    }

    #[test]
    fn edit_objective_charges_every_flip() {
        // Keeping an edge scores -1, adding one scores +1: any flip costs 1.
        assert_eq!(EditMode::Edit.coefficient(true), -1.0);
        assert_eq!(EditMode::Edit.coefficient(false), 1.0);
        assert_eq!(EditMode::Delete.sense(), Sense::Maximise);
    }

    #[test]
    fn plan_between_graphs() {
        let before = Graph::from_edges(0..4, &[(0, 1), (1, 2)]);
        let after = Graph::from_edges(0..4, &[(1, 2), (2, 3)]);
        let plan = EditPlan::between(&before, &after);
        assert_eq!(plan.added, vec![(2, 3)]);
        assert_eq!(plan.removed, vec![(0, 1)]);
        assert_eq!(plan.changed(), vec![(0, 1), (2, 3)]);

        let mut replay = before.clone();
        plan.apply(&mut replay);
        assert_eq!(replay, after);
    }

    #[test]
    fn modes_parse_from_lowercase() {
        let mode: EditMode = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(mode, EditMode::Delete);
        assert_eq!(EditMode::Add.to_string(), "add");
    }
}
