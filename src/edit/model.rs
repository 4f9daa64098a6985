// src/edit/model.rs
//! Solver-agnostic 0/1 program over the vertex pairs of a host graph.

use super::constraints::{LinearConstraint, PairIndex};
use super::{EditMode, Sense};
use crate::graph::Graph;

/// `y[k] = 1` means pair `k` is an edge of the repaired graph.
#[derive(Debug, Clone)]
pub struct IlpModel<'c> {
    pub mode: EditMode,
    pub sense: Sense,
    pub pairs: PairIndex,
    pub objective: Vec<f64>,
    pub pins: Vec<Option<bool>>,
    pub initial: Vec<bool>,
    pub constraints: &'c [LinearConstraint],
}

impl<'c> IlpModel<'c> {
    #[must_use]
    pub fn build(graph: &Graph, mode: EditMode, constraints: &'c [LinearConstraint]) -> Self {
        let pairs = PairIndex::new(graph.order());
        let initial: Vec<bool> = pairs.pairs().map(|(i, j)| graph.has_edge_at(i, j)).collect();
        Self {
            mode,
            sense: mode.sense(),
            pairs,
            objective: initial.iter().map(|&p| mode.coefficient(p)).collect(),
            pins: initial.iter().map(|&p| mode.pin(p)).collect(),
            initial,
            constraints,
        }
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn objective_value(&self, assignment: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(assignment)
            .filter(|(_, on)| **on)
            .map(|(c, _)| c)
            .sum()
    }

    /// Pins respected and every cut satisfied.
    #[must_use]
    pub fn is_feasible(&self, assignment: &[bool]) -> bool {
        assignment.len() == self.variable_count()
            && self
                .pins
                .iter()
                .zip(assignment)
                .all(|(pin, &on)| pin.map_or(true, |p| p == on))
            && self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Copy of `graph` with every pair set as the assignment says.
    #[must_use]
    pub fn apply(&self, graph: &Graph, assignment: &[bool]) -> Graph {
        let mut updated = graph.clone();
        for ((i, j), &on) in self.pairs.pairs().zip(assignment) {
            updated.set_edge_at(i, j, on);
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_assignment_is_the_input_graph() {
        let g = Graph::from_edges(0..3, &[(0, 1)]);
        let model = IlpModel::build(&g, EditMode::Delete, &[]);
        assert_eq!(model.initial, vec![true, false, false]);
        assert_eq!(model.pins, vec![None, Some(false), Some(false)]);
        assert!(model.is_feasible(&model.initial));
        assert_eq!(model.apply(&g, &model.initial), g);
    }

    #[test]
    fn feasibility_checks_pins_and_cuts() {
        let g = Graph::from_edges(0..3, &[(0, 1)]);
        let cut = [LinearConstraint::new(vec![0], vec![])];
        let model = IlpModel::build(&g, EditMode::Edit, &cut);
        assert!(!model.is_feasible(&model.initial));
        assert!(model.is_feasible(&[false, false, false]));
        assert!(!model.is_feasible(&[false]));

        let pinned = IlpModel::build(&g, EditMode::Add, &[]);
        assert!(!pinned.is_feasible(&[false, true, false]));
    }

    #[test]
    fn edit_objective_counts_flips() {
        let g = Graph::from_edges(0..3, &[(0, 1), (1, 2)]);
        let model = IlpModel::build(&g, EditMode::Edit, &[]);
        let base = model.objective_value(&model.initial);
        // Remove (0,1), add (0,2).
        let flipped = [false, true, true];
        assert_eq!(model.objective_value(&flipped) - base, 2.0);
    }
}
