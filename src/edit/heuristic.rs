// src/edit/heuristic.rs
//! Greedy deletion: repeatedly drop the edge shared by the most occurrences.
//!
//! Fast and always terminating, but not optimal. Patterns made only of
//! free vertices contain no edge to delete; those occurrences are left in
//! place and reported as residual.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::EditPlan;
use crate::detect::oracle::IsomorphismOracle;
use crate::detect::{Detector, Occurrence};
use crate::error::Result;
use crate::graph::{Edge, Graph};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicOutcome {
    pub plan: EditPlan,
    /// Occurrences still present when the loop stopped.
    pub residual: usize,
}

impl HeuristicOutcome {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.residual == 0
    }
}

pub struct HeuristicEditor<'d, 'a, O: IsomorphismOracle> {
    detector: &'d Detector<'a, O>,
}

impl<'d, 'a, O: IsomorphismOracle> HeuristicEditor<'d, 'a, O> {
    #[must_use]
    pub fn new(detector: &'d Detector<'a, O>) -> Self {
        Self { detector }
    }

    /// Removes edges from `graph` in place until no occurrence with an edge
    /// remains. At most `graph.edge_count()` rounds.
    ///
    /// # Errors
    /// Propagates cancellation from detection.
    pub fn repair(&self, graph: &mut Graph) -> Result<HeuristicOutcome> {
        let mut outcome = HeuristicOutcome::default();
        loop {
            let occurrences = self.detector.find_occurrences(graph)?;
            if occurrences.is_empty() {
                break;
            }
            let Some((u, v)) = most_implicated_edge(&occurrences) else {
                warn!(
                    remaining = occurrences.len(),
                    "occurrences without edges cannot be removed by deletion"
                );
                outcome.residual = occurrences.len();
                break;
            };
            graph.remove_edge(u, v);
            outcome.plan.removed.push((u, v));
            debug!(u, v, occurrences = occurrences.len(), "removed edge");
        }
        Ok(outcome)
    }
}

/// Edge appearing in the most occurrences; ties go to the edge seen first.
#[must_use]
pub fn most_implicated_edge(occurrences: &[Occurrence]) -> Option<Edge> {
    let mut counts: HashMap<Edge, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;
    for occurrence in occurrences {
        for &edge in &occurrence.edges {
            let entry = counts.entry(edge).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(edge, _)| edge)
}
