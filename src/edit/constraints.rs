// src/edit/constraints.rs
//! Linear cuts that forbid one labelled copy of a pattern on one vertex set.
//!
//! A mapping with host edge pairs `E` and non-edge pairs `N` is realized by
//! an assignment `y` exactly when every `y[e]` is 1 and every `y[f]` is 0.
//! The cut `sum(y[E]) - sum(y[N]) <= |E| - 1` excludes that assignment and
//! nothing else on those pairs.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::detect::subsets::Subsets;
use crate::detect::Occurrence;
use crate::error::Result;
use crate::graph::{pair_slot, Graph};
use crate::pattern::{ForbiddenPattern, PatternCatalog};

/// Row-major index of the unordered pairs of `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairIndex {
    n: usize,
}

impl PairIndex {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Number of pairs, `n(n-1)/2`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variable index of `{i, j}`.
    ///
    /// # Panics
    /// Debug builds assert `i != j` and both below `n`.
    #[must_use]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i != j && i < self.n && j < self.n);
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        lo * (2 * self.n - lo - 1) / 2 + (hi - lo - 1)
    }

    /// Pairs `(i, j)` with `i < j`, in index order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n).flat_map(move |i| ((i + 1)..self.n).map(move |j| (i, j)))
    }
}

/// `sum(y[include]) - sum(y[exclude]) <= include.len() - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinearConstraint {
    include: Vec<usize>,
    exclude: Vec<usize>,
}

impl LinearConstraint {
    #[must_use]
    pub fn new(mut include: Vec<usize>, mut exclude: Vec<usize>) -> Self {
        include.sort_unstable();
        exclude.sort_unstable();
        Self { include, exclude }
    }

    /// Variables with coefficient +1, ascending.
    #[must_use]
    pub fn include(&self) -> &[usize] {
        &self.include
    }

    /// Variables with coefficient -1, ascending.
    #[must_use]
    pub fn exclude(&self) -> &[usize] {
        &self.exclude
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rhs(&self) -> f64 {
        self.include.len() as f64 - 1.0
    }

    /// Whether `assignment` satisfies the cut, i.e. does not realize the copy.
    #[must_use]
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        let value = |i: &usize| assignment.get(*i).copied().unwrap_or(false);
        !(self.include.iter().all(value) && !self.exclude.iter().any(value))
    }
}

/// Insertion-ordered set of cuts.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    seen: HashSet<LinearConstraint>,
    list: Vec<LinearConstraint>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the cut was new.
    pub fn insert(&mut self, constraint: LinearConstraint) -> bool {
        if self.seen.contains(&constraint) {
            return false;
        }
        self.seen.insert(constraint.clone());
        self.list.push(constraint);
        true
    }

    /// Inserts every cut; returns how many were new.
    pub fn extend<I: IntoIterator<Item = LinearConstraint>>(&mut self, constraints: I) -> usize {
        constraints.into_iter().filter(|c| self.insert(c.clone())).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LinearConstraint] {
        &self.list
    }
}

/// Turns patterns into cuts over the pair variables of a host graph.
pub struct ConstraintBuilder<'a> {
    catalog: &'a PatternCatalog,
    cancel: CancelToken,
}

impl<'a> ConstraintBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self {
            catalog,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Cut for the mapping pattern vertex `p` -> host index `hosts[p]`.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn for_mapping(pattern: &ForbiddenPattern, hosts: &[usize], pairs: PairIndex) -> LinearConstraint {
        let k = pattern.order();
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for a in 0..k {
            for b in (a + 1)..k {
                let var = pairs.index(hosts[a], hosts[b]);
                if pattern.graph().has_edge(a, b) {
                    include.push(var);
                } else {
                    exclude.push(var);
                }
            }
        }
        LinearConstraint::new(include, exclude)
    }

    /// Cut excluding the exact copy an occurrence witnessed in `graph`.
    #[must_use]
    pub fn for_occurrence(&self, graph: &Graph, occurrence: &Occurrence) -> Option<LinearConstraint> {
        let pattern = self.catalog.get(occurrence.pattern)?;
        let hosts: Option<Vec<usize>> = occurrence
            .mapping
            .iter()
            .map(|&v| graph.index_of(v))
            .collect();
        Some(Self::for_mapping(pattern, &hosts?, PairIndex::new(graph.order())))
    }

    /// Cuts for every witnessed occurrence.
    #[must_use]
    pub fn witnessed(&self, graph: &Graph, occurrences: &[Occurrence]) -> Vec<LinearConstraint> {
        occurrences
            .iter()
            .filter_map(|occ| self.for_occurrence(graph, occ))
            .collect()
    }

    /// Cuts for every labelled copy of every pattern on every vertex subset
    /// of a host with `n` vertices.
    ///
    /// # Errors
    /// Returns [`crate::GatexError::Cancelled`] if the token trips.
    pub fn exhaustive(&self, n: usize) -> Result<Vec<LinearConstraint>> {
        let pairs = PairIndex::new(n);
        let mut all = Vec::new();
        for pattern in self.catalog.iter() {
            let k = pattern.order();
            if k > n {
                continue;
            }
            let copies = pattern.labelled_copies();
            let parts = (0..n)
                .into_par_iter()
                .map(|first| -> Result<Vec<LinearConstraint>> {
                    let mut cuts = Vec::new();
                    for subset in Subsets::anchored(first, n, k) {
                        self.cancel.check()?;
                        cuts.extend(copies.iter().map(|&mask| cut_for_mask(mask, &subset, pairs)));
                    }
                    Ok(cuts)
                })
                .collect::<Result<Vec<_>>>()?;
            all.extend(parts.into_iter().flatten());
            debug!(pattern = pattern.label(), cuts = all.len(), "generated cuts");
        }
        Ok(all)
    }
}

#[allow(clippy::indexing_slicing)]
fn cut_for_mask(mask: u32, subset: &[usize], pairs: PairIndex) -> LinearConstraint {
    let k = subset.len();
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    for b in 1..k {
        for a in 0..b {
            let var = pairs.index(subset[a], subset[b]);
            if mask & (1 << pair_slot(a, b)) != 0 {
                include.push(var);
            } else {
                exclude.push(var);
            }
        }
    }
    LinearConstraint::new(include, exclude)
}
