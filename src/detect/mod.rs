// src/detect/mod.rs
//! Forbidden induced subgraph detection.
//!
//! For every pattern order present in the catalog, every vertex subset of
//! that size is induced and compared against the patterns of that order.
//! The scan is split by the smallest vertex of each subset and run on the
//! rayon pool; results are concatenated in lexicographic subset order.

pub mod oracle;
pub mod subsets;

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use self::oracle::{IsomorphismOracle, Vf2Oracle};
use self::subsets::{binomial, Subsets};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::graph::{ordered, Edge, Graph, SmallGraph, VertexId};
use crate::pattern::PatternCatalog;

/// Entries kept per worker before the witness memo is reset.
const WITNESS_CACHE_LIMIT: usize = 1 << 16;

/// A witness that a catalog pattern appears as an induced subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occurrence {
    /// Index into the catalog.
    pub pattern: usize,
    /// `mapping[p]` is the host vertex playing pattern vertex `p`.
    pub mapping: Vec<VertexId>,
    /// Host edges realized by the mapping, ascending.
    pub edges: Vec<Edge>,
}

impl Occurrence {
    /// Host vertices covered by the occurrence, ascending.
    #[must_use]
    pub fn vertex_set(&self) -> Vec<VertexId> {
        let mut vertices = self.mapping.clone();
        vertices.sort_unstable();
        vertices
    }
}

/// Memo of oracle answers keyed by (pattern, labelled induced subgraph).
type WitnessCache = HashMap<(usize, SmallGraph), Option<Vec<u8>>>;

pub struct Detector<'a, O: IsomorphismOracle = Vf2Oracle> {
    catalog: &'a PatternCatalog,
    oracle: O,
    cancel: CancelToken,
}

impl<'a> Detector<'a, Vf2Oracle> {
    #[must_use]
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self::with_oracle(catalog, Vf2Oracle)
    }
}

impl<'a, O: IsomorphismOracle> Detector<'a, O> {
    #[must_use]
    pub fn with_oracle(catalog: &'a PatternCatalog, oracle: O) -> Self {
        Self {
            catalog,
            oracle,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &'a PatternCatalog {
        self.catalog
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Every occurrence of every catalog pattern. An empty catalog yields
    /// none, which only means compliance with the empty rule set.
    ///
    /// # Errors
    /// Returns [`crate::GatexError::Cancelled`] if the token trips mid-scan.
    pub fn find_occurrences(&self, graph: &Graph) -> Result<Vec<Occurrence>> {
        let mut found = Vec::new();
        for order in self.catalog.orders() {
            if order > graph.order() {
                break;
            }
            debug!(
                order,
                subsets = binomial(graph.order(), order),
                "scanning induced subgraphs"
            );
            let parts = (0..graph.order())
                .into_par_iter()
                .map_init(WitnessCache::new, |cache, first| {
                    self.scan_anchored(graph, order, first, cache, false)
                })
                .collect::<Result<Vec<_>>>()?;
            found.extend(parts.into_iter().flatten());
        }
        debug!(occurrences = found.len(), "detection pass finished");
        Ok(found)
    }

    /// Some occurrence, if any exists; stops scanning at the first hit.
    ///
    /// # Errors
    /// Returns [`crate::GatexError::Cancelled`] if the token trips mid-scan.
    pub fn find_any(&self, graph: &Graph) -> Result<Option<Occurrence>> {
        for order in self.catalog.orders() {
            if order > graph.order() {
                break;
            }
            let hit = (0..graph.order())
                .into_par_iter()
                .map_init(WitnessCache::new, |cache, first| {
                    self.scan_anchored(graph, order, first, cache, true)
                })
                .find_map_any(|part| match part {
                    Ok(mut occurrences) => occurrences.pop().map(Ok),
                    Err(e) => Some(Err(e)),
                });
            if let Some(result) = hit {
                return result.map(Some);
            }
        }
        Ok(None)
    }

    /// True when no catalog pattern occurs in `graph`.
    ///
    /// # Errors
    /// Returns [`crate::GatexError::Cancelled`] if the token trips mid-scan.
    pub fn is_compliant(&self, graph: &Graph) -> Result<bool> {
        Ok(self.find_any(graph)?.is_none())
    }

    fn scan_anchored(
        &self,
        graph: &Graph,
        order: usize,
        first: usize,
        cache: &mut WitnessCache,
        stop_at_first: bool,
    ) -> Result<Vec<Occurrence>> {
        let patterns = self.catalog.indices_of_order(order);
        let mut found = Vec::new();
        for subset in Subsets::anchored(first, graph.order(), order) {
            self.cancel.check()?;
            let induced = graph.induced(&subset);
            for &p in &patterns {
                let Some(mapping) = self.witness(p, induced, cache) else {
                    continue;
                };
                found.push(self.occurrence(graph, p, &subset, &mapping));
                if stop_at_first {
                    return Ok(found);
                }
            }
        }
        Ok(found)
    }

    fn witness(&self, pattern: usize, induced: SmallGraph, cache: &mut WitnessCache) -> Option<Vec<u8>> {
        if let Some(hit) = cache.get(&(pattern, induced)) {
            return hit.clone();
        }
        let answer = self
            .catalog
            .get(pattern)
            .and_then(|p| self.oracle.find_isomorphism(p.graph(), &induced));
        if cache.len() >= WITNESS_CACHE_LIMIT {
            cache.clear();
        }
        cache.insert((pattern, induced), answer.clone());
        answer
    }

    #[allow(clippy::indexing_slicing)]
    fn occurrence(&self, graph: &Graph, pattern: usize, subset: &[usize], mapping: &[u8]) -> Occurrence {
        let host = |p: usize| graph.label(subset[usize::from(mapping[p])]);
        let mapped: Vec<VertexId> = (0..mapping.len()).map(host).collect();
        let mut edges: Vec<Edge> = self
            .catalog
            .get(pattern)
            .map(|p| p.graph().edges())
            .unwrap_or_default()
            .into_iter()
            .map(|(a, b)| ordered(host(a), host(b)))
            .collect();
        edges.sort_unstable();
        Occurrence {
            pattern,
            mapping: mapped,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{graph6, ForbiddenPattern};

    fn c5_catalog() -> PatternCatalog {
        let c5 = graph6::decode("Dhc").unwrap();
        std::iter::once(ForbiddenPattern::new(c5, "Dhc").unwrap()).collect()
    }

    fn cycle(n: u32) -> Graph {
        let edges: Vec<Edge> = (0..n).map(|i| ordered(i, (i + 1) % n)).collect();
        Graph::from_edges(0..n, &edges)
    }

    #[test]
    fn occurrence_maps_pattern_edges_onto_host_edges() {
        let catalog = c5_catalog();
        let host = cycle(5);
        let found = Detector::new(&catalog).find_occurrences(&host).unwrap();
        assert_eq!(found.len(), 1);
        let occ = &found[0];
        assert_eq!(occ.vertex_set(), vec![0, 1, 2, 3, 4]);
        assert_eq!(occ.edges, host.edges());
    }

    #[test]
    fn find_any_agrees_with_full_scan() {
        let catalog = c5_catalog();
        let detector = Detector::new(&catalog);
        assert!(detector.find_any(&cycle(5)).unwrap().is_some());
        assert!(detector.is_compliant(&cycle(6)).unwrap());
    }

    #[test]
    fn cancelled_scan_errors() {
        let catalog = c5_catalog();
        let token = CancelToken::new();
        token.cancel();
        let detector = Detector::new(&catalog).with_cancel(token);
        let err = detector.find_occurrences(&cycle(7)).unwrap_err();
        assert!(matches!(err, crate::GatexError::Cancelled));
    }

    struct Never;

    impl IsomorphismOracle for Never {
        fn find_isomorphism(&self, _: &SmallGraph, _: &SmallGraph) -> Option<Vec<u8>> {
            None
        }
    }

    #[test]
    fn oracle_is_pluggable() {
        let catalog = c5_catalog();
        let detector = Detector::with_oracle(&catalog, Never);
        assert!(detector.find_occurrences(&cycle(5)).unwrap().is_empty());
    }
}
