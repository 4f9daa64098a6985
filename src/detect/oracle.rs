// src/detect/oracle.rs
//! Exact isomorphism between small graphs.
//!
//! The detector only needs a yes/no answer plus a witness mapping, so the
//! decision procedure sits behind [`IsomorphismOracle`]. [`Vf2Oracle`] hands
//! the work to petgraph's VF2 matcher after cheap invariant checks.

use petgraph::algo::subgraph_isomorphisms_iter;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::graph::SmallGraph;

/// Decides isomorphism of two graphs of equal small order.
pub trait IsomorphismOracle: Sync {
    /// Returns `mapping` with `mapping[p] = c` for pattern vertex `p` and
    /// candidate vertex `c` when the graphs are isomorphic.
    fn find_isomorphism(&self, pattern: &SmallGraph, candidate: &SmallGraph) -> Option<Vec<u8>>;

    fn is_isomorphic(&self, a: &SmallGraph, b: &SmallGraph) -> bool {
        self.find_isomorphism(a, b).is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Vf2Oracle;

impl IsomorphismOracle for Vf2Oracle {
    #[allow(clippy::cast_possible_truncation)]
    fn find_isomorphism(&self, pattern: &SmallGraph, candidate: &SmallGraph) -> Option<Vec<u8>> {
        if !invariants_match(pattern, candidate) {
            return None;
        }
        let g0 = to_petgraph(pattern);
        let g1 = to_petgraph(candidate);
        let (r0, r1) = (&g0, &g1);
        let mut node_match = |_: &(), _: &()| true;
        let mut edge_match = |_: &(), _: &()| true;
        let mut mappings = subgraph_isomorphisms_iter(&r0, &r1, &mut node_match, &mut edge_match)?;

        mappings
            .find(|mapping| is_witness(pattern, candidate, mapping))
            .map(|mapping| mapping.into_iter().map(|v| v as u8).collect())
    }
}

/// Order, size and degree sequence must agree before any search.
#[must_use]
pub fn invariants_match(a: &SmallGraph, b: &SmallGraph) -> bool {
    a.order() == b.order()
        && a.edge_count() == b.edge_count()
        && a.degree_signature() == b.degree_signature()
}

/// True when `mapping` carries edges to edges and non-edges to non-edges.
#[must_use]
#[allow(clippy::indexing_slicing)]
pub fn is_witness(pattern: &SmallGraph, candidate: &SmallGraph, mapping: &[usize]) -> bool {
    let n = pattern.order();
    if mapping.len() != n {
        return false;
    }
    let mut seen = 0u16;
    for &m in mapping {
        if m >= n || seen & (1 << m) != 0 {
            return false;
        }
        seen |= 1 << m;
    }
    (0..n).all(|i| {
        ((i + 1)..n).all(|j| pattern.has_edge(i, j) == candidate.has_edge(mapping[i], mapping[j]))
    })
}

fn to_petgraph(graph: &SmallGraph) -> UnGraph<(), ()> {
    let mut g = UnGraph::with_capacity(graph.order(), graph.edge_count());
    for _ in 0..graph.order() {
        g.add_node(());
    }
    for (i, j) in graph.edges() {
        g.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
    }
    g
}
