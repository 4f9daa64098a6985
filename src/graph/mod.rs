// src/graph/mod.rs
//! Host graphs: simple, undirected, integer-labelled, fixed vertex set.

pub mod adjlist;
pub mod small;

pub use small::{pair_slot, SmallGraph, MAX_SMALL_ORDER};

/// Vertex label as it appears in input files.
pub type VertexId = u32;

/// Unordered vertex pair, stored with the smaller label first.
pub type Edge = (VertexId, VertexId);

/// Normalizes a pair so the smaller label comes first.
#[must_use]
pub fn ordered(u: VertexId, v: VertexId) -> Edge {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// A simple undirected graph whose vertex set never changes after
/// construction. Vertices are addressed by label in the public API and by
/// dense index (position in ascending label order) internally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    labels: Vec<VertexId>,
    adjacency: Vec<bool>,
    edge_count: usize,
}

impl Graph {
    /// Edgeless graph on the given labels (duplicates collapse).
    #[must_use]
    pub fn with_vertices<I: IntoIterator<Item = VertexId>>(vertices: I) -> Self {
        let mut labels: Vec<VertexId> = vertices.into_iter().collect();
        labels.sort_unstable();
        labels.dedup();
        let n = labels.len();
        Self {
            labels,
            adjacency: vec![false; n * n],
            edge_count: 0,
        }
    }

    /// Graph on `vertices` plus every edge endpoint, with the given edges.
    ///
    /// # Panics
    /// Panics if an edge is a self-loop.
    #[must_use]
    pub fn from_edges<I: IntoIterator<Item = VertexId>>(vertices: I, edges: &[Edge]) -> Self {
        let all = vertices
            .into_iter()
            .chain(edges.iter().flat_map(|&(u, v)| [u, v]));
        let mut graph = Self::with_vertices(all);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Vertex labels in ascending order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.labels
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn label(&self, index: usize) -> VertexId {
        self.labels[index]
    }

    #[must_use]
    pub fn index_of(&self, v: VertexId) -> Option<usize> {
        self.labels.binary_search(&v).ok()
    }

    /// False for pairs involving unknown vertices.
    #[must_use]
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(i), Some(j)) => self.has_edge_at(i, j),
            _ => false,
        }
    }

    /// Returns true if the edge was not already present.
    ///
    /// # Panics
    /// Panics on a self-loop or a vertex outside the graph; either breaks the
    /// simple-graph invariant.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        assert!(u != v, "self-loop on vertex {u}");
        let (i, j) = (self.resolve(u), self.resolve(v));
        self.set_edge_at(i, j, true)
    }

    /// Returns true if the edge was present.
    ///
    /// # Panics
    /// Panics on a vertex outside the graph.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        let (i, j) = (self.resolve(u), self.resolve(v));
        self.set_edge_at(i, j, false)
    }

    /// All edges, smaller label first, ascending.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.order();
        let mut edges = Vec::with_capacity(self.edge_count);
        for i in 0..n {
            for j in (i + 1)..n {
                if self.has_edge_at(i, j) {
                    edges.push((self.label(i), self.label(j)));
                }
            }
        }
        edges
    }

    /// Neighbors of `v` in ascending label order; empty for unknown vertices.
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        let Some(i) = self.index_of(v) else {
            return Vec::new();
        };
        (0..self.order())
            .filter(|&j| self.has_edge_at(i, j))
            .map(|j| self.label(j))
            .collect()
    }

    /// Induced subgraph on dense indices, relabelled `0..subset.len()` in
    /// the order given.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn induced(&self, subset: &[usize]) -> SmallGraph {
        let mut small = SmallGraph::empty(subset.len());
        for a in 0..subset.len() {
            for b in (a + 1)..subset.len() {
                if self.has_edge_at(subset[a], subset[b]) {
                    small.add_edge(a, b);
                }
            }
        }
        small
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn has_edge_at(&self, i: usize, j: usize) -> bool {
        self.adjacency[i * self.order() + j]
    }

    /// Sets presence of `{i, j}`; returns true if that changed the graph.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn set_edge_at(&mut self, i: usize, j: usize, present: bool) -> bool {
        assert!(i != j, "self-loop on vertex {}", self.label(i));
        let n = self.order();
        if self.adjacency[i * n + j] == present {
            return false;
        }
        self.adjacency[i * n + j] = present;
        self.adjacency[j * n + i] = present;
        if present {
            self.edge_count += 1;
        } else {
            self.edge_count -= 1;
        }
        true
    }

    fn resolve(&self, v: VertexId) -> usize {
        match self.index_of(v) {
            Some(i) => i,
            None => panic!("vertex {v} is not part of the graph"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_undirected_and_counted_once() {
        let mut g = Graph::with_vertices([3, 1, 2, 1]);
        assert_eq!(g.vertices(), &[1, 2, 3]);
        assert!(g.add_edge(3, 1));
        assert!(!g.add_edge(1, 3));
        assert!(g.has_edge(1, 3) && g.has_edge(3, 1));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edges(), vec![(1, 3)]);
        assert!(g.remove_edge(1, 3));
        assert!(!g.remove_edge(1, 3));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn induced_subgraph_keeps_edges_and_non_edges() {
        let g = Graph::from_edges(0..4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let small = g.induced(&[0, 2, 3]);
        assert_eq!(small.order(), 3);
        assert_eq!(small.edges(), vec![(0, 1), (0, 2), (1, 2)]);
        let small = g.induced(&[1, 3]);
        assert_eq!(small.edge_count(), 0);
    }

    #[test]
    #[should_panic(expected = "not part of the graph")]
    fn unknown_vertex_panics() {
        let mut g = Graph::with_vertices(0..3);
        g.add_edge(0, 9);
    }
}
