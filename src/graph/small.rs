// src/graph/small.rs
//! Fixed-capacity graphs of order at most eight.
//!
//! Forbidden patterns and the induced subgraphs compared against them never
//! exceed eight vertices, so each adjacency row fits in one byte. The type is
//! `Copy` and hashable, which lets the detector memoize oracle answers keyed
//! by the induced subgraph itself.

/// Largest order a [`SmallGraph`] can hold.
pub const MAX_SMALL_ORDER: usize = 8;

/// Number of unordered vertex pairs on `MAX_SMALL_ORDER` vertices.
pub const MAX_SMALL_PAIRS: usize = MAX_SMALL_ORDER * (MAX_SMALL_ORDER - 1) / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SmallGraph {
    order: u8,
    rows: [u8; MAX_SMALL_ORDER],
}

/// Column-major slot of the pair `{i, j}`: (0,1), (0,2), (1,2), (0,3), ...
///
/// This is the bit order graph6 uses for the upper triangle.
#[must_use]
pub fn pair_slot(i: usize, j: usize) -> usize {
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    hi * (hi - 1) / 2 + lo
}

impl SmallGraph {
    /// Edgeless graph on `order` vertices.
    ///
    /// # Panics
    /// Panics if `order` exceeds [`MAX_SMALL_ORDER`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn empty(order: usize) -> Self {
        assert!(
            order <= MAX_SMALL_ORDER,
            "small graph order {order} exceeds {MAX_SMALL_ORDER}"
        );
        Self {
            order: order as u8,
            rows: [0; MAX_SMALL_ORDER],
        }
    }

    #[must_use]
    pub fn from_edges(order: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::empty(order);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    #[must_use]
    pub fn order(&self) -> usize {
        usize::from(self.order)
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.order() && v < self.order() && (self.rows[u] >> v) & 1 == 1
    }

    /// # Panics
    /// Panics on a self-loop or an endpoint outside the graph.
    #[allow(clippy::indexing_slicing)]
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u != v, "self-loop on vertex {u}");
        assert!(
            u < self.order() && v < self.order(),
            "edge ({u},{v}) outside order {}",
            self.order
        );
        self.rows[u] |= 1 << v;
        self.rows[v] |= 1 << u;
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn degree(&self, v: usize) -> usize {
        self.rows[v].count_ones() as usize
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        (0..self.order()).map(|v| self.degree(v)).sum::<usize>() / 2
    }

    /// Edges as `(i, j)` with `i < j`, in ascending order.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.order();
        let mut edges = Vec::with_capacity(self.edge_count());
        for i in 0..n {
            for j in (i + 1)..n {
                if self.has_edge(i, j) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    #[must_use]
    pub fn isolated_vertices(&self) -> Vec<usize> {
        (0..self.order()).filter(|&v| self.degree(v) == 0).collect()
    }

    /// Degree sequence sorted descending; an isomorphism invariant.
    #[must_use]
    #[allow(clippy::indexing_slicing, clippy::cast_possible_truncation)]
    pub fn degree_signature(&self) -> [u8; MAX_SMALL_ORDER] {
        let mut signature = [0u8; MAX_SMALL_ORDER];
        for v in 0..self.order() {
            signature[v] = self.degree(v) as u8;
        }
        signature.sort_unstable_by(|a, b| b.cmp(a));
        signature
    }

    /// Relabels vertex `i` as `perm[i]`.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn permuted(&self, perm: &[usize]) -> Self {
        let mut out = Self::empty(self.order());
        for (i, j) in self.edges() {
            out.add_edge(perm[i], perm[j]);
        }
        out
    }

    /// One bit per vertex pair, at [`pair_slot`].
    #[must_use]
    pub fn pair_mask(&self) -> u32 {
        self.edges()
            .into_iter()
            .fold(0u32, |mask, (i, j)| mask | (1 << pair_slot(i, j)))
    }
}
