// src/pattern/mod.rs
//! Forbidden patterns and the catalog that holds them.

pub mod graph6;
pub mod manual;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::detect::oracle::{IsomorphismOracle, Vf2Oracle};
use crate::error::{GatexError, Result};
use crate::graph::SmallGraph;

/// Smallest order a forbidden pattern may have.
pub const MIN_PATTERN_ORDER: usize = 5;
/// Largest order a forbidden pattern may have.
pub const MAX_PATTERN_ORDER: usize = 8;

/// Rejects orders outside `[MIN_PATTERN_ORDER, MAX_PATTERN_ORDER]`.
///
/// # Errors
/// Returns the reason as text; callers attach line context.
pub fn check_order(order: usize) -> std::result::Result<(), String> {
    if (MIN_PATTERN_ORDER..=MAX_PATTERN_ORDER).contains(&order) {
        Ok(())
    } else {
        Err(format!(
            "pattern order {order} outside [{MIN_PATTERN_ORDER}, {MAX_PATTERN_ORDER}]"
        ))
    }
}

/// A small graph whose induced presence is forbidden.
///
/// Free vertices carry no edges in the pattern; they exist so the pattern's
/// order can exceed its edge-bearing vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenPattern {
    graph: SmallGraph,
    free: Vec<usize>,
    label: String,
}

impl ForbiddenPattern {
    /// # Errors
    /// Returns a reason if the order is outside the supported range.
    pub fn new(graph: SmallGraph, label: impl Into<String>) -> std::result::Result<Self, String> {
        check_order(graph.order())?;
        Ok(Self {
            free: graph.isolated_vertices(),
            graph,
            label: label.into(),
        })
    }

    #[must_use]
    pub fn graph(&self) -> &SmallGraph {
        &self.graph
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.graph.order()
    }

    #[must_use]
    pub fn free_vertices(&self) -> &[usize] {
        &self.free
    }

    /// The catalog line this pattern was read from.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Every distinct labelled copy of the pattern on `0..order`, as pair
    /// masks (see [`crate::graph::pair_slot`]).
    ///
    /// There are `order! / |Aut|` of them; together they are the edge
    /// signatures of all injective mappings onto a fixed vertex set.
    #[must_use]
    pub fn labelled_copies(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut copies = Vec::new();
        for_each_permutation(self.order(), |perm| {
            let mask = self.graph.permuted(perm).pair_mask();
            if seen.insert(mask) {
                copies.push(mask);
            }
        });
        copies
    }
}

/// Heap's algorithm over `0..k`.
#[allow(clippy::indexing_slicing)]
fn for_each_permutation(k: usize, mut visit: impl FnMut(&[usize])) {
    let mut perm: Vec<usize> = (0..k).collect();
    let mut counters = vec![0usize; k];
    visit(&perm);
    let mut i = 1;
    while i < k {
        if counters[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(counters[i], i);
            }
            visit(&perm);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

/// Immutable-after-load set of forbidden patterns, one per isomorphism class.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    patterns: Vec<ForbiddenPattern>,
}

impl PatternCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern unless an isomorphic one is already present.
    pub fn insert(&mut self, pattern: ForbiddenPattern) -> bool {
        if let Some(existing) = self
            .patterns
            .iter()
            .find(|p| Vf2Oracle.is_isomorphic(p.graph(), pattern.graph()))
        {
            warn!(
                duplicate = pattern.label(),
                kept = existing.label(),
                "skipping isomorphic duplicate pattern"
            );
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    /// Parses a graph6 catalog, one pattern per line.
    ///
    /// # Errors
    /// Returns [`GatexError::CatalogParse`] on the first bad line; no partial
    /// catalog is produced.
    pub fn from_graph6(text: &str) -> Result<Self> {
        let mut catalog = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let pattern = self::graph6::decode(line)
                .and_then(|graph| ForbiddenPattern::new(graph, line))
                .map_err(|reason| GatexError::CatalogParse {
                    line: idx + 1,
                    reason,
                })?;
            catalog.insert(pattern);
        }
        debug!(patterns = catalog.len(), "loaded graph6 catalog");
        Ok(catalog)
    }

    /// Parses manual `(edges, free)` entries.
    ///
    /// # Errors
    /// Returns [`GatexError::InputParse`] on the first bad line.
    pub fn from_manual(text: &str) -> Result<Self> {
        let mut catalog = Self::new();
        for pattern in manual::parse_entries(text)? {
            catalog.insert(pattern);
        }
        debug!(patterns = catalog.len(), "loaded manual patterns");
        Ok(catalog)
    }

    /// # Errors
    /// Returns an I/O error with the path, or the first parse error.
    pub fn load_graph6(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GatexError::io(e, path))?;
        Self::from_graph6(&text)
    }

    /// # Errors
    /// Returns an I/O error with the path, or the first parse error.
    pub fn load_manual(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GatexError::io(e, path))?;
        Self::from_manual(&text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ForbiddenPattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForbiddenPattern> {
        self.patterns.iter()
    }

    /// Distinct pattern orders, ascending.
    #[must_use]
    pub fn orders(&self) -> Vec<usize> {
        let mut orders: Vec<usize> = self.patterns.iter().map(ForbiddenPattern::order).collect();
        orders.sort_unstable();
        orders.dedup();
        orders
    }

    /// Catalog indices of the patterns with the given order.
    #[must_use]
    pub fn indices_of_order(&self, order: usize) -> Vec<usize> {
        self.patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| p.order() == order)
            .map(|(i, _)| i)
            .collect()
    }
}

impl FromIterator<ForbiddenPattern> for PatternCatalog {
    fn from_iter<I: IntoIterator<Item = ForbiddenPattern>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for pattern in iter {
            catalog.insert(pattern);
        }
        catalog
    }
}
