// src/pattern/graph6.rs
//! graph6 lines for the small graphs a catalog holds.
//!
//! Conversion goes through the `graph6` crate. Its parser panics on
//! malformed input, so each line is checked here first: printable alphabet,
//! a single order byte no larger than [`MAX_SMALL_ORDER`], and exactly the
//! number of adjacency characters the order calls for.

use crate::graph::{SmallGraph, MAX_SMALL_ORDER};

const HEADER: &str = ">>graph6<<";
const OFFSET: u8 = 63;
const MAX_PRINTABLE: u8 = 126;

/// Decodes one graph6 line.
///
/// # Errors
/// Returns a human-readable reason when the line is not valid graph6 or
/// describes a graph larger than [`MAX_SMALL_ORDER`].
pub fn decode(line: &str) -> Result<SmallGraph, String> {
    let text = line.trim();
    let text = text.strip_prefix(HEADER).unwrap_or(text);
    validate(text)?;

    let (matrix, n) = ::graph6::string_to_adjacency_matrix(text);
    let mut graph = SmallGraph::empty(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix.get(i * n + j).is_some_and(|&x| x > 0.5) {
                graph.add_edge(i, j);
            }
        }
    }
    Ok(graph)
}

fn validate(text: &str) -> Result<(), String> {
    let bytes = text.as_bytes();
    let Some((&first, body)) = bytes.split_first() else {
        return Err("empty graph6 string".to_string());
    };
    if let Some(bad) = bytes.iter().find(|b| !(OFFSET..=MAX_PRINTABLE).contains(b)) {
        return Err(format!("byte {bad:#04x} is outside the graph6 alphabet"));
    }
    if first == MAX_PRINTABLE {
        return Err(format!("order exceeds {MAX_SMALL_ORDER} vertices"));
    }

    let n = usize::from(first - OFFSET);
    if n == 0 {
        return Err("graph has no vertices".to_string());
    }
    if n > MAX_SMALL_ORDER {
        return Err(format!("order {n} exceeds {MAX_SMALL_ORDER} vertices"));
    }
    let expected = (n * (n - 1) / 2).div_ceil(6);
    if body.len() != expected {
        return Err(format!(
            "expected {expected} adjacency characters for order {n}, found {}",
            body.len()
        ));
    }
    Ok(())
}

#[must_use]
pub fn encode(graph: &SmallGraph) -> String {
    let n = graph.order();
    if n < 2 {
        // No adjacency bits to pad.
        return String::from(if n == 0 { "?" } else { "@" });
    }
    let mut matrix = vec![0.0_f32; n * n];
    for (i, j) in graph.edges() {
        if let Some(cell) = matrix.get_mut(i * n + j) {
            *cell = 1.0;
        }
        if let Some(cell) = matrix.get_mut(j * n + i) {
            *cell = 1.0;
        }
    }
    ::graph6::adjacency_matrix_to_string(&matrix, n)
}
