// src/graph/adjlist.rs
//! Adjacency-list text format.
//!
//! Each line is `u v1 v2 ...`: vertex `u` followed by neighbors. `#` starts a
//! comment. A batch file holds several graphs separated by blank lines.

use std::fs;
use std::path::Path;

use super::{Edge, Graph, VertexId};
use crate::error::{GatexError, Result};

/// Parses every blank-line separated block into a graph.
///
/// # Errors
/// Returns [`GatexError::InputParse`] on the first malformed line; no graph
/// from the batch is returned in that case.
pub fn parse_batch(text: &str) -> Result<Vec<Graph>> {
    let mut graphs = Vec::new();
    let mut block = BlockBuilder::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = strip_comment(raw);
        if line.trim().is_empty() {
            // Comment-only lines do not end a block.
            if raw.trim().is_empty() {
                if let Some(graph) = block.finish() {
                    graphs.push(graph);
                }
            }
            continue;
        }
        block.push_line(line, idx + 1)?;
    }
    if let Some(graph) = block.finish() {
        graphs.push(graph);
    }
    Ok(graphs)
}

/// Parses a single adjacency list (blank lines ignored).
///
/// # Errors
/// Returns [`GatexError::InputParse`] on a malformed line.
pub fn parse_graph(text: &str) -> Result<Graph> {
    let mut block = BlockBuilder::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = strip_comment(raw);
        if !line.trim().is_empty() {
            block.push_line(line, idx + 1)?;
        }
    }
    Ok(block.finish().unwrap_or_default())
}

/// Reads and parses a batch file.
///
/// # Errors
/// Returns an I/O error carrying the path, or the first parse error.
pub fn read_batch_file(path: &Path) -> Result<Vec<Graph>> {
    let text = fs::read_to_string(path).map_err(|e| GatexError::io(e, path))?;
    parse_batch(&text)
}

/// Renders one line per vertex; each edge is listed once, under its smaller
/// endpoint.
#[must_use]
pub fn adjacency_lines(graph: &Graph) -> Vec<String> {
    graph
        .vertices()
        .iter()
        .map(|&v| {
            let mut line = v.to_string();
            for n in graph.neighbors(v).into_iter().filter(|&n| n > v) {
                line.push(' ');
                line.push_str(&n.to_string());
            }
            line
        })
        .collect()
}

#[must_use]
pub fn render(graph: &Graph) -> String {
    let mut out = adjacency_lines(graph).join("\n");
    out.push('\n');
    out
}

fn strip_comment(raw: &str) -> &str {
    match raw.find('#') {
        Some(pos) => raw.get(..pos).unwrap_or(""),
        None => raw,
    }
}

#[derive(Default)]
struct BlockBuilder {
    vertices: Vec<VertexId>,
    edges: Vec<Edge>,
    open: bool,
}

impl BlockBuilder {
    fn push_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Ok(());
        };
        let u = parse_label(head, line_no)?;
        self.vertices.push(u);
        self.open = true;
        for token in tokens {
            let v = parse_label(token, line_no)?;
            if u == v {
                return Err(GatexError::InputParse {
                    line: line_no,
                    reason: format!("self-loop on vertex {u}"),
                });
            }
            self.edges.push((u, v));
        }
        Ok(())
    }

    fn finish(&mut self) -> Option<Graph> {
        if !self.open {
            return None;
        }
        let vertices = std::mem::take(&mut self.vertices);
        let edges = std::mem::take(&mut self.edges);
        self.open = false;
        Some(Graph::from_edges(vertices, &edges))
    }
}

fn parse_label(token: &str, line_no: usize) -> Result<VertexId> {
    token.parse::<VertexId>().map_err(|_| GatexError::InputParse {
        line: line_no,
        reason: format!("invalid vertex label `{token}`"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_split_on_blank_lines() {
        let text = "0 1 2\n1 2\n\n\n5 6\n7\n";
        let graphs = parse_batch(text).unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].edges(), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(graphs[1].vertices(), &[5, 6, 7]);
        assert_eq!(graphs[1].edge_count(), 1);
    }

    #[test]
    fn comments_are_ignored() {
        let graphs = parse_batch("# header\n0 1 # trailing\n1 2\n").unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].edge_count(), 2);
    }

    #[test]
    fn bad_token_reports_line() {
        let err = parse_batch("0 1\n1 x\n").unwrap_err();
        assert!(matches!(err, GatexError::InputParse { line: 2, .. }));
    }

    #[test]
    fn self_loop_is_input_error() {
        let err = parse_batch("3 3\n").unwrap_err();
        assert!(matches!(err, GatexError::InputParse { line: 1, .. }));
    }

    #[test]
    fn render_lists_each_edge_once() {
        let graph = parse_graph("0 1 4\n1 2\n2 3\n3 4\n").unwrap();
        assert_eq!(render(&graph), "0 1 4\n1 2\n2 3\n3 4\n4\n");
        assert_eq!(parse_graph(&render(&graph)).unwrap(), graph);
    }
}
