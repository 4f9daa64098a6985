// src/pattern/manual.rs
//! Strict parser for hand-written pattern entries.
//!
//! One entry per line: `(edge_list, free_vertex_list)`, for example
//! `([(0,1),(1,2)],[3,4])`. Whitespace may appear between tokens. Anything
//! else is rejected; entries are never evaluated.

use super::{check_order, ForbiddenPattern};
use crate::error::{GatexError, Result};
use crate::graph::SmallGraph;

/// Raw contents of one entry before relabelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub edges: Vec<(u32, u32)>,
    pub free: Vec<u32>,
}

/// Parses every non-blank line. The first bad line aborts the batch.
///
/// # Errors
/// Returns [`GatexError::InputParse`] naming the offending line.
pub fn parse_entries(text: &str) -> Result<Vec<ForbiddenPattern>> {
    let mut patterns = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let pattern = parse_entry(line)
            .and_then(|entry| entry.into_pattern(line.trim()))
            .map_err(|reason| GatexError::InputParse {
                line: idx + 1,
                reason,
            })?;
        patterns.push(pattern);
    }
    Ok(patterns)
}

/// Parses a single `(edges, free)` entry.
///
/// # Errors
/// Returns a reason naming the column where parsing failed.
pub fn parse_entry(line: &str) -> std::result::Result<PatternEntry, String> {
    let mut cursor = Cursor::new(line);
    cursor.expect(b'(')?;
    let edges = cursor.list(Cursor::pair)?;
    cursor.expect(b',')?;
    let spanned = cursor.list(|c| {
        c.skip_ws();
        let column = c.pos + 1;
        c.number().map(|v| (v, column))
    })?;
    cursor.expect(b')')?;
    cursor.end()?;

    let mut free: Vec<u32> = Vec::with_capacity(spanned.len());
    for (v, column) in spanned {
        if free.contains(&v) {
            return Err(format!("free vertex {v} repeated at column {column}"));
        }
        free.push(v);
    }
    Ok(PatternEntry { edges, free })
}

impl PatternEntry {
    /// Relabels the vertices to `0..k` in ascending order and validates the
    /// result as a forbidden pattern.
    ///
    /// # Errors
    /// Rejects self-loops, free vertices that also carry edges, and orders
    /// outside the supported range.
    pub fn into_pattern(self, label: &str) -> std::result::Result<ForbiddenPattern, String> {
        if let Some(&(u, _)) = self.edges.iter().find(|(u, v)| u == v) {
            return Err(format!("self-loop on vertex {u}"));
        }
        let mut edge_vertices: Vec<u32> = self.edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        edge_vertices.sort_unstable();
        edge_vertices.dedup();
        if let Some(v) = self.free.iter().find(|v| edge_vertices.binary_search(v).is_ok()) {
            return Err(format!("free vertex {v} also appears in an edge"));
        }

        let mut vertices = edge_vertices;
        vertices.extend(&self.free);
        vertices.sort_unstable();
        vertices.dedup();
        check_order(vertices.len())?;

        let local = |v: u32| vertices.binary_search(&v).unwrap_or_default();
        let mut graph = SmallGraph::empty(vertices.len());
        for &(u, v) in &self.edges {
            graph.add_edge(local(u), local(v));
        }
        ForbiddenPattern::new(graph, label)
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes.get(self.pos).copied()
    }

    fn describe(&self) -> String {
        match self.bytes.get(self.pos) {
            Some(&b) => format!("`{}` at column {}", char::from(b), self.pos + 1),
            None => "end of line".to_string(),
        }
    }

    fn expect(&mut self, want: u8) -> std::result::Result<(), String> {
        if self.peek() == Some(want) {
            self.pos += 1;
            Ok(())
        } else {
            Err(format!("expected `{}`, found {}", char::from(want), self.describe()))
        }
    }

    fn end(&mut self) -> std::result::Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(format!("unexpected trailing input {}", self.describe())),
        }
    }

    fn number(&mut self) -> std::result::Result<u32, String> {
        self.skip_ws();
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(format!("expected a vertex number, found {}", self.describe()));
        }
        let digits = std::str::from_utf8(self.bytes.get(start..self.pos).unwrap_or_default())
            .unwrap_or_default();
        digits
            .parse::<u32>()
            .map_err(|_| format!("vertex number `{digits}` at column {} is too large", start + 1))
    }

    fn pair(&mut self) -> std::result::Result<(u32, u32), String> {
        self.expect(b'(')?;
        let u = self.number()?;
        self.expect(b',')?;
        let v = self.number()?;
        self.expect(b')')?;
        Ok((u, v))
    }

    /// `[` item (`,` item)* `]`, possibly empty.
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> std::result::Result<T, String>,
    ) -> std::result::Result<Vec<T>, String> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(format!("expected `,` or `]`, found {}", self.describe())),
            }
        }
    }
}
