// src/report.rs
//! Per-graph repair reports.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::edit::EditPlan;
use crate::error::{GatexError, Result};
use crate::graph::{adjlist, Edge, Graph};

/// Before/after pair for one repaired graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport<'g> {
    pub original: &'g Graph,
    pub updated: &'g Graph,
    pub changed: Vec<Edge>,
}

impl<'g> DiffReport<'g> {
    #[must_use]
    pub fn new(original: &'g Graph, updated: &'g Graph) -> Self {
        Self {
            original,
            updated,
            changed: EditPlan::between(original, updated).changed(),
        }
    }

    /// Text block appended to the report file.
    #[must_use]
    pub fn render(&self) -> String {
        let changed: Vec<String> = self
            .changed
            .iter()
            .map(|(u, v)| format!("({u},{v})"))
            .collect();
        format!(
            "Original Graph:\n{}\nUpdated Graph:\n{}Changed Edges:\n{}\n\n",
            adjlist::render(self.original),
            adjlist::render(self.updated),
            changed.join(", ")
        )
    }
}

/// Destination for repair reports.
pub trait ReportSink {
    /// # Errors
    /// Returns an error if the report cannot be written.
    fn record(&mut self, report: &DiffReport<'_>) -> Result<()>;
}

/// Appends rendered reports to a text file, creating it if needed.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReportSink {
    fn record(&mut self, report: &DiffReport<'_>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| GatexError::io(e, &self.path))?;
        file.write_all(report.render().as_bytes())
            .map_err(|e| GatexError::io(e, &self.path))
    }
}

/// Keeps rendered reports in memory.
impl ReportSink for Vec<String> {
    fn record(&mut self, report: &DiffReport<'_>) -> Result<()> {
        self.push(report.render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_layout() {
        let before = Graph::from_edges(0..3, &[(0, 1), (1, 2)]);
        let after = Graph::from_edges(0..3, &[(1, 2)]);
        let report = DiffReport::new(&before, &after);
        let text = report.render();
        assert!(text.starts_with("Original Graph:\n"));
        assert!(text.contains("\n\nUpdated Graph:\n"));
        assert!(text.ends_with("Changed Edges:\n(0,1)\n\n"), "{text}");
    }

    #[test]
    fn memory_sink_collects() {
        let g = Graph::from_edges(0..2, &[(0, 1)]);
        let mut sink: Vec<String> = Vec::new();
        sink.record(&DiffReport::new(&g, &g)).unwrap();
        assert_eq!(sink.len(), 1);
        assert!(sink[0].ends_with("Changed Edges:\n\n\n"));
    }
}
