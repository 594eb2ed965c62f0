//! Structured run trace: an explicit collector threaded through every stage
//! so the document sink can embed the full story of a run without relying on
//! global log capture.

use std::fmt;

/// One discrete step of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Publish,
    Archive,
    Audit,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Publish => "publish",
            Stage::Archive => "archive",
            Stage::Audit => "audit",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub stage: Stage,
    pub message: String,
}

/// Ordered list of `(stage, message)` entries accumulated during a run.
/// Owned single-threaded; rendered to text only at the document-sink
/// boundary.
#[derive(Debug, Default)]
pub struct RunTrace {
    entries: Vec<TraceEntry>,
}

impl RunTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Stage, message: impl Into<String>) {
        self.entries.push(TraceEntry {
            stage,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages recorded for a single stage, in insertion order.
    pub fn stage_lines(&self, stage: Stage) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.stage == stage)
            .map(|e| e.message.as_str())
    }

    /// Render the whole trace grouped by stage, one section per stage that
    /// recorded anything, in run order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for stage in [Stage::Read, Stage::Publish, Stage::Archive, Stage::Audit] {
            let mut lines = self.stage_lines(stage).peekable();
            if lines.peek().is_none() {
                continue;
            }
            out.push_str(&format!("=== {} ===\n", stage));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_groups_by_stage_in_run_order() {
        let mut trace = RunTrace::new();
        trace.push(Stage::Publish, "cleared worksheet");
        trace.push(Stage::Read, "2 data rows");
        trace.push(Stage::Read, "4 columns");

        let rendered = trace.render();
        let read_pos = rendered.find("=== read ===").unwrap();
        let publish_pos = rendered.find("=== publish ===").unwrap();
        assert!(read_pos < publish_pos, "read section must come first");
        assert!(rendered.contains("2 data rows\n4 columns\n"));
        assert!(!rendered.contains("=== archive ==="));
    }

    #[test]
    fn empty_trace_renders_empty() {
        assert_eq!(RunTrace::new().render(), "");
    }
}
