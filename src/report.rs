//! Pass reporting: what a filter run actually did to the document.

use serde::Serialize;

/// Counters accumulated over one document pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterReport {
    /// Lines read from the source.
    pub lines_in: usize,
    /// Lines that produced output.
    pub lines_out: usize,
    /// Lines dropped entirely (suppressed content or emptied by filtering).
    pub lines_dropped: usize,
    /// Matched directive tokens consumed (`\if`, `\else`, `\fi`).
    pub directives_removed: usize,
    /// `\newif\if<name>` declarations encountered.
    pub declarations_seen: usize,
    /// Condition names that matched at least one directive, in first-match order.
    pub matched_conditions: Vec<String>,
}

impl FilterReport {
    pub(crate) fn note_removed(&mut self, name: &str) {
        self.directives_removed += 1;
        if !self.matched_conditions.iter().any(|n| n == name) {
            self.matched_conditions.push(name.to_string());
        }
    }
}

/// Filtered text together with its pass report.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    pub content: String,
    pub report: FilterReport,
}

impl FilterOutcome {
    pub fn new(content: String, report: FilterReport) -> Self {
        Self { content, report }
    }
}
