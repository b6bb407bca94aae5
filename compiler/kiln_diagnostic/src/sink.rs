//! Diagnostic sink for collecting and ordering diagnostics.
//!
//! Every pass reports into one sink. Nothing is dropped or deduplicated:
//! each recoverable problem the passes find is kept, in report order, and
//! [`DiagnosticSink::sorted`] gives a stable source-order view for output.

use crate::{Diagnostic, ErrorGuaranteed};

/// Accumulates diagnostics across passes.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diag: Diagnostic) {
        if diag.is_error() {
            self.error_count += 1;
        }
        tracing::trace!(code = %diag.code, message = %diag.message, "diagnostic");
        self.diagnostics.push(diag);
    }

    /// Check if any errors were recorded.
    ///
    /// Returns `Some(ErrorGuaranteed)` if at least one error was recorded.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Diagnostics ordered by file, line, and column. Ties keep report order.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut out: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        out.sort_by_key(|d| d.sort_key());
        out
    }

    /// Consume the sink, returning diagnostics in report order.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Extend<Diagnostic> for DiagnosticSink {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diag in iter {
            self.push(diag);
        }
    }
}

#[cfg(test)]
mod tests;
