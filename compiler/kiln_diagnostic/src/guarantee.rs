//! Proof that at least one error diagnostic was recorded.

use std::fmt;

/// Zero-sized proof that an error was reported.
///
/// Only obtainable from a [`DiagnosticSink`](crate::DiagnosticSink) that
/// holds an error, or from a non-zero error count. Code returning
/// `Result<T, ErrorGuaranteed>` cannot fail silently.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Build a guarantee from a count of reported errors.
    ///
    /// Returns `None` when no error was reported.
    pub fn from_error_count(count: usize) -> Option<Self> {
        if count > 0 {
            Some(ErrorGuaranteed(()))
        } else {
            None
        }
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}

#[cfg(test)]
mod tests;
