//! Diagnostic system for semantic error reporting.
//!
//! Every problem found in user input becomes a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary label (where it went wrong: file, line, column range)
//! - Secondary labels and notes (why it's wrong)
//!
//! Diagnostics never abort a pass. They accumulate in a [`DiagnosticSink`]
//! and the caller decides, after a pass finishes, whether to continue.
//!
//! # Error Guarantees
//!
//! ```text
//! // Can only get ErrorGuaranteed when an error was recorded
//! let guarantee = sink.has_errors();
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
mod sink;

pub use diagnostic::{
    arity_mismatch, assembly_load_failed, assembly_not_found, cannot_infer, duplicate_declaration,
    immutability_violation, invalid_operands, not_a_type, not_a_value, not_callable,
    shadowed_import, type_mismatch, unknown_identifier, unknown_member, Diagnostic, Label,
    Severity,
};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use sink::DiagnosticSink;
