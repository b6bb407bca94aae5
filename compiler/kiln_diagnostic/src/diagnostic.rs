use std::fmt;

use kiln_ir::{FileId, Span};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A labeled span with a message.
///
/// `file` is `None` when the label points into the diagnostic's own file.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub file: Option<FileId>,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            file: None,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            file: None,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with everything needed to point the user at the problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// File the primary label points into. `None` for diagnostics about
    /// the compilation as a whole (missing assemblies).
    pub file: Option<FileId>,
    /// Labeled spans showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            file: None,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Attach the diagnostic to a source file.
    pub fn in_file(mut self, file: FileId) -> Self {
        self.file = Some(file);
        self
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label pointing into another file.
    pub fn with_secondary_label_in(
        mut self,
        file: FileId,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let mut label = Label::secondary(span, message);
        if self.file != Some(file) {
            label.file = Some(file);
        }
        self.labels.push(label);
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Get the primary span, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    /// Check if this is an error (vs warning).
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Ordering key: file, then line, then column. Diagnostics with no
    /// file sort first.
    pub(crate) fn sort_key(&self) -> (Option<FileId>, u32, u32) {
        let span = self.primary_span().unwrap_or(Span::DUMMY);
        (self.file, span.line, span.start_col)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} ")?;
            if let Some(file) = label.file.or(self.file) {
                write!(f, "file {}, ", file.index())?;
            }
            write!(f, "{:?}: {}", label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

// Helpers, one per error kind.

/// A referenced assembly was not found in any search path.
pub fn assembly_not_found(reference: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("assembly `{reference}` not found"))
}

/// A referenced assembly was found but could not be loaded.
pub fn assembly_load_failed(reference: &str, reason: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("failed to load assembly `{reference}`: {reason}"))
}

/// Two declarations with the same name in one scope.
pub fn duplicate_declaration(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message(format!("`{name}` is declared more than once in this scope"))
        .with_label(span, "duplicate declaration")
}

/// A name that resolves to nothing in scope.
pub fn unknown_identifier(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2002)
        .with_message(format!("cannot find `{name}` in this scope"))
        .with_label(span, "not found in this scope")
}

/// A member access whose member does not exist on the owner.
pub fn unknown_member(span: Span, owner: &str, member: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2002)
        .with_message(format!("`{owner}` has no member named `{member}`"))
        .with_label(span, "unknown member")
}

/// A value whose type does not fit where it is used.
pub fn type_mismatch(span: Span, expected: &str, found: &str, context: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!(
            "type mismatch in {context}: expected `{expected}`, found `{found}`"
        ))
        .with_label(span, format!("expected `{expected}`"))
}

/// An operator applied to operand types it does not accept.
pub fn invalid_operands(span: Span, op: &str, lhs: &str, rhs: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("cannot apply `{op}` to `{lhs}` and `{rhs}`"))
        .with_label(span, "incompatible operand types")
}

/// A call with the wrong number of arguments.
pub fn arity_mismatch(span: Span, callee: &str, expected: usize, found: usize) -> Diagnostic {
    let plural = if expected == 1 { "" } else { "s" };
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!(
            "`{callee}` takes {expected} argument{plural} but {found} were supplied"
        ))
        .with_label(span, format!("expected {expected} argument{plural}"))
}

/// A call whose callee is neither a function nor a type.
pub fn not_callable(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("`{found}` is not callable"))
        .with_label(span, "not a function")
}

/// A module, type or function used where a value is required.
pub fn not_a_value(span: Span, what: &str, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("expected a value, found {what} `{name}`"))
        .with_label(span, "not a value")
}

/// A type annotation naming something other than a type.
pub fn not_a_type(span: Span, what: &str, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .with_message(format!("expected a type, found {what} `{name}`"))
        .with_label(span, "not a type")
}

/// An assignment whose target cannot be written.
pub fn immutability_violation(span: Span, target: &str, reason: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2004)
        .with_message(format!("cannot assign to `{target}`"))
        .with_label(span, reason.to_string())
}

/// A declaration whose type cannot be determined.
pub fn cannot_infer(span: Span, name: &str, reason: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2005)
        .with_message(format!("cannot infer the type of `{name}`"))
        .with_label(span, reason.to_string())
        .with_note("add a type annotation")
}

/// An in-source declaration that hides a symbol imported from an assembly.
pub fn shadowed_import(span: Span, name: &str, assembly: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W2006)
        .with_message(format!(
            "`{name}` shadows the declaration imported from assembly `{assembly}`"
        ))
        .with_label(span, "this declaration takes precedence")
}

#[cfg(test)]
mod tests;
