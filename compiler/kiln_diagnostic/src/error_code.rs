//! Error codes for front-end diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2002`) with the first digit
//! indicating the phase that reports it.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Assembly reference errors
/// - E2xxx: Declaration and implementation resolution errors
/// - W2xxx: Resolution warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Assembly Errors (E1xxx)
    /// Referenced assembly not found in any search path
    E1001,
    /// Assembly located but its metadata could not be read
    E1002,

    // Resolution Errors (E2xxx)
    /// Duplicate declaration in one scope
    E2001,
    /// Unresolved identifier or member
    E2002,
    /// Type mismatch
    E2003,
    /// Assignment to an immutable location
    E2004,
    /// Type cannot be inferred
    E2005,

    // Resolution Warnings (W2xxx)
    /// In-source declaration shadows an imported symbol
    W2006,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::W2006,
    ];

    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::W2006 => "W2006",
        }
    }

    /// Short kind name, matching the error taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "AssemblyNotFound",
            ErrorCode::E1002 => "AssemblyLoadFailed",
            ErrorCode::E2001 => "DuplicateDeclaration",
            ErrorCode::E2002 => "UnresolvedIdentifier",
            ErrorCode::E2003 => "TypeMismatch",
            ErrorCode::E2004 => "ImmutabilityViolation",
            ErrorCode::E2005 => "CannotInfer",
            ErrorCode::W2006 => "ShadowedImport",
        }
    }

    /// Check if this is a warning code (W-prefix).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
