//! Which storage locations may be assigned.
//!
//! Decided from the target symbol's kind and flags alone; types play no
//! part.

use crate::{SymbolId, SymbolKind, SymbolTable};

/// Why an assignment target cannot be written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Immutability {
    /// `let` variable.
    Constant,
    /// Property without a setter.
    ReadOnlyProperty,
    Parameter,
    EnumCase,
    /// Module, type, or function.
    NotStorage(SymbolKind),
    /// The target expression is not an identifier or member access.
    NotAPlace,
}

impl Immutability {
    pub fn reason(self) -> String {
        match self {
            Immutability::Constant => "variable declared with `let` is immutable".to_string(),
            Immutability::ReadOnlyProperty => "property has no setter".to_string(),
            Immutability::Parameter => "parameters are immutable".to_string(),
            Immutability::EnumCase => "enum cases are constants".to_string(),
            Immutability::NotStorage(kind) => format!("a {} is not storage", kind.describe()),
            Immutability::NotAPlace => "expression is not assignable".to_string(),
        }
    }
}

/// Check that `symbol` names a writable storage location.
pub fn check_assignable(table: &SymbolTable, symbol: SymbolId) -> Result<(), Immutability> {
    let sym = &table[symbol];
    match sym.kind() {
        SymbolKind::Variable if sym.is_mutable() => Ok(()),
        SymbolKind::Variable => Err(Immutability::Constant),
        SymbolKind::Property if sym.is_mutable() => Ok(()),
        SymbolKind::Property => Err(Immutability::ReadOnlyProperty),
        SymbolKind::Parameter => Err(Immutability::Parameter),
        SymbolKind::Enum => Err(Immutability::EnumCase),
        kind @ (SymbolKind::Module
        | SymbolKind::Type
        | SymbolKind::Function
        | SymbolKind::Scope) => Err(Immutability::NotStorage(kind)),
    }
}
