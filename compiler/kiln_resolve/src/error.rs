use kiln_ir::{FileId, NodeId};
use thiserror::Error;

use crate::SymbolId;

/// Internal failure of the resolution engine.
///
/// These indicate a bug in a pass, not a problem in the program being
/// compiled. Problems in the program are reported as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("scope stack underflow: cannot exit the global scope")]
    ScopeUnderflow,

    #[error("symbol handle {0:?} does not refer to a symbol")]
    DanglingSymbol(SymbolId),

    #[error("symbol {symbol:?} is not a {expected} symbol")]
    KindMismatch {
        symbol: SymbolId,
        expected: &'static str,
    },

    #[error("fresh scope already holds symbol {existing:?}")]
    UnexpectedCollision { existing: SymbolId },

    #[error("declaration node {node:?} in {file:?} was never bound to a symbol")]
    MissingBinding { file: FileId, node: NodeId },
}
