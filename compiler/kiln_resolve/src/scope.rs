//! Stack of enclosing scopes during a tree walk.

use kiln_ir::Name;
use smallvec::SmallVec;

use crate::{ResolveError, SymbolId, SymbolTable};

/// Enclosing scopes, innermost last.
///
/// The base is always the `Global` module and cannot be exited.
#[derive(Clone, Debug)]
pub struct ScopeStack {
    stack: SmallVec<[SymbolId; 8]>,
}

impl ScopeStack {
    /// Start a walk at the table's `Global` module.
    pub fn new(table: &SymbolTable) -> Self {
        let mut stack = SmallVec::new();
        stack.push(table.global());
        ScopeStack { stack }
    }

    /// Start a walk already inside `scope`.
    pub fn at(table: &SymbolTable, scope: SymbolId) -> Self {
        let mut scopes = Self::new(table);
        if scope != table.global() {
            scopes.enter(scope);
        }
        scopes
    }

    pub fn enter(&mut self, scope: SymbolId) {
        self.stack.push(scope);
    }

    /// Leave the innermost scope, returning it.
    pub fn exit(&mut self) -> Result<SymbolId, ResolveError> {
        if self.stack.len() <= 1 {
            return Err(ResolveError::ScopeUnderflow);
        }
        self.stack.pop().ok_or(ResolveError::ScopeUnderflow)
    }

    /// Innermost scope.
    pub fn current(&self) -> SymbolId {
        // The base is never popped.
        self.stack[self.stack.len() - 1]
    }

    /// Number of entered scopes above the base.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Outward lookup from the innermost scope.
    pub fn lookup(&self, table: &SymbolTable, name: Name) -> Option<SymbolId> {
        table.lookup(self.current(), name)
    }
}

#[cfg(test)]
mod tests;
