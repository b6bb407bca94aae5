//! Side tables linking syntax nodes to symbols and types.
//!
//! The syntax tree is never mutated; everything resolution learns about a
//! node is recorded here, keyed by file.

use kiln_ir::{ExprId, FileId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{ResolveError, SymbolId, Ty};

/// Node-to-symbol and expression-to-type mappings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeBindings {
    decls: FxHashMap<(FileId, NodeId), SymbolId>,
    /// Declarations rejected as duplicates. They have no symbol.
    rejected: FxHashSet<(FileId, NodeId)>,
    expr_symbols: FxHashMap<(FileId, ExprId), SymbolId>,
    expr_types: FxHashMap<(FileId, ExprId), Ty>,
}

impl NodeBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_decl(&mut self, file: FileId, node: NodeId, symbol: SymbolId) {
        self.decls.insert((file, node), symbol);
    }

    pub fn reject_decl(&mut self, file: FileId, node: NodeId) {
        self.rejected.insert((file, node));
    }

    /// Symbol of a declaration or block node.
    pub fn decl(&self, file: FileId, node: NodeId) -> Option<SymbolId> {
        self.decls.get(&(file, node)).copied()
    }

    /// Symbol of a declaration the declaration walk must have seen.
    ///
    /// `Ok(None)` for a rejected duplicate, an error if the node was
    /// never visited.
    pub fn expect_decl(&self, file: FileId, node: NodeId) -> Result<Option<SymbolId>, ResolveError> {
        if let Some(symbol) = self.decl(file, node) {
            return Ok(Some(symbol));
        }
        if self.rejected.contains(&(file, node)) {
            return Ok(None);
        }
        Err(ResolveError::MissingBinding { file, node })
    }

    pub fn bind_expr(&mut self, file: FileId, expr: ExprId, symbol: SymbolId) {
        self.expr_symbols.insert((file, expr), symbol);
    }

    /// Symbol an identifier or member access resolved to.
    pub fn expr_symbol(&self, file: FileId, expr: ExprId) -> Option<SymbolId> {
        self.expr_symbols.get(&(file, expr)).copied()
    }

    pub fn set_expr_type(&mut self, file: FileId, expr: ExprId, ty: Ty) {
        self.expr_types.insert((file, expr), ty);
    }

    pub fn expr_type(&self, file: FileId, expr: ExprId) -> Option<Ty> {
        self.expr_types.get(&(file, expr)).copied()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn typed_expr_count(&self) -> usize {
        self.expr_types.len()
    }
}
