//! Symbol table: arena-backed symbol forest with scoped lookup.
//!
//! # Lookup Order
//!
//! ```text
//! scope → parent → ... → root module      (innermost first; types include
//!                                           members inherited from bases)
//!     ↓ root is not Global
//! Global's children
//!     ↓
//! root module names
//! ```

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use kiln_ir::{Name, Span, StringInterner};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    ensure_sufficient_stack, Origin, ResolveError, Symbol, SymbolData, SymbolFlags, SymbolId,
    SymbolKind, Ty,
};

/// Name of the implicit root module.
pub const GLOBAL_MODULE: &str = "Global";

/// A declaration rejected because its scope already holds the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    /// The symbol already visible under that name.
    pub existing: SymbolId,
    /// The symbol that was not inserted.
    pub rejected: Box<Symbol>,
}

/// Owner of every symbol of one compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    roots: Vec<SymbolId>,
    global: SymbolId,
    /// Visible named children per scope. Shadowed imports and anonymous
    /// scopes are not indexed.
    names: FxHashMap<(SymbolId, Name), SymbolId>,
    root_names: FxHashMap<Name, SymbolId>,
}

impl SymbolTable {
    /// Create a table holding only the `Global` module.
    pub fn new(interner: &StringInterner) -> Self {
        let name = interner.intern(GLOBAL_MODULE);
        let global = SymbolId::new(0);
        let mut root_names = FxHashMap::default();
        root_names.insert(name, global);
        SymbolTable {
            symbols: vec![Symbol::new(
                name,
                Origin::Implicit,
                Span::DUMMY,
                SymbolData::Module,
            )],
            roots: vec![global],
            global,
            names: FxHashMap::default(),
            root_names,
        }
    }

    fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let index = u32::try_from(self.symbols.len())
            .unwrap_or_else(|_| panic!("symbol table exceeded {} symbols", u32::MAX));
        self.symbols.push(symbol);
        SymbolId::new(index)
    }

    fn attach(&mut self, parent: SymbolId, mut symbol: Symbol) -> SymbolId {
        symbol.parent = Some(parent);
        let indexed = symbol.kind() != SymbolKind::Scope && !symbol.name.is_empty();
        let name = symbol.name;
        let id = self.alloc(symbol);
        self[parent].children.push(id);
        if indexed {
            self.names.insert((parent, name), id);
        }
        id
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert `symbol` as the last child of `parent`.
    ///
    /// Fails when a visible sibling already carries the name; the table is
    /// left unchanged and the rejected symbol is handed back.
    pub fn declare(&mut self, parent: SymbolId, symbol: Symbol) -> Result<SymbolId, Collision> {
        if symbol.kind() != SymbolKind::Scope {
            if let Some(existing) = self.visible_sibling(parent, symbol.name) {
                return Err(Collision {
                    existing,
                    rejected: Box::new(symbol),
                });
            }
        }
        Ok(self.attach(parent, symbol))
    }

    /// Visible symbol named `name` directly under `parent`. Children of
    /// `Global` and root modules share one namespace.
    fn visible_sibling(&self, parent: SymbolId, name: Name) -> Option<SymbolId> {
        if let Some(&existing) = self.names.get(&(parent, name)) {
            return Some(existing);
        }
        if parent == self.global {
            return self.find_root(name).filter(|&root| root != self.global);
        }
        None
    }

    /// Insert an anonymous block scope under `parent`.
    pub fn add_scope(&mut self, parent: SymbolId, origin: Origin, span: Span) -> SymbolId {
        self.attach(
            parent,
            Symbol::new(Name::EMPTY, origin, span, SymbolData::Scope),
        )
    }

    /// Open a module, re-opening an existing module of the same name.
    ///
    /// `parent` of `None` opens a root module.
    pub fn open_module(
        &mut self,
        parent: Option<SymbolId>,
        name: Name,
        origin: Origin,
        span: Span,
    ) -> Result<SymbolId, Collision> {
        let module = Symbol::new(name, origin, span, SymbolData::Module);
        let Some(parent) = parent else {
            if let Some(&existing) = self.root_names.get(&name) {
                return Ok(existing);
            }
            if let Some(&existing) = self.names.get(&(self.global, name)) {
                if self[existing].kind() == SymbolKind::Module {
                    return Ok(existing);
                }
                return Err(Collision {
                    existing,
                    rejected: Box::new(module),
                });
            }
            let id = self.alloc(module);
            self.roots.push(id);
            self.root_names.insert(name, id);
            return Ok(id);
        };
        match self.declare(parent, module) {
            Err(collision) if self[collision.existing].kind() == SymbolKind::Module => {
                Ok(collision.existing)
            }
            result => result,
        }
    }

    /// Hide an imported symbol from name lookup. It stays owned by its
    /// parent.
    pub fn shadow(&mut self, id: SymbolId) {
        let symbol = &mut self[id];
        symbol.flags |= SymbolFlags::SHADOWED;
        let (parent, name) = (symbol.parent, symbol.name);
        match parent {
            Some(parent) => {
                if self.names.get(&(parent, name)) == Some(&id) {
                    self.names.remove(&(parent, name));
                }
            }
            None => {
                if self.root_names.get(&name) == Some(&id) {
                    self.root_names.remove(&name);
                }
            }
        }
    }

    // ========================================================================
    // Back-filling
    // ========================================================================

    pub fn try_get(&self, id: SymbolId) -> Result<&Symbol, ResolveError> {
        self.symbols
            .get(id.index())
            .ok_or(ResolveError::DanglingSymbol(id))
    }

    fn try_get_mut(&mut self, id: SymbolId) -> Result<&mut Symbol, ResolveError> {
        self.symbols
            .get_mut(id.index())
            .ok_or(ResolveError::DanglingSymbol(id))
    }

    /// Set the type of a property, variable, parameter, or enum case.
    pub fn set_value_ty(&mut self, id: SymbolId, ty: Ty) -> Result<(), ResolveError> {
        match &mut self.try_get_mut(id)?.data {
            SymbolData::Property(v)
            | SymbolData::Variable(v)
            | SymbolData::Parameter(v)
            | SymbolData::EnumCase(v) => {
                v.ty = ty;
                Ok(())
            }
            _ => Err(ResolveError::KindMismatch {
                symbol: id,
                expected: "value",
            }),
        }
    }

    /// Set a function's parameter and return types.
    pub fn set_signature(
        &mut self,
        id: SymbolId,
        params: Vec<Ty>,
        ret: Ty,
    ) -> Result<(), ResolveError> {
        match &mut self.try_get_mut(id)?.data {
            SymbolData::Function(f) => {
                f.params = params;
                f.ret = ret;
                Ok(())
            }
            _ => Err(ResolveError::KindMismatch {
                symbol: id,
                expected: "function",
            }),
        }
    }

    /// Set a type's resolved bases.
    pub fn set_bases(&mut self, id: SymbolId, bases: Vec<SymbolId>) -> Result<(), ResolveError> {
        match &mut self.try_get_mut(id)?.data {
            SymbolData::Type(t) => {
                t.bases = bases;
                Ok(())
            }
            _ => Err(ResolveError::KindMismatch {
                symbol: id,
                expected: "type",
            }),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The implicit `Global` module.
    #[inline]
    pub fn global(&self) -> SymbolId {
        self.global
    }

    /// Root modules, `Global` first.
    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: `Global` exists from construction.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// All symbols in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        (0u32..).map(SymbolId::new).zip(self.symbols.iter())
    }

    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        self.get(id).and_then(|s| s.parent)
    }

    /// The scope a declaration's own annotations resolve in: its parent, or
    /// `Global` for root modules.
    pub fn scope_of(&self, id: SymbolId) -> SymbolId {
        self.parent(id).unwrap_or(self.global)
    }

    /// `id` followed by each enclosing symbol up to its root.
    pub fn ancestors(&self, id: SymbolId) -> impl Iterator<Item = SymbolId> + '_ {
        std::iter::successors(Some(id), move |&current| self.parent(current))
    }

    /// Visible child of `scope` named `name`.
    #[inline]
    pub fn find_child(&self, scope: SymbolId, name: Name) -> Option<SymbolId> {
        self.names.get(&(scope, name)).copied()
    }

    pub fn find_root(&self, name: Name) -> Option<SymbolId> {
        self.root_names.get(&name).copied()
    }

    /// Member of `owner` named `name`. For types, members inherited from
    /// base types are found too (nearest base first).
    pub fn find_member(&self, owner: SymbolId, name: Name) -> Option<SymbolId> {
        let mut visited: SmallVec<[SymbolId; 8]> = SmallVec::new();
        self.find_member_inner(owner, name, &mut visited)
    }

    fn find_member_inner(
        &self,
        owner: SymbolId,
        name: Name,
        visited: &mut SmallVec<[SymbolId; 8]>,
    ) -> Option<SymbolId> {
        if visited.contains(&owner) {
            return None;
        }
        visited.push(owner);
        if let Some(found) = self.find_child(owner, name) {
            return Some(found);
        }
        let bases = self.get(owner)?.type_data()?.bases.clone();
        bases
            .into_iter()
            .find_map(|base| self.find_member_inner(base, name, visited))
    }

    /// Outward lookup from `scope`; first match wins.
    pub fn lookup(&self, scope: SymbolId, name: Name) -> Option<SymbolId> {
        let mut root = scope;
        for id in self.ancestors(scope) {
            if let Some(found) = self.find_member(id, name) {
                return Some(found);
            }
            root = id;
        }
        self.lookup_outside(root, name)
    }

    /// The part of lookup past a root module: `Global`'s children (unless
    /// the walk already ended in `Global`), then root module names.
    pub fn lookup_outside(&self, root: SymbolId, name: Name) -> Option<SymbolId> {
        if root != self.global {
            if let Some(found) = self.find_child(self.global, name) {
                return Some(found);
            }
        }
        self.find_root(name)
    }

    /// Children of `scope` with the given kind, in insertion order.
    /// Shadowed imports are included.
    pub fn children_of_kind(
        &self,
        scope: SymbolId,
        kind: SymbolKind,
    ) -> impl Iterator<Item = SymbolId> + '_ {
        self.get(scope)
            .map(|s| s.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(move |&child| self[child].kind() == kind)
    }

    /// Nearest enclosing type symbol, including `scope` itself.
    pub fn enclosing_type(&self, scope: SymbolId) -> Option<SymbolId> {
        self.ancestors(scope)
            .find(|&id| self[id].kind() == SymbolKind::Type)
    }

    /// Whether type `sub` is `sup` or derives from it.
    pub fn is_subtype(&self, sub: SymbolId, sup: SymbolId) -> bool {
        let mut stack: SmallVec<[SymbolId; 8]> = SmallVec::new();
        let mut visited: SmallVec<[SymbolId; 8]> = SmallVec::new();
        stack.push(sub);
        while let Some(current) = stack.pop() {
            if current == sup {
                return true;
            }
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            if let Some(data) = self.get(current).and_then(Symbol::type_data) {
                stack.extend(data.bases.iter().copied());
            }
        }
        false
    }

    /// Dotted path from the root, e.g. `Sys.Io.File`. Symbols under
    /// `Global` are written without a prefix; block scopes are skipped.
    pub fn qualified_name(&self, id: SymbolId, interner: &StringInterner) -> String {
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .filter(|&a| a != self.global && !self[a].name.is_empty())
            .map(|a| interner.lookup(self[a].name))
            .collect();
        parts.reverse();
        parts.join(".")
    }

    /// Indented listing of the whole forest, for logs and test failures.
    pub fn dump(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.dump_symbol(&mut out, root, 0, interner);
        }
        out
    }

    fn dump_symbol(&self, out: &mut String, id: SymbolId, depth: usize, interner: &StringInterner) {
        let symbol = &self[id];
        let name = if symbol.name.is_empty() {
            "{}"
        } else {
            interner.lookup(symbol.name)
        };
        let _ = write!(
            out,
            "{:indent$}{} {}",
            "",
            symbol.kind().describe(),
            name,
            indent = depth * 2
        );
        if let Some(ty) = symbol.value_ty() {
            let _ = write!(out, ": {ty:?}");
        }
        if symbol.is_imported() {
            out.push_str(" [imported]");
        }
        if symbol.is_shadowed() {
            out.push_str(" [shadowed]");
        }
        out.push('\n');
        for &child in &symbol.children {
            ensure_sufficient_stack(|| self.dump_symbol(out, child, depth + 1, interner));
        }
    }
}

impl Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    #[inline]
    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}

impl IndexMut<SymbolId> for SymbolTable {
    #[inline]
    fn index_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }
}

#[cfg(test)]
mod tests;
