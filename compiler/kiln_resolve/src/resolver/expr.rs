//! Identifier, path, and member-access resolution.

use kiln_ir::{ExprArena, ExprId, ExprKind, Name};

use crate::{SymbolId, SymbolKind, SymbolTable, Ty};

/// Index of the first path segment that failed to resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathError {
    pub segment: usize,
}

/// Resolve a bare identifier from `scope` outward. First match wins.
#[inline]
pub fn resolve_name(table: &SymbolTable, scope: SymbolId, name: Name) -> Option<SymbolId> {
    table.lookup(scope, name)
}

/// Member `name` reached through `owner`: a module's child, or a type's
/// member (static members and enum cases, inherited ones included).
pub fn find_member(table: &SymbolTable, owner: SymbolId, name: Name) -> Option<SymbolId> {
    match table[owner].kind() {
        SymbolKind::Module => table.find_child(owner, name),
        SymbolKind::Type => table.find_member(owner, name),
        _ => None,
    }
}

/// Member `name` of a value of type `ty`.
pub fn member_of_value(table: &SymbolTable, ty: Ty, name: Name) -> Option<SymbolId> {
    ty.symbol().and_then(|owner| table.find_member(owner, name))
}

/// Resolve a dotted path: the first segment outward from `scope`, each
/// later one as a member of the previous.
pub fn resolve_path(
    table: &SymbolTable,
    scope: SymbolId,
    path: &[Name],
) -> Result<SymbolId, PathError> {
    let (&first, rest) = path.split_first().ok_or(PathError { segment: 0 })?;
    let mut current = resolve_name(table, scope, first).ok_or(PathError { segment: 0 })?;
    for (i, &segment) in rest.iter().enumerate() {
        current = find_member(table, current, segment).ok_or(PathError { segment: i + 1 })?;
    }
    Ok(current)
}

/// Symbol an identifier, `self`, or member chain refers to, judged from
/// the table alone.
///
/// Member access on a value uses the value symbol's recorded type, so
/// this is meaningful after the implementation pass has run.
pub fn symbol_at(
    table: &SymbolTable,
    arena: &ExprArena,
    scope: SymbolId,
    expr: ExprId,
) -> Option<SymbolId> {
    match &arena.get(expr)?.kind {
        ExprKind::Ident(name) => resolve_name(table, scope, *name),
        ExprKind::SelfRef => table.enclosing_type(scope),
        ExprKind::Member { receiver, member } => {
            let owner = symbol_at(table, arena, scope, *receiver)?;
            let symbol = &table[owner];
            if symbol.kind().is_value() {
                member_of_value(table, symbol.value_ty()?, *member)
            } else {
                find_member(table, owner, *member)
            }
        }
        _ => None,
    }
}
