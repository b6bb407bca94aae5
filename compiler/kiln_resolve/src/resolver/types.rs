//! Type resolution: annotations, operator results, and compatibility.

use kiln_ir::{BinaryOp, Name, Span, StringInterner, TypeExpr, UnaryOp};

use super::expr::{resolve_path, PathError};
use crate::{SymbolId, SymbolKind, SymbolTable, Ty};

/// Why a written type did not resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeExprError {
    /// A path segment names nothing.
    Unresolved { name: Name, span: Span },
    /// The path names a symbol that is not a type.
    NotAType { symbol: SymbolId, span: Span },
}

/// Built-in type for a primitive type name.
pub fn primitive(name: &str) -> Option<Ty> {
    match name {
        "Int" => Some(Ty::Int),
        "Float" => Some(Ty::Float),
        "Bool" => Some(Ty::Bool),
        "String" => Some(Ty::Str),
        "Void" => Some(Ty::Void),
        _ => None,
    }
}

/// Resolve a type path from `scope`. Single-segment primitive names win
/// over declarations.
pub fn resolve_type_path(
    table: &SymbolTable,
    interner: &StringInterner,
    scope: SymbolId,
    path: &[Name],
    span: Span,
) -> Result<Ty, TypeExprError> {
    if let [single] = path {
        if let Some(ty) = primitive(interner.lookup(*single)) {
            return Ok(ty);
        }
    }
    let symbol = resolve_path(table, scope, path).map_err(|PathError { segment }| {
        TypeExprError::Unresolved {
            name: path.get(segment).copied().unwrap_or(Name::EMPTY),
            span,
        }
    })?;
    if table[symbol].kind() == SymbolKind::Type {
        Ok(Ty::Named(symbol))
    } else {
        Err(TypeExprError::NotAType { symbol, span })
    }
}

/// Resolve a written annotation (signature-only resolution).
pub fn resolve_type_expr(
    table: &SymbolTable,
    interner: &StringInterner,
    scope: SymbolId,
    ty: &TypeExpr,
) -> Result<Ty, TypeExprError> {
    resolve_type_path(table, interner, scope, &ty.path, ty.span)
}

/// Whether a value of type `value` may be stored where `target` is
/// expected. `Error` is compatible with everything.
pub fn is_assignable(table: &SymbolTable, target: Ty, value: Ty) -> bool {
    match (target, value) {
        (Ty::Error, _) | (_, Ty::Error) => true,
        (Ty::Named(sup), Ty::Named(sub)) => table.is_subtype(sub, sup),
        _ => target == value,
    }
}

/// Result type of a binary operator, or `None` when the operands do not
/// fit it.
pub fn binary_result(table: &SymbolTable, op: BinaryOp, lhs: Ty, rhs: Ty) -> Option<Ty> {
    if lhs.is_error() || rhs.is_error() {
        return Some(Ty::Error);
    }
    match op {
        BinaryOp::Add if lhs == Ty::Str && rhs == Ty::Str => Some(Ty::Str),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            (lhs.is_numeric() && lhs == rhs).then_some(lhs)
        }
        BinaryOp::Eq | BinaryOp::NotEq => (lhs != Ty::Void
            && (is_assignable(table, lhs, rhs) || is_assignable(table, rhs, lhs)))
        .then_some(Ty::Bool),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            ((lhs.is_numeric() || lhs == Ty::Str) && lhs == rhs).then_some(Ty::Bool)
        }
        BinaryOp::And | BinaryOp::Or => {
            (lhs == Ty::Bool && rhs == Ty::Bool).then_some(Ty::Bool)
        }
    }
}

/// Result type of a unary operator, or `None` for an unsupported operand.
pub fn unary_result(op: UnaryOp, operand: Ty) -> Option<Ty> {
    match (op, operand) {
        (_, Ty::Error) => Some(Ty::Error),
        (UnaryOp::Neg, ty) if ty.is_numeric() => Some(ty),
        (UnaryOp::Not, Ty::Bool) => Some(Ty::Bool),
        _ => None,
    }
}

/// What a unary operator accepts, for diagnostics.
pub fn unary_operand_description(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "Int or Float",
        UnaryOp::Not => "Bool",
    }
}

/// Source-level spelling of a type.
pub fn describe(table: &SymbolTable, interner: &StringInterner, ty: Ty) -> String {
    match ty {
        Ty::Unknown => "{unknown}".to_string(),
        Ty::Error => "{error}".to_string(),
        Ty::Void => "Void".to_string(),
        Ty::Bool => "Bool".to_string(),
        Ty::Int => "Int".to_string(),
        Ty::Float => "Float".to_string(),
        Ty::Str => "String".to_string(),
        Ty::Named(id) => table.qualified_name(id, interner),
    }
}
