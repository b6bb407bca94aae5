//! Symbol model.
//!
//! Symbols live in the [`SymbolTable`](crate::SymbolTable) arena and refer to
//! each other by [`SymbolId`]. A symbol owns its children (by id) and points
//! back at its parent.

use std::fmt;

use bitflags::bitflags;
use kiln_ir::{FileId, Name, Span, TypeDeclKind};
use serde::{Deserialize, Serialize};

/// Handle to a symbol in a [`SymbolTable`](crate::SymbolTable).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SymbolId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Kind of a type symbol.
///
/// `Unknown` is a transient state for types whose declaration has not been
/// seen yet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Struct,
    Contract,
    Enum,
    Unknown,
}

impl From<TypeDeclKind> for TypeKind {
    fn from(kind: TypeDeclKind) -> Self {
        match kind {
            TypeDeclKind::Class => TypeKind::Class,
            TypeDeclKind::Struct => TypeKind::Struct,
            TypeDeclKind::Contract => TypeKind::Contract,
            TypeDeclKind::Enum => TypeKind::Enum,
        }
    }
}

/// Where a symbol came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Origin {
    /// Declared in a source file of this compilation.
    Source { file: FileId },
    /// Loaded from a referenced compiled unit.
    Imported { assembly: Name },
    /// Created by the table itself (the `Global` module).
    Implicit,
}

impl Origin {
    pub fn is_imported(self) -> bool {
        matches!(self, Origin::Imported { .. })
    }

    pub fn file(self) -> Option<FileId> {
        match self {
            Origin::Source { file } => Some(file),
            Origin::Imported { .. } | Origin::Implicit => None,
        }
    }
}

bitflags! {
    /// Per-symbol attribute bits.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SymbolFlags: u8 {
        /// Storage may be assigned: `var` variables, settable properties.
        const MUTABLE = 1 << 0;
        /// Part of a compiled unit's exported surface.
        const PUBLIC = 1 << 1;
        /// Imported symbol hidden by an in-source declaration.
        const SHADOWED = 1 << 2;
    }
}

/// Semantic type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Ty {
    /// Not resolved yet.
    #[default]
    Unknown,
    /// Resolution failed and was reported. Compatible with every type.
    Error,
    Void,
    Bool,
    Int,
    Float,
    Str,
    /// A type symbol.
    Named(SymbolId),
}

impl Ty {
    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Ty::Unknown
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self == Ty::Error
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, Ty::Int | Ty::Float)
    }

    /// The type symbol behind a named type.
    #[inline]
    pub fn symbol(self) -> Option<SymbolId> {
        match self {
            Ty::Named(id) => Some(id),
            _ => None,
        }
    }
}

/// Payload of a type symbol.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeData {
    pub kind: TypeKind,
    /// Resolved base types, in declaration order.
    pub bases: Vec<SymbolId>,
}

/// Payload of a function symbol.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FunctionData {
    pub params: Vec<Ty>,
    pub ret: Ty,
}

impl FunctionData {
    /// Signature not resolved yet.
    pub fn unresolved() -> Self {
        FunctionData {
            params: Vec::new(),
            ret: Ty::Unknown,
        }
    }
}

/// Payload of a property, variable, parameter, or enum case.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ValueData {
    pub ty: Ty,
}

/// Kind-specific symbol payload.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SymbolData {
    Module,
    Type(TypeData),
    Function(FunctionData),
    Property(ValueData),
    Variable(ValueData),
    Parameter(ValueData),
    EnumCase(ValueData),
    /// Anonymous lexical block.
    Scope,
}

/// Symbol kind, derived from its payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Module,
    Type,
    Function,
    Property,
    Variable,
    Parameter,
    Scope,
    /// An enum case.
    Enum,
}

impl SymbolKind {
    /// Human-readable kind name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::Type => "type",
            SymbolKind::Function => "function",
            SymbolKind::Property => "property",
            SymbolKind::Variable => "variable",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Scope => "scope",
            SymbolKind::Enum => "enum case",
        }
    }

    /// Kinds that hold a value at runtime.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            SymbolKind::Property | SymbolKind::Variable | SymbolKind::Parameter | SymbolKind::Enum
        )
    }
}

/// A named, resolved program entity.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Symbol {
    pub name: Name,
    pub parent: Option<SymbolId>,
    pub children: Vec<SymbolId>,
    pub origin: Origin,
    pub flags: SymbolFlags,
    pub span: Span,
    pub data: SymbolData,
}

impl Symbol {
    /// Create a detached symbol. The table sets `parent` on insertion.
    pub fn new(name: Name, origin: Origin, span: Span, data: SymbolData) -> Self {
        Symbol {
            name,
            parent: None,
            children: Vec::new(),
            origin,
            flags: SymbolFlags::empty(),
            span,
            data,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: SymbolFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn kind(&self) -> SymbolKind {
        match self.data {
            SymbolData::Module => SymbolKind::Module,
            SymbolData::Type(_) => SymbolKind::Type,
            SymbolData::Function(_) => SymbolKind::Function,
            SymbolData::Property(_) => SymbolKind::Property,
            SymbolData::Variable(_) => SymbolKind::Variable,
            SymbolData::Parameter(_) => SymbolKind::Parameter,
            SymbolData::EnumCase(_) => SymbolKind::Enum,
            SymbolData::Scope => SymbolKind::Scope,
        }
    }

    /// Type of a value symbol.
    pub fn value_ty(&self) -> Option<Ty> {
        match &self.data {
            SymbolData::Property(v)
            | SymbolData::Variable(v)
            | SymbolData::Parameter(v)
            | SymbolData::EnumCase(v) => Some(v.ty),
            _ => None,
        }
    }

    pub fn type_data(&self) -> Option<&TypeData> {
        match &self.data {
            SymbolData::Type(data) => Some(data),
            _ => None,
        }
    }

    pub fn function_data(&self) -> Option<&FunctionData> {
        match &self.data {
            SymbolData::Function(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.flags.contains(SymbolFlags::MUTABLE)
    }

    #[inline]
    pub fn is_shadowed(&self) -> bool {
        self.flags.contains(SymbolFlags::SHADOWED)
    }

    #[inline]
    pub fn is_imported(&self) -> bool {
        self.origin.is_imported()
    }
}

#[cfg(test)]
mod tests;
