//! Declaration and statement nodes.
//!
//! One [`SourceFile`] per input file. Declarations and blocks carry a
//! [`NodeId`]; expressions live in the file's [`ExprArena`].

use crate::{ExprArena, ExprId, FileId, Name, NodeId, Span};

/// A parsed source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub id: FileId,
    pub path: String,
    pub items: Vec<Item>,
    pub arena: ExprArena,
}

/// A declaration-shaped node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Module(ModuleDecl),
    Type(TypeDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
    Variable(VariableDecl),
}

impl Item {
    pub fn id(&self) -> NodeId {
        match self {
            Item::Module(m) => m.id,
            Item::Type(t) => t.id,
            Item::Function(f) => f.id,
            Item::Property(p) => p.id,
            Item::Variable(v) => v.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Item::Module(m) => m.span,
            Item::Type(t) => t.span,
            Item::Function(f) => f.span,
            Item::Property(p) => p.span,
            Item::Variable(v) => v.span,
        }
    }
}

/// `module Name { items }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDecl {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
    pub items: Vec<Item>,
}

/// Kind of a type declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDeclKind {
    Class,
    Struct,
    Contract,
    Enum,
}

/// `class Name : Bases { members }`, `enum Name { Cases }`, ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
    pub kind: TypeDeclKind,
    pub bases: Vec<TypeExpr>,
    pub cases: Vec<EnumCase>,
    pub members: Vec<Item>,
}

/// A case of an enum type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumCase {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
}

/// `func name(params) -> Ret { body }`
///
/// Contract members have no body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
    pub params: Vec<Param>,
    pub return_ty: Option<TypeExpr>,
    pub body: Option<Block>,
}

/// `name: Type`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
    pub ty: TypeExpr,
}

/// `prop name: Type { get; set; } = init`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
    pub ty: Option<TypeExpr>,
    pub settable: bool,
    pub init: Option<ExprId>,
}

/// `let name: Type = init` or `var name: Type = init`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    pub id: NodeId,
    pub name: Name,
    pub span: Span,
    pub ty: Option<TypeExpr>,
    pub mutable: bool,
    pub init: Option<ExprId>,
}

/// A written type annotation: `Int`, `Sys.Io.File`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    pub path: Vec<Name>,
    pub span: Span,
}

/// `{ stmts }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub id: NodeId,
    pub span: Span,
    pub stmts: Vec<Stmt>,
}

/// Statements inside a function body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Let(VariableDecl),
    Expr(ExprId),
    Return {
        value: Option<ExprId>,
        span: Span,
    },
    If {
        cond: ExprId,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        cond: ExprId,
        body: Block,
    },
    Block(Block),
}
