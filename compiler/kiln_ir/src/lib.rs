//! Kiln IR - syntax tree types consumed by the semantic front-end.
//!
//! This crate contains the data the (external) parser hands to resolution:
//! - Spans carrying line and column ranges
//! - Names for interned identifiers
//! - Declaration, statement and expression nodes
//! - Arena allocation for expressions
//! - A [`FileBuilder`] for constructing trees without a parser
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifier text becomes `Name(u32)`
//! - **Flatten Expressions**: no `Box<Expr>`, use `ExprId(u32)` indices
//! - **Stable Node Ids**: every declaration and block carries a `NodeId` so
//!   later passes can re-visit the symbol created for it
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

pub mod ast;
mod builder;
mod expr;
mod ids;
mod interner;
mod name;
mod span;

pub use ast::{
    Block, EnumCase, FunctionDecl, Item, ModuleDecl, Param, PropertyDecl, SourceFile, Stmt,
    TypeDecl, TypeDeclKind, TypeExpr, VariableDecl,
};
pub use builder::FileBuilder;
pub use expr::{BinaryOp, Expr, ExprArena, ExprKind, UnaryOp};
pub use ids::{ExprId, FileId, NodeId};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
