//! Symbol table and semantic resolution for Kiln.
//!
//! Turns parsed [`SourceFile`](kiln_ir::SourceFile)s into a resolved symbol
//! forest plus side tables that code generation reads.
//!
//! # Pass Structure
//!
//! ```text
//! AssemblyPass        referenced compiled units -> imported symbols
//!     ↓
//! DeclarationPass     every declaration, all files, types Unknown
//!     ↓
//! ImplementationPass  A: signatures  B: inference  C: bodies
//! ```
//!
//! Declaration finishes over all files before any body is looked at, so
//! source order never affects what resolves.
//!
//! # Error Handling
//!
//! Problems in user input become diagnostics in the session's
//! [`DiagnosticSink`](kiln_diagnostic::DiagnosticSink); the walk always
//! continues. [`ResolveError`] is reserved for engine defects.

pub mod assembly;
mod bindings;
mod error;
pub mod pass;
pub mod resolver;
mod scope;
mod stack;
mod symbol;
mod table;

pub use bindings::NodeBindings;
pub use error::ResolveError;
pub use pass::{AssemblyPass, DeclarationPass, ImplementationPass, Pass, Session};
pub use scope::ScopeStack;
pub use stack::ensure_sufficient_stack;
pub use symbol::{
    FunctionData, Origin, Symbol, SymbolData, SymbolFlags, SymbolId, SymbolKind, Ty, TypeData,
    TypeKind, ValueData,
};
pub use table::{Collision, SymbolTable, GLOBAL_MODULE};
