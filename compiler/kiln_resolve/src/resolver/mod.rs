//! Stateless resolution services.
//!
//! Each function takes the symbol table plus a scope and answers one
//! question. The implementation pass is built on them; tooling can call
//! them directly once the passes have run (e.g. resolve-at-cursor).

pub mod expr;
pub mod mutability;
pub mod types;
