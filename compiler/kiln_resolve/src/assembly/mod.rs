//! Compiled-unit ("assembly") references.
//!
//! A referenced unit's public surface is an [`AssemblyMetadata`] document
//! stored as `<reference>.kasm`. [`AssemblyLoader`] finds and decodes it;
//! the assembly pass merges it into the symbol table as imported symbols.

mod import;
mod loader;
mod metadata;

pub(crate) use import::import_assembly;
pub use loader::{
    file_name, AssemblyLoader, FileSystemLoader, LoadError, MemoryLoader, ASSEMBLY_EXTENSION,
};
pub use metadata::{
    AssemblyMetadata, FunctionMetadata, ModuleMetadata, ParamMetadata, PropertyMetadata,
    TypeMetadata,
};
