//! On-disk description of a compiled unit's public surface.
//!
//! Type references are dotted paths (`"Int"`, `"Sys.Io.File"`), resolved
//! only after the whole unit has been merged so members may refer to each
//! other in any order.
//!
//! Modules are listed flat, each under its dotted path, so decoding never
//! recurses on module nesting.

use serde::{Deserialize, Serialize};

use crate::TypeKind;

/// A compiled unit's exported modules.
///
/// Enclosing modules of a path (`Sys` for `Sys.Io`) are opened even when
/// they have no entry of their own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    pub name: String,
    pub modules: Vec<ModuleMetadata>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Dotted module path, e.g. `Sys.Io`.
    pub path: String,
    pub types: Vec<TypeMetadata>,
    pub functions: Vec<FunctionMetadata>,
    pub properties: Vec<PropertyMetadata>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    pub name: String,
    pub kind: TypeKind,
    pub public: bool,
    pub bases: Vec<String>,
    pub properties: Vec<PropertyMetadata>,
    pub functions: Vec<FunctionMetadata>,
    /// Enum cases; empty for other kinds.
    pub cases: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub name: String,
    pub public: bool,
    pub params: Vec<ParamMetadata>,
    pub ret: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamMetadata {
    pub name: String,
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub name: String,
    pub public: bool,
    pub ty: String,
    pub settable: bool,
}

impl AssemblyMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        AssemblyMetadata {
            name: name.into(),
            modules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_module(mut self, module: ModuleMetadata) -> Self {
        self.modules.push(module);
        self
    }

    /// Encode to the `.kasm` wire format.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from the `.kasm` wire format.
    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl ModuleMetadata {
    pub fn new(path: impl Into<String>) -> Self {
        ModuleMetadata {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeMetadata) -> Self {
        self.types.push(ty);
        self
    }

    #[must_use]
    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }
}

impl TypeMetadata {
    /// A public type with no members.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeMetadata {
            name: name.into(),
            kind,
            public: true,
            bases: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            cases: Vec::new(),
        }
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    #[must_use]
    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.cases.push(case.into());
        self
    }
}

impl FunctionMetadata {
    /// A public function with no parameters.
    pub fn new(name: impl Into<String>, ret: impl Into<String>) -> Self {
        FunctionMetadata {
            name: name.into(),
            public: true,
            params: Vec::new(),
            ret: ret.into(),
        }
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(ParamMetadata {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }
}

impl PropertyMetadata {
    /// A public, read-only property.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        PropertyMetadata {
            name: name.into(),
            public: true,
            ty: ty.into(),
            settable: false,
        }
    }

    #[must_use]
    pub fn settable(mut self) -> Self {
        self.settable = true;
        self
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }
}

#[cfg(test)]
mod tests;
