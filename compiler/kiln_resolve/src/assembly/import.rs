//! Merging a compiled unit's metadata into the symbol table.
//!
//! Two steps: create every public symbol with `Unknown` types, then
//! resolve the dotted type paths once the whole unit is present.

use kiln_ir::{Name, Span, StringInterner};

use super::{AssemblyMetadata, FunctionMetadata, ModuleMetadata, PropertyMetadata, TypeMetadata};
use crate::resolver::types::resolve_type_path;
use crate::{
    FunctionData, Origin, ResolveError, Symbol, SymbolData, SymbolFlags, SymbolId, SymbolTable,
    Ty, TypeData, ValueData,
};

/// A type path waiting for the whole unit to be merged.
enum Fixup<'m> {
    Bases {
        ty: SymbolId,
        paths: &'m [String],
    },
    Signature {
        function: SymbolId,
        params: Vec<(SymbolId, &'m str)>,
        ret: &'m str,
    },
    Value {
        symbol: SymbolId,
        path: &'m str,
    },
}

struct Importer<'t, 'm> {
    table: &'t mut SymbolTable,
    interner: &'t StringInterner,
    origin: Origin,
    fixups: Vec<Fixup<'m>>,
    problems: Vec<String>,
    imported: usize,
}

/// Merge `metadata` into `table`.
///
/// Returns the problems found (name conflicts, unresolvable type paths);
/// each becomes an `AssemblyLoadFailed` diagnostic. Affected types are
/// set to `Error`.
pub(crate) fn import_assembly(
    table: &mut SymbolTable,
    interner: &StringInterner,
    metadata: &AssemblyMetadata,
) -> Result<Vec<String>, ResolveError> {
    let mut importer = Importer {
        table,
        interner,
        origin: Origin::Imported {
            assembly: interner.intern(&metadata.name),
        },
        fixups: Vec::new(),
        problems: Vec::new(),
        imported: 0,
    };
    for module in &metadata.modules {
        importer.module(module);
    }
    let fixups = std::mem::take(&mut importer.fixups);
    for fixup in fixups {
        importer.resolve(fixup)?;
    }
    tracing::debug!(
        assembly = %metadata.name,
        symbols = importer.imported,
        problems = importer.problems.len(),
        "assembly imported"
    );
    Ok(importer.problems)
}

impl<'m> Importer<'_, 'm> {
    fn declare(
        &mut self,
        parent: SymbolId,
        name: &str,
        data: SymbolData,
        flags: SymbolFlags,
    ) -> Option<SymbolId> {
        let symbol = Symbol::new(self.interner.intern(name), self.origin, Span::DUMMY, data)
            .with_flags(flags | SymbolFlags::PUBLIC);
        match self.table.declare(parent, symbol) {
            Ok(id) => {
                self.imported += 1;
                Some(id)
            }
            Err(collision) => {
                let existing = self.table.qualified_name(collision.existing, self.interner);
                self.problems
                    .push(format!("`{name}` conflicts with already imported `{existing}`"));
                None
            }
        }
    }

    fn module(&mut self, module: &'m ModuleMetadata) {
        let Some(id) = self.open_path(module) else {
            return;
        };
        self.imported += 1;
        for ty in module.types.iter().filter(|t| t.public) {
            self.type_decl(id, ty);
        }
        for function in module.functions.iter().filter(|f| f.public) {
            self.function(id, function);
        }
        for property in module.properties.iter().filter(|p| p.public) {
            self.property(id, property);
        }
    }

    /// Open every segment of a module path, re-opening modules that exist.
    fn open_path(&mut self, module: &ModuleMetadata) -> Option<SymbolId> {
        let mut parent = None;
        for segment in module.segments() {
            if segment.is_empty() {
                self.problems
                    .push(format!("malformed module path `{}`", module.path));
                return None;
            }
            let name = self.interner.intern(segment);
            match self.table.open_module(parent, name, self.origin, Span::DUMMY) {
                Ok(id) => parent = Some(id),
                Err(collision) => {
                    let existing = self.table.qualified_name(collision.existing, self.interner);
                    self.problems.push(format!(
                        "module `{}` conflicts with already imported `{existing}`",
                        module.path
                    ));
                    return None;
                }
            }
        }
        parent
    }

    fn type_decl(&mut self, parent: SymbolId, ty: &'m TypeMetadata) {
        let data = SymbolData::Type(TypeData {
            kind: ty.kind,
            bases: Vec::new(),
        });
        let Some(id) = self.declare(parent, &ty.name, data, SymbolFlags::empty()) else {
            return;
        };
        if !ty.bases.is_empty() {
            self.fixups.push(Fixup::Bases {
                ty: id,
                paths: &ty.bases,
            });
        }
        for case in &ty.cases {
            let data = SymbolData::EnumCase(ValueData { ty: Ty::Named(id) });
            self.declare(id, case, data, SymbolFlags::empty());
        }
        for property in ty.properties.iter().filter(|p| p.public) {
            self.property(id, property);
        }
        for function in ty.functions.iter().filter(|f| f.public) {
            self.function(id, function);
        }
    }

    fn function(&mut self, parent: SymbolId, function: &'m FunctionMetadata) {
        let data = SymbolData::Function(FunctionData::unresolved());
        let Some(id) = self.declare(parent, &function.name, data, SymbolFlags::empty()) else {
            return;
        };
        let params = function
            .params
            .iter()
            .filter_map(|param| {
                let data = SymbolData::Parameter(ValueData::default());
                self.declare(id, &param.name, data, SymbolFlags::empty())
                    .map(|p| (p, param.ty.as_str()))
            })
            .collect();
        self.fixups.push(Fixup::Signature {
            function: id,
            params,
            ret: &function.ret,
        });
    }

    fn property(&mut self, parent: SymbolId, property: &'m PropertyMetadata) {
        let flags = if property.settable {
            SymbolFlags::MUTABLE
        } else {
            SymbolFlags::empty()
        };
        let data = SymbolData::Property(ValueData::default());
        if let Some(id) = self.declare(parent, &property.name, data, flags) {
            self.fixups.push(Fixup::Value {
                symbol: id,
                path: &property.ty,
            });
        }
    }

    // ========================================================================
    // Type paths
    // ========================================================================

    fn resolve(&mut self, fixup: Fixup<'m>) -> Result<(), ResolveError> {
        match fixup {
            Fixup::Bases { ty, paths } => {
                let bases = paths
                    .iter()
                    .filter_map(|path| self.type_path(ty, path).symbol())
                    .collect();
                self.table.set_bases(ty, bases)
            }
            Fixup::Signature {
                function,
                params,
                ret,
            } => {
                let mut param_tys = Vec::with_capacity(params.len());
                for (param, path) in params {
                    let ty = self.type_path(function, path);
                    self.table.set_value_ty(param, ty)?;
                    param_tys.push(ty);
                }
                let ret = self.type_path(function, ret);
                self.table.set_signature(function, param_tys, ret)
            }
            Fixup::Value { symbol, path } => {
                let ty = self.type_path(symbol, path);
                self.table.set_value_ty(symbol, ty)
            }
        }
    }

    /// Resolve a dotted type path as seen from `owner`'s scope.
    fn type_path(&mut self, owner: SymbolId, path: &str) -> Ty {
        let names: Vec<Name> = path.split('.').map(|s| self.interner.intern(s)).collect();
        let scope = self.table.scope_of(owner);
        match resolve_type_path(self.table, self.interner, scope, &names, Span::DUMMY) {
            Ok(ty) => ty,
            Err(_) => {
                let owner = self.table.qualified_name(owner, self.interner);
                self.problems
                    .push(format!("unresolved type `{path}` in `{owner}`"));
                Ty::Error
            }
        }
    }
}

#[cfg(test)]
mod tests;
