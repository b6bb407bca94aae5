//! Declaration pass: one symbol per declaration, all files, no bodies.
//!
//! Runs to completion before any signature or body is resolved, so a
//! reference may name anything declared anywhere, in any order.

use kiln_ir::{FileId, Item, Name, NodeId, SourceFile};

use super::{settle_collision, Pass, Session};
use crate::{
    FunctionData, Origin, ResolveError, ScopeStack, Symbol, SymbolData, SymbolFlags, SymbolId,
    Ty, TypeData, ValueData,
};

/// Declares every module, type, enum case, function, property and
/// variable with `Unknown` types.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclarationPass;

impl Pass for DeclarationPass {
    const NAME: &'static str = "declaration";

    #[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
    fn run(
        &mut self,
        files: &[SourceFile],
        session: &mut Session<'_>,
        assembly_name: Name,
    ) -> Result<(), ResolveError> {
        for file in files {
            let mut scopes = ScopeStack::new(&session.table);
            declare_items(session, file.id, &file.items, &mut scopes)?;
        }
        tracing::debug!(
            assembly = session.name(assembly_name),
            symbols = session.table.len(),
            "{} pass complete",
            Self::NAME
        );
        Ok(())
    }
}

/// Insert `symbol` under the current scope and record the node binding.
fn declare(
    session: &mut Session<'_>,
    file: FileId,
    node: NodeId,
    parent: SymbolId,
    symbol: Symbol,
) -> Option<SymbolId> {
    let id = match session.table.declare(parent, symbol) {
        Ok(id) => Some(id),
        Err(collision) => settle_collision(session, file, parent, collision),
    };
    match id {
        Some(id) => session.bindings.bind_decl(file, node, id),
        None => session.bindings.reject_decl(file, node),
    }
    id
}

fn declare_items(
    session: &mut Session<'_>,
    file: FileId,
    items: &[Item],
    scopes: &mut ScopeStack,
) -> Result<(), ResolveError> {
    let origin = Origin::Source { file };
    for item in items {
        let parent = scopes.current();
        match item {
            Item::Module(module) => {
                // Modules directly in a file are roots.
                let outer = (parent != session.table.global()).then_some(parent);
                let id = match session
                    .table
                    .open_module(outer, module.name, origin, module.span)
                {
                    Ok(id) => Some(id),
                    Err(collision) => settle_collision(session, file, parent, collision),
                };
                let Some(id) = id else {
                    session.bindings.reject_decl(file, module.id);
                    continue;
                };
                session.bindings.bind_decl(file, module.id, id);
                scopes.enter(id);
                declare_items(session, file, &module.items, scopes)?;
                scopes.exit()?;
            }
            Item::Type(ty) => {
                let data = SymbolData::Type(TypeData {
                    kind: ty.kind.into(),
                    bases: Vec::new(),
                });
                let symbol = Symbol::new(ty.name, origin, ty.span, data);
                let Some(id) = declare(session, file, ty.id, parent, symbol) else {
                    continue;
                };
                for case in &ty.cases {
                    let data = SymbolData::EnumCase(ValueData { ty: Ty::Named(id) });
                    let symbol = Symbol::new(case.name, origin, case.span, data);
                    declare(session, file, case.id, id, symbol);
                }
                scopes.enter(id);
                declare_items(session, file, &ty.members, scopes)?;
                scopes.exit()?;
            }
            Item::Function(func) => {
                let data = SymbolData::Function(FunctionData::unresolved());
                let symbol = Symbol::new(func.name, origin, func.span, data);
                declare(session, file, func.id, parent, symbol);
            }
            Item::Property(prop) => {
                let flags = if prop.settable {
                    SymbolFlags::MUTABLE
                } else {
                    SymbolFlags::empty()
                };
                let data = SymbolData::Property(ValueData::default());
                let symbol = Symbol::new(prop.name, origin, prop.span, data).with_flags(flags);
                declare(session, file, prop.id, parent, symbol);
            }
            Item::Variable(var) => {
                let flags = if var.mutable {
                    SymbolFlags::MUTABLE
                } else {
                    SymbolFlags::empty()
                };
                let data = SymbolData::Variable(ValueData::default());
                let symbol = Symbol::new(var.name, origin, var.span, data).with_flags(flags);
                declare(session, file, var.id, parent, symbol);
            }
        }
    }
    Ok(())
}
