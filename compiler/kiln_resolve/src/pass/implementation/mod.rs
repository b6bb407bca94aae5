//! Implementation pass: signatures, inference, bodies.
//!
//! # Phases
//!
//! ```text
//! A  signatures   bases, parameters, return types, annotated members
//!     ↓
//! B  inference    unannotated members, from their initializers
//!     ↓
//! C  bodies       function bodies and annotated initializers
//! ```
//!
//! Each phase covers all files before the next starts. Inference is
//! demand-driven: an expression reading a member whose type is still
//! pending infers that member first. A member reached again while its own
//! inference is running is reported once as `CannotInfer`.

mod body;

use kiln_diagnostic::{cannot_infer, not_a_type, type_mismatch, unknown_identifier, Diagnostic};
use kiln_ir::{Block, ExprId, FileId, FunctionDecl, Item, Name, SourceFile, Span, TypeDecl, TypeExpr};
use rustc_hash::FxHashMap;

use super::{report_duplicate, Pass, Session};
use crate::resolver::types::{describe, is_assignable, resolve_type_expr, TypeExprError};
use crate::{
    FunctionData, Origin, ResolveError, ScopeStack, Symbol, SymbolData, SymbolId, Ty, ValueData,
};

/// Resolves signatures and bodies, back-filling every `Unknown` type.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImplementationPass;

impl Pass for ImplementationPass {
    const NAME: &'static str = "implementation";

    #[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
    fn run(
        &mut self,
        files: &[SourceFile],
        session: &mut Session<'_>,
        assembly_name: Name,
    ) -> Result<(), ResolveError> {
        let mut checker = Checker::new(session);
        for file in files {
            let global = checker.session.table.global();
            checker.signatures(file, &file.items, global)?;
        }
        tracing::debug!(
            pending = checker.order.len(),
            bodies = checker.bodies.len(),
            "signatures resolved"
        );
        checker.infer_pending()?;
        checker.check_bodies()?;

        let session = checker.session;
        tracing::debug!(
            assembly = session.name(assembly_name),
            symbols = session.table.len(),
            typed_exprs = session.bindings.typed_expr_count(),
            "{} pass complete",
            Self::NAME
        );
        tracing::trace!(table = %session.table.dump(session.interner), "resolved symbols");
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum InferState {
    Pending,
    InProgress,
    /// A cycle was reported; the type stays `Error`.
    Failed,
    Done,
}

/// An unannotated member waiting for its initializer's type.
#[derive(Copy, Clone)]
struct PendingInit<'a> {
    file: &'a SourceFile,
    init: ExprId,
    span: Span,
    state: InferState,
}

struct BodyWork<'a> {
    file: &'a SourceFile,
    function: SymbolId,
    body: &'a Block,
}

struct InitCheck<'a> {
    file: &'a SourceFile,
    symbol: SymbolId,
    init: ExprId,
}

/// Walk state of one position inside a body or initializer.
struct Frame<'a> {
    file: &'a SourceFile,
    scopes: ScopeStack,
    /// Declared return type inside a function body.
    return_ty: Option<Ty>,
}

impl<'a> Frame<'a> {
    fn new(session: &Session<'_>, file: &'a SourceFile, scope: SymbolId, return_ty: Option<Ty>) -> Self {
        Frame {
            file,
            scopes: ScopeStack::at(&session.table, scope),
            return_ty,
        }
    }
}

struct Checker<'a, 'i> {
    session: &'a mut Session<'i>,
    pending: FxHashMap<SymbolId, PendingInit<'a>>,
    /// Pending members in declaration order.
    order: Vec<SymbolId>,
    bodies: Vec<BodyWork<'a>>,
    init_checks: Vec<InitCheck<'a>>,
}

impl<'a, 'i> Checker<'a, 'i> {
    fn new(session: &'a mut Session<'i>) -> Self {
        Checker {
            session,
            pending: FxHashMap::default(),
            order: Vec::new(),
            bodies: Vec::new(),
            init_checks: Vec::new(),
        }
    }

    fn report(&mut self, diag: Diagnostic) {
        self.session.diagnostics.push(diag);
    }

    fn describe(&self, ty: Ty) -> String {
        describe(&self.session.table, self.session.interner, ty)
    }

    /// Report a `TypeMismatch` unless `found` fits `expected`.
    fn expect_ty(&mut self, file: FileId, span: Span, expected: Ty, found: Ty, context: &str) {
        if !is_assignable(&self.session.table, expected, found) {
            let diag = type_mismatch(span, &self.describe(expected), &self.describe(found), context)
                .in_file(file);
            self.report(diag);
        }
    }

    /// Resolve a written type, reporting failures. Failed annotations are
    /// `Error`.
    fn annotation(&mut self, file: FileId, scope: SymbolId, ty: &TypeExpr) -> Ty {
        let table = &self.session.table;
        match resolve_type_expr(table, self.session.interner, scope, ty) {
            Ok(ty) => ty,
            Err(TypeExprError::Unresolved { name, span }) => {
                let diag = unknown_identifier(span, self.session.name(name)).in_file(file);
                self.report(diag);
                Ty::Error
            }
            Err(TypeExprError::NotAType { symbol, span }) => {
                let kind = table[symbol].kind().describe();
                let name = table.qualified_name(symbol, self.session.interner);
                self.report(not_a_type(span, kind, &name).in_file(file));
                Ty::Error
            }
        }
    }

    // ========================================================================
    // Phase A: Signatures
    // ========================================================================

    /// `owner` is the symbol the items were declared under.
    fn signatures(
        &mut self,
        file: &'a SourceFile,
        items: &'a [Item],
        owner: SymbolId,
    ) -> Result<(), ResolveError> {
        for item in items {
            let Some(id) = self.session.bindings.expect_decl(file.id, item.id())? else {
                // Rejected duplicates have no symbol. A rejected function is
                // still checked, unreachable by name.
                if let Item::Function(func) = item {
                    self.detached_function(file, func, owner)?;
                }
                continue;
            };
            match item {
                Item::Module(module) => self.signatures(file, &module.items, id)?,
                Item::Type(ty) => {
                    self.bases(file.id, ty, id)?;
                    self.signatures(file, &ty.members, id)?;
                }
                Item::Function(func) => self.function_signature(file, func, id)?,
                Item::Property(prop) => {
                    self.member_type(file, id, prop.ty.as_ref(), prop.init, prop.span)?;
                }
                Item::Variable(var) => {
                    self.member_type(file, id, var.ty.as_ref(), var.init, var.span)?;
                }
            }
        }
        Ok(())
    }

    fn bases(&mut self, file: FileId, ty: &TypeDecl, id: SymbolId) -> Result<(), ResolveError> {
        let scope = self.session.table.scope_of(id);
        let mut bases = Vec::with_capacity(ty.bases.len());
        for base in &ty.bases {
            match self.annotation(file, scope, base) {
                Ty::Named(base) => bases.push(base),
                Ty::Error => {}
                other => {
                    let found = self.describe(other);
                    let diag = type_mismatch(base.span, "a user-defined type", &found, "base list")
                        .in_file(file);
                    self.report(diag);
                }
            }
        }
        self.session.table.set_bases(id, bases)
    }

    fn function_signature(
        &mut self,
        file: &'a SourceFile,
        func: &'a FunctionDecl,
        id: SymbolId,
    ) -> Result<(), ResolveError> {
        let scope = self.session.table.scope_of(id);
        let origin = Origin::Source { file: file.id };
        let mut params = Vec::with_capacity(func.params.len());
        for param in &func.params {
            let ty = self.annotation(file.id, scope, &param.ty);
            let symbol = Symbol::new(
                param.name,
                origin,
                param.span,
                SymbolData::Parameter(ValueData { ty }),
            );
            match self.session.table.declare(id, symbol) {
                Ok(param_id) => self.session.bindings.bind_decl(file.id, param.id, param_id),
                Err(collision) => {
                    report_duplicate(self.session, file.id, &collision);
                    self.session.bindings.reject_decl(file.id, param.id);
                }
            }
            params.push(ty);
        }
        let ret = match &func.return_ty {
            Some(ty) => self.annotation(file.id, scope, ty),
            None => Ty::Void,
        };
        self.session.table.set_signature(id, params, ret)?;
        if let Some(body) = &func.body {
            self.bodies.push(BodyWork {
                file,
                function: id,
                body,
            });
        }
        Ok(())
    }

    /// Resolve a rejected function under an anonymous scope of `owner`, so
    /// its parameters and body are checked without it becoming visible.
    fn detached_function(
        &mut self,
        file: &'a SourceFile,
        func: &'a FunctionDecl,
        owner: SymbolId,
    ) -> Result<(), ResolveError> {
        let origin = Origin::Source { file: file.id };
        let scope = self.session.table.add_scope(owner, origin, func.span);
        let data = SymbolData::Function(FunctionData::unresolved());
        let symbol = Symbol::new(func.name, origin, func.span, data);
        let id = match self.session.table.declare(scope, symbol) {
            Ok(id) => id,
            Err(collision) => {
                return Err(ResolveError::UnexpectedCollision {
                    existing: collision.existing,
                })
            }
        };
        tracing::trace!(function = self.session.name(func.name), "checking rejected duplicate");
        self.function_signature(file, func, id)
    }

    /// Type a property or variable from its annotation, or queue it for
    /// inference.
    fn member_type(
        &mut self,
        file: &'a SourceFile,
        id: SymbolId,
        annotation: Option<&TypeExpr>,
        init: Option<ExprId>,
        span: Span,
    ) -> Result<(), ResolveError> {
        let scope = self.session.table.scope_of(id);
        match (annotation, init) {
            (Some(annotation), init) => {
                let ty = self.annotation(file.id, scope, annotation);
                self.session.table.set_value_ty(id, ty)?;
                if let Some(init) = init {
                    self.init_checks.push(InitCheck {
                        file,
                        symbol: id,
                        init,
                    });
                }
                Ok(())
            }
            (None, Some(init)) => {
                self.pending.insert(
                    id,
                    PendingInit {
                        file,
                        init,
                        span,
                        state: InferState::Pending,
                    },
                );
                self.order.push(id);
                Ok(())
            }
            (None, None) => {
                let name = self.session.name(self.session.table[id].name);
                let diag = cannot_infer(span, name, "it has no type annotation and no initializer")
                    .in_file(file.id);
                self.report(diag);
                self.session.table.set_value_ty(id, Ty::Error)
            }
        }
    }

    // ========================================================================
    // Phase B: Inference
    // ========================================================================

    fn infer_pending(&mut self) -> Result<(), ResolveError> {
        let order = std::mem::take(&mut self.order);
        for id in order {
            self.infer(id)?;
        }
        Ok(())
    }

    // ========================================================================
    // Phase C: Bodies
    // ========================================================================

    fn check_bodies(&mut self) -> Result<(), ResolveError> {
        for check in std::mem::take(&mut self.init_checks) {
            let scope = self.session.table.scope_of(check.symbol);
            let mut frame = Frame::new(self.session, check.file, scope, None);
            let found = self.value_expr(&mut frame, check.init)?;
            let expected = self.session.table[check.symbol]
                .value_ty()
                .unwrap_or(Ty::Error);
            let span = check.file.arena[check.init].span;
            self.expect_ty(check.file.id, span, expected, found, "initializer");
        }
        for work in std::mem::take(&mut self.bodies) {
            let ret = self.session.table[work.function]
                .function_data()
                .map_or(Ty::Error, |f| f.ret);
            let mut frame = Frame::new(self.session, work.file, work.function, Some(ret));
            self.block(&mut frame, work.body)?;
        }
        Ok(())
    }
}
