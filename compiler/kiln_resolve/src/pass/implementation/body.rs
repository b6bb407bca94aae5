//! Expression and statement resolution, plus demand-driven inference.

use kiln_diagnostic::{
    arity_mismatch, cannot_infer, immutability_violation, invalid_operands, not_a_value,
    not_callable, type_mismatch, unknown_identifier, unknown_member,
};
use kiln_ir::{BinaryOp, Block, ExprId, ExprKind, Name, Span, Stmt, UnaryOp, VariableDecl};

use super::{Checker, Frame, InferState};
use crate::pass::report_duplicate;
use crate::resolver::expr::{find_member, member_of_value};
use crate::resolver::mutability::{check_assignable, Immutability};
use crate::resolver::types::{binary_result, unary_operand_description, unary_result};
use crate::{
    ensure_sufficient_stack, Origin, ResolveError, Symbol, SymbolData, SymbolFlags, SymbolId,
    SymbolKind, Ty, ValueData,
};

/// What an expression denotes. Only `Value` may appear where a value is
/// expected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Operand {
    Value(Ty),
    Module(SymbolId),
    Type(SymbolId),
    Function(SymbolId),
}

impl<'a> Checker<'a, '_> {
    // ========================================================================
    // Inference
    // ========================================================================

    /// Type of an unannotated member, inferring it from its initializer on
    /// first use.
    pub(super) fn infer(&mut self, id: SymbolId) -> Result<Ty, ResolveError> {
        let Some(pending) = self.pending.get(&id).copied() else {
            return Ok(self.known_ty(id));
        };
        match pending.state {
            InferState::Done | InferState::Failed => Ok(self.known_ty(id)),
            InferState::InProgress => {
                self.set_state(id, InferState::Failed);
                let name = self.session.name(self.session.table[id].name);
                let diag = cannot_infer(pending.span, name, "its initializer depends on its own value")
                    .in_file(pending.file.id);
                self.report(diag);
                self.session.table.set_value_ty(id, Ty::Error)?;
                Ok(Ty::Error)
            }
            InferState::Pending => {
                self.set_state(id, InferState::InProgress);
                let scope = self.session.table.scope_of(id);
                let mut frame = Frame::new(self.session, pending.file, scope, None);
                let found = self.value_expr(&mut frame, pending.init)?;
                // A cycle through this member was reported while its
                // initializer was resolved.
                if self.pending.get(&id).map(|p| p.state) == Some(InferState::Failed) {
                    return Ok(Ty::Error);
                }
                let ty = if found == Ty::Void {
                    let name = self.session.name(self.session.table[id].name);
                    let diag = cannot_infer(pending.span, name, "its initializer has no value")
                        .in_file(pending.file.id);
                    self.report(diag);
                    Ty::Error
                } else {
                    found
                };
                tracing::trace!(symbol = ?id, ?ty, "inferred");
                self.session.table.set_value_ty(id, ty)?;
                self.set_state(id, InferState::Done);
                Ok(ty)
            }
        }
    }

    fn set_state(&mut self, id: SymbolId, state: InferState) {
        if let Some(pending) = self.pending.get_mut(&id) {
            pending.state = state;
        }
    }

    /// Recorded type of a value symbol; anything unresolved reads as
    /// `Error`.
    fn known_ty(&self, id: SymbolId) -> Ty {
        match self.session.table[id].value_ty() {
            Some(Ty::Unknown) | None => Ty::Error,
            Some(ty) => ty,
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Resolve a block in a fresh scope under the current one.
    pub(super) fn block(&mut self, frame: &mut Frame<'a>, block: &Block) -> Result<(), ResolveError> {
        let file = frame.file.id;
        let scope = self
            .session
            .table
            .add_scope(frame.scopes.current(), Origin::Source { file }, block.span);
        self.session.bindings.bind_decl(file, block.id, scope);
        frame.scopes.enter(scope);
        for stmt in &block.stmts {
            self.stmt(frame, stmt)?;
        }
        frame.scopes.exit()?;
        Ok(())
    }

    fn stmt(&mut self, frame: &mut Frame<'a>, stmt: &Stmt) -> Result<(), ResolveError> {
        match stmt {
            Stmt::Let(var) => self.local(frame, var)?,
            Stmt::Expr(expr) => {
                self.expr(frame, *expr)?;
            }
            Stmt::Return { value, span } => {
                let expected = frame.return_ty.unwrap_or(Ty::Void);
                let (found, at) = match value {
                    Some(value) => (self.value_expr(frame, *value)?, frame.file.arena[*value].span),
                    None => (Ty::Void, *span),
                };
                self.expect_ty(frame.file.id, at, expected, found, "return value");
            }
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                self.condition(frame, *cond)?;
                self.block(frame, then_block)?;
                if let Some(else_block) = else_block {
                    self.block(frame, else_block)?;
                }
            }
            Stmt::While { cond, body } => {
                self.condition(frame, *cond)?;
                self.block(frame, body)?;
            }
            Stmt::Block(block) => self.block(frame, block)?,
        }
        Ok(())
    }

    fn condition(&mut self, frame: &mut Frame<'a>, cond: ExprId) -> Result<(), ResolveError> {
        let found = self.value_expr(frame, cond)?;
        let span = frame.file.arena[cond].span;
        self.expect_ty(frame.file.id, span, Ty::Bool, found, "condition");
        Ok(())
    }

    /// `let`/`var` inside a body. The initializer is resolved before the
    /// local is declared, so it cannot see itself.
    fn local(&mut self, frame: &mut Frame<'a>, var: &VariableDecl) -> Result<(), ResolveError> {
        let file = frame.file.id;
        let scope = frame.scopes.current();
        let declared = var.ty.as_ref().map(|ty| self.annotation(file, scope, ty));
        let init = match var.init {
            Some(init) => Some((init, self.value_expr(frame, init)?)),
            None => None,
        };
        let name = self.session.name(var.name);
        let ty = match (declared, init) {
            (Some(ty), Some((init, found))) => {
                let span = frame.file.arena[init].span;
                self.expect_ty(file, span, ty, found, "initializer");
                ty
            }
            (Some(ty), None) => ty,
            (None, Some((_, Ty::Void))) => {
                let diag = cannot_infer(var.span, name, "its initializer has no value").in_file(file);
                self.report(diag);
                Ty::Error
            }
            (None, Some((_, found))) => found,
            (None, None) => {
                let diag = cannot_infer(var.span, name, "it has no type annotation and no initializer")
                    .in_file(file);
                self.report(diag);
                Ty::Error
            }
        };

        let flags = if var.mutable {
            SymbolFlags::MUTABLE
        } else {
            SymbolFlags::empty()
        };
        let data = SymbolData::Variable(ValueData { ty });
        let symbol = Symbol::new(var.name, Origin::Source { file }, var.span, data).with_flags(flags);
        match self.session.table.declare(scope, symbol) {
            Ok(id) => self.session.bindings.bind_decl(file, var.id, id),
            Err(collision) => {
                report_duplicate(self.session, file, &collision);
                self.session.bindings.reject_decl(file, var.id);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Resolve an expression expected to produce a value.
    pub(super) fn value_expr(&mut self, frame: &mut Frame<'a>, id: ExprId) -> Result<Ty, ResolveError> {
        let symbol = match self.expr(frame, id)? {
            Operand::Value(ty) => return Ok(ty),
            Operand::Module(symbol) | Operand::Type(symbol) | Operand::Function(symbol) => symbol,
        };
        let table = &self.session.table;
        let what = table[symbol].kind().describe();
        let name = table.qualified_name(symbol, self.session.interner);
        let span = frame.file.arena[id].span;
        self.report(not_a_value(span, what, &name).in_file(frame.file.id));
        Ok(Ty::Error)
    }

    /// Resolve any expression and record its type.
    fn expr(&mut self, frame: &mut Frame<'a>, id: ExprId) -> Result<Operand, ResolveError> {
        let operand = ensure_sufficient_stack(|| self.expr_inner(frame, id))?;
        let ty = match operand {
            Operand::Value(ty) => ty,
            Operand::Type(ty) => Ty::Named(ty),
            Operand::Function(func) => self.session.table[func]
                .function_data()
                .map_or(Ty::Error, |f| f.ret),
            Operand::Module(_) => Ty::Void,
        };
        self.session.bindings.set_expr_type(frame.file.id, id, ty);
        Ok(operand)
    }

    fn expr_inner(&mut self, frame: &mut Frame<'a>, id: ExprId) -> Result<Operand, ResolveError> {
        let file = frame.file;
        let expr = &file.arena[id];
        let span = expr.span;
        match &expr.kind {
            ExprKind::Int(_) => Ok(Operand::Value(Ty::Int)),
            ExprKind::Float(_) => Ok(Operand::Value(Ty::Float)),
            ExprKind::Bool(_) => Ok(Operand::Value(Ty::Bool)),
            ExprKind::Str(_) => Ok(Operand::Value(Ty::Str)),
            ExprKind::Ident(name) => self.ident(frame, id, *name, span),
            ExprKind::SelfRef => {
                let Some(owner) = self.session.table.enclosing_type(frame.scopes.current()) else {
                    self.report(unknown_identifier(span, "self").in_file(file.id));
                    return Ok(Operand::Value(Ty::Error));
                };
                self.session.bindings.bind_expr(file.id, id, owner);
                Ok(Operand::Value(Ty::Named(owner)))
            }
            ExprKind::Member { receiver, member } => {
                self.member(frame, id, *receiver, *member, span)
            }
            ExprKind::Call { callee, args } => self.call(frame, *callee, args, span),
            ExprKind::Unary { op, operand } => self.unary(frame, *op, *operand, span),
            ExprKind::Binary { op, lhs, rhs } => self.binary(frame, *op, *lhs, *rhs, span),
            ExprKind::Assign { target, value } => self.assign(frame, *target, *value, span),
            ExprKind::Error => Ok(Operand::Value(Ty::Error)),
        }
    }

    fn ident(
        &mut self,
        frame: &mut Frame<'a>,
        id: ExprId,
        name: Name,
        span: Span,
    ) -> Result<Operand, ResolveError> {
        let Some(symbol) = frame.scopes.lookup(&self.session.table, name) else {
            let diag = unknown_identifier(span, self.session.name(name)).in_file(frame.file.id);
            self.report(diag);
            return Ok(Operand::Value(Ty::Error));
        };
        self.session.bindings.bind_expr(frame.file.id, id, symbol);
        self.operand_of(symbol)
    }

    /// What a resolved symbol denotes in an expression.
    fn operand_of(&mut self, symbol: SymbolId) -> Result<Operand, ResolveError> {
        let sym = &self.session.table[symbol];
        Ok(match sym.kind() {
            SymbolKind::Module => Operand::Module(symbol),
            SymbolKind::Type => Operand::Type(symbol),
            SymbolKind::Function => Operand::Function(symbol),
            SymbolKind::Scope => Operand::Value(Ty::Error),
            SymbolKind::Property
            | SymbolKind::Variable
            | SymbolKind::Parameter
            | SymbolKind::Enum => match sym.value_ty() {
                Some(Ty::Unknown) | None => Operand::Value(self.infer(symbol)?),
                Some(ty) => Operand::Value(ty),
            },
        })
    }

    fn member(
        &mut self,
        frame: &mut Frame<'a>,
        id: ExprId,
        receiver: ExprId,
        member: Name,
        span: Span,
    ) -> Result<Operand, ResolveError> {
        let owner = self.expr(frame, receiver)?;
        let table = &self.session.table;
        let interner = self.session.interner;
        let (found, owner_name) = match owner {
            Operand::Value(Ty::Error) => return Ok(Operand::Value(Ty::Error)),
            Operand::Value(ty) => (member_of_value(table, ty, member), self.describe(ty)),
            Operand::Module(owner) | Operand::Type(owner) => (
                find_member(table, owner, member),
                table.qualified_name(owner, interner),
            ),
            Operand::Function(owner) => (None, table.qualified_name(owner, interner)),
        };
        let Some(symbol) = found else {
            let diag = unknown_member(span, &owner_name, self.session.name(member))
                .in_file(frame.file.id);
            self.report(diag);
            return Ok(Operand::Value(Ty::Error));
        };
        self.session.bindings.bind_expr(frame.file.id, id, symbol);
        self.operand_of(symbol)
    }

    fn call(
        &mut self,
        frame: &mut Frame<'a>,
        callee: ExprId,
        args: &[ExprId],
        span: Span,
    ) -> Result<Operand, ResolveError> {
        let callee = self.expr(frame, callee)?;
        let mut found = Vec::with_capacity(args.len());
        for &arg in args {
            found.push((arg, self.value_expr(frame, arg)?));
        }
        let file = frame.file;
        match callee {
            Operand::Function(func) => {
                let Some(signature) = self.session.table[func].function_data().cloned() else {
                    return Ok(Operand::Value(Ty::Error));
                };
                if signature.params.len() == found.len() {
                    for (&expected, &(arg, ty)) in signature.params.iter().zip(&found) {
                        self.expect_ty(file.id, file.arena[arg].span, expected, ty, "argument");
                    }
                } else {
                    let name = self.session.table.qualified_name(func, self.session.interner);
                    let diag = arity_mismatch(span, &name, signature.params.len(), found.len())
                        .in_file(file.id);
                    self.report(diag);
                }
                Ok(Operand::Value(signature.ret))
            }
            // Calling a type constructs a value of it.
            Operand::Type(ty) => Ok(Operand::Value(Ty::Named(ty))),
            Operand::Value(Ty::Error) => Ok(Operand::Value(Ty::Error)),
            Operand::Value(ty) => {
                let found = self.describe(ty);
                self.report(not_callable(span, &found).in_file(file.id));
                Ok(Operand::Value(Ty::Error))
            }
            Operand::Module(module) => {
                let name = self.session.table.qualified_name(module, self.session.interner);
                self.report(not_callable(span, &name).in_file(file.id));
                Ok(Operand::Value(Ty::Error))
            }
        }
    }

    fn unary(
        &mut self,
        frame: &mut Frame<'a>,
        op: UnaryOp,
        operand: ExprId,
        span: Span,
    ) -> Result<Operand, ResolveError> {
        let found = self.value_expr(frame, operand)?;
        if let Some(ty) = unary_result(op, found) {
            return Ok(Operand::Value(ty));
        }
        let context = format!("operand of `{}`", op.as_symbol());
        let diag = type_mismatch(span, unary_operand_description(op), &self.describe(found), &context)
            .in_file(frame.file.id);
        self.report(diag);
        Ok(Operand::Value(Ty::Error))
    }

    fn binary(
        &mut self,
        frame: &mut Frame<'a>,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        span: Span,
    ) -> Result<Operand, ResolveError> {
        let left = self.value_expr(frame, lhs)?;
        let right = self.value_expr(frame, rhs)?;
        if let Some(ty) = binary_result(&self.session.table, op, left, right) {
            return Ok(Operand::Value(ty));
        }
        let diag = invalid_operands(span, op.as_symbol(), &self.describe(left), &self.describe(right))
            .in_file(frame.file.id);
        self.report(diag);
        Ok(Operand::Value(Ty::Error))
    }

    fn assign(
        &mut self,
        frame: &mut Frame<'a>,
        target: ExprId,
        value: ExprId,
        span: Span,
    ) -> Result<Operand, ResolveError> {
        let file = frame.file;
        let target_op = self.expr(frame, target)?;
        let target_kind = &file.arena[target].kind;
        let failure = if target_kind.is_place() {
            self.session
                .bindings
                .expr_symbol(file.id, target)
                .and_then(|symbol| check_assignable(&self.session.table, symbol).err())
        } else {
            Some(Immutability::NotAPlace)
        };
        if let Some(failure) = failure {
            let text = match target_kind {
                ExprKind::Ident(name) | ExprKind::Member { member: name, .. } => {
                    self.session.name(*name)
                }
                _ => "expression",
            };
            let diag = immutability_violation(span, text, &failure.reason()).in_file(file.id);
            self.report(diag);
        }

        let target_ty = match target_op {
            Operand::Value(ty) => ty,
            Operand::Module(_) | Operand::Type(_) | Operand::Function(_) => Ty::Error,
        };
        let found = self.value_expr(frame, value)?;
        self.expect_ty(file.id, file.arena[value].span, target_ty, found, "assignment");
        Ok(Operand::Value(Ty::Void))
    }
}
