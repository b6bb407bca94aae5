//! Programmatic construction of syntax trees.
//!
//! The front-end never parses text itself. Tools that synthesise code, and
//! the test suites of the resolution crates, build trees through
//! [`FileBuilder`], which allocates expressions, numbers declaration nodes
//! and stamps positions the way the parser would.

use crate::{
    BinaryOp, Block, EnumCase, Expr, ExprArena, ExprId, ExprKind, FileId, FunctionDecl, Item,
    ModuleDecl, Name, NodeId, Param, PropertyDecl, SourceFile, Span, Stmt, StringInterner,
    TypeDecl, TypeDeclKind, TypeExpr, UnaryOp, VariableDecl,
};

/// Builder for one [`SourceFile`].
///
/// Positions come from a cursor set with [`FileBuilder::at`]; every node
/// created afterwards starts at that line and column.
pub struct FileBuilder<'i> {
    interner: &'i StringInterner,
    id: FileId,
    path: String,
    arena: ExprArena,
    next_node: u32,
    line: u32,
    col: u32,
}

impl<'i> FileBuilder<'i> {
    pub fn new(interner: &'i StringInterner, id: FileId, path: impl Into<String>) -> Self {
        FileBuilder {
            interner,
            id,
            path: path.into(),
            arena: ExprArena::new(),
            next_node: 0,
            line: 1,
            col: 1,
        }
    }

    /// Move the position cursor.
    pub fn at(&mut self, line: u32, col: u32) -> &mut Self {
        self.line = line;
        self.col = col;
        self
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    fn node(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        id
    }

    fn span(&self, width: usize) -> Span {
        let width = u32::try_from(width).unwrap_or(u32::MAX - self.col);
        Span::new(self.line, self.col, self.col + width.max(1))
    }

    fn expr(&mut self, kind: ExprKind, width: usize) -> ExprId {
        let span = self.span(width);
        self.arena.alloc(Expr::new(kind, span))
    }

    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.get(id).map_or(Span::DUMMY, |e| e.span)
    }

    // Expressions

    pub fn int(&mut self, value: i64) -> ExprId {
        self.expr(ExprKind::Int(value), value.to_string().len())
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::float(value), value.to_string().len())
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value), if value { 4 } else { 5 })
    }

    pub fn string(&mut self, text: &str) -> ExprId {
        let name = self.name(text);
        self.expr(ExprKind::Str(name), text.len() + 2)
    }

    pub fn ident(&mut self, text: &str) -> ExprId {
        let name = self.name(text);
        self.expr(ExprKind::Ident(name), text.len())
    }

    pub fn self_ref(&mut self) -> ExprId {
        self.expr(ExprKind::SelfRef, 4)
    }

    pub fn member(&mut self, receiver: ExprId, member: &str) -> ExprId {
        let name = self.name(member);
        let span = self.expr_span(receiver);
        let width = span.len() as usize + 1 + member.len();
        self.expr(ExprKind::Member { receiver, member: name }, width)
    }

    /// A dotted access chain: `a.b.c`.
    pub fn path(&mut self, path: &str) -> ExprId {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let mut expr = self.ident(first);
        for segment in segments {
            expr = self.member(expr, segment);
        }
        expr
    }

    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>) -> ExprId {
        let width = self.expr_span(callee).len() as usize + 2;
        self.expr(ExprKind::Call { callee, args }, width)
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self.expr_span(lhs).merge(self.expr_span(rhs));
        self.arena
            .alloc(Expr::new(ExprKind::Binary { op, lhs, rhs }, span))
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        let width = self.expr_span(operand).len() as usize + 1;
        self.expr(ExprKind::Unary { op, operand }, width)
    }

    pub fn assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        let span = self.expr_span(target).merge(self.expr_span(value));
        self.arena
            .alloc(Expr::new(ExprKind::Assign { target, value }, span))
    }

    pub fn error_expr(&mut self) -> ExprId {
        self.expr(ExprKind::Error, 1)
    }

    // Types

    pub fn ty(&self, path: &str) -> TypeExpr {
        TypeExpr {
            path: path.split('.').map(|s| self.name(s)).collect(),
            span: self.span(path.len()),
        }
    }

    // Declarations

    pub fn module(&mut self, name: &str, items: Vec<Item>) -> Item {
        Item::Module(ModuleDecl {
            id: self.node(),
            name: self.name(name),
            span: self.span(name.len()),
            items,
        })
    }

    pub fn type_decl(
        &mut self,
        kind: TypeDeclKind,
        name: &str,
        bases: &[&str],
        members: Vec<Item>,
    ) -> Item {
        Item::Type(TypeDecl {
            id: self.node(),
            name: self.name(name),
            span: self.span(name.len()),
            kind,
            bases: bases.iter().map(|b| self.ty(b)).collect(),
            cases: Vec::new(),
            members,
        })
    }

    pub fn class(&mut self, name: &str, members: Vec<Item>) -> Item {
        self.type_decl(TypeDeclKind::Class, name, &[], members)
    }

    pub fn enum_decl(&mut self, name: &str, cases: &[&str], members: Vec<Item>) -> Item {
        let id = self.node();
        let cases = cases
            .iter()
            .map(|case| EnumCase {
                id: self.node(),
                name: self.name(case),
                span: self.span(case.len()),
            })
            .collect();
        Item::Type(TypeDecl {
            id,
            name: self.name(name),
            span: self.span(name.len()),
            kind: TypeDeclKind::Enum,
            bases: Vec::new(),
            cases,
            members,
        })
    }

    pub fn param(&mut self, name: &str, ty: &str) -> Param {
        Param {
            id: self.node(),
            name: self.name(name),
            span: self.span(name.len()),
            ty: self.ty(ty),
        }
    }

    pub fn function(
        &mut self,
        name: &str,
        params: Vec<Param>,
        return_ty: Option<&str>,
        body: Option<Block>,
    ) -> Item {
        Item::Function(FunctionDecl {
            id: self.node(),
            name: self.name(name),
            span: self.span(name.len()),
            params,
            return_ty: return_ty.map(|t| self.ty(t)),
            body,
        })
    }

    pub fn property(
        &mut self,
        name: &str,
        ty: Option<&str>,
        settable: bool,
        init: Option<ExprId>,
    ) -> Item {
        Item::Property(PropertyDecl {
            id: self.node(),
            name: self.name(name),
            span: self.span(name.len()),
            ty: ty.map(|t| self.ty(t)),
            settable,
            init,
        })
    }

    fn variable_decl(
        &mut self,
        name: &str,
        ty: Option<&str>,
        mutable: bool,
        init: Option<ExprId>,
    ) -> VariableDecl {
        VariableDecl {
            id: self.node(),
            name: self.name(name),
            span: self.span(name.len()),
            ty: ty.map(|t| self.ty(t)),
            mutable,
            init,
        }
    }

    pub fn variable(
        &mut self,
        name: &str,
        ty: Option<&str>,
        mutable: bool,
        init: Option<ExprId>,
    ) -> Item {
        Item::Variable(self.variable_decl(name, ty, mutable, init))
    }

    // Statements

    /// `let name: ty = init`
    pub fn let_stmt(&mut self, name: &str, ty: Option<&str>, init: Option<ExprId>) -> Stmt {
        Stmt::Let(self.variable_decl(name, ty, false, init))
    }

    /// `var name: ty = init`
    pub fn var_stmt(&mut self, name: &str, ty: Option<&str>, init: Option<ExprId>) -> Stmt {
        Stmt::Let(self.variable_decl(name, ty, true, init))
    }

    pub fn ret(&mut self, value: Option<ExprId>) -> Stmt {
        Stmt::Return {
            value,
            span: self.span(6),
        }
    }

    pub fn block(&mut self, stmts: Vec<Stmt>) -> Block {
        Block {
            id: self.node(),
            span: self.span(1),
            stmts,
        }
    }

    pub fn finish(self, items: Vec<Item>) -> SourceFile {
        SourceFile {
            id: self.id,
            path: self.path,
            items,
            arena: self.arena,
        }
    }
}
