//! Shared tree builders for unit tests.
//!
//! Trees use `String` as the opaque payload so rendered output can carry
//! pass-through text like `var d int`.

use norma_ir::{
    render_stmts, AssignOp, BinaryOp, Block, BranchKind, Call, CaseClause, CommClause, Element,
    Expr, ExprKind, Ident, Name, Span, Stmt, StmtKind, UnaryOp,
};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use crate::{simplify_with, ArityResolver, NoArity, SimplifyError, SimplifyOptions};

pub(crate) type E = Expr<String>;
pub(crate) type S = Stmt<String>;

// Expressions

pub(crate) fn id(name: &str) -> E {
    Expr::ident(Name::source(name))
}

pub(crate) fn lit(text: &str) -> E {
    Expr::synthetic(ExprKind::BasicLit(text.into()))
}

pub(crate) fn call(func: E, args: Vec<E>) -> E {
    Expr::synthetic(ExprKind::Call(Call::new(func, args)))
}

/// `name()`
pub(crate) fn call0(name: &str) -> E {
    call(id(name), Vec::new())
}

/// Give `expr` a distinct position, for resolvers keyed on spans.
pub(crate) fn at(mut expr: E, start: u32) -> E {
    expr.span = Span::new(start, start + 1);
    expr
}

pub(crate) fn paren(inner: E) -> E {
    Expr::paren(inner)
}

pub(crate) fn star(inner: E) -> E {
    Expr::synthetic(ExprKind::Star(Box::new(inner)))
}

pub(crate) fn neg(operand: E) -> E {
    Expr::unary(UnaryOp::Neg, operand)
}

pub(crate) fn not(operand: E) -> E {
    Expr::unary(UnaryOp::Not, operand)
}

pub(crate) fn addr(operand: E) -> E {
    Expr::unary(UnaryOp::Addr, operand)
}

pub(crate) fn recv(chan: E) -> E {
    Expr::unary(UnaryOp::Recv, chan)
}

pub(crate) fn add(left: E, right: E) -> E {
    Expr::binary(BinaryOp::Add, left, right)
}

pub(crate) fn eq(left: E, right: E) -> E {
    Expr::binary(BinaryOp::Eq, left, right)
}

pub(crate) fn and(left: E, right: E) -> E {
    Expr::binary(BinaryOp::And, left, right)
}

pub(crate) fn or(left: E, right: E) -> E {
    Expr::binary(BinaryOp::Or, left, right)
}

pub(crate) fn sel(base: E, field: &str) -> E {
    Expr::synthetic(ExprKind::Selector {
        base: Box::new(base),
        field: Ident::synthetic(field),
    })
}

pub(crate) fn index(base: E, index: E) -> E {
    Expr::synthetic(ExprKind::Index {
        base: Box::new(base),
        index: Box::new(index),
    })
}

pub(crate) fn slice(base: E, low: Option<E>, high: Option<E>, max: Option<E>) -> E {
    Expr::synthetic(ExprKind::Slice {
        base: Box::new(base),
        low: low.map(Box::new),
        high: high.map(Box::new),
        max: max.map(Box::new),
    })
}

/// `base.(ty)`, or `base.(type)` for `None`.
pub(crate) fn assert_type(base: E, ty: Option<E>) -> E {
    Expr::synthetic(ExprKind::TypeAssert {
        base: Box::new(base),
        ty: ty.map(Box::new),
    })
}

pub(crate) fn composite(ty: Option<E>, elements: Vec<(Option<E>, E)>) -> E {
    Expr::synthetic(ExprKind::CompositeLit {
        ty: ty.map(Box::new),
        elements: elements
            .into_iter()
            .map(|(key, value)| Element { key, value })
            .collect(),
    })
}

/// `func() { body }`
pub(crate) fn func_lit(body: Vec<S>) -> E {
    Expr::synthetic(ExprKind::FuncLit {
        sig: Box::new(Expr::synthetic(ExprKind::Opaque("func()".to_owned()))),
        body: Block::synthetic(body),
    })
}

// Statements

pub(crate) fn expr_stmt(expr: E) -> S {
    Stmt::expr(expr)
}

pub(crate) fn define(lhs: E, rhs: E) -> S {
    Stmt::define(lhs, rhs)
}

pub(crate) fn assign(lhs: E, rhs: E) -> S {
    Stmt::assign(lhs, AssignOp::Assign, rhs)
}

pub(crate) fn assign_many(lhs: Vec<E>, op: AssignOp, rhs: Vec<E>) -> S {
    Stmt::synthetic(StmtKind::Assign { lhs, op, rhs })
}

pub(crate) fn if_stmt(init: Option<S>, cond: E, then_branch: Vec<S>, else_branch: Option<S>) -> S {
    Stmt::synthetic(StmtKind::If {
        init: init.map(Box::new),
        cond,
        then_branch: Block::synthetic(then_branch),
        else_branch: else_branch.map(Box::new),
    })
}

pub(crate) fn block(stmts: Vec<S>) -> S {
    Stmt::block(stmts)
}

pub(crate) fn case(values: Vec<E>, body: Vec<S>) -> CaseClause<String> {
    CaseClause {
        values,
        body,
        span: Span::DUMMY,
    }
}

pub(crate) fn default_case(body: Vec<S>) -> CaseClause<String> {
    case(Vec::new(), body)
}

pub(crate) fn switch(init: Option<S>, tag: Option<E>, clauses: Vec<CaseClause<String>>) -> S {
    Stmt::synthetic(StmtKind::Switch {
        init: init.map(Box::new),
        tag,
        clauses,
    })
}

pub(crate) fn type_switch(init: Option<S>, guard: S, clauses: Vec<CaseClause<String>>) -> S {
    Stmt::synthetic(StmtKind::TypeSwitch {
        init: init.map(Box::new),
        guard: Box::new(guard),
        clauses,
    })
}

pub(crate) fn for_stmt(cond: Option<E>, body: Vec<S>) -> S {
    Stmt::synthetic(StmtKind::For {
        init: None,
        cond,
        post: None,
        body: Block::synthetic(body),
    })
}

pub(crate) fn range_stmt(key: E, iter: E, body: Vec<S>) -> S {
    Stmt::synthetic(StmtKind::Range {
        key: Some(key),
        value: None,
        define: true,
        iter,
        body: Block::synthetic(body),
    })
}

pub(crate) fn comm(comm: Option<S>, body: Vec<S>) -> CommClause<String> {
    CommClause {
        comm: comm.map(Box::new),
        body,
        span: Span::DUMMY,
    }
}

pub(crate) fn select(clauses: Vec<CommClause<String>>) -> S {
    Stmt::synthetic(StmtKind::Select { clauses })
}

pub(crate) fn send(chan: E, value: E) -> S {
    Stmt::synthetic(StmtKind::Send { chan, value })
}

pub(crate) fn inc(operand: E) -> S {
    Stmt::synthetic(StmtKind::IncDec {
        operand,
        op: norma_ir::IncDecOp::Inc,
    })
}

fn as_call(expr: E) -> Call<String> {
    match expr.kind {
        ExprKind::Call(call) => call,
        other => Call::new(Expr::synthetic(other), Vec::new()),
    }
}

pub(crate) fn go(call: E) -> S {
    Stmt::synthetic(StmtKind::Go(as_call(call)))
}

pub(crate) fn defer(call: E) -> S {
    Stmt::synthetic(StmtKind::Defer(as_call(call)))
}

pub(crate) fn ret(values: Vec<E>) -> S {
    Stmt::synthetic(StmtKind::Return(values))
}

pub(crate) fn var_decl(name: &str, values: Vec<E>) -> S {
    Stmt::synthetic(StmtKind::VarDecl {
        names: vec![Ident::synthetic(name)],
        ty: None,
        values,
    })
}

pub(crate) fn branch(kind: BranchKind, label: Option<&str>) -> S {
    Stmt::synthetic(StmtKind::Branch {
        kind,
        label: label.map(Ident::synthetic),
    })
}

pub(crate) fn fallthrough() -> S {
    branch(BranchKind::Fallthrough, None)
}

pub(crate) fn labeled(label: &str, stmt: S) -> S {
    Stmt::synthetic(StmtKind::Labeled {
        label: Ident::synthetic(label),
        stmt: Box::new(stmt),
    })
}

pub(crate) fn opaque(text: &str) -> S {
    Stmt::synthetic(StmtKind::Opaque(text.to_owned()))
}

// Resolvers

/// Arity by call position; unknown calls are single-valued.
#[derive(Default)]
pub(crate) struct SpanArity {
    arities: FxHashMap<Span, usize>,
}

impl SpanArity {
    pub(crate) fn with(mut self, start: u32, arity: usize) -> Self {
        self.arities.insert(Span::new(start, start + 1), arity);
        self
    }
}

impl ArityResolver<String> for SpanArity {
    fn result_arity(&self, call: &E) -> usize {
        self.arities.get(&call.span).copied().unwrap_or(1)
    }
}

// Assertions

fn options() -> SimplifyOptions {
    SimplifyOptions::default().with_validate(true)
}

pub(crate) fn run(
    body: Vec<S>,
    resolver: &dyn ArityResolver<String>,
    options: SimplifyOptions,
) -> Result<String, SimplifyError> {
    simplify_with(body, resolver, options).map(|out| render_stmts(&out))
}

/// Simplify `body` and compare the rendering; then simplify the output
/// again and check nothing changes.
pub(crate) fn assert_simplifies(body: Vec<S>, expected: &str) {
    assert_simplifies_with(body, &NoArity, options(), expected);
}

pub(crate) fn assert_simplifies_with(
    body: Vec<S>,
    resolver: &dyn ArityResolver<String>,
    options: SimplifyOptions,
    expected: &str,
) {
    let first = match simplify_with(body, resolver, options) {
        Ok(out) => out,
        Err(err) => panic!("simplify failed: {err}"),
    };
    assert_eq!(render_stmts(&first), expected);

    let second = match simplify_with(first.clone(), resolver, options) {
        Ok(out) => out,
        Err(err) => panic!("re-simplify failed: {err}"),
    };
    assert_eq!(second, first, "simplifying the output changed it");
}
