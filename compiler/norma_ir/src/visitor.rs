//! Tree Visitor
//!
//! Read-only traversal of statements and expressions. Default methods call
//! the matching `walk_*` function; override a `visit_*` method to observe
//! a node and call `walk_*` from it to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl<'ast, O> Visitor<'ast, O> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr<O>) {
//!         if expr.is_call() {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{Block, Call, CaseClause, CommClause, Expr, ExprKind, Stmt, StmtKind};

/// Tree visitor.
///
/// The visitor can mutate its own state during traversal; the tree itself
/// is immutable.
pub trait Visitor<'ast, O> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt<O>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr<O>) {
        walk_expr(self, expr);
    }

    fn visit_block(&mut self, block: &'ast Block<O>) {
        walk_block(self, block);
    }

    fn visit_call(&mut self, call: &'ast Call<O>) {
        walk_call(self, call);
    }

    fn visit_case_clause(&mut self, clause: &'ast CaseClause<O>) {
        walk_case_clause(self, clause);
    }

    fn visit_comm_clause(&mut self, clause: &'ast CommClause<O>) {
        walk_comm_clause(self, clause);
    }

    /// Opaque payloads have no children the visitor can see.
    fn visit_opaque(&mut self, payload: &'ast O) {
        let _ = payload;
    }
}

// Walk Functions
//
// Children are visited depth-first, left to right, in evaluation order
// where the construct has one (init before condition, condition before
// body, channel before value).

pub fn walk_stmts<'ast, O, V: Visitor<'ast, O> + ?Sized>(visitor: &mut V, stmts: &'ast [Stmt<O>]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_block<'ast, O, V: Visitor<'ast, O> + ?Sized>(visitor: &mut V, block: &'ast Block<O>) {
    walk_stmts(visitor, &block.stmts);
}

pub fn walk_call<'ast, O, V: Visitor<'ast, O> + ?Sized>(visitor: &mut V, call: &'ast Call<O>) {
    visitor.visit_expr(&call.func);
    for arg in &call.args {
        visitor.visit_expr(arg);
    }
}

pub fn walk_case_clause<'ast, O, V: Visitor<'ast, O> + ?Sized>(
    visitor: &mut V,
    clause: &'ast CaseClause<O>,
) {
    for value in &clause.values {
        visitor.visit_expr(value);
    }
    walk_stmts(visitor, &clause.body);
}

pub fn walk_comm_clause<'ast, O, V: Visitor<'ast, O> + ?Sized>(
    visitor: &mut V,
    clause: &'ast CommClause<O>,
) {
    if let Some(comm) = &clause.comm {
        visitor.visit_stmt(comm);
    }
    walk_stmts(visitor, &clause.body);
}

pub fn walk_stmt<'ast, O, V: Visitor<'ast, O> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt<O>) {
    match &stmt.kind {
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::If {
            init,
            cond,
            then_branch,
            else_branch,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            visitor.visit_expr(cond);
            visitor.visit_block(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        StmtKind::Switch { init, tag, clauses } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            if let Some(tag) = tag {
                visitor.visit_expr(tag);
            }
            for clause in clauses {
                visitor.visit_case_clause(clause);
            }
        }
        StmtKind::TypeSwitch {
            init,
            guard,
            clauses,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            visitor.visit_stmt(guard);
            for clause in clauses {
                visitor.visit_case_clause(clause);
            }
        }
        StmtKind::For {
            init,
            cond,
            post,
            body,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            if let Some(cond) = cond {
                visitor.visit_expr(cond);
            }
            if let Some(post) = post {
                visitor.visit_stmt(post);
            }
            visitor.visit_block(body);
        }
        StmtKind::Range {
            key,
            value,
            iter,
            body,
            ..
        } => {
            visitor.visit_expr(iter);
            if let Some(key) = key {
                visitor.visit_expr(key);
            }
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
            visitor.visit_block(body);
        }
        StmtKind::IncDec { operand, .. } => visitor.visit_expr(operand),
        StmtKind::Go(call) | StmtKind::Defer(call) => visitor.visit_call(call),
        StmtKind::Select { clauses } => {
            for clause in clauses {
                visitor.visit_comm_clause(clause);
            }
        }
        StmtKind::Send { chan, value } => {
            visitor.visit_expr(chan);
            visitor.visit_expr(value);
        }
        StmtKind::Assign { lhs, rhs, .. } => {
            for expr in lhs.iter().chain(rhs) {
                visitor.visit_expr(expr);
            }
        }
        StmtKind::VarDecl { ty, values, .. } => {
            if let Some(ty) = ty {
                visitor.visit_expr(ty);
            }
            for value in values {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Return(values) => {
            for value in values {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Labeled { stmt, .. } => visitor.visit_stmt(stmt),
        StmtKind::Branch { .. } | StmtKind::Empty => {}
        StmtKind::Opaque(payload) => visitor.visit_opaque(payload),
    }
}

pub fn walk_expr<'ast, O, V: Visitor<'ast, O> + ?Sized>(visitor: &mut V, expr: &'ast Expr<O>) {
    match &expr.kind {
        ExprKind::Ident(_) | ExprKind::BasicLit(_) => {}
        ExprKind::FuncLit { sig, body } => {
            visitor.visit_expr(sig);
            visitor.visit_block(body);
        }
        ExprKind::CompositeLit { ty, elements } => {
            if let Some(ty) = ty {
                visitor.visit_expr(ty);
            }
            for element in elements {
                if let Some(key) = &element.key {
                    visitor.visit_expr(key);
                }
                visitor.visit_expr(&element.value);
            }
        }
        ExprKind::Paren(inner) | ExprKind::Star(inner) => visitor.visit_expr(inner),
        ExprKind::Selector { base, .. } => visitor.visit_expr(base),
        ExprKind::Index { base, index } => {
            visitor.visit_expr(base);
            visitor.visit_expr(index);
        }
        ExprKind::Slice {
            base,
            low,
            high,
            max,
        } => {
            visitor.visit_expr(base);
            for bound in [low, high, max].into_iter().flatten() {
                visitor.visit_expr(bound);
            }
        }
        ExprKind::TypeAssert { base, ty } => {
            visitor.visit_expr(base);
            if let Some(ty) = ty {
                visitor.visit_expr(ty);
            }
        }
        ExprKind::Call(call) => visitor.visit_call(call),
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Opaque(payload) => visitor.visit_opaque(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AssignOp, UnaryOp};
    use crate::Name;

    struct CountCalls {
        count: usize,
    }

    impl<'ast, O> Visitor<'ast, O> for CountCalls {
        fn visit_expr(&mut self, expr: &'ast Expr<O>) {
            if expr.is_call() {
                self.count += 1;
            }
            walk_expr(self, expr);
        }
    }

    fn call(name: &str, args: Vec<Expr<()>>) -> Expr<()> {
        Expr::synthetic(ExprKind::Call(Call::new(Expr::ident(Name::source(name)), args)))
    }

    #[test]
    fn counts_nested_calls() {
        let stmts = vec![
            Stmt::assign(
                Expr::ident(Name::source("x")),
                AssignOp::Define,
                call("f", vec![call("g", vec![])]),
            ),
            Stmt::expr(Expr::unary(UnaryOp::Neg, call("h", vec![]))),
        ];
        let mut counter = CountCalls { count: 0 };
        walk_stmts(&mut counter, &stmts);
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn descends_into_function_literals() {
        let lit = Expr::synthetic(ExprKind::FuncLit {
            sig: Box::new(Expr::ident(Name::source("func()"))),
            body: Block::synthetic(vec![Stmt::expr(call("a", vec![]))]),
        });
        let mut counter = CountCalls { count: 0 };
        counter.visit_expr(&lit);
        assert_eq!(counter.count, 1);
    }
}
