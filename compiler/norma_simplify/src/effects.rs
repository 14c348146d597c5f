//! Call detection.
//!
//! A subexpression "contains a call" when evaluating it could run a call.
//! Function literals are values: building one runs nothing, so their
//! bodies are not searched.

use norma_ir::visitor::{walk_expr, Visitor};
use norma_ir::{Expr, ExprKind};

use crate::stack::ensure_sufficient_stack;

/// Whether evaluating `expr` could perform a call.
pub fn contains_call<O>(expr: &Expr<O>) -> bool {
    let mut finder = CallFinder { found: false };
    finder.visit_expr(expr);
    finder.found
}

struct CallFinder {
    found: bool,
}

impl<'ast, O> Visitor<'ast, O> for CallFinder {
    fn visit_expr(&mut self, expr: &'ast Expr<O>) {
        if self.found {
            return;
        }
        match &expr.kind {
            ExprKind::Call(_) => self.found = true,
            ExprKind::FuncLit { .. } => {}
            _ => ensure_sufficient_stack(|| walk_expr(self, expr)),
        }
    }
}
