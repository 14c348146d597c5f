//! Lowering: rewrite a function body into normal form.
//!
//! The [`Simplifier`] walks statements in order and appends its output to a
//! caller-supplied `Vec<Stmt>`. Expression normalization works the same
//! way: any statement needed to pre-compute a subexpression is pushed onto
//! the current output list before the statement that uses it, so source
//! evaluation order is preserved by construction.
//!
//! # Positions
//!
//! Every expression is normalized either in a *call-allowed* position (the
//! whole expression may be a bare call, e.g. an expression statement or the
//! right side of a temporary's definition) or in an *operand* position,
//! where a call is bound to a fresh temporary and replaced by it.
//!
//! # Module layout
//!
//! - `expr`: expressions, calls, argument lists, short-circuit operators
//! - `stmt`: statement dispatch, blocks, `if`, labels, operand lists
//! - `switch`: value switches to `if`/`else` chains
//! - `type_switch`: type switch guards and init scoping
//! - `select`: channel pre-evaluation and receive-target deferral

mod expr;
mod select;
mod stmt;
mod switch;
mod type_switch;

use norma_ir::{Expr, Name, Stmt, StmtKind};

use crate::arity::ArityResolver;
use crate::options::SimplifyOptions;
use crate::temps::TempAllocator;

/// State for one simplification pass over one function body.
///
/// Function literals nested in the body share the same allocator, so
/// temporaries are unique across the whole input.
pub(crate) struct Simplifier<'a, O> {
    resolver: &'a dyn ArityResolver<O>,
    options: SimplifyOptions,
    temps: TempAllocator,
}

impl<'a, O: Clone> Simplifier<'a, O> {
    pub(crate) fn new(resolver: &'a dyn ArityResolver<O>, options: SimplifyOptions) -> Self {
        Simplifier {
            resolver,
            options,
            temps: TempAllocator::new(),
        }
    }

    pub(crate) fn temps_allocated(&self) -> u32 {
        self.temps.allocated()
    }

    /// Bind `value` to a fresh temporary (`_n := value`) and return a
    /// reference to it.
    fn bind(&mut self, value: Expr<O>, out: &mut Vec<Stmt<O>>) -> Expr<O> {
        let name = self.temps.fresh();
        tracing::trace!(temp = %name, "hoisted operand");
        out.push(Stmt::define(Expr::ident(name.clone()), value));
        Expr::ident(name)
    }

    /// Fresh temporary reference with no defining statement.
    fn fresh_temp(&mut self) -> Expr<O> {
        let name: Name = self.temps.fresh();
        Expr::ident(name)
    }
}

/// Wrap a lowered statement list as an `else` branch.
///
/// Nothing becomes no branch, a lone `if` or block is used as is, and
/// anything else is wrapped in a block.
fn into_else_branch<O>(mut stmts: Vec<Stmt<O>>) -> Option<Box<Stmt<O>>> {
    if stmts.len() == 1
        && matches!(
            stmts[0].kind,
            StmtKind::If { .. } | StmtKind::Block(_)
        )
    {
        return stmts.pop().map(Box::new);
    }
    if stmts.is_empty() {
        return None;
    }
    Some(Box::new(Stmt::block(stmts)))
}
