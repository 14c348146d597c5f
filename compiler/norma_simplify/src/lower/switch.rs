//! Value switch lowering.
//!
//! ```text
//! switch init; tag { case a, b: x; default: y }
//! ```
//!
//! becomes
//!
//! ```text
//! switch {
//! default:
//!     init
//!     _1 := tag
//!     if _1 == (a) || _1 == (b) { x } else { y }
//! }
//! ```
//!
//! The single-clause wrapper keeps the construct a `break` target and
//! scopes the init and the tag temporary. Fallthrough is removed first by
//! copying bodies forward, and the default clause always ends the chain.

use norma_ir::{BinaryOp, Block, CaseClause, Expr, Name, Span, Stmt, StmtKind};
use smallvec::SmallVec;

use super::{into_else_branch, Simplifier};
use crate::error::SimplifyError;

impl<O: Clone> Simplifier<'_, O> {
    pub(super) fn lower_switch(
        &mut self,
        init: Option<Box<Stmt<O>>>,
        tag: Option<Expr<O>>,
        clauses: Vec<CaseClause<O>>,
        span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        let clauses = flatten_clauses(clauses);
        let clause_count = clauses.len();

        let mut body = Vec::new();
        if let Some(init) = init {
            self.normalize_stmt(*init, &mut body)?;
        }

        // Without a tag every case value is compared against `true`.
        let subject = match tag {
            Some(tag) => {
                let tag = self.normalize_expr(tag, &mut body, true)?;
                self.bind(tag, &mut body)
            }
            None => Expr::ident(Name::source("true")),
        };

        let chain = self.switch_to_if_else(&subject, clauses.into_iter())?;
        body.extend(chain);

        tracing::debug!(clauses = clause_count, "lowered switch");
        out.push(Stmt::new(
            StmtKind::Switch {
                init: None,
                tag: None,
                clauses: vec![CaseClause {
                    values: Vec::new(),
                    body,
                    span: Span::DUMMY,
                }],
            },
            span,
        ));
        Ok(())
    }

    /// Build the `if`/`else` chain for the remaining clauses. Each
    /// condition's pre-computation goes into that level's own list, so it
    /// only runs once the earlier conditions have failed.
    fn switch_to_if_else(
        &mut self,
        subject: &Expr<O>,
        mut clauses: std::vec::IntoIter<CaseClause<O>>,
    ) -> Result<Vec<Stmt<O>>, SimplifyError> {
        let Some(clause) = clauses.next() else {
            return Ok(Vec::new());
        };
        let CaseClause { values, body, span } = clause;

        let Some(cond) = disjunction(subject, values) else {
            // Default clause; flattening put it last.
            return self.normalize_list(body);
        };

        let mut stmts = Vec::new();
        let cond = self.normalize_operand(cond, &mut stmts)?;
        let then_branch = Block::new(self.normalize_list(body)?, span);
        let else_branch = into_else_branch(self.switch_to_if_else(subject, clauses)?);
        stmts.push(Stmt::new(
            StmtKind::If {
                init: None,
                cond,
                then_branch,
                else_branch,
            },
            span,
        ));
        Ok(stmts)
    }
}

/// `subject == (v1) || subject == (v2) || ...`, or `None` for the default
/// clause.
fn disjunction<O: Clone>(subject: &Expr<O>, values: Vec<Expr<O>>) -> Option<Expr<O>> {
    values
        .into_iter()
        .rev()
        .map(|value| Expr::binary(BinaryOp::Eq, subject.clone(), Expr::paren(value)))
        .reduce(|rest, cond| Expr::binary(BinaryOp::Or, cond, rest))
}

/// Remove `fallthrough` by appending each clause's body to every clause
/// still falling into it, then move the default clause to the end.
///
/// Bodies are copied, not shared, so the result is a plain tree.
fn flatten_clauses<O: Clone>(clauses: Vec<CaseClause<O>>) -> Vec<CaseClause<O>> {
    let mut flattened: Vec<CaseClause<O>> = Vec::with_capacity(clauses.len());
    // Clauses whose body is still open to the next clause's.
    let mut open: SmallVec<[usize; 4]> = SmallVec::new();

    for CaseClause {
        values,
        mut body,
        span,
    } in clauses
    {
        let falls_through = body.last().is_some_and(Stmt::is_fallthrough);
        if falls_through {
            body.pop();
        }

        open.push(flattened.len());
        flattened.push(CaseClause {
            values,
            body: Vec::new(),
            span,
        });
        for &index in &open {
            flattened[index].body.extend(body.iter().cloned());
        }

        if !falls_through {
            open.clear();
        }
    }

    if let Some(position) = flattened.iter().position(CaseClause::is_default) {
        let default = flattened.remove(position);
        flattened.push(default);
    }
    flattened
}
