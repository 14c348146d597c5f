//! Type switch lowering.
//!
//! A type switch stays a type switch. Only the asserted operand is
//! normalized, and an init statement is scoped with a surrounding block:
//!
//! ```text
//! switch x := a(); v := f(x).(type) { ... }
//! ```
//!
//! becomes
//!
//! ```text
//! { x := a(); _1 := f(x); switch v := _1.(type) { ... } }
//! ```
//!
//! Clause order is kept and clause values are type operands, so clauses
//! only have their bodies normalized.

use norma_ir::{CaseClause, Expr, ExprKind, Span, Stmt, StmtKind};

use super::Simplifier;
use crate::error::SimplifyError;

impl<O: Clone> Simplifier<'_, O> {
    pub(super) fn lower_type_switch(
        &mut self,
        init: Option<Box<Stmt<O>>>,
        guard: Stmt<O>,
        clauses: Vec<CaseClause<O>>,
        span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        if let Some(init) = init {
            let mut scope = Vec::new();
            self.normalize_stmt(*init, &mut scope)?;
            self.lower_type_switch(None, guard, clauses, span, &mut scope)?;
            out.push(Stmt::block(scope));
            return Ok(());
        }

        let guard = self.normalize_guard(guard, out)?;

        let mut lowered = Vec::with_capacity(clauses.len());
        for CaseClause { values, body, span } in clauses {
            lowered.push(CaseClause {
                values,
                body: self.normalize_list(body)?,
                span,
            });
        }

        out.push(Stmt::new(
            StmtKind::TypeSwitch {
                init: None,
                guard: Box::new(guard),
                clauses: lowered,
            },
            span,
        ));
        Ok(())
    }

    /// `x.(type)` or `v := x.(type)`.
    fn normalize_guard(
        &mut self,
        guard: Stmt<O>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Stmt<O>, SimplifyError> {
        let Stmt { kind, span } = guard;
        match kind {
            StmtKind::Expr(assertion) => {
                let assertion = self.normalize_assertion(assertion, span, out)?;
                Ok(Stmt::new(StmtKind::Expr(assertion), span))
            }
            StmtKind::Assign { lhs, op, rhs } if lhs.len() == 1 => {
                let Ok([assertion]) = <[Expr<O>; 1]>::try_from(rhs) else {
                    return Err(SimplifyError::UnexpectedTypeSwitchGuard { span });
                };
                let assertion = self.normalize_assertion(assertion, span, out)?;
                Ok(Stmt::new(
                    StmtKind::Assign {
                        lhs,
                        op,
                        rhs: vec![assertion],
                    },
                    span,
                ))
            }
            _ => Err(SimplifyError::UnexpectedTypeSwitchGuard { span }),
        }
    }

    fn normalize_assertion(
        &mut self,
        assertion: Expr<O>,
        guard_span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Expr<O>, SimplifyError> {
        let Expr { kind, span } = assertion;
        let ExprKind::TypeAssert { base, ty } = kind else {
            return Err(SimplifyError::UnexpectedTypeSwitchGuard { span: guard_span });
        };
        let base = self.normalize_operand(*base, out)?;
        Ok(Expr::new(
            ExprKind::TypeAssert {
                base: Box::new(base),
                ty,
            },
            span,
        ))
    }
}
