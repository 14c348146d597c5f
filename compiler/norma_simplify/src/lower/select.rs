//! Select lowering.
//!
//! Channel operands and send values are evaluated once, in source order,
//! when the select is entered, so their pre-computation is hoisted ahead
//! of the whole select. A receive assigning to targets that contain calls
//! cannot evaluate those targets early: the receive defines placeholder
//! temporaries instead, and the real assignment runs at the start of the
//! clause body.
//!
//! ```text
//! select { case a().f = <-b(): c }
//! ```
//!
//! becomes
//!
//! ```text
//! _3 := b()
//! select { case _1 := <-_3: _2 := a(); _2.f = _1; c }
//! ```

use norma_ir::{AssignOp, CommClause, Expr, ExprKind, Span, Stmt, StmtKind, UnaryOp};

use super::Simplifier;
use crate::effects::contains_call;
use crate::error::SimplifyError;

impl<O: Clone> Simplifier<'_, O> {
    pub(super) fn lower_select(
        &mut self,
        clauses: Vec<CommClause<O>>,
        span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        let mut lowered = Vec::with_capacity(clauses.len());
        for CommClause {
            comm,
            body,
            span: clause_span,
        } in clauses
        {
            let mut prefix = Vec::new();
            let comm = match comm {
                Some(comm) => Some(Box::new(self.lower_comm(*comm, &mut prefix, out)?)),
                None => None,
            };
            prefix.extend(self.normalize_list(body)?);
            lowered.push(CommClause {
                comm,
                body: prefix,
                span: clause_span,
            });
        }

        tracing::debug!(clauses = lowered.len(), "lowered select");
        out.push(Stmt::new(StmtKind::Select { clauses: lowered }, span));
        Ok(())
    }

    /// Lower one communication. Channel work goes to `out` (before the
    /// select); deferred target assignments go to `prefix` (start of the
    /// clause body).
    fn lower_comm(
        &mut self,
        comm: Stmt<O>,
        prefix: &mut Vec<Stmt<O>>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Stmt<O>, SimplifyError> {
        let Stmt { kind, span } = comm;
        match kind {
            StmtKind::Expr(receive) => {
                let receive = self.lower_receive(receive, span, out)?;
                Ok(Stmt::new(StmtKind::Expr(receive), span))
            }

            StmtKind::Send { chan, value } => {
                let chan = self.normalize_operand(chan, out)?;
                let value = self.normalize_operand(value, out)?;
                Ok(Stmt::new(StmtKind::Send { chan, value }, span))
            }

            StmtKind::Assign { lhs, op, rhs } if matches!(op, AssignOp::Define | AssignOp::Assign) => {
                let Ok([receive]) = <[Expr<O>; 1]>::try_from(rhs) else {
                    return Err(SimplifyError::UnexpectedCommClause { span });
                };
                if !is_receive(&receive) {
                    return Err(SimplifyError::UnexpectedCommClause { span });
                }

                let (lhs, op) = if op == AssignOp::Assign && lhs.iter().any(contains_call) {
                    self.defer_targets(lhs, prefix)?
                } else {
                    (lhs, op)
                };

                let receive = self.lower_receive(receive, span, out)?;
                Ok(Stmt::new(
                    StmtKind::Assign {
                        lhs,
                        op,
                        rhs: vec![receive],
                    },
                    span,
                ))
            }

            _ => Err(SimplifyError::UnexpectedCommClause { span }),
        }
    }

    /// Replace every receive target with a placeholder the receive defines,
    /// and assign the placeholders to the real targets in `prefix`.
    ///
    /// All targets move together so a mixed list keeps assigning the outer
    /// variables instead of declaring new ones.
    fn defer_targets(
        &mut self,
        targets: Vec<Expr<O>>,
        prefix: &mut Vec<Stmt<O>>,
    ) -> Result<(Vec<Expr<O>>, AssignOp), SimplifyError> {
        let placeholders: Vec<Expr<O>> = targets.iter().map(|_| self.fresh_temp()).collect();

        let mut lowered = Vec::with_capacity(targets.len());
        for target in targets {
            lowered.push(self.normalize_operand(target, prefix)?);
        }
        tracing::trace!(targets = lowered.len(), "deferred receive targets");

        prefix.push(Stmt::synthetic(StmtKind::Assign {
            lhs: lowered,
            op: AssignOp::Assign,
            rhs: placeholders.clone(),
        }));
        Ok((placeholders, AssignOp::Define))
    }

    /// `<-ch` with its channel operand normalized into `out`.
    fn lower_receive(
        &mut self,
        receive: Expr<O>,
        comm_span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Expr<O>, SimplifyError> {
        let Expr { kind, span } = receive;
        let ExprKind::Unary {
            op: UnaryOp::Recv,
            operand,
        } = kind
        else {
            return Err(SimplifyError::UnexpectedCommClause { span: comm_span });
        };
        let chan = self.normalize_operand(*operand, out)?;
        Ok(Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Recv,
                operand: Box::new(chan),
            },
            span,
        ))
    }
}

fn is_receive<O>(expr: &Expr<O>) -> bool {
    matches!(
        expr.kind,
        ExprKind::Unary {
            op: UnaryOp::Recv,
            ..
        }
    )
}
