//! Statement normalization.

use std::mem;

use norma_ir::{AssignOp, Block, CaseClause, Expr, Ident, Span, Stmt, StmtKind};

use super::{into_else_branch, Simplifier};
use crate::error::SimplifyError;
use crate::stack::ensure_sufficient_stack;

impl<O: Clone> Simplifier<'_, O> {
    /// Normalize a statement list into a fresh list.
    pub(crate) fn normalize_list(&mut self, stmts: Vec<Stmt<O>>) -> Result<Vec<Stmt<O>>, SimplifyError> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            self.normalize_stmt(stmt, &mut out)?;
        }
        Ok(out)
    }

    pub(super) fn normalize_block(&mut self, block: Block<O>) -> Result<Block<O>, SimplifyError> {
        Ok(Block::new(self.normalize_list(block.stmts)?, block.span))
    }

    /// Normalize one statement, appending it and its pre-computation to
    /// `out`. One input statement may become several output statements.
    pub(super) fn normalize_stmt(
        &mut self,
        stmt: Stmt<O>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        ensure_sufficient_stack(|| self.normalize_stmt_inner(stmt, out))
    }

    fn normalize_stmt_inner(
        &mut self,
        stmt: Stmt<O>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        let Stmt { kind, span } = stmt;
        match kind {
            StmtKind::Expr(expr) => {
                let expr = self.normalize_expr(expr, out, true)?;
                out.push(Stmt::new(StmtKind::Expr(expr), span));
            }

            StmtKind::Block(block) => {
                let block = self.normalize_block(block)?;
                out.push(Stmt::new(StmtKind::Block(block), span));
            }

            StmtKind::If {
                init,
                cond,
                then_branch,
                else_branch,
            } => self.normalize_if(init, cond, then_branch, else_branch, span, out)?,

            StmtKind::Switch { init, tag, clauses } => {
                self.lower_switch(init, tag, clauses, span, out)?;
            }

            StmtKind::TypeSwitch {
                init,
                guard,
                clauses,
            } => self.lower_type_switch(init, *guard, clauses, span, out)?,

            // Loop headers are re-evaluated every iteration; hoisting out of
            // them would evaluate once. Only the body is normalized.
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                let body = self.normalize_block(body)?;
                out.push(Stmt::new(
                    StmtKind::For {
                        init,
                        cond,
                        post,
                        body,
                    },
                    span,
                ));
            }

            StmtKind::Range {
                key,
                value,
                define,
                iter,
                body,
            } => {
                let body = self.normalize_block(body)?;
                out.push(Stmt::new(
                    StmtKind::Range {
                        key,
                        value,
                        define,
                        iter,
                        body,
                    },
                    span,
                ));
            }

            StmtKind::IncDec { operand, op } => {
                let operand = self.normalize_operand(operand, out)?;
                out.push(Stmt::new(StmtKind::IncDec { operand, op }, span));
            }

            StmtKind::Go(call) => {
                let call = self.normalize_call(call, out)?;
                out.push(Stmt::new(StmtKind::Go(call), span));
            }

            StmtKind::Defer(call) => {
                let call = self.normalize_call(call, out)?;
                out.push(Stmt::new(StmtKind::Defer(call), span));
            }

            StmtKind::Select { clauses } => self.lower_select(clauses, span, out)?,

            StmtKind::Send { chan, value } => {
                let chan = self.normalize_operand(chan, out)?;
                let value = self.normalize_operand(value, out)?;
                out.push(Stmt::new(StmtKind::Send { chan, value }, span));
            }

            StmtKind::Labeled { label, stmt } => self.normalize_labeled(label, *stmt, span, out)?,

            StmtKind::Assign { lhs, op, rhs } if self.options.normalize_operands => {
                let lhs = match op {
                    AssignOp::Define => lhs,
                    AssignOp::Assign | AssignOp::Compound(_) => self.normalize_targets(lhs, out)?,
                };
                let rhs = self.normalize_values(rhs, out)?;
                out.push(Stmt::new(StmtKind::Assign { lhs, op, rhs }, span));
            }

            StmtKind::VarDecl { names, ty, values } if self.options.normalize_operands => {
                let values = self.normalize_values(values, out)?;
                out.push(Stmt::new(StmtKind::VarDecl { names, ty, values }, span));
            }

            StmtKind::Return(values) if self.options.normalize_operands => {
                let values = self.normalize_values(values, out)?;
                out.push(Stmt::new(StmtKind::Return(values), span));
            }

            kind @ (StmtKind::Assign { .. }
            | StmtKind::VarDecl { .. }
            | StmtKind::Return(_)
            | StmtKind::Branch { .. }
            | StmtKind::Empty
            | StmtKind::Opaque(_)) => out.push(Stmt::new(kind, span)),
        }
        Ok(())
    }

    /// `if init; cond { .. } else ..`
    ///
    /// An init statement is scoped to the `if`, so `if a := b(); a { c }`
    /// becomes `{ a := b(); if a { c } }`.
    fn normalize_if(
        &mut self,
        init: Option<Box<Stmt<O>>>,
        cond: Expr<O>,
        then_branch: Block<O>,
        else_branch: Option<Box<Stmt<O>>>,
        span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        if let Some(init) = init {
            let mut scope = Vec::new();
            self.normalize_stmt(*init, &mut scope)?;
            self.normalize_if(None, cond, then_branch, else_branch, span, &mut scope)?;
            out.push(Stmt::block(scope));
            return Ok(());
        }

        let cond = self.normalize_operand(cond, out)?;
        let then_branch = self.normalize_block(then_branch)?;
        let else_branch = match else_branch {
            Some(else_branch) => {
                let mut stmts = Vec::new();
                self.normalize_stmt(*else_branch, &mut stmts)?;
                into_else_branch(stmts)
            }
            None => None,
        };

        out.push(Stmt::new(
            StmtKind::If {
                init: None,
                cond,
                then_branch,
                else_branch,
            },
            span,
        ));
        Ok(())
    }

    /// `label: stmt`
    ///
    /// When the inner statement lowers to several statements the label has
    /// to stay meaningful for every jump that can name it:
    ///
    /// - A `break` target (loop, switch, type switch, select) keeps being
    ///   one: unless it lowers to a single statement of its own kind, its
    ///   output is wrapped in `switch { default: ... }` carrying
    ///   the label, so `break l` still leaves right after the construct and
    ///   `goto l` re-runs the pre-computation.
    /// - Any other statement can only be a `goto` target, so the label goes
    ///   on the first emitted statement.
    fn normalize_labeled(
        &mut self,
        label: Ident,
        stmt: Stmt<O>,
        span: Span,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<(), SimplifyError> {
        let is_break_target = matches!(
            stmt.kind,
            StmtKind::For { .. }
                | StmtKind::Range { .. }
                | StmtKind::Switch { .. }
                | StmtKind::TypeSwitch { .. }
                | StmtKind::Select { .. }
        );
        let kind = mem::discriminant(&stmt.kind);

        let mut lowered = Vec::new();
        self.normalize_stmt(stmt, &mut lowered)?;

        // A type switch with an init lowers to one block, which `break`
        // cannot name.
        let still_target = matches!(
            lowered.as_slice(),
            [only] if mem::discriminant(&only.kind) == kind
        );

        let labeled = |stmt: Stmt<O>| {
            Stmt::new(
                StmtKind::Labeled {
                    label,
                    stmt: Box::new(stmt),
                },
                span,
            )
        };

        if is_break_target && !still_target {
            out.push(labeled(Stmt::synthetic(StmtKind::Switch {
                init: None,
                tag: None,
                clauses: vec![CaseClause {
                    values: Vec::new(),
                    body: lowered,
                    span: Span::DUMMY,
                }],
            })));
            return Ok(());
        }

        let mut lowered = lowered.into_iter();
        let first = lowered
            .next()
            .unwrap_or_else(|| Stmt::synthetic(StmtKind::Empty));
        out.push(labeled(first));
        out.extend(lowered);
        Ok(())
    }

    /// Assignment targets, left to right, keeping their storage-location
    /// shape.
    fn normalize_targets(
        &mut self,
        targets: Vec<Expr<O>>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Vec<Expr<O>>, SimplifyError> {
        let mut normalized = Vec::with_capacity(targets.len());
        for target in targets {
            normalized.push(self.normalize_operand(target, out)?);
        }
        Ok(normalized)
    }

    /// Right-hand values of an assignment, declaration or return. A lone
    /// value may stay a call (it can be multi-valued); with several values
    /// each call is hoisted.
    fn normalize_values(
        &mut self,
        values: Vec<Expr<O>>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Vec<Expr<O>>, SimplifyError> {
        let call_allowed = values.len() == 1;
        let mut normalized = Vec::with_capacity(values.len());
        for value in values {
            normalized.push(self.normalize_expr(value, out, call_allowed)?);
        }
        Ok(normalized)
    }
}
