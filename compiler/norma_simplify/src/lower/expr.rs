//! Expression normalization.

use norma_ir::{AssignOp, BinaryOp, Block, Call, Element, Expr, ExprKind, Stmt, StmtKind, UnaryOp};

use super::Simplifier;
use crate::effects::contains_call;
use crate::error::SimplifyError;
use crate::stack::ensure_sufficient_stack;

impl<O: Clone> Simplifier<'_, O> {
    /// Normalize `expr`, pushing any pre-computation onto `out`.
    ///
    /// With `call_allowed` the result may itself be a call; otherwise a
    /// call result is bound to a temporary.
    pub(super) fn normalize_expr(
        &mut self,
        expr: Expr<O>,
        out: &mut Vec<Stmt<O>>,
        call_allowed: bool,
    ) -> Result<Expr<O>, SimplifyError> {
        ensure_sufficient_stack(|| self.normalize_expr_inner(expr, out, call_allowed))
    }

    /// Normalize in operand position.
    pub(super) fn normalize_operand(
        &mut self,
        expr: Expr<O>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Expr<O>, SimplifyError> {
        self.normalize_expr(expr, out, false)
    }

    fn normalize_boxed(
        &mut self,
        expr: Box<Expr<O>>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Box<Expr<O>>, SimplifyError> {
        Ok(Box::new(self.normalize_operand(*expr, out)?))
    }

    fn normalize_optional(
        &mut self,
        expr: Option<Box<Expr<O>>>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Option<Box<Expr<O>>>, SimplifyError> {
        match expr {
            Some(expr) => Ok(Some(self.normalize_boxed(expr, out)?)),
            None => Ok(None),
        }
    }

    fn normalize_expr_inner(
        &mut self,
        expr: Expr<O>,
        out: &mut Vec<Stmt<O>>,
        call_allowed: bool,
    ) -> Result<Expr<O>, SimplifyError> {
        let Expr { kind, span } = expr;
        let kind = match kind {
            leaf @ (ExprKind::Ident(_) | ExprKind::BasicLit(_) | ExprKind::Opaque(_)) => leaf,

            // The body is a separate statement list; nothing leaks out.
            ExprKind::FuncLit { sig, body } => {
                let stmts = self.normalize_list(body.stmts)?;
                ExprKind::FuncLit {
                    sig,
                    body: Block::new(stmts, body.span),
                }
            }

            ExprKind::CompositeLit { ty, elements } => {
                let mut normalized = Vec::with_capacity(elements.len());
                for Element { key, value } in elements {
                    let key = match key {
                        Some(key) => Some(self.normalize_operand(key, out)?),
                        None => None,
                    };
                    let value = self.normalize_operand(value, out)?;
                    normalized.push(Element { key, value });
                }
                ExprKind::CompositeLit {
                    ty,
                    elements: normalized,
                }
            }

            ExprKind::Paren(inner) => ExprKind::Paren(self.normalize_boxed(inner, out)?),
            ExprKind::Star(inner) => ExprKind::Star(self.normalize_boxed(inner, out)?),

            ExprKind::Selector { base, field } => ExprKind::Selector {
                base: self.normalize_boxed(base, out)?,
                field,
            },

            ExprKind::Index { base, index } => {
                let base = self.normalize_boxed(base, out)?;
                let index = self.normalize_boxed(index, out)?;
                ExprKind::Index { base, index }
            }

            ExprKind::Slice {
                base,
                low,
                high,
                max,
            } => {
                let base = self.normalize_boxed(base, out)?;
                let low = self.normalize_optional(low, out)?;
                let high = self.normalize_optional(high, out)?;
                let max = self.normalize_optional(max, out)?;
                ExprKind::Slice {
                    base,
                    low,
                    high,
                    max,
                }
            }

            // The asserted type is a type operand.
            ExprKind::TypeAssert { base, ty } => ExprKind::TypeAssert {
                base: self.normalize_boxed(base, out)?,
                ty,
            },

            ExprKind::Call(call) => {
                let call = Expr::new(ExprKind::Call(self.normalize_call(call, out)?), span);
                if call_allowed {
                    return Ok(call);
                }
                return Ok(self.bind(call, out));
            }

            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.normalize_boxed(operand, out)?,
            },

            ExprKind::Binary { op, left, right } if op.is_short_circuit() && contains_call(&right) => {
                return self.lower_short_circuit(op, *left, *right, out);
            }

            ExprKind::Binary { op, left, right } => {
                let left = self.normalize_boxed(left, out)?;
                let right = self.normalize_boxed(right, out)?;
                ExprKind::Binary { op, left, right }
            }
        };
        Ok(Expr::new(kind, span))
    }

    /// Normalize the callee and arguments of a call, leaving the call
    /// itself in place.
    pub(super) fn normalize_call(
        &mut self,
        call: Call<O>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Call<O>, SimplifyError> {
        let Call { func, args, spread } = call;
        let func = self.normalize_boxed(func, out)?;
        let args = self.normalize_args(args, out)?;
        Ok(Call { func, args, spread })
    }

    /// Arguments in order. A lone multi-value argument `f(g())` is split
    /// into `_1, _2 := g()` and `f(_1, _2)`.
    fn normalize_args(
        &mut self,
        args: Vec<Expr<O>>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Vec<Expr<O>>, SimplifyError> {
        let arity = match args.as_slice() {
            [single] if single.is_call() => self.resolver.result_arity(single),
            _ => 1,
        };

        let mut normalized = Vec::with_capacity(args.len().max(arity));
        for arg in args {
            if arity > 1 {
                let value = self.normalize_expr(arg, out, true)?;
                let targets: Vec<Expr<O>> = (0..arity).map(|_| self.fresh_temp()).collect();
                tracing::trace!(arity, "split multi-value argument");
                out.push(Stmt::synthetic(StmtKind::Assign {
                    lhs: targets.clone(),
                    op: AssignOp::Define,
                    rhs: vec![value],
                }));
                normalized.extend(targets);
            } else {
                normalized.push(self.normalize_operand(arg, out)?);
            }
        }
        Ok(normalized)
    }

    /// `a && b()` becomes
    ///
    /// ```text
    /// _1 := a
    /// if _1 { _1 = b() }
    /// ```
    ///
    /// with `if !_1` for `||`, and the expression's value is `_1`. The
    /// right operand's pre-computation stays inside the guard so it only
    /// runs when the right side is evaluated.
    fn lower_short_circuit(
        &mut self,
        op: BinaryOp,
        left: Expr<O>,
        right: Expr<O>,
        out: &mut Vec<Stmt<O>>,
    ) -> Result<Expr<O>, SimplifyError> {
        let left = self.normalize_expr(left, out, true)?;
        let result = self.bind(left, out);

        let cond = match op {
            BinaryOp::Or => Expr::unary(UnaryOp::Not, result.clone()),
            _ => result.clone(),
        };

        let mut guarded = Vec::new();
        let right = self.normalize_expr(right, &mut guarded, true)?;
        guarded.push(Stmt::assign(result.clone(), AssignOp::Assign, right));

        out.push(Stmt::synthetic(StmtKind::If {
            init: None,
            cond,
            then_branch: Block::synthetic(guarded),
            else_branch: None,
        }));
        Ok(result)
    }
}
