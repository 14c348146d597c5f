//! Normal-form validation of simplified output.
//!
//! Walks a simplified body and checks what the simplifier promises:
//! - Calls appear only where a call is allowed: an expression statement,
//!   the value of an assignment, `go`/`defer`, and the lone value of a
//!   declaration or `return`
//! - Every value switch has been lowered to the single-clause wrapper
//! - No `if` or type switch keeps an init statement
//! - Every temporary is written before it is read
//!
//! Statements the pass leaves untouched (loop headers, and assignments,
//! declarations and returns unless operand normalization is on) are only
//! checked for temporary reads.
//!
//! Run by [`crate::simplify_with`] when [`SimplifyOptions::validate`] is
//! set, which is the default in debug builds.

use norma_ir::{AssignOp, CaseClause, Expr, ExprKind, Span, Stmt, StmtKind};
use rustc_hash::FxHashSet;

use crate::options::SimplifyOptions;
use crate::stack::ensure_sufficient_stack;

/// A broken normal-form invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("call in operand position at {span}")]
    CallInOperand { span: Span },

    #[error("temporary _{temp} read before it is written (at {span})")]
    TempReadBeforeWrite { temp: u32, span: Span },

    #[error("switch at {span} was not lowered to an if/else chain")]
    UnloweredSwitch { span: Span },

    #[error("statement at {span} still has an init statement")]
    LeftoverInit { span: Span },
}

/// Check that `body` is in normal form.
pub fn validate<O>(body: &[Stmt<O>], options: &SimplifyOptions) -> Result<(), Violation> {
    let mut validator = Validator {
        written: FxHashSet::default(),
        check_operands: options.normalize_operands,
    };
    validator.check_stmts(body)
}

/// Where an expression sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Position {
    /// May be a bare call.
    CallAllowed,
    /// Must be call-free.
    Operand,
    /// Left as written; only temporary reads are checked.
    Untouched,
}

impl Position {
    fn child(self) -> Position {
        match self {
            Position::Untouched => Position::Untouched,
            Position::CallAllowed | Position::Operand => Position::Operand,
        }
    }
}

struct Validator {
    written: FxHashSet<u32>,
    check_operands: bool,
}

impl Validator {
    fn check_stmts<O>(&mut self, stmts: &[Stmt<O>]) -> Result<(), Violation> {
        stmts.iter().try_for_each(|stmt| self.check_stmt(stmt))
    }

    fn check_stmt<O>(&mut self, stmt: &Stmt<O>) -> Result<(), Violation> {
        ensure_sufficient_stack(|| self.check_stmt_inner(stmt))
    }

    fn check_stmt_inner<O>(&mut self, stmt: &Stmt<O>) -> Result<(), Violation> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.check_expr(expr, Position::CallAllowed),
            StmtKind::Block(block) => self.check_stmts(&block.stmts),
            StmtKind::If {
                init,
                cond,
                then_branch,
                else_branch,
            } => {
                if init.is_some() {
                    return Err(Violation::LeftoverInit { span: stmt.span });
                }
                self.check_expr(cond, Position::Operand)?;
                self.check_stmts(&then_branch.stmts)?;
                match else_branch {
                    Some(else_branch) => self.check_stmt(else_branch),
                    None => Ok(()),
                }
            }
            StmtKind::Switch { init, tag, clauses } => match clauses.as_slice() {
                [CaseClause { values, body, .. }]
                    if init.is_none() && tag.is_none() && values.is_empty() =>
                {
                    self.check_stmts(body)
                }
                _ => Err(Violation::UnloweredSwitch { span: stmt.span }),
            },
            StmtKind::TypeSwitch {
                init,
                guard,
                clauses,
            } => {
                if init.is_some() {
                    return Err(Violation::LeftoverInit { span: stmt.span });
                }
                match &guard.kind {
                    StmtKind::Assign { rhs, .. } => self.check_exprs(rhs, Position::Operand)?,
                    StmtKind::Expr(expr) => self.check_expr(expr, Position::Operand)?,
                    _ => {}
                }
                clauses
                    .iter()
                    .try_for_each(|clause| self.check_stmts(&clause.body))
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                if let Some(init) = init {
                    self.check_header(init)?;
                }
                if let Some(cond) = cond {
                    self.check_expr(cond, Position::Untouched)?;
                }
                if let Some(post) = post {
                    self.check_header(post)?;
                }
                self.check_stmts(&body.stmts)
            }
            StmtKind::Range {
                key,
                value,
                iter,
                body,
                ..
            } => {
                self.check_expr(iter, Position::Untouched)?;
                for target in [key, value].into_iter().flatten() {
                    self.check_expr(target, Position::Untouched)?;
                }
                self.check_stmts(&body.stmts)
            }
            StmtKind::IncDec { operand, .. } => self.check_expr(operand, Position::Operand),
            StmtKind::Go(call) | StmtKind::Defer(call) => {
                self.check_expr(&call.func, Position::Operand)?;
                self.check_exprs(&call.args, Position::Operand)
            }
            StmtKind::Select { clauses } => clauses.iter().try_for_each(|clause| {
                if let Some(comm) = &clause.comm {
                    self.check_comm(comm)?;
                }
                self.check_stmts(&clause.body)
            }),
            StmtKind::Send { chan, value } => {
                self.check_expr(chan, Position::Operand)?;
                self.check_expr(value, Position::Operand)
            }
            StmtKind::Assign { lhs, op, rhs } => {
                let values = if writes_only_temps(lhs, *op) {
                    lone_value_position(rhs.len())
                } else {
                    self.values_position(rhs.len())
                };
                self.check_assign(lhs, *op, rhs, values)
            }
            StmtKind::VarDecl { values, .. } => {
                let position = self.values_position(values.len());
                self.check_exprs(values, position)
            }
            StmtKind::Return(values) => {
                let position = self.values_position(values.len());
                self.check_exprs(values, position)
            }
            StmtKind::Labeled { stmt, .. } => self.check_stmt(stmt),
            StmtKind::Branch { .. } | StmtKind::Empty | StmtKind::Opaque(_) => Ok(()),
        }
    }

    /// Loop init and post statements are left as written.
    fn check_header<O>(&mut self, stmt: &Stmt<O>) -> Result<(), Violation> {
        match &stmt.kind {
            StmtKind::Assign { lhs, op, rhs } => self.check_assign(lhs, *op, rhs, Position::Untouched),
            StmtKind::Expr(expr) | StmtKind::IncDec { operand: expr, .. } => {
                self.check_expr(expr, Position::Untouched)
            }
            _ => Ok(()),
        }
    }

    fn check_comm<O>(&mut self, comm: &Stmt<O>) -> Result<(), Violation> {
        match &comm.kind {
            StmtKind::Assign { lhs, op, rhs } => self.check_assign(lhs, *op, rhs, Position::Operand),
            _ => self.check_stmt(comm),
        }
    }

    fn check_assign<O>(
        &mut self,
        lhs: &[Expr<O>],
        op: AssignOp,
        rhs: &[Expr<O>],
        values: Position,
    ) -> Result<(), Violation> {
        self.check_exprs(rhs, values)?;
        let targets = if values == Position::Untouched {
            Position::Untouched
        } else {
            Position::Operand
        };
        for target in lhs {
            match target.as_temp() {
                // `_n := v` introduces `_n`; `_n = v` overwrites it.
                Some(temp) if matches!(op, AssignOp::Define | AssignOp::Assign) => {
                    self.written.insert(temp);
                }
                _ if op == AssignOp::Define => {}
                _ => self.check_expr(target, targets)?,
            }
        }
        Ok(())
    }

    fn values_position(&self, count: usize) -> Position {
        if self.check_operands {
            lone_value_position(count)
        } else {
            Position::Untouched
        }
    }

    fn check_exprs<O>(&mut self, exprs: &[Expr<O>], position: Position) -> Result<(), Violation> {
        exprs
            .iter()
            .try_for_each(|expr| self.check_expr(expr, position))
    }

    fn check_expr<O>(&mut self, expr: &Expr<O>, position: Position) -> Result<(), Violation> {
        ensure_sufficient_stack(|| self.check_expr_inner(expr, position))
    }

    fn check_expr_inner<O>(&mut self, expr: &Expr<O>, position: Position) -> Result<(), Violation> {
        let child = position.child();
        match &expr.kind {
            ExprKind::Ident(name) => match name.as_temp() {
                Some(temp) if !self.written.contains(&temp) => Err(Violation::TempReadBeforeWrite {
                    temp,
                    span: expr.span,
                }),
                _ => Ok(()),
            },
            ExprKind::BasicLit(_) | ExprKind::Opaque(_) => Ok(()),
            ExprKind::FuncLit { body, .. } => {
                if position == Position::Untouched {
                    return Ok(());
                }
                self.check_stmts(&body.stmts)
            }
            ExprKind::CompositeLit { elements, .. } => elements.iter().try_for_each(|element| {
                if let Some(key) = &element.key {
                    self.check_expr(key, child)?;
                }
                self.check_expr(&element.value, child)
            }),
            ExprKind::Paren(inner) | ExprKind::Star(inner) => self.check_expr(inner, child),
            ExprKind::Selector { base, .. } | ExprKind::TypeAssert { base, .. } => {
                self.check_expr(base, child)
            }
            ExprKind::Index { base, index } => {
                self.check_expr(base, child)?;
                self.check_expr(index, child)
            }
            ExprKind::Slice {
                base,
                low,
                high,
                max,
            } => {
                self.check_expr(base, child)?;
                [low, high, max]
                    .into_iter()
                    .flatten()
                    .try_for_each(|bound| self.check_expr(bound, child))
            }
            ExprKind::Call(call) => {
                if position == Position::Operand {
                    return Err(Violation::CallInOperand { span: expr.span });
                }
                self.check_expr(&call.func, child)?;
                self.check_exprs(&call.args, child)
            }
            ExprKind::Unary { operand, .. } => self.check_expr(operand, child),
            ExprKind::Binary { left, right, .. } => {
                self.check_expr(left, child)?;
                self.check_expr(right, child)
            }
        }
    }
}

/// A lone value may be a (possibly multi-valued) call.
fn lone_value_position(count: usize) -> Position {
    if count == 1 {
        Position::CallAllowed
    } else {
        Position::Operand
    }
}

/// Temporary definitions and the guarded writes of short-circuit lowering.
/// These are always checked, whatever the options.
fn writes_only_temps<O>(lhs: &[Expr<O>], op: AssignOp) -> bool {
    matches!(op, AssignOp::Define | AssignOp::Assign)
        && !lhs.is_empty()
        && lhs.iter().all(|target| target.as_temp().is_some())
}
