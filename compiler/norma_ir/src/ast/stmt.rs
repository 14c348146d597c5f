//! Statement Types
//!
//! Statement node, its variants, and the clause types of the three
//! composite dispatch constructs.

use std::fmt;

use super::expr::{Call, Expr};
use super::operators::{AssignOp, BranchKind, IncDecOp};
use crate::{Ident, Span};

/// Statement node.
#[derive(Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt<O> {
    pub kind: StmtKind<O>,
    pub span: Span,
}

impl<O> Stmt<O> {
    pub fn new(kind: StmtKind<O>, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// Statement with no source position.
    pub fn synthetic(kind: StmtKind<O>) -> Self {
        Stmt::new(kind, Span::DUMMY)
    }

    /// Synthetic expression statement.
    pub fn expr(expr: Expr<O>) -> Self {
        Stmt::synthetic(StmtKind::Expr(expr))
    }

    /// Synthetic block statement.
    pub fn block(stmts: Vec<Stmt<O>>) -> Self {
        Stmt::synthetic(StmtKind::Block(Block::synthetic(stmts)))
    }

    /// Synthetic single-target assignment `lhs op rhs`.
    pub fn assign(lhs: Expr<O>, op: AssignOp, rhs: Expr<O>) -> Self {
        Stmt::synthetic(StmtKind::Assign {
            lhs: vec![lhs],
            op,
            rhs: vec![rhs],
        })
    }

    /// Synthetic `lhs := rhs`.
    pub fn define(lhs: Expr<O>, rhs: Expr<O>) -> Self {
        Stmt::assign(lhs, AssignOp::Define, rhs)
    }

    pub fn is_fallthrough(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::Branch {
                kind: BranchKind::Fallthrough,
                ..
            }
        )
    }
}

impl<O: fmt::Debug> fmt::Debug for Stmt<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind<O> {
    /// Expression evaluated for its effect.
    Expr(Expr<O>),

    /// `{ ... }`
    Block(Block<O>),

    /// `if init; cond { then } else <else_branch>`.
    ///
    /// `else_branch` is either an `If` or a `Block`.
    If {
        init: Option<Box<Stmt<O>>>,
        cond: Expr<O>,
        then_branch: Block<O>,
        else_branch: Option<Box<Stmt<O>>>,
    },

    /// `switch init; tag { clauses }`. No tag means `switch true`.
    Switch {
        init: Option<Box<Stmt<O>>>,
        tag: Option<Expr<O>>,
        clauses: Vec<CaseClause<O>>,
    },

    /// `switch init; guard { clauses }`, where the guard is `x.(type)` or
    /// `v := x.(type)`. Clause values are type operands.
    TypeSwitch {
        init: Option<Box<Stmt<O>>>,
        guard: Box<Stmt<O>>,
        clauses: Vec<CaseClause<O>>,
    },

    /// `for init; cond; post { body }`.
    For {
        init: Option<Box<Stmt<O>>>,
        cond: Option<Expr<O>>,
        post: Option<Box<Stmt<O>>>,
        body: Block<O>,
    },

    /// `for key, value := range iter { body }`.
    Range {
        key: Option<Expr<O>>,
        value: Option<Expr<O>>,
        define: bool,
        iter: Expr<O>,
        body: Block<O>,
    },

    /// `x++` / `x--`.
    IncDec { operand: Expr<O>, op: IncDecOp },

    /// `go f(args)`
    Go(Call<O>),

    /// `defer f(args)`
    Defer(Call<O>),

    /// `select { clauses }`
    Select { clauses: Vec<CommClause<O>> },

    /// `ch <- value`
    Send { chan: Expr<O>, value: Expr<O> },

    /// `lhs, ... op rhs, ...`
    Assign {
        lhs: Vec<Expr<O>>,
        op: AssignOp,
        rhs: Vec<Expr<O>>,
    },

    /// `var names ty = values`
    VarDecl {
        names: Vec<Ident>,
        ty: Option<Expr<O>>,
        values: Vec<Expr<O>>,
    },

    /// `return values`
    Return(Vec<Expr<O>>),

    /// `break`, `continue`, `goto`, `fallthrough`, with optional label.
    Branch {
        kind: BranchKind,
        label: Option<Ident>,
    },

    /// `label: stmt`
    Labeled { label: Ident, stmt: Box<Stmt<O>> },

    /// Empty statement.
    Empty,

    /// Payload the simplifier passes through untouched.
    Opaque(O),
}

/// Brace-delimited statement list.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block<O> {
    pub stmts: Vec<Stmt<O>>,
    pub span: Span,
}

impl<O> Block<O> {
    pub fn new(stmts: Vec<Stmt<O>>, span: Span) -> Self {
        Block { stmts, span }
    }

    pub fn synthetic(stmts: Vec<Stmt<O>>) -> Self {
        Block::new(stmts, Span::DUMMY)
    }
}

/// `case v1, v2: body` in a switch or type switch. An empty value list is
/// the `default` clause.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseClause<O> {
    pub values: Vec<Expr<O>>,
    pub body: Vec<Stmt<O>>,
    pub span: Span,
}

impl<O> CaseClause<O> {
    pub fn is_default(&self) -> bool {
        self.values.is_empty()
    }
}

/// `case comm: body` in a select. `comm: None` is the `default` clause.
///
/// The communication is a statement: `<-ch` as an expression statement,
/// `lhs = <-ch` / `lhs := <-ch` as an assignment, or `ch <- v` as a send.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommClause<O> {
    pub comm: Option<Box<Stmt<O>>>,
    pub body: Vec<Stmt<O>>,
    pub span: Span,
}
