//! Expression Types
//!
//! Expression node and variants. `O` is the opaque payload for leaves the
//! simplifier never looks inside (type expressions, exotic literals, and
//! whatever else the producer wants to carry through untouched).

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use super::stmt::Block;
use crate::{Ident, Name, Span};

/// Expression node.
#[derive(Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr<O> {
    pub kind: ExprKind<O>,
    pub span: Span,
}

impl<O> Expr<O> {
    pub fn new(kind: ExprKind<O>, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Expression with no source position.
    pub fn synthetic(kind: ExprKind<O>) -> Self {
        Expr::new(kind, Span::DUMMY)
    }

    /// Synthetic identifier reference.
    pub fn ident(name: Name) -> Self {
        Expr::synthetic(ExprKind::Ident(name))
    }

    /// Synthetic reference to a simplifier temporary.
    pub fn temp(n: u32) -> Self {
        Expr::ident(Name::Temp(n))
    }

    pub fn unary(op: UnaryOp, operand: Expr<O>) -> Self {
        Expr::synthetic(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(op: BinaryOp, left: Expr<O>, right: Expr<O>) -> Self {
        Expr::synthetic(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn paren(inner: Expr<O>) -> Self {
        Expr::synthetic(ExprKind::Paren(Box::new(inner)))
    }

    pub fn is_call(&self) -> bool {
        matches!(self.kind, ExprKind::Call(_))
    }

    /// Temporary number if this expression is a bare temporary reference.
    pub fn as_temp(&self) -> Option<u32> {
        match &self.kind {
            ExprKind::Ident(name) => name.as_temp(),
            _ => None,
        }
    }
}

impl<O: fmt::Debug> fmt::Debug for Expr<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind<O> {
    /// Identifier reference, source or temporary.
    Ident(Name),

    /// Literal kept as its source text (`42`, `"hi"`, `'x'`).
    BasicLit(Box<str>),

    /// `func(...) { body }`. The signature is a type operand and is never
    /// evaluated.
    FuncLit { sig: Box<Expr<O>>, body: Block<O> },

    /// `T{a, k: v}`. The type is optional for elided inner literals.
    CompositeLit {
        ty: Option<Box<Expr<O>>>,
        elements: Vec<Element<O>>,
    },

    /// `(x)`
    Paren(Box<Expr<O>>),

    /// `x.field`
    Selector { base: Box<Expr<O>>, field: Ident },

    /// `x[i]`
    Index {
        base: Box<Expr<O>>,
        index: Box<Expr<O>>,
    },

    /// `x[low:high]` / `x[low:high:max]`.
    Slice {
        base: Box<Expr<O>>,
        low: Option<Box<Expr<O>>>,
        high: Option<Box<Expr<O>>>,
        max: Option<Box<Expr<O>>>,
    },

    /// `x.(T)`; `ty: None` is the `x.(type)` form of a type switch guard.
    TypeAssert {
        base: Box<Expr<O>>,
        ty: Option<Box<Expr<O>>>,
    },

    /// `f(args)` / `f(args...)`.
    Call(Call<O>),

    /// Pointer dereference `*x`.
    Star(Box<Expr<O>>),

    Unary {
        op: UnaryOp,
        operand: Box<Expr<O>>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr<O>>,
        right: Box<Expr<O>>,
    },

    /// Payload the simplifier passes through untouched.
    Opaque(O),
}

/// A call: callee, ordered arguments, and the `...` spread marker.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Call<O> {
    pub func: Box<Expr<O>>,
    pub args: Vec<Expr<O>>,
    pub spread: bool,
}

impl<O> Call<O> {
    pub fn new(func: Expr<O>, args: Vec<Expr<O>>) -> Self {
        Call {
            func: Box::new(func),
            args,
            spread: false,
        }
    }
}

/// Composite literal element, optionally keyed (`k: v`).
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element<O> {
    pub key: Option<Expr<O>>,
    pub value: Expr<O>,
}
