//! Norma IR - tree model for the simplification pass
//!
//! This crate contains the data structures the simplifier reads and
//! writes:
//! - Spans for source locations
//! - Names, split into source identifiers and synthetic temporaries
//! - Statement and expression nodes, generic over an opaque payload `O`
//! - A read-only visitor
//! - A single-line debug renderer (`Display` impls)
//!
//! # Design Philosophy
//!
//! - **Closed variants**: every statement and expression kind the pass
//!   rewrites is a named variant, so an unhandled kind is a compile error
//!   in the pass rather than a silent fallthrough.
//! - **Opaque payload**: anything the pass never inspects travels in
//!   `Opaque(O)` and is handed back untouched.
//! - **Positions are data**: every node carries its `Span`, and rebuilt
//!   nodes keep it.

pub mod ast;
pub mod display;
mod name;
mod span;
pub mod visitor;

pub use ast::{
    AssignOp, BinaryOp, Block, BranchKind, Call, CaseClause, CommClause, Element, Expr, ExprKind,
    IncDecOp, Stmt, StmtKind, UnaryOp,
};
pub use display::{render_stmts, StmtList};
pub use name::{Ident, Name};
pub use span::Span;
pub use visitor::Visitor;
