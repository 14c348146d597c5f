//! Tree model: statements and expressions of one function body.
//!
//! Nodes own their children (`Box` / `Vec`). The simplifier consumes an
//! input tree and builds a new one, moving unchanged children across.
//!
//! # Module Structure
//!
//! - `expr`: Expression types (`Expr`, `ExprKind`, `Call`, `Element`)
//! - `stmt`: Statement types (`Stmt`, `StmtKind`, `Block`, clauses)
//! - `operators`: Operators and branch kinds

mod expr;
mod operators;
mod stmt;

pub use expr::{Call, Element, Expr, ExprKind};
pub use operators::{AssignOp, BinaryOp, BranchKind, IncDecOp, UnaryOp};
pub use stmt::{Block, CaseClause, CommClause, Stmt, StmtKind};

#[cfg(test)]
mod tests;
