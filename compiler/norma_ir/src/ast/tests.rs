use super::*;
use crate::{Name, Span};

#[test]
fn test_synthetic_nodes_have_dummy_span() {
    let e: Expr<()> = Expr::temp(3);
    assert!(e.span.is_dummy());
    assert_eq!(e.as_temp(), Some(3));

    let s: Stmt<()> = Stmt::define(Expr::temp(1), Expr::ident(Name::source("a")));
    assert!(s.span.is_dummy());
}

#[test]
fn test_fallthrough_detection() {
    let ft: Stmt<()> = Stmt::synthetic(StmtKind::Branch {
        kind: BranchKind::Fallthrough,
        label: None,
    });
    let brk: Stmt<()> = Stmt::synthetic(StmtKind::Branch {
        kind: BranchKind::Break,
        label: None,
    });
    assert!(ft.is_fallthrough());
    assert!(!brk.is_fallthrough());
}

#[test]
fn test_default_clause() {
    let clause: CaseClause<()> = CaseClause {
        values: Vec::new(),
        body: Vec::new(),
        span: Span::new(0, 8),
    };
    assert!(clause.is_default());
}

#[test]
fn test_short_circuit_ops() {
    assert!(BinaryOp::And.is_short_circuit());
    assert!(BinaryOp::Or.is_short_circuit());
    assert!(!BinaryOp::BitAnd.is_short_circuit());
    assert_eq!(AssignOp::Compound(BinaryOp::AndNot).as_symbol(), "&^=");
}

#[test]
fn test_expr_debug_includes_span() {
    let e: Expr<()> = Expr::new(ExprKind::BasicLit("42".into()), Span::new(4, 6));
    assert_eq!(format!("{e:?}"), "BasicLit(\"42\") @ 4..6");
}
