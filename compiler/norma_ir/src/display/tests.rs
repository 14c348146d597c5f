use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{AssignOp, BinaryOp, BranchKind, UnaryOp};
use crate::{Ident, Name, Span};

fn id(name: &str) -> Expr<String> {
    Expr::ident(Name::source(name))
}

fn call(func: Expr<String>, args: Vec<Expr<String>>) -> Expr<String> {
    Expr::synthetic(ExprKind::Call(Call::new(func, args)))
}

#[test]
fn renders_temps_and_calls() {
    let stmts = vec![
        Stmt::define(Expr::temp(1), call(id("a"), vec![])),
        Stmt::expr(Expr::unary(UnaryOp::Neg, Expr::temp(1))),
    ];
    assert_eq!(render_stmts(&stmts), "_1 := a(); -_1");
}

#[test]
fn renders_if_else_chain() {
    let inner = Stmt::synthetic(StmtKind::If {
        init: None,
        cond: id("c"),
        then_branch: Block::synthetic(vec![Stmt::expr(id("d"))]),
        else_branch: None,
    });
    let stmt: Stmt<String> = Stmt::synthetic(StmtKind::If {
        init: None,
        cond: id("a"),
        then_branch: Block::synthetic(vec![Stmt::expr(id("b"))]),
        else_branch: Some(Box::new(inner)),
    });
    assert_eq!(stmt.to_string(), "if a { b } else if c { d }");
}

#[test]
fn renders_switch_and_clauses() {
    let stmt: Stmt<String> = Stmt::synthetic(StmtKind::Switch {
        init: None,
        tag: Some(id("a")),
        clauses: vec![
            CaseClause {
                values: vec![id("b"), id("c")],
                body: vec![Stmt::expr(call(id("d"), vec![]))],
                span: Span::DUMMY,
            },
            CaseClause {
                values: vec![],
                body: vec![],
                span: Span::DUMMY,
            },
        ],
    });
    assert_eq!(stmt.to_string(), "switch a { case b, c: d(); default: }");
}

#[test]
fn renders_slices_and_literals() {
    let slice: Expr<String> = Expr::synthetic(ExprKind::Slice {
        base: Box::new(id("a")),
        low: None,
        high: Some(Box::new(id("h"))),
        max: Some(Box::new(id("m"))),
    });
    assert_eq!(slice.to_string(), "a[:h:m]");

    let lit: Expr<String> = Expr::synthetic(ExprKind::CompositeLit {
        ty: Some(Box::new(id("T"))),
        elements: vec![Element {
            key: Some(id("A")),
            value: Expr::binary(BinaryOp::Add, id("x"), id("y")),
        }],
    });
    assert_eq!(lit.to_string(), "T{A: x + y}");
}

#[test]
fn renders_passthrough_statements() {
    let labeled: Stmt<String> = Stmt::synthetic(StmtKind::Labeled {
        label: Ident::synthetic("l"),
        stmt: Box::new(Stmt::synthetic(StmtKind::Branch {
            kind: BranchKind::Break,
            label: Some(Ident::synthetic("l")),
        })),
    });
    assert_eq!(labeled.to_string(), "l: break l");

    let assign: Stmt<String> = Stmt::synthetic(StmtKind::Assign {
        lhs: vec![id("a"), id("b")],
        op: AssignOp::Assign,
        rhs: vec![id("b"), id("a")],
    });
    assert_eq!(assign.to_string(), "a, b = b, a");

    let opaque: Stmt<String> = Stmt::synthetic(StmtKind::Opaque("var d int".to_owned()));
    assert_eq!(opaque.to_string(), "var d int");
}
