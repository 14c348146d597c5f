//! Single-line debug rendering.
//!
//! Renders trees as compact Go-like text: statements are separated by
//! `"; "`, blocks are `{ a; b }` (or `{}` when empty). No parentheses are
//! inserted; the tree's own `Paren` nodes are printed as written.
//!
//! This is a test and trace aid. It is not a code generator and makes no
//! attempt to produce text a parser would accept in every case.

use std::fmt::{self, Display, Formatter};

use crate::ast::{
    Block, Call, CaseClause, CommClause, Element, Expr, ExprKind, Stmt, StmtKind,
};

/// Display adapter for a statement sequence.
pub struct StmtList<'a, O>(pub &'a [Stmt<O>]);

impl<O: Display> Display for StmtList<'_, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_joined(f, self.0, "; ")
    }
}

/// Render a statement sequence.
pub fn render_stmts<O: Display>(stmts: &[Stmt<O>]) -> String {
    StmtList(stmts).to_string()
}

fn write_joined<T: Display>(
    f: &mut Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_opt<T: Display>(f: &mut Formatter<'_>, item: Option<&T>) -> fmt::Result {
    match item {
        Some(item) => write!(f, "{item}"),
        None => Ok(()),
    }
}

fn write_body<O: Display>(f: &mut Formatter<'_>, stmts: &[Stmt<O>]) -> fmt::Result {
    if stmts.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    write_joined(f, stmts, "; ")?;
    f.write_str(" }")
}

impl<O: Display> Display for Expr<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::BasicLit(text) => f.write_str(text),
            ExprKind::FuncLit { sig, body } => write!(f, "{sig} {body}"),
            ExprKind::CompositeLit { ty, elements } => {
                write_opt(f, ty.as_deref())?;
                f.write_str("{")?;
                write_joined(f, elements, ", ")?;
                f.write_str("}")
            }
            ExprKind::Paren(inner) => write!(f, "({inner})"),
            ExprKind::Selector { base, field } => write!(f, "{base}.{field}"),
            ExprKind::Index { base, index } => write!(f, "{base}[{index}]"),
            ExprKind::Slice {
                base,
                low,
                high,
                max,
            } => {
                write!(f, "{base}[")?;
                write_opt(f, low.as_deref())?;
                f.write_str(":")?;
                write_opt(f, high.as_deref())?;
                if let Some(max) = max {
                    write!(f, ":{max}")?;
                }
                f.write_str("]")
            }
            ExprKind::TypeAssert { base, ty } => match ty {
                Some(ty) => write!(f, "{base}.({ty})"),
                None => write!(f, "{base}.(type)"),
            },
            ExprKind::Call(call) => write!(f, "{call}"),
            ExprKind::Star(inner) => write!(f, "*{inner}"),
            ExprKind::Unary { op, operand } => write!(f, "{}{operand}", op.as_symbol()),
            ExprKind::Binary { op, left, right } => {
                write!(f, "{left} {} {right}", op.as_symbol())
            }
            ExprKind::Opaque(payload) => write!(f, "{payload}"),
        }
    }
}

impl<O: Display> Display for Call<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.func)?;
        write_joined(f, &self.args, ", ")?;
        if self.spread {
            f.write_str("...")?;
        }
        f.write_str(")")
    }
}

impl<O: Display> Display for Element<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            write!(f, "{key}: ")?;
        }
        write!(f, "{}", self.value)
    }
}

impl<O: Display> Display for Block<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_body(f, &self.stmts)
    }
}

impl<O: Display> Display for CaseClause<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("default:")?;
        } else {
            f.write_str("case ")?;
            write_joined(f, &self.values, ", ")?;
            f.write_str(":")?;
        }
        if !self.body.is_empty() {
            f.write_str(" ")?;
            write_joined(f, &self.body, "; ")?;
        }
        Ok(())
    }
}

impl<O: Display> Display for CommClause<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.comm {
            Some(comm) => write!(f, "case {comm}:")?,
            None => f.write_str("default:")?,
        }
        if !self.body.is_empty() {
            f.write_str(" ")?;
            write_joined(f, &self.body, "; ")?;
        }
        Ok(())
    }
}

fn write_clauses<T: Display>(f: &mut Formatter<'_>, clauses: &[T]) -> fmt::Result {
    if clauses.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    write_joined(f, clauses, "; ")?;
    f.write_str(" }")
}

impl<O: Display> Display for Stmt<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Expr(expr) => write!(f, "{expr}"),
            StmtKind::Block(block) => write!(f, "{block}"),
            StmtKind::If {
                init,
                cond,
                then_branch,
                else_branch,
            } => {
                f.write_str("if ")?;
                if let Some(init) = init {
                    write!(f, "{init}; ")?;
                }
                write!(f, "{cond} {then_branch}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {else_branch}")?;
                }
                Ok(())
            }
            StmtKind::Switch { init, tag, clauses } => {
                f.write_str("switch ")?;
                if let Some(init) = init {
                    write!(f, "{init}; ")?;
                }
                if let Some(tag) = tag {
                    write!(f, "{tag} ")?;
                }
                write_clauses(f, clauses)
            }
            StmtKind::TypeSwitch {
                init,
                guard,
                clauses,
            } => {
                f.write_str("switch ")?;
                if let Some(init) = init {
                    write!(f, "{init}; ")?;
                }
                write!(f, "{guard} ")?;
                write_clauses(f, clauses)
            }
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                f.write_str("for ")?;
                if init.is_some() || post.is_some() {
                    write_opt(f, init.as_deref())?;
                    f.write_str("; ")?;
                    write_opt(f, cond.as_ref())?;
                    f.write_str("; ")?;
                    write_opt(f, post.as_deref())?;
                    f.write_str(" ")?;
                } else if let Some(cond) = cond {
                    write!(f, "{cond} ")?;
                }
                write!(f, "{body}")
            }
            StmtKind::Range {
                key,
                value,
                define,
                iter,
                body,
            } => {
                f.write_str("for ")?;
                if let Some(key) = key {
                    write!(f, "{key}")?;
                    if let Some(value) = value {
                        write!(f, ", {value}")?;
                    }
                    f.write_str(if *define { " := " } else { " = " })?;
                }
                write!(f, "range {iter} {body}")
            }
            StmtKind::IncDec { operand, op } => write!(f, "{operand}{}", op.as_symbol()),
            StmtKind::Go(call) => write!(f, "go {call}"),
            StmtKind::Defer(call) => write!(f, "defer {call}"),
            StmtKind::Select { clauses } => {
                f.write_str("select ")?;
                write_clauses(f, clauses)
            }
            StmtKind::Send { chan, value } => write!(f, "{chan} <- {value}"),
            StmtKind::Assign { lhs, op, rhs } => {
                write_joined(f, lhs, ", ")?;
                write!(f, " {} ", op.as_symbol())?;
                write_joined(f, rhs, ", ")
            }
            StmtKind::VarDecl { names, ty, values } => {
                f.write_str("var ")?;
                write_joined(f, names, ", ")?;
                if let Some(ty) = ty {
                    write!(f, " {ty}")?;
                }
                if !values.is_empty() {
                    f.write_str(" = ")?;
                    write_joined(f, values, ", ")?;
                }
                Ok(())
            }
            StmtKind::Return(values) => {
                f.write_str("return")?;
                if !values.is_empty() {
                    f.write_str(" ")?;
                    write_joined(f, values, ", ")?;
                }
                Ok(())
            }
            StmtKind::Branch { kind, label } => {
                f.write_str(kind.as_keyword())?;
                if let Some(label) = label {
                    write!(f, " {label}")?;
                }
                Ok(())
            }
            StmtKind::Labeled { label, stmt } => write!(f, "{label}: {stmt}"),
            StmtKind::Empty => Ok(()),
            StmtKind::Opaque(payload) => write!(f, "{payload}"),
        }
    }
}

#[cfg(test)]
mod tests;
