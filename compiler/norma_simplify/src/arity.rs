//! Result-arity query answered by the type resolver.

use norma_ir::Expr;

/// Tells the simplifier how many values a call expression produces.
///
/// Only consulted for the lone argument of a call (`f(g())`), which is the
/// one place a multi-value result can flow into another call. Returning
/// `0` or `1` means "single value"; anything greater splits the argument
/// into that many temporaries.
pub trait ArityResolver<O> {
    fn result_arity(&self, call: &Expr<O>) -> usize;
}

/// Resolver for callers without type information: every call is
/// single-valued.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoArity;

impl<O> ArityResolver<O> for NoArity {
    fn result_arity(&self, _call: &Expr<O>) -> usize {
        1
    }
}

impl<O, F> ArityResolver<O> for F
where
    F: Fn(&Expr<O>) -> usize,
{
    fn result_arity(&self, call: &Expr<O>) -> usize {
        self(call)
    }
}
