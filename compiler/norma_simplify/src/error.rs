//! Errors surfaced by the simplifier.
//!
//! Every error is an invariant violation in the tree handed to the pass:
//! a shape the upstream producer should never build. The pass stops at the
//! first one and returns no output for the function body.

use norma_ir::Span;

use crate::validate::Violation;

/// Failure of one simplification pass.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimplifyError {
    /// A select clause whose communication is not `<-ch`, `lhs = <-ch`,
    /// `lhs := <-ch`, or `ch <- v`.
    #[error("select clause at {span} is not a send, a receive, or a receive assignment")]
    UnexpectedCommClause { span: Span },

    /// A type switch guard that is not `x.(type)` or `v := x.(type)`.
    #[error("type switch guard at {span} is not a single type assertion")]
    UnexpectedTypeSwitchGuard { span: Span },

    /// The output failed normal-form validation.
    #[error("simplified body is not in normal form: {0}")]
    Invalid(#[from] Violation),
}
