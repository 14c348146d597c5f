//! Evaluation-order normalization for Go-like function bodies.
//!
//! The simplifier rewrites a parsed and type-checked function body into a
//! normal form where calls sit only in well-defined places, while keeping
//! the source evaluation order and every observable effect.
//!
//! # Pipeline Position
//!
//! ```text
//! Parse → Type Check → **Simplify** → code generation
//! ```
//!
//! # What Happens During Simplification
//!
//! 1. **Hoisting**: a call in operand position is bound to a fresh
//!    temporary (`_1 := a()`) placed right before the statement using it.
//! 2. **Short-circuit lowering**: `a && b()` becomes a guarded assignment
//!    so `b()` only runs when it would have.
//! 3. **Control flow**: value switches become `if`/`else` chains inside a
//!    single-clause wrapper switch, `fallthrough` is removed, and `if` /
//!    type switch init statements move into a surrounding block.
//! 4. **Select**: channel operands and send values are pre-evaluated;
//!    receive targets containing calls are assigned in the clause body.
//! 5. **Multi-value arguments**: `f(g())` with a two-valued `g` becomes
//!    `_1, _2 := g(); f(_1, _2)`, using the caller's [`ArityResolver`].
//!
//! Running the pass on its own output changes nothing.
//!
//! # Logging
//!
//! Enable with `RUST_LOG=norma_simplify=debug` (one line per pass and per
//! lowered switch) or `=trace` (one line per hoisted temporary), after
//! calling [`init_tracing`].

mod arity;
mod effects;
mod error;
mod lower;
mod options;
mod stack;
mod temps;
pub mod validate;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

use norma_ir::Stmt;

pub use arity::{ArityResolver, NoArity};
pub use effects::contains_call;
pub use error::SimplifyError;
pub use options::SimplifyOptions;
pub use validate::{validate, Violation};

use lower::Simplifier;

/// Simplify a function body with default options.
///
/// Temporaries are numbered from `_1` for each call. On error no output
/// is produced.
pub fn simplify<O: Clone>(
    body: Vec<Stmt<O>>,
    resolver: &dyn ArityResolver<O>,
) -> Result<Vec<Stmt<O>>, SimplifyError> {
    simplify_with(body, resolver, SimplifyOptions::default())
}

/// Simplify a function body.
#[tracing::instrument(level = "debug", skip_all, fields(stmts = body.len()))]
pub fn simplify_with<O: Clone>(
    body: Vec<Stmt<O>>,
    resolver: &dyn ArityResolver<O>,
    options: SimplifyOptions,
) -> Result<Vec<Stmt<O>>, SimplifyError> {
    let mut simplifier = Simplifier::new(resolver, options);
    let simplified = simplifier.normalize_list(body)?;
    tracing::debug!(
        stmts = simplified.len(),
        temps = simplifier.temps_allocated(),
        "simplified function body"
    );

    if options.validate {
        validate(&simplified, &options)?;
    }
    Ok(simplified)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=norma_simplify=debug` or `RUST_LOG=norma_simplify=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
