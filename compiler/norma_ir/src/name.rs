//! Identifier names.
//!
//! A [`Name`] is either text taken from the source or a synthetic temporary
//! numbered by the simplifier. The two spaces are disjoint by construction:
//! no source name ever compares equal to a temporary, even when a program
//! happens to spell an identifier `_1`.

use std::fmt;

use crate::Span;

/// Identifier payload.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Name {
    /// An identifier spelled in the source.
    Source(Box<str>),
    /// A single-assignment temporary introduced by the simplifier.
    Temp(u32),
}

impl Name {
    /// Create a source name.
    pub fn source(text: impl Into<Box<str>>) -> Self {
        Name::Source(text.into())
    }

    /// Is this a simplifier temporary?
    #[inline]
    pub const fn is_temp(&self) -> bool {
        matches!(self, Name::Temp(_))
    }

    /// Temporary number, if this is a temporary.
    #[inline]
    pub const fn as_temp(&self) -> Option<u32> {
        match self {
            Name::Temp(n) => Some(*n),
            Name::Source(_) => None,
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Source(text) => f.write_str(text),
            Name::Temp(n) => write!(f, "_{n}"),
        }
    }
}

/// A name together with the position it was written at.
///
/// Used where the tree needs a bare identifier that is not an expression:
/// selector fields, labels, declared names.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    /// A source identifier without position (tests, synthesized labels).
    pub fn synthetic(text: impl Into<Box<str>>) -> Self {
        Ident {
            name: Name::source(text),
            span: Span::DUMMY,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
