use crate::token::Token;
use std::fmt::{Display, Formatter};

/// Advisory syntax problem reported during construction. Diagnostics never
/// abort parsing: the parser keeps going with whatever fragment it has, so
/// an automaton accompanied by diagnostics may be structurally incomplete.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Diagnostic {
    /// The held token did not match the grammar symbol the parser expected.
    UnexpectedToken { expected: Token, found: Token },
    /// A `term` position held something that cannot start a term.
    InvalidTerm { found: Token },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnexpectedToken { expected, found } => {
                write!(f, "expected '{expected}', got '{found}'")
            }
            Diagnostic::InvalidTerm { found } => {
                write!(f, "invalid term symbol '{found}'")
            }
        }
    }
}
