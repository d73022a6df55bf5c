//! Compiles a restricted regular-expression syntax (single alphanumeric
//! literals, grouping, `* + ? |` and concatenation) into a nondeterministic
//! finite automaton via Thompson's construction, and renders the result as
//! Graphviz DOT text for visualization.

use parser::Parser;

mod dot;
mod error;
mod lexer;
mod nfa;
mod parser;
mod token;

pub use dot::to_dot;
pub use error::Diagnostic;
pub use nfa::{Nfa, Transition, TransitionKind};
pub use token::Token;

/// Outcome of one compile: the automaton, plus the ordered syntax
/// diagnostics collected along the way. Diagnostics are advisory; when any
/// are present the automaton is a best-effort partial result.
pub struct Compilation {
    pub nfa: Nfa,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compiles `pattern` into an NFA with dense, BFS-ordered state ids.
/// Never fails outright: malformed input degrades to a partial automaton
/// with diagnostics attached.
pub fn compile(pattern: &str) -> Compilation {
    let (nfa, diagnostics) = Parser::compile(pattern);
    Compilation { nfa, diagnostics }
}
