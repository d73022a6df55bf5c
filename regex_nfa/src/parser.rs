use crate::error::Diagnostic;
use crate::lexer::Lexer;
use crate::nfa::{Fragment, Nfa, StateArena};
use crate::token::Token;

/// Recursive-descent parser that performs Thompson's construction while
/// recognizing the grammar:
///
/// ```text
/// expression := factor expression?
/// factor     := term ( '*' | '+' | '?' | '|' factor )?
/// term       := LETTER | '(' expression ')'
/// ```
///
/// One token of lookahead, pulled from the lexer on demand. Syntax errors
/// are collected as diagnostics and never abort construction.
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Token,
    arena: StateArena,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        let mut lexer = Lexer::new(pattern);
        let lookahead = lexer.next_token();
        Self {
            lexer,
            lookahead,
            arena: StateArena::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Builds the automaton for `pattern` and runs the renumbering pass.
    /// The automaton is best-effort when diagnostics are present.
    pub fn compile(pattern: &str) -> (Nfa, Vec<Diagnostic>) {
        let mut parser = Parser::new(pattern);
        let fragment = parser.expression();
        let mut nfa = Nfa::new(parser.arena, fragment);
        nfa.renumber();
        (nfa, parser.diagnostics)
    }

    fn expression(&mut self) -> Fragment {
        if self.lookahead == Token::End {
            return self.arena.epsilon();
        }
        let fragment = self.factor();
        if self.lookahead.starts_term() {
            let rest = self.expression();
            return self.arena.concatenate(fragment, rest);
        }
        fragment
    }

    fn factor(&mut self) -> Fragment {
        let fragment = self.term();
        match self.lookahead {
            Token::Star => {
                let starred = self.arena.star(fragment);
                self.consume();
                starred
            }
            Token::Plus => {
                let plussed = self.arena.plus(fragment);
                self.consume();
                plussed
            }
            Token::QuestionMark => {
                let opt = self.arena.optional(fragment);
                self.consume();
                opt
            }
            Token::Or => {
                self.consume();
                let right = self.factor();
                self.arena.alternate(fragment, right)
            }
            _ => fragment,
        }
    }

    fn term(&mut self) -> Fragment {
        match self.lookahead {
            Token::Letter(c) => {
                let fragment = self.arena.literal(c);
                self.consume();
                fragment
            }
            Token::LParen => {
                self.consume();
                let fragment = self.expression();
                self.expect(Token::RParen);
                fragment
            }
            found => {
                // The offending token is left in place; the surrounding
                // productions decide whether it still means something.
                self.diagnostics.push(Diagnostic::InvalidTerm { found });
                self.arena.epsilon()
            }
        }
    }

    /// Reports a diagnostic if the held token is not `expected`, then
    /// advances regardless.
    fn expect(&mut self, expected: Token) {
        if self.lookahead != expected {
            self.diagnostics.push(Diagnostic::UnexpectedToken {
                expected,
                found: self.lookahead,
            });
        }
        self.consume();
    }

    fn consume(&mut self) {
        self.lookahead = self.lexer.next_token();
    }
}
