use std::fmt::{Display, Formatter};

/// Tokens of the restricted regex alphabet. `Letter` carries the matched
/// character; `End` is returned forever once the input is exhausted.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token {
    LParen,
    RParen,
    Star,
    Plus,
    Or,
    QuestionMark,
    Letter(char),
    End,
}

impl Token {
    /// True for tokens that can begin a `term` production.
    pub(crate) fn starts_term(&self) -> bool {
        matches!(self, Token::Letter(_) | Token::LParen)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Star => write!(f, "*"),
            Token::Plus => write!(f, "+"),
            Token::Or => write!(f, "|"),
            Token::QuestionMark => write!(f, "?"),
            Token::Letter(c) => write!(f, "{c}"),
            Token::End => write!(f, "<end>"),
        }
    }
}
