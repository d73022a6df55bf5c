use crate::token::Token;
use std::str::Chars;

/// On-demand tokenizer over a regex pattern. One character of lookahead,
/// no backtracking, no position tracking.
pub(crate) struct Lexer<'a> {
    chars: Chars<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self {
            chars: pattern.chars(),
        }
    }

    /// Returns the next token, or `Token::End` forever once the input is
    /// exhausted. Spaces and unrecognized characters are skipped silently.
    pub fn next_token(&mut self) -> Token {
        for c in self.chars.by_ref() {
            match c {
                '*' => return Token::Star,
                '+' => return Token::Plus,
                '|' => return Token::Or,
                '?' => return Token::QuestionMark,
                '(' => return Token::LParen,
                ')' => return Token::RParen,
                c if Self::is_letter_or_digit(c) => return Token::Letter(c),
                _ => continue,
            }
        }
        Token::End
    }

    // Digit zero is deliberately not part of the literal alphabet.
    fn is_letter_or_digit(c: char) -> bool {
        c.is_ascii_alphabetic() || ('1'..='9').contains(&c)
    }
}
