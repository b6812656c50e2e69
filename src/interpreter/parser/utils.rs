use std::{iter::Peekable, slice::Iter};

use crate::{error::ParseError, interpreter::lexer::Token};

/// A peekable stream of `(Token, offset)` pairs that also knows where the
/// input ends, so running out of tokens can be reported with a position.
pub struct TokenStream<'a> {
    tokens: Peekable<Iter<'a, (Token, usize)>>,
    eof:    usize,
}

impl<'a> TokenStream<'a> {
    /// Wraps a token slice. `eof` is the byte length of the source text.
    #[must_use]
    pub fn new(tokens: &'a [(Token, usize)], eof: usize) -> Self {
        Self { tokens: tokens.iter().peekable(),
               eof }
    }

    /// Looks at the next token without consuming it.
    pub fn peek(&mut self) -> Option<&'a (Token, usize)> {
        self.tokens.peek().copied()
    }

    /// Consumes the next token, failing at end of input.
    ///
    /// # Errors
    /// Returns [`ParseError::UnexpectedEndOfInput`] naming `expected` when no
    /// tokens are left.
    pub fn expect_any(&mut self, expected: &'static str) -> Result<&'a (Token, usize), ParseError> {
        let eof = self.eof;
        self.next()
            .ok_or(ParseError::UnexpectedEndOfInput { expected,
                                                      position: eof })
    }
}

/// Builds the error for a token that does not fit the grammar.
pub(in crate::interpreter::parser) fn unexpected(expected: &'static str,
                                                 token: &Token,
                                                 position: usize)
                                                 -> ParseError {
    ParseError::UnexpectedToken { expected,
                                  found: token.to_string(),
                                  position }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = &'a (Token, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}
