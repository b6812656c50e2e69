use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the byte offset into the source text where the
/// problem was detected.
pub enum ParseError {
    /// The lexer could not turn the input into a token, e.g. a bare `!`, an
    /// unterminated string or an integer that does not fit in 64 bits.
    #[error("Error at offset {position}: Invalid token '{token}'.")]
    InvalidToken {
        /// The source fragment that failed to lex.
        token:    String,
        /// Byte offset of the fragment.
        position: usize,
    },
    /// Found a token that does not fit the grammar at this point.
    #[error("Error at offset {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: &'static str,
        /// The token encountered.
        found:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input unexpectedly, e.g. `x >` with no right
    /// operand.
    #[error("Error at offset {position}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: &'static str,
        /// Byte offset of the end of the input.
        position: usize,
    },
    /// A group was opened with `(` but never closed.
    #[error("Error at offset {position}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// Byte offset of the unmatched `(`.
        position: usize,
    },
    /// Found extra tokens after a complete expression, e.g. a stray `)`.
    #[error("Error at offset {position}: Extra tokens after expression: {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Groups are nested deeper than the parser allows.
    #[error("Error at offset {position}: Groups nested deeper than {max} levels.")]
    NestingTooDeep {
        /// The nesting limit.
        max:      usize,
        /// Byte offset of the `(` that opened one group too many.
        position: usize,
    },
    /// The input contained no tokens at all.
    #[error("Error at offset 0: Expression is empty.")]
    EmptyExpression,
}

impl ParseError {
    /// Byte offset into the source text where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::InvalidToken { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::ExpectedClosingParen { position }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
            Self::EmptyExpression => 0,
        }
    }
}
