use crate::{
    ast::{Compare, ComparisonOp, LiteralValue, Operand},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            utils::{TokenStream, unexpected},
        },
    },
};

/// Parses a comparison of the form `operand operator operand`.
///
/// Grammar: `compare := operand ("!=" | ">=" | "<=" | ">" | "<" | "=")
/// operand`
///
/// # Errors
/// - `UnexpectedToken` if an operand or the operator is missing.
/// - `UnexpectedEndOfInput` if the input stops part way, e.g. `x >`.
pub fn parse_compare(tokens: &mut TokenStream<'_>) -> ParseResult<Compare> {
    let left = parse_operand(tokens)?;

    let (token, position) = tokens.expect_any("a comparison operator")?;
    let op = token_to_comparison_operator(token).ok_or_else(|| {
                                                    unexpected("a comparison operator",
                                                               token,
                                                               *position)
                                                })?;

    let right = parse_operand(tokens)?;

    Ok(Compare { left, op, right })
}

/// Parses a literal or a symbol name.
///
/// Grammar: `operand := float | int | string | bool | identifier`
///
/// # Errors
/// - `UnexpectedToken` for operators, keywords and parentheses.
/// - `UnexpectedEndOfInput` if no tokens are left.
pub fn parse_operand(tokens: &mut TokenStream<'_>) -> ParseResult<Operand> {
    const EXPECTED: &str = "a value or symbol";

    match tokens.expect_any(EXPECTED)? {
        (Token::Real(r), _) => Ok(Operand::Literal(LiteralValue::Real(*r))),
        (Token::Integer(n), _) => Ok(Operand::Literal(LiteralValue::Integer(*n))),
        (Token::Str(s), _) => Ok(Operand::Literal(LiteralValue::Str(s.clone()))),
        (Token::Bool(b), _) => Ok(Operand::Literal(LiteralValue::Bool(*b))),
        (Token::Identifier(name), _) => Ok(Operand::Symbol(name.clone())),
        (tok, position) => Err(unexpected(EXPECTED, tok, *position)),
    }
}

/// Maps a token to its comparison operator, if it is one.
///
/// # Example
/// ```
/// use boolexpr::{
///     ComparisonOp,
///     interpreter::{lexer::Token, parser::compare::token_to_comparison_operator},
/// };
///
/// assert_eq!(token_to_comparison_operator(&Token::GreaterEqual),
///            Some(ComparisonOp::Gte));
/// assert_eq!(token_to_comparison_operator(&Token::And), None);
/// ```
#[must_use]
pub const fn token_to_comparison_operator(token: &Token) -> Option<ComparisonOp> {
    match token {
        Token::Equals => Some(ComparisonOp::Eq),
        Token::BangEqual => Some(ComparisonOp::Neq),
        Token::Greater => Some(ComparisonOp::Gt),
        Token::GreaterEqual => Some(ComparisonOp::Gte),
        Token::Less => Some(ComparisonOp::Lt),
        Token::LessEqual => Some(ComparisonOp::Lte),
        _ => None,
    }
}
