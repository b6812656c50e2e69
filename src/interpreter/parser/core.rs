use crate::{
    ast::{BoolExpr, Expr, LogicalOp, OpExpr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            compare::parse_compare,
            utils::{TokenStream, unexpected},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest group nesting accepted by the parser.
pub const MAX_DEPTH: usize = 256;

/// Parses a complete token stream into a tree.
///
/// This is the entry point for parsing. The whole stream must form a single
/// expression; anything left over, such as an unmatched `)`, is an error.
///
/// Grammar: `source := bool_expr EOF`
///
/// # Errors
/// - `EmptyExpression` if the stream holds no tokens.
/// - `UnexpectedTrailingTokens` if tokens remain after the expression.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_source(tokens: &mut TokenStream<'_>) -> ParseResult<BoolExpr> {
    if tokens.peek().is_none() {
        return Err(ParseError::EmptyExpression);
    }

    let tree = parse_bool_expr(tokens, 0)?;

    match tokens.next() {
        None => Ok(tree),
        Some((tok, position)) => {
            Err(ParseError::UnexpectedTrailingTokens { token:    tok.to_string(),
                                                       position: *position, })
        },
    }
}

/// Parses a chain of expressions joined by `and` / `or`.
///
/// The chain is kept flat in source order. No precedence is applied between
/// the two connectives; the evaluator folds the chain from left to right.
///
/// Grammar: `bool_expr := expr (("and" | "or") expr)*`
///
/// `depth` is the number of groups enclosing the chain.
///
/// # Returns
/// A `BoolExpr` whose `rest` holds every connective after the first
/// expression.
pub fn parse_bool_expr(tokens: &mut TokenStream<'_>, depth: usize) -> ParseResult<BoolExpr> {
    let mut tree = BoolExpr::new(parse_expr(tokens, depth)?);

    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_logical_operator(token)
    {
        tokens.next();
        let expr = parse_expr(tokens, depth)?;
        tree.rest.push(OpExpr { op, expr });
    }

    Ok(tree)
}

/// Parses a single comparison or a parenthesized group.
///
/// Grammar: `expr := compare | "(" bool_expr ")"`
///
/// # Errors
/// - `NestingTooDeep` if opening a group would exceed [`MAX_DEPTH`].
/// - `ExpectedClosingParen` if the input ends inside a group; the position is
///   the one of the unmatched `(`.
/// - `UnexpectedToken` if something other than `)` follows the group's
///   contents.
pub fn parse_expr(tokens: &mut TokenStream<'_>, depth: usize) -> ParseResult<Expr> {
    let Some((Token::LParen, open)) = tokens.peek() else {
        return Ok(Expr::Compare(parse_compare(tokens)?));
    };
    if depth >= MAX_DEPTH {
        return Err(ParseError::NestingTooDeep { max:      MAX_DEPTH,
                                                position: *open, });
    }
    tokens.next();

    let inner = parse_bool_expr(tokens, depth + 1)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(Expr::group(inner)),
        Some((tok, position)) => Err(unexpected("'and', 'or' or ')'", tok, *position)),
        None => Err(ParseError::ExpectedClosingParen { position: *open }),
    }
}

/// Maps a token to its logical connective, if it is one.
///
/// # Example
/// ```
/// use boolexpr::{
///     LogicalOp,
///     interpreter::{lexer::Token, parser::core::token_to_logical_operator},
/// };
///
/// assert_eq!(token_to_logical_operator(&Token::Or), Some(LogicalOp::Or));
/// assert_eq!(token_to_logical_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_logical_operator(token: &Token) -> Option<LogicalOp> {
    match token {
        Token::And => Some(LogicalOp::And),
        Token::Or => Some(LogicalOp::Or),
        _ => None,
    }
}
