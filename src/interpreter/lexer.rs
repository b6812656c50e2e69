use std::fmt;

use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `-2.0` or `2.1e-10`.
    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"-?\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"-?[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42` or `-7`.
    #[regex(r"-?[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literal tokens, unquoted, such as `"hello"`.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens; symbol names such as `x`, `user_id` or `feature-a`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// Spaces, tabs, feeds and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(r) => write!(f, "float {r:?}"),
            Self::Integer(n) => write!(f, "integer {n}"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::Bool(b) => write!(f, "'{b}'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::And => f.write_str("'and'"),
            Self::Or => f.write_str("'or'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Equals => f.write_str("'='"),
            Self::BangEqual => f.write_str("'!='"),
            Self::LessEqual => f.write_str("'<='"),
            Self::GreaterEqual => f.write_str("'>='"),
            Self::Less => f.write_str("'<'"),
            Self::Greater => f.write_str("'>'"),
            Self::Ignored => f.write_str("whitespace"),
        }
    }
}

/// Splits source text into tokens paired with their byte offsets.
///
/// # Errors
/// Returns [`ParseError::InvalidToken`] for the first fragment that is not a
/// valid token, such as a bare `!`, an unterminated string, an unknown escape
/// sequence or an integer literal that overflows `i64`.
///
/// # Example
/// ```
/// use boolexpr::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x >= 10").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("x".to_string()), 0),
///                 (Token::GreaterEqual, 2),
///                 (Token::Integer(10), 5)]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                return Err(ParseError::InvalidToken { token: lexer.slice().to_string(),
                                                      position });
            },
        }
    }

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
///
/// Returns `None`, and so a lexing error, when the literal overflows to an
/// infinite value.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok().filter(|r: &f64| r.is_finite())
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None`, and so a lexing error, when the literal overflows `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes from a string literal and resolves its escape
/// sequences.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = slice.get(1..slice.len() - 1)?;
    unquote(inner)
}

/// Resolves the escape sequences in the body of a string literal.
///
/// Supports `\" \\ \/ \' \n \r \t \0 \a \b \f \v`, `\xNN` for ASCII,
/// `\uNNNN` and `\u{N..}`. Any other escape is rejected.
fn unquote(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            '\'' => '\'',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'v' => '\u{0B}',
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                let code = parse_hex(&hex).and_then(|code| u8::try_from(code).ok())
                                          .filter(u8::is_ascii)?;
                char::from(code)
            },
            'u' => {
                let rest = chars.as_str();
                let (hex, consumed) = if let Some(braced) = rest.strip_prefix('{') {
                    let end = braced.find('}')?;
                    (braced.get(..end)?, end + 2)
                } else {
                    (rest.get(..4)?, 4)
                };
                let code = parse_hex(hex)?;
                chars = rest.get(consumed..)?.chars();
                char::from_u32(code)?
            },
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

/// Parses a non-empty run of hexadecimal digits. Signs are rejected.
fn parse_hex(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
