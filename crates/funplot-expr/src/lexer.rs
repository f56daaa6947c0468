//! Lexical analyzer for expression text.
//!
//! The lexer converts source text into a stream of [`Token`]s for the
//! [`parser`](super::parser). The public entry point is [`tokenize`], which
//! stops at the first malformed token and reports it with its span.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1},
    combinator::{alt, cut_err, not, opt, peek},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{literal, one_of, take_while},
};

use crate::{
    error::DiagnosticError,
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` to provide messages with help
/// text and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Parse a number literal: `1`, `2.5`, `1.`, `.5`, `1e-3`, `2.5E+4`.
///
/// Signs are not part of the literal; `-1` is unary minus applied to `1`.
fn number_literal<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start = input.current_token_start();

    let value = (
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)?;

    // `2x` is a common slip for `2*x`
    cut_err(peek(not(one_of(|c: char| c.is_alphanumeric() || c == '_'))))
        .context(LexerDiagnostic {
            message: "missing operator after number",
            help: Some("use `*` for multiplication, e.g. `2*x`"),
            start,
        })
        .parse_next(input)?;

    Ok(Token::Number(value))
}

/// Parse identifiers. Unicode letters are allowed, so `π` and `θ` work.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .verify(|s: &str| {
            s.chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
        })
        .map(Token::Identifier)
        .parse_next(input)
}

/// Parse operators and punctuation (longest first)
fn operator<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        literal("**").value(Token::Power),
        '^'.value(Token::Power),
        '+'.value(Token::Plus),
        '-'.value(Token::Minus),
        '*'.value(Token::Star),
        '/'.value(Token::Slash),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::Comma),
    ))
    .parse_next(input)
}

fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., char::is_whitespace)
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        number_literal, // Must come before identifier and operators (`.5`)
        identifier,
        operator,
        whitespace,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Convert an ErrMode and error position to a [`DiagnosticError`].
///
/// Uses the `LexerDiagnostic` context when present, otherwise reports the
/// character at `error_pos` as unexpected.
fn convert_err_mode(
    err: ErrMode<ContextError<LexerDiagnostic>>,
    source: &str,
    error_pos: usize,
) -> DiagnosticError {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let next_char_len = source[error_pos..]
        .chars()
        .next()
        .map_or(0, char::len_utf8);

    if let Some(LexerDiagnostic {
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let span = Span::new(*start..error_pos + next_char_len);
        return DiagnosticError::from_span(*message, span, *message, help.map(str::to_string));
    }

    let span = Span::new(error_pos..error_pos + next_char_len);
    let found = source[error_pos..].chars().next().unwrap_or(' ');
    DiagnosticError::from_span(
        format!("unexpected character `{found}`"),
        span,
        "unexpected character",
        Some("expressions use numbers, variables, `+ - * / ** ^`, parentheses and function calls".to_string()),
    )
}

/// Split expression text into tokens.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens, including whitespace
/// - `Err(DiagnosticError)` - The first malformed token
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, DiagnosticError> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        match positioned_token(&mut input) {
            Ok(token) => tokens.push(token),
            Err(e) => {
                let error_pos = input.current_token_start();
                return Err(convert_err_mode(e, source, error_pos));
            }
        }
    }

    Ok(tokens)
}
