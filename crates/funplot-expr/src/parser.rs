//! Parser for expression tokens.
//!
//! This module transforms a token stream from the [`lexer`](super::lexer)
//! into an [`Expr`] tree. The public entry point is [`build_expr`].
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression     := additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/") unary)*
//! unary          := ("-" | "+") unary | power
//! power          := primary (("**" | "^") unary)?
//! primary        := number | identifier "(" arguments ")" | identifier | "(" expression ")"
//! ```
//!
//! Power binds tighter than unary minus on its left (`-x**2` is `-(x**2)`)
//! and is right-associative (`2**3**2` is `2**(3**2)`).
//!
//! Nesting is bounded: at most [`MAX_NESTING`] levels of parentheses, calls,
//! signs and powers, and at most [`MAX_TREE_DEPTH`] tree levels, where every
//! link of a `+`/`*` chain also counts as a level. Deeper input is rejected
//! with a diagnostic instead of exhausting the stack.

use winnow::{
    Parser as _,
    combinator::{eof, opt, peek, separated, terminated},
    error::{ContextError, ErrMode},
    stream::{Stateful, Stream, TokenSlice},
    token::any,
};

use crate::{
    builtin::MathFn,
    error::DiagnosticError,
    expr::{BinaryOp, Expr},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
    /// A fully described error found after the tokens were consumed
    Diagnostic(DiagnosticError),
}

/// Deepest nesting of parentheses, calls, signs and powers
pub(crate) const MAX_NESTING: usize = 128;
/// Deepest tree the parser builds, counting operator chain links
pub(crate) const MAX_TREE_DEPTH: usize = 256;

/// Current nesting, carried as parser state
#[derive(Debug, Clone, Copy, Default)]
struct Depth {
    nesting: usize,
    tree: usize,
}

type Input<'src> = Stateful<ExprTokenSlice<'src>, Depth>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;
/// Type alias for winnow TokenSlice with our positioned tokens
type ExprTokenSlice<'src> = TokenSlice<'src, PositionedToken<'src>>;

/// Run `f`, turning any failure into a cut error that remembers where the
/// failed construct started.
fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Helper to create a Cut error carrying a complete diagnostic
fn cut_error_with_diagnostic(diagnostic: DiagnosticError) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Diagnostic(diagnostic));
    ErrMode::Cut(e)
}

fn nested_too_deeply(span: Span) -> ErrMode<ContextError<Context>> {
    cut_error_with_diagnostic(DiagnosticError::from_span(
        "expression is nested too deeply",
        span,
        "nested too deeply",
        Some("split the expression into smaller functions".to_string()),
    ))
}

/// Run `f` one nesting level deeper, entered at the token at `span`.
fn nested<'src, O, F>(input: &mut Input<'src>, span: Span, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let depth = input.state;
    if depth.nesting >= MAX_NESTING || depth.tree >= MAX_TREE_DEPTH {
        return Err(nested_too_deeply(span));
    }

    input.state = Depth {
        nesting: depth.nesting + 1,
        tree: depth.tree + 1,
    };
    let result = f(input);
    input.state = depth;
    result
}

/// Helper to create a Backtrack error describing what was expected
fn backtrack_error_with_label(label: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Label(label));
    ErrMode::Backtrack(e)
}

/// Parse one token of the given kind, returning its span
fn punctuation<'src>(
    input: &mut Input<'src>,
    expected: Token<'static>,
    label: &'static str,
) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| (token.token == expected).then_some(token.span))
        .context(Context::Label(label))
        .parse_next(input)
}

fn number<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::Number(value) => Some(Expr::Number(value)),
        _ => None,
    })
    .context(Context::Label("number"))
    .parse_next(input)
}

fn raw_identifier<'src>(input: &mut Input<'src>) -> IResult<(&'src str, Span)> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Identifier(name) => Some((name, token.span)),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Look at the next token without consuming it
fn peek_token<'src>(input: &mut Input<'src>) -> IResult<Option<&'src PositionedToken<'src>>> {
    opt(peek(any)).parse_next(input)
}

/// Parse an optional unary sign; `Some((true, _))` means negate
fn sign<'src>(input: &mut Input<'src>) -> IResult<Option<(bool, Span)>> {
    opt(any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::Minus => Some((true, token.span)),
        Token::Plus => Some((false, token.span)),
        _ => None,
    }))
    .parse_next(input)
}

/// Parse an optional binary operator accepted by `operator`
fn operator_token<'src>(
    input: &mut Input<'src>,
    operator: fn(&Token<'_>) -> Option<BinaryOp>,
) -> IResult<Option<(BinaryOp, Span)>> {
    opt(any.verify_map(|token: &PositionedToken<'_>| {
        operator(&token.token).map(|op| (op, token.span))
    }))
    .parse_next(input)
}

fn comma<'src>(input: &mut Input<'src>) -> IResult<()> {
    punctuation(input, Token::Comma, "`,`").map(|_| ())
}

/// Parse a function call after its name, or fall back to a plain symbol.
fn call_or_symbol<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    let (name, name_span) = raw_identifier(input)?;

    let Some(open_span) =
        opt(|i: &mut Input<'src>| punctuation(i, Token::LeftParen, "`(`")).parse_next(input)?
    else {
        return Ok(Expr::symbol(name));
    };

    let args: Vec<Expr> = nested(input, open_span, |i| {
        cut_err(i, |i| separated(1.., expression, comma).parse_next(i))
    })?;
    let close_span = cut_err(input, |i| punctuation(i, Token::RightParen, "`)`"))?;
    let call_span = name_span.union(close_span);

    let Some(func) = MathFn::from_name(name) else {
        return Err(cut_error_with_diagnostic(DiagnosticError::from_span(
            format!("unknown function `{name}`"),
            name_span,
            "unknown function",
            Some(format!(
                "available functions: {}",
                MathFn::ALL.map(MathFn::name).join(", ")
            )),
        )));
    };

    let arity = func.arity();
    if !arity.contains(&args.len()) {
        let expected = if arity.start() == arity.end() {
            format!("{}", arity.start())
        } else {
            format!("{} or {}", arity.start(), arity.end())
        };
        return Err(cut_error_with_diagnostic(DiagnosticError::from_span(
            format!(
                "`{name}` takes {expected} argument(s) but {} were given",
                args.len()
            ),
            call_span,
            "wrong number of arguments",
            None,
        )));
    }

    Ok(Expr::call(func, args))
}

fn parenthesized<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    let open_span = punctuation(input, Token::LeftParen, "`(`")?;
    let inner = nested(input, open_span, |i| cut_err(i, expression))?;
    cut_err(input, |i| punctuation(i, Token::RightParen, "`)`"))?;
    Ok(inner)
}

/// Dispatch on the next token so a missing operand is reported with one
/// clear label instead of the last alternative tried.
fn primary<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    match peek_token(input)? {
        Some(PositionedToken {
            token: Token::Number(_),
            ..
        }) => number(input),
        Some(PositionedToken {
            token: Token::Identifier(_),
            ..
        }) => call_or_symbol(input),
        Some(PositionedToken {
            token: Token::LeftParen,
            ..
        }) => parenthesized(input),
        _ => Err(backtrack_error_with_label(
            "a number, variable, function call or `(`",
        )),
    }
}

fn power<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    let base = primary(input)?;

    let Some(power_span) =
        opt(|i: &mut Input<'src>| punctuation(i, Token::Power, "`**`")).parse_next(input)?
    else {
        return Ok(base);
    };

    // Recursing through `unary` makes `**` right-associative and accepts `x**-1`
    let exponent = nested(input, power_span, |i| cut_err(i, unary))?;
    Ok(Expr::binary(BinaryOp::Pow, base, exponent))
}

fn unary<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    match sign(input)? {
        Some((negate, sign_span)) => {
            let operand = nested(input, sign_span, |i| cut_err(i, unary))?;
            Ok(if negate { Expr::neg(operand) } else { operand })
        }
        None => power(input),
    }
}

/// Parse a left-associative chain of `operand (op operand)*`
///
/// Each link puts the chain so far one level deeper in the tree, so links
/// count against [`MAX_TREE_DEPTH`] until the chain ends.
fn binary_chain<'src>(
    input: &mut Input<'src>,
    operand: fn(&mut Input<'src>) -> IResult<Expr>,
    operator: fn(&Token<'_>) -> Option<BinaryOp>,
) -> IResult<Expr> {
    let depth = input.state;
    let mut lhs = operand(input)?;

    while let Some((op, op_span)) = operator_token(input, operator)? {
        if input.state.tree >= MAX_TREE_DEPTH {
            return Err(nested_too_deeply(op_span));
        }
        input.state.tree += 1;

        let rhs = cut_err(input, operand)?;
        lhs = Expr::binary(op, lhs, rhs);
    }

    input.state = depth;
    Ok(lhs)
}

fn multiplicative<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    binary_chain(input, unary, |token| match token {
        Token::Star => Some(BinaryOp::Mul),
        Token::Slash => Some(BinaryOp::Div),
        _ => None,
    })
}

fn additive<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    binary_chain(input, multiplicative, |token| match token {
        Token::Plus => Some(BinaryOp::Add),
        Token::Minus => Some(BinaryOp::Sub),
        _ => None,
    })
}

fn expression<'src>(input: &mut Input<'src>) -> IResult<Expr> {
    additive(input)
}

/// Convert a winnow error into a [`DiagnosticError`] pointing at the
/// offending token (or the end of input).
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    source_len: usize,
    current_remaining: usize,
) -> DiagnosticError {
    let context_error = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(diagnostic) = context_error.context().find_map(|ctx| match ctx {
        Context::Diagnostic(diagnostic) => Some(diagnostic.clone()),
        _ => None,
    }) {
        return diagnostic;
    }

    let expected = context_error.context().find_map(|ctx| match ctx {
        Context::Label(label) => Some(*label),
        _ => None,
    });

    let end_offset = tokens.len() - current_remaining;
    let (found, span) = match tokens.get(end_offset) {
        Some(token) => (token.token.to_string(), token.span),
        None => (
            "end of input".to_string(),
            Span::new(source_len..source_len),
        ),
    };

    let message = match expected {
        Some(expected) => format!("unexpected {found}, expected {expected}"),
        None => format!("unexpected {found}"),
    };

    let help = match tokens.get(end_offset).map(|t| &t.token) {
        None => Some("the expression ends too early".to_string()),
        Some(Token::RightParen) => Some("check that parentheses are balanced".to_string()),
        Some(Token::Identifier(_) | Token::Number(_) | Token::LeftParen) => {
            Some("use `*` for multiplication, e.g. `2*x`".to_string())
        }
        _ => None,
    };

    DiagnosticError::from_span(message, span, "unexpected token", help)
}

/// Build an expression from tokens.
///
/// Whitespace tokens are skipped. The whole token stream must form a single
/// expression.
pub fn build_expr(
    tokens: &[PositionedToken<'_>],
    source_len: usize,
) -> Result<Expr, DiagnosticError> {
    let tokens: Vec<PositionedToken<'_>> = tokens
        .iter()
        .filter(|t| t.token != Token::Whitespace)
        .cloned()
        .collect();
    let mut input = Stateful {
        input: TokenSlice::new(&tokens),
        state: Depth::default(),
    };

    match terminated(expression, eof.context(Context::Label("an operator")))
        .parse_next(&mut input)
    {
        Ok(expr) => Ok(expr),
        Err(e) => {
            let current_remaining = input.eof_offset();
            Err(convert_error(e, &tokens, source_len, current_remaining))
        }
    }
}
