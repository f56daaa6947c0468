//! # Funplot Expressions
//!
//! Parsing, substitution and evaluation of the mathematical expressions
//! that back funplot's `Function` drawables.
//!
//! The pipeline is split in two stages:
//!
//! 1. [`parse`] turns text into an immutable [`Expr`] tree, reporting
//!    malformed input as a [`DiagnosticError`] with a source [`Span`].
//! 2. [`compile`] substitutes the named [`CONSTANTS`] and checks that exactly
//!    one free variable remains, producing a [`UnaryFunction`].
//!
//! ## Usage
//!
//! ```
//! # use funplot_expr::{compile, ExprError};
//!
//! fn main() -> Result<(), ExprError> {
//!     let f = compile("sin(pi * x) / 2")?;
//!     let ys = f.eval_many(&[0.0, 0.5]);
//!     assert_eq!(ys[1], 0.5);
//!     Ok(())
//! }
//! ```

mod builtin;
mod compile;
mod error;
mod expr;
mod lexer;
mod parser;
mod span;
mod tokens;

pub use builtin::MathFn;
pub use compile::{CONSTANTS, UnaryFunction};
pub use error::{DiagnosticError, ExprError};
pub use expr::{BinaryOp, Expr};
pub use span::Span;

use log::trace;

/// Parse expression text into an [`Expr`].
///
/// Supported syntax: numbers (`2`, `.5`, `1e-3`), variables, `+ - * /`,
/// `**` or `^` for powers, parentheses and calls to the functions listed by
/// [`MathFn`].
///
/// # Errors
///
/// Returns [`ExprError::Syntax`] with the location of the first problem.
pub fn parse(source: &str) -> Result<Expr, ExprError> {
    let tokens = lexer::tokenize(source)?;
    trace!(source = source, tokens_len = tokens.len(); "Tokenized expression");

    let expr = parser::build_expr(&tokens, source.len())?;
    trace!(expr:% = expr; "Parsed expression");

    Ok(expr)
}

/// Parse `source` and compile it into a [`UnaryFunction`].
///
/// # Errors
///
/// Returns [`ExprError::Syntax`] for malformed text and [`ExprError::Arity`]
/// when the expression does not have exactly one free variable.
pub fn compile(source: &str) -> Result<UnaryFunction, ExprError> {
    UnaryFunction::compile(&parse(source)?)
}
