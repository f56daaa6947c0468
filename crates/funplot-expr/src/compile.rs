//! Compilation of expressions into single-variable numeric functions.

use std::f64::consts::{E, PI};

use log::debug;

use crate::{error::ExprError, expr::Expr};

/// Named constants substituted before the free variable is identified.
pub const CONSTANTS: [(&str, f64); 3] = [("e", E), ("pi", PI), ("π", PI)];

/// An expression with exactly one free variable, ready to be evaluated
/// pointwise.
///
/// ```
/// # use funplot_expr::compile;
/// let f = compile("t ** 2 - 1").unwrap();
/// assert_eq!(f.variable(), "t");
/// assert_eq!(f.eval_many(&[-1.0, 0.0, 2.0]), vec![0.0, -1.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryFunction {
    variable: String,
    expr: Expr,
}

impl UnaryFunction {
    /// Substitutes [`CONSTANTS`], then requires exactly one remaining symbol.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Arity`] listing the remaining symbols when there
    /// are none or more than one.
    pub fn compile(expr: &Expr) -> Result<Self, ExprError> {
        let substituted = CONSTANTS
            .iter()
            .fold(expr.clone(), |acc, (name, value)| {
                acc.subs(name, &Expr::Number(*value))
            });

        let symbols: Vec<String> = substituted
            .free_symbols()
            .into_iter()
            .map(str::to_string)
            .collect();
        let [variable] = <[String; 1]>::try_from(symbols)
            .map_err(|variables| ExprError::Arity { variables })?;

        let expr = substituted.simplify();
        debug!(variable = variable.as_str(), expr:% = expr; "Compiled expression");

        Ok(Self { variable, expr })
    }

    /// Name of the free variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The simplified expression with constants folded in.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates at `x`. Points outside the mathematical domain give NaN.
    pub fn eval(&self, x: f64) -> f64 {
        self.expr
            .eval(&|name| (name == self.variable).then_some(x))
            .unwrap_or(f64::NAN)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}
