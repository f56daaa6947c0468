//! The symbolic expression tree.
//!
//! [`Expr`] values are immutable: [`Expr::subs`] and [`Expr::simplify`]
//! return new trees and leave the receiver untouched.
//!
//! ```
//! # use funplot_expr::{Expr, parse};
//! let expr = parse("2 * pi * x").unwrap();
//! let substituted = expr.subs("pi", &Expr::Number(3.0));
//!
//! assert_eq!(expr.to_string(), "2*pi*x");
//! assert_eq!(substituted.to_string(), "2*3*x");
//! assert_eq!(substituted.simplify().to_string(), "6*x");
//! ```

use std::{collections::BTreeSet, fmt};

use crate::{builtin::MathFn, error::ExprError};

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Exponentiation, right-associative
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }
}

const NEG_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 5;

/// A node of a mathematical expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Symbol(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: MathFn,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn neg(operand: Expr) -> Self {
        Self::Neg(Box::new(operand))
    }

    pub fn call(func: MathFn, args: Vec<Expr>) -> Self {
        Self::Call { func, args }
    }

    /// Returns the value if this node is a plain number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Names of every symbol occurring in the expression, sorted.
    ///
    /// ```
    /// # use funplot_expr::parse;
    /// let expr = parse("y * sin(x) + y").unwrap();
    /// assert_eq!(expr.free_symbols().into_iter().collect::<Vec<_>>(), ["x", "y"]);
    /// ```
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols<'a>(&'a self, symbols: &mut BTreeSet<&'a str>) {
        match self {
            Self::Number(_) => {}
            Self::Symbol(name) => {
                symbols.insert(name.as_str());
            }
            Self::Neg(operand) => operand.collect_symbols(symbols),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_symbols(symbols);
                rhs.collect_symbols(symbols);
            }
            Self::Call { args, .. } => {
                for arg in args {
                    arg.collect_symbols(symbols);
                }
            }
        }
    }

    /// Returns a copy of the expression with every occurrence of the symbol
    /// `name` replaced by `replacement`.
    #[must_use = "subs returns a new expression and does not modify the original"]
    pub fn subs(&self, name: &str, replacement: &Expr) -> Expr {
        match self {
            Self::Symbol(symbol) if symbol == name => replacement.clone(),
            Self::Number(_) | Self::Symbol(_) => self.clone(),
            Self::Neg(operand) => Self::neg(operand.subs(name, replacement)),
            Self::Binary { op, lhs, rhs } => Self::binary(
                *op,
                lhs.subs(name, replacement),
                rhs.subs(name, replacement),
            ),
            Self::Call { func, args } => Self::call(
                *func,
                args.iter().map(|arg| arg.subs(name, replacement)).collect(),
            ),
        }
    }

    /// Folds constant subtrees into numbers and removes identity operations
    /// (`x + 0`, `x * 1`, `x / 1`, `x ** 1`, `--x`).
    ///
    /// ```
    /// # use funplot_expr::parse;
    /// let expr = parse("(1 + 2) * x ** 1 + 0").unwrap();
    /// assert_eq!(expr.simplify().to_string(), "3*x");
    /// ```
    #[must_use = "simplify returns a new expression and does not modify the original"]
    pub fn simplify(&self) -> Expr {
        match self {
            Self::Number(_) | Self::Symbol(_) => self.clone(),
            Self::Neg(operand) => match operand.simplify() {
                Self::Number(value) => Self::Number(-value),
                Self::Neg(inner) => *inner,
                other => Self::neg(other),
            },
            Self::Binary { op, lhs, rhs } => {
                simplify_binary(*op, lhs.simplify(), rhs.simplify())
            }
            Self::Call { func, args } => {
                let args: Vec<Expr> = args.iter().map(Expr::simplify).collect();
                let values: Option<Vec<f64>> = args.iter().map(Expr::as_number).collect();
                match values {
                    Some(values) => Self::Number(func.apply(&values)),
                    None => Self::call(*func, args),
                }
            }
        }
    }

    /// Evaluates the expression, looking up symbol values with `lookup`.
    ///
    /// ```
    /// # use funplot_expr::parse;
    /// let expr = parse("x ** 2 + y").unwrap();
    /// let value = expr.eval(&|name| match name {
    ///     "x" => Some(3.0),
    ///     "y" => Some(1.0),
    ///     _ => None,
    /// });
    /// assert_eq!(value, Ok(10.0));
    /// ```
    pub fn eval(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Result<f64, ExprError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Symbol(name) => lookup(name).ok_or_else(|| ExprError::Unbound {
                name: name.clone(),
            }),
            Self::Neg(operand) => Ok(-operand.eval(lookup)?),
            Self::Binary { op, lhs, rhs } => Ok(op.apply(lhs.eval(lookup)?, rhs.eval(lookup)?)),
            Self::Call { func, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(lookup))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(func.apply(&values))
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Number(value) if value.is_sign_negative() => NEG_PRECEDENCE,
            Self::Number(_) | Self::Symbol(_) | Self::Call { .. } => ATOM_PRECEDENCE,
            Self::Neg(_) => NEG_PRECEDENCE,
            Self::Binary { op, .. } => op.precedence(),
        }
    }
}

fn simplify_binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    match (op, lhs.as_number(), rhs.as_number()) {
        (_, Some(a), Some(b)) => Expr::Number(op.apply(a, b)),
        (BinaryOp::Add, Some(zero), _) if zero == 0.0 => rhs,
        (BinaryOp::Add | BinaryOp::Sub, _, Some(zero)) if zero == 0.0 => lhs,
        (BinaryOp::Sub, Some(zero), _) if zero == 0.0 => Expr::neg(rhs).simplify(),
        (BinaryOp::Mul, Some(one), _) if one == 1.0 => rhs,
        (BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow, _, Some(one)) if one == 1.0 => lhs,
        // Fold the leading constants of `2*(3*x)` style products
        (BinaryOp::Mul, Some(a), None) => match rhs {
            Expr::Binary {
                op: BinaryOp::Mul,
                lhs: inner_lhs,
                rhs: inner_rhs,
            } if inner_lhs.as_number().is_some() => {
                let b = inner_lhs.as_number().unwrap_or(1.0);
                simplify_binary(BinaryOp::Mul, Expr::Number(a * b), *inner_rhs)
            }
            rhs => Expr::binary(op, lhs, rhs),
        },
        _ => Expr::binary(op, lhs, rhs),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Symbol(name) => f.write_str(name),
            Self::Neg(operand) => {
                f.write_str("-")?;
                write_operand(f, operand, operand.precedence() < NEG_PRECEDENCE)
            }
            Self::Binary { op, lhs, rhs } => {
                let precedence = op.precedence();
                let lhs_parens = match op {
                    BinaryOp::Pow => lhs.precedence() <= precedence,
                    _ => lhs.precedence() < precedence,
                };
                let rhs_parens = match op {
                    BinaryOp::Add | BinaryOp::Mul | BinaryOp::Pow => {
                        rhs.precedence() < precedence
                    }
                    BinaryOp::Sub | BinaryOp::Div => rhs.precedence() <= precedence,
                };
                write_operand(f, lhs, lhs_parens)?;
                f.write_str(op.symbol())?;
                write_operand(f, rhs, rhs_parens)
            }
            Self::Call { func, args } => {
                write!(f, "{func}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_free_symbols_deduplicates() {
        let expr = Expr::binary(
            BinaryOp::Mul,
            x(),
            Expr::call(MathFn::Sin, vec![Expr::binary(BinaryOp::Add, x(), Expr::symbol("t"))]),
        );
        let symbols: Vec<&str> = expr.free_symbols().into_iter().collect();
        assert_eq!(symbols, ["t", "x"]);
    }

    #[test]
    fn test_subs_is_functional() {
        let expr = Expr::binary(BinaryOp::Add, x(), Expr::symbol("pi"));
        let substituted = expr.subs("pi", &Expr::Number(std::f64::consts::PI));

        assert_eq!(expr.free_symbols().len(), 2);
        assert_eq!(substituted.free_symbols().len(), 1);
        assert!(substituted.free_symbols().contains("x"));
    }

    #[test]
    fn test_subs_with_expression() {
        let expr = Expr::binary(BinaryOp::Pow, x(), Expr::Number(2.0));
        let substituted = expr.subs("x", &Expr::binary(BinaryOp::Add, Expr::symbol("t"), Expr::Number(1.0)));
        assert_eq!(substituted.to_string(), "(t + 1)**2");
    }

    #[test]
    fn test_simplify_folds_constants() {
        let expr = Expr::binary(
            BinaryOp::Mul,
            Expr::call(MathFn::Sqrt, vec![Expr::Number(16.0)]),
            Expr::binary(BinaryOp::Mul, Expr::Number(2.0), x()),
        );
        assert_eq!(expr.simplify().to_string(), "8*x");
    }

    #[test]
    fn test_simplify_identities() {
        let plus_zero = Expr::binary(BinaryOp::Add, Expr::Number(0.0), x());
        assert_eq!(plus_zero.simplify(), x());

        let minus_from_zero = Expr::binary(BinaryOp::Sub, Expr::Number(0.0), x());
        assert_eq!(minus_from_zero.simplify(), Expr::neg(x()));

        let double_neg = Expr::neg(Expr::neg(x()));
        assert_eq!(double_neg.simplify(), x());

        let pow_one = Expr::binary(BinaryOp::Pow, x(), Expr::Number(1.0));
        assert_eq!(pow_one.simplify(), x());

        let neg_number = Expr::neg(Expr::Number(2.0));
        assert_eq!(neg_number.simplify(), Expr::Number(-2.0));
    }

    #[test]
    fn test_eval() {
        let expr = Expr::binary(
            BinaryOp::Div,
            Expr::call(MathFn::Cos, vec![x()]),
            Expr::Number(2.0),
        );
        let value = expr.eval(&|name| (name == "x").then_some(0.0)).unwrap();
        assert_approx_eq!(f64, value, 0.5);
    }

    #[test]
    fn test_eval_unbound_symbol() {
        let err = x().eval(&|_| None).unwrap_err();
        assert_eq!(err, ExprError::Unbound { name: "x".to_string() });
    }

    #[test]
    fn test_display_parenthesizes_by_precedence() {
        let sum = Expr::binary(BinaryOp::Add, x(), Expr::Number(1.0));
        let product = Expr::binary(BinaryOp::Mul, sum.clone(), Expr::symbol("y"));
        assert_eq!(product.to_string(), "(x + 1)*y");

        let difference = Expr::binary(BinaryOp::Sub, x(), sum.clone());
        assert_eq!(difference.to_string(), "x - (x + 1)");

        let nested_pow = Expr::binary(
            BinaryOp::Pow,
            x(),
            Expr::binary(BinaryOp::Pow, Expr::Number(2.0), Expr::Number(3.0)),
        );
        assert_eq!(nested_pow.to_string(), "x**2**3");

        let left_pow = Expr::binary(
            BinaryOp::Pow,
            Expr::binary(BinaryOp::Pow, x(), Expr::Number(2.0)),
            Expr::Number(3.0),
        );
        assert_eq!(left_pow.to_string(), "(x**2)**3");

        let neg_pow = Expr::neg(Expr::binary(BinaryOp::Pow, x(), Expr::Number(2.0)));
        assert_eq!(neg_pow.to_string(), "-x**2");

        let neg_sum = Expr::neg(sum);
        assert_eq!(neg_sum.to_string(), "-(x + 1)");

        let call = Expr::call(MathFn::Atan2, vec![Expr::symbol("y"), x()]);
        assert_eq!(call.to_string(), "atan2(y, x)");
    }
}
