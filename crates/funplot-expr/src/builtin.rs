//! Built-in mathematical functions callable from expressions.

use std::{fmt, ops::RangeInclusive};

/// A function that can be called by name in expression text, e.g. `sin(x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm with one argument, `log(x, base)` with two
    Log,
    Ln,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    /// -1, 0 or 1
    Sign,
    Atan2,
    Min,
    Max,
}

impl MathFn {
    pub const ALL: [MathFn; 20] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Exp,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
        Self::Abs,
        Self::Floor,
        Self::Ceil,
        Self::Sign,
        Self::Atan2,
        Self::Min,
        Self::Max,
    ];

    /// Looks up a function by the name used in expression text.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Sign => "sign",
            Self::Atan2 => "atan2",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Accepted argument counts.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Log => 1..=2,
            Self::Atan2 | Self::Min | Self::Max => 2..=2,
            _ => 1..=1,
        }
    }

    /// Applies the function to already evaluated arguments.
    ///
    /// Argument counts are checked by the parser; a wrong count here yields NaN.
    pub fn apply(self, args: &[f64]) -> f64 {
        match (self, args) {
            (Self::Sin, [x]) => x.sin(),
            (Self::Cos, [x]) => x.cos(),
            (Self::Tan, [x]) => x.tan(),
            (Self::Asin, [x]) => x.asin(),
            (Self::Acos, [x]) => x.acos(),
            (Self::Atan, [x]) => x.atan(),
            (Self::Sinh, [x]) => x.sinh(),
            (Self::Cosh, [x]) => x.cosh(),
            (Self::Tanh, [x]) => x.tanh(),
            (Self::Exp, [x]) => x.exp(),
            (Self::Log | Self::Ln, [x]) => x.ln(),
            (Self::Log, [x, base]) => x.ln() / base.ln(),
            (Self::Sqrt, [x]) => x.sqrt(),
            (Self::Abs, [x]) => x.abs(),
            (Self::Floor, [x]) => x.floor(),
            (Self::Ceil, [x]) => x.ceil(),
            (Self::Sign, [x]) => {
                if *x == 0.0 || x.is_nan() {
                    *x
                } else {
                    x.signum()
                }
            }
            (Self::Atan2, [y, x]) => y.atan2(*x),
            (Self::Min, [a, b]) => a.min(*b),
            (Self::Max, [a, b]) => a.max(*b),
            _ => f64::NAN,
        }
    }
}

impl fmt::Display for MathFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_from_name_round_trips_every_function() {
        for func in MathFn::ALL {
            assert_eq!(MathFn::from_name(func.name()), Some(func));
        }
        assert_eq!(MathFn::from_name("cot"), None);
        assert_eq!(MathFn::from_name("Sin"), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(MathFn::Sin.arity(), 1..=1);
        assert_eq!(MathFn::Log.arity(), 1..=2);
        assert_eq!(MathFn::Atan2.arity(), 2..=2);
    }

    #[test]
    fn test_apply() {
        assert_approx_eq!(f64, MathFn::Sin.apply(&[0.0]), 0.0);
        assert_approx_eq!(f64, MathFn::Log.apply(&[std::f64::consts::E]), 1.0);
        assert_approx_eq!(f64, MathFn::Log.apply(&[8.0, 2.0]), 3.0, ulps = 2);
        assert_approx_eq!(f64, MathFn::Atan2.apply(&[1.0, 1.0]), std::f64::consts::FRAC_PI_4);
        assert_approx_eq!(f64, MathFn::Max.apply(&[-1.0, 3.0]), 3.0);
        assert_eq!(MathFn::Sign.apply(&[-2.5]), -1.0);
        assert_eq!(MathFn::Sign.apply(&[0.0]), 0.0);
    }

    #[test]
    fn test_apply_out_of_domain_is_nan() {
        assert!(MathFn::Sqrt.apply(&[-1.0]).is_nan());
        assert!(MathFn::Ln.apply(&[-1.0]).is_nan());
        assert!(MathFn::Sin.apply(&[1.0, 2.0]).is_nan());
    }
}
