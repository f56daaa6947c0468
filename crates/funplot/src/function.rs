//! Scalar functions sampled over a domain.

use std::{fmt, rc::Rc};

use log::{debug, warn};

use funplot_expr::{Expr, ExprError, UnaryFunction};

use crate::{
    domain::{Domain, DomainError},
    drawable::Drawable,
    error::OptionError,
    figure::Figure,
    style::LineStyle,
};

/// How sample values are computed.
#[derive(Clone)]
enum Evaluator {
    /// Parsed from text
    Expression(UnaryFunction),
    /// Called once per sample
    Pointwise(Rc<dyn Fn(f64) -> f64>),
    /// Called once with every sample
    Array(Rc<dyn Fn(&[f64]) -> Vec<f64>>),
}

/// A function of one variable, drawn as a line over its [`Domain`].
///
/// Functions come from expression text or from Rust closures:
///
/// ```
/// # use funplot::Function;
/// let parabola = Function::parse("x ** 2").unwrap().with_domain((-2.0, 2.0, 5)).unwrap();
/// assert_eq!(parabola.values(), [4.0, 1.0, 0.0, 1.0, 4.0]);
///
/// let wave = Function::from_fn(f64::sin).with_label("sin");
/// assert_eq!(wave.values().len(), 100);
/// ```
///
/// Samples where the function is undefined (NaN or infinite) break the line
/// into separate segments.
#[derive(Clone)]
pub struct Function {
    evaluator: Evaluator,
    domain: Domain,
    style: LineStyle,
    label: Option<String>,
}

impl Function {
    /// Parses expression text with exactly one free variable.
    ///
    /// The constants `e`, `pi` and `π` are substituted first, so
    /// `sin(pi * x)` is a function of `x` alone.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Syntax`] for malformed text and
    /// [`ExprError::Arity`] when the number of free variables is not one.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let compiled = funplot_expr::compile(text)?;
        debug!(text = text, variable = compiled.variable(); "Parsed function");
        Ok(Self::with_evaluator(Evaluator::Expression(compiled)))
    }

    /// Wraps a closure applied to every sample.
    pub fn from_fn(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::with_evaluator(Evaluator::Pointwise(Rc::new(f)))
    }

    /// Wraps a closure that maps all samples at once.
    ///
    /// The closure should return one value per sample; extra values are
    /// ignored and missing ones leave the tail of the domain undrawn.
    pub fn from_array_fn(f: impl Fn(&[f64]) -> Vec<f64> + 'static) -> Self {
        Self::with_evaluator(Evaluator::Array(Rc::new(f)))
    }

    fn with_evaluator(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            domain: Domain::default(),
            style: LineStyle::default(),
            label: None,
        }
    }

    /// Replaces the sample domain.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] for an empty sample list, a zero sample
    /// count, non-finite values or more than
    /// [`MAX_SAMPLES`](crate::domain::MAX_SAMPLES) samples.
    pub fn with_domain(mut self, domain: impl Into<Domain>) -> Result<Self, DomainError> {
        let domain = domain.into();
        domain.validate()?;
        self.domain = domain;
        Ok(self)
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the legend label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets one style property by name; `label` sets the legend label.
    ///
    /// See [`LineStyle::set`] for the accepted keys.
    pub fn style_option(mut self, key: &str, value: &str) -> Result<Self, OptionError> {
        match key {
            "label" => self.label = Some(value.to_string()),
            _ => self.style.set(key, value)?,
        }
        Ok(self)
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The compiled expression, for functions built from text.
    pub fn expression(&self) -> Option<&Expr> {
        match &self.evaluator {
            Evaluator::Expression(compiled) => Some(compiled.expr()),
            _ => None,
        }
    }

    /// Evaluates the function at one point.
    pub fn eval(&self, x: f64) -> f64 {
        match &self.evaluator {
            Evaluator::Expression(compiled) => compiled.eval(x),
            Evaluator::Pointwise(f) => f(x),
            Evaluator::Array(f) => f(&[x]).first().copied().unwrap_or(f64::NAN),
        }
    }

    /// Evaluates the function at every sample of its domain.
    pub fn values(&self) -> Vec<f64> {
        self.evaluate(&self.domain.samples())
    }

    fn evaluate(&self, xs: &[f64]) -> Vec<f64> {
        match &self.evaluator {
            Evaluator::Expression(compiled) => compiled.eval_many(xs),
            Evaluator::Pointwise(f) => xs.iter().map(|&x| f(x)).collect(),
            Evaluator::Array(f) => {
                let ys = f(xs);
                if ys.len() != xs.len() {
                    warn!(
                        samples = xs.len(),
                        values = ys.len();
                        "Array function returned a different number of values than samples"
                    );
                }
                ys
            }
        }
    }
}

impl TryFrom<&str> for Function {
    type Error = ExprError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::parse(text)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let evaluator = match &self.evaluator {
            Evaluator::Expression(compiled) => compiled.expr().to_string(),
            Evaluator::Pointwise(_) => "<fn(f64) -> f64>".to_string(),
            Evaluator::Array(_) => "<fn(&[f64]) -> Vec<f64>>".to_string(),
        };
        f.debug_struct("Function")
            .field("evaluator", &evaluator)
            .field("domain", &self.domain)
            .field("style", &self.style)
            .field("label", &self.label)
            .finish()
    }
}

impl Drawable for Function {
    fn render(&self, figure: &mut Figure) {
        let xs = self.domain.samples();
        let ys = self.evaluate(&xs);
        figure.plot(&xs, &ys, &self.style, self.label.as_deref());
    }

    fn clone_box(&self) -> Box<dyn Drawable> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_evaluates_over_linspace() {
        let f = Function::parse("x**2")
            .unwrap()
            .with_domain((-2.0, 2.0, 5))
            .unwrap();
        assert_eq!(f.values(), [4.0, 1.0, 0.0, 1.0, 4.0]);
    }

    #[test]
    fn test_parse_rejects_two_variables() {
        let err = Function::parse("x+y").unwrap_err();
        assert!(matches!(err, ExprError::Arity { ref variables } if variables.len() == 2));
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        let err = Function::try_from("2 * (x").unwrap_err();
        assert!(matches!(err, ExprError::Syntax(_)));
    }

    #[test]
    fn test_constant_substitution_applies() {
        let f = Function::parse("sin(pi * x)").unwrap();
        let symbols = f.expression().unwrap().free_symbols();
        assert_eq!(symbols.into_iter().collect::<Vec<_>>(), ["x"]);
        assert_approx_eq!(f64, f.eval(1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_domain_is_rejected() {
        let err = Function::from_fn(|x| x)
            .with_domain(Vec::<f64>::new())
            .unwrap_err();
        assert_eq!(err, DomainError::Empty);
    }

    #[test]
    fn test_oversized_domain_is_rejected_up_front() {
        let err = Function::parse("x")
            .unwrap()
            .with_domain((0.0, 1.0, usize::MAX))
            .unwrap_err();
        assert!(matches!(err, DomainError::TooManySamples { count: usize::MAX, .. }));
    }

    #[test]
    fn test_array_fn() {
        let f = Function::from_array_fn(|xs| xs.iter().map(|x| x * 2.0).collect())
            .with_domain([1.0, 2.0, 3.0])
            .unwrap();
        assert_eq!(f.values(), [2.0, 4.0, 6.0]);
        assert_eq!(f.eval(5.0), 10.0);
    }

    #[test]
    fn test_style_option() {
        let f = Function::from_fn(f64::cos)
            .style_option("color", "red")
            .unwrap()
            .style_option("label", "cosine")
            .unwrap();
        assert_eq!(f.label(), Some("cosine"));
        assert!(f.style().color().is_some());

        let err = Function::from_fn(f64::cos)
            .style_option("thickness", "2")
            .unwrap_err();
        assert!(matches!(err, OptionError::Unknown { .. }));
    }

    #[test]
    fn test_render_records_one_line() {
        let f = Function::parse("1 / x")
            .unwrap()
            .with_domain([-1.0, 0.0, 1.0])
            .unwrap()
            .with_label("hyperbola");
        let mut figure = Figure::default();
        f.render(&mut figure);

        let series = figure.series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label(), Some("hyperbola"));
        assert_eq!(series[0].ys()[0], -1.0);
        assert!(series[0].ys()[1].is_infinite());
    }

    #[test]
    fn test_debug_shows_expression() {
        let f = Function::parse("2*x").unwrap();
        assert!(format!("{f:?}").contains("2*x"));
    }
}
