use thiserror::Error;

use crate::span::Span;

/// A diagnostic for malformed expression text.
///
/// Carries the location ([`Span`]) of the problem in the source, a label for
/// that location and optional help text suggesting a fix. The source itself
/// is not stored; callers that want to render a snippet keep it alongside.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct DiagnosticError {
    /// Error message to display
    message: String,

    /// The error span in the source
    span: Span,

    /// Label for the error span
    label: String,

    /// Optional help text
    help: Option<String>,
}

impl DiagnosticError {
    /// Create a new diagnostic error from a Span value.
    ///
    /// # Arguments
    /// * `message` - The main error message
    /// * `span` - The source location where the error occurred
    /// * `label` - A label describing the error location
    /// * `help` - Optional help text with suggestions to fix the error
    pub fn from_span(
        message: impl Into<String>,
        span: Span,
        label: impl Into<String>,
        help: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            label: label.into(),
            help,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the error span in the source code.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label describing the error.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the help text, if any
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// Errors raised while turning text into an evaluable function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// The text is not a valid expression.
    #[error("invalid expression: {0}")]
    Syntax(#[from] DiagnosticError),

    /// The expression does not have exactly one free variable after the
    /// named constants were substituted.
    #[error("function must have exactly one variable, found {}", describe_variables(.variables))]
    Arity { variables: Vec<String> },

    /// Evaluation met a symbol without a value.
    #[error("no value bound for symbol `{name}`")]
    Unbound { name: String },
}

fn describe_variables(variables: &[String]) -> String {
    if variables.is_empty() {
        "none".to_string()
    } else {
        format!("{}: {}", variables.len(), variables.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message_lists_variables() {
        let err = ExprError::Arity {
            variables: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "function must have exactly one variable, found 2: x, y"
        );

        let err = ExprError::Arity {
            variables: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "function must have exactly one variable, found none"
        );
    }

    #[test]
    fn test_syntax_wraps_diagnostic() {
        let diagnostic = DiagnosticError::from_span(
            "unexpected character `$`",
            Span::new(2..3),
            "unexpected character",
            None,
        );
        let err = ExprError::from(diagnostic.clone());
        assert_eq!(err.to_string(), "invalid expression: unexpected character `$`");
        assert!(matches!(err, ExprError::Syntax(d) if d.span() == Span::new(2..3)));
    }
}
