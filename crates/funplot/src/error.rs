//! Error types for funplot operations.
//!
//! [`FunplotError`] is the crate-level error. Construction-time problems keep
//! their own types ([`ExprError`], [`DomainError`], [`OptionError`]) so
//! callers can match on them directly, and each converts into
//! [`FunplotError`] for `?` at the scene level.

use std::io;

use thiserror::Error;

use funplot_expr::ExprError;

use crate::domain::DomainError;

/// The main error type for funplot operations.
#[derive(Debug, Error)]
pub enum FunplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Expression(#[from] ExprError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    InvalidOption(#[from] OptionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl From<crate::export::Error> for FunplotError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

/// A named option (figure option or style key) that could not be applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    #[error("unknown option `{name}`")]
    Unknown { name: String },

    #[error("invalid value `{value}` for option `{name}`: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl OptionError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::Unknown {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(name: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_error_messages() {
        assert_eq!(
            OptionError::unknown("colour").to_string(),
            "unknown option `colour`"
        );
        assert_eq!(
            OptionError::invalid("alpha", "2", "must be between 0 and 1").to_string(),
            "invalid value `2` for option `alpha`: must be between 0 and 1"
        );
    }

    #[test]
    fn test_expression_error_is_transparent() {
        let err = FunplotError::from(ExprError::Arity {
            variables: vec!["x".to_string(), "y".to_string()],
        });
        assert_eq!(
            err.to_string(),
            "function must have exactly one variable, found 2: x, y"
        );
    }
}
