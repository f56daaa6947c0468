//! Sample domains for [`Function`](crate::Function).
//!
//! A [`Domain`] is either an explicit list of sample positions or a
//! `(start, stop, count)` triple expanded with [`linspace`]. Only those two
//! shapes convert into a domain, so passing a plain number is a type error:
//!
//! ```compile_fail
//! # use funplot::Function;
//! let f = Function::parse("x ** 2").unwrap().with_domain(5.0);
//! ```

use thiserror::Error;

/// Domain used when none is given: 100 samples over `[-10, 10]`.
pub const DEFAULT_DOMAIN: (f64, f64, usize) = (-10.0, 10.0, 100);

/// Most samples a single domain may hold.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Problems found when a domain is attached to a function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("domain has no sample values")]
    Empty,

    #[error("domain sample count must be at least 1")]
    NoSamples,

    #[error("domain value {value} is not finite")]
    NonFinite { value: f64 },

    #[error("domain has {count} samples, more than the limit of {max}")]
    TooManySamples { count: usize, max: usize },
}

/// The x positions a function is evaluated at.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Explicit sample positions, used as given
    Samples(Vec<f64>),
    /// `count` evenly spaced samples from `start` to `stop`, both included
    Linspace { start: f64, stop: f64, count: usize },
}

impl Domain {
    pub fn linspace(start: f64, stop: f64, count: usize) -> Self {
        Self::Linspace { start, stop, count }
    }

    /// Checks that the domain yields at least one finite sample, no
    /// non-finite ones, and no more than [`MAX_SAMPLES`].
    pub fn validate(&self) -> Result<(), DomainError> {
        let count = self.len();
        if count > MAX_SAMPLES {
            return Err(DomainError::TooManySamples {
                count,
                max: MAX_SAMPLES,
            });
        }

        match self {
            Self::Samples(samples) => {
                if samples.is_empty() {
                    return Err(DomainError::Empty);
                }
                match samples.iter().find(|v| !v.is_finite()) {
                    Some(&value) => Err(DomainError::NonFinite { value }),
                    None => Ok(()),
                }
            }
            Self::Linspace { start, stop, count } => {
                if *count == 0 {
                    return Err(DomainError::NoSamples);
                }
                match [*start, *stop].into_iter().find(|v| !v.is_finite()) {
                    Some(value) => Err(DomainError::NonFinite { value }),
                    None => Ok(()),
                }
            }
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::Samples(samples) => samples.len(),
            Self::Linspace { count, .. } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands the domain into its sample positions.
    pub fn samples(&self) -> Vec<f64> {
        match self {
            Self::Samples(samples) => samples.clone(),
            Self::Linspace { start, stop, count } => linspace(*start, *stop, *count),
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        let (start, stop, count) = DEFAULT_DOMAIN;
        Self::linspace(start, stop, count)
    }
}

impl From<Vec<f64>> for Domain {
    fn from(samples: Vec<f64>) -> Self {
        Self::Samples(samples)
    }
}

impl From<&[f64]> for Domain {
    fn from(samples: &[f64]) -> Self {
        Self::Samples(samples.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Domain {
    fn from(samples: [f64; N]) -> Self {
        Self::Samples(samples.to_vec())
    }
}

impl From<(f64, f64, usize)> for Domain {
    fn from((start, stop, count): (f64, f64, usize)) -> Self {
        Self::linspace(start, stop, count)
    }
}

/// Returns `count` evenly spaced values from `start` to `stop`.
///
/// Both endpoints are included and the last value is exactly `stop`. A
/// count of one yields `[start]`; zero yields nothing.
///
/// ```
/// # use funplot::domain::linspace;
/// assert_eq!(linspace(-2.0, 2.0, 5), [-2.0, -1.0, 0.0, 1.0, 2.0]);
/// assert_eq!(linspace(3.0, 7.0, 1), [3.0]);
/// ```
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}
