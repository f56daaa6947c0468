//! Axis computation: data intervals, scales and ticks.
//!
//! Figures collect series in data coordinates. At layout time the data
//! extents are turned into an [`Interval`] per axis (autoscaled or explicit),
//! mapped onto the plot area with a [`Scale`], and annotated with [`Tick`]s.
//!
//! # Example
//!
//! ```
//! # use funplot_core::axis::{Interval, Scale, ticks};
//! let interval = Interval::new(0.0, 10.0);
//! let scale = Scale::new(interval, 100.0, 300.0);
//! assert_eq!(scale.map(5.0), 200.0);
//!
//! let labels: Vec<_> = ticks(interval, 4).into_iter().map(|t| t.label().to_string()).collect();
//! assert_eq!(labels, ["0.0", "2.5", "5.0", "7.5", "10.0"]);
//! ```

/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// A closed interval of data values.
///
/// `start` may be greater than `end`; that describes an inverted axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns the smallest interval containing every finite value, or
    /// `None` when there is no finite value.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Self>, v| match acc {
                None => Some(Self::new(v, v)),
                Some(acc) => Some(Self::new(acc.start.min(v), acc.end.max(v))),
            })
    }

    pub fn start(self) -> f64 {
        self.start
    }

    pub fn end(self) -> f64 {
        self.end
    }

    /// Smaller endpoint, regardless of orientation
    pub fn low(self) -> f64 {
        self.start.min(self.end)
    }

    /// Larger endpoint, regardless of orientation
    pub fn high(self) -> f64 {
        self.start.max(self.end)
    }

    /// Absolute width of the interval
    pub fn span(self) -> f64 {
        (self.end - self.start).abs()
    }

    /// Returns true if both endpoints are finite
    pub fn is_finite(self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Extends both ends by `fraction` of the span.
    pub fn with_margin(self, fraction: f64) -> Self {
        let pad = self.span() * fraction;
        Self::new(self.low() - pad, self.high() + pad)
    }

    /// Widens a zero-width interval so it can be mapped onto pixels.
    ///
    /// ```
    /// # use funplot_core::axis::Interval;
    /// assert_eq!(Interval::new(0.0, 0.0).nonsingular(), Interval::new(-1.0, 1.0));
    /// assert_eq!(Interval::new(10.0, 10.0).nonsingular(), Interval::new(9.0, 11.0));
    /// ```
    pub fn nonsingular(self) -> Self {
        if self.span() > f64::EPSILON * self.start.abs().max(1.0) {
            return self;
        }
        let center = self.start;
        let half = if center == 0.0 { 1.0 } else { center.abs() * 0.1 };
        Self::new(center - half, center + half)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Linear mapping from a data [`Interval`] onto a pixel range.
///
/// Passing the pixel range "backwards" (bottom before top) is how the y axis
/// is flipped to grow upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    interval: Interval,
    pixel_start: f32,
    pixel_end: f32,
}

impl Scale {
    pub fn new(interval: Interval, pixel_start: f32, pixel_end: f32) -> Self {
        Self {
            interval,
            pixel_start,
            pixel_end,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Maps a data value to a pixel coordinate. Non-finite input maps to NaN.
    pub fn map(&self, value: f64) -> f32 {
        if !value.is_finite() {
            return f32::NAN;
        }
        let span = self.interval.end - self.interval.start;
        let t = (value - self.interval.start) / span;
        let pixels = f64::from(self.pixel_end - self.pixel_start);
        (f64::from(self.pixel_start) + t * pixels) as f32
    }
}

/// A labeled position on an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    value: f64,
    label: String,
}

impl Tick {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Chooses a "nice" step (1, 2, 2.5 or 5 times a power of ten) that splits
/// `span` into at most `max_intervals` pieces.
pub fn nice_step(span: f64, max_intervals: usize) -> f64 {
    let raw = span / max_intervals.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Number of decimals needed to print multiples of `step` without noise.
fn decimals_for(step: f64) -> usize {
    let exponent = step.log10().floor();
    let mantissa = step / 10f64.powf(exponent);
    let mut decimals = if exponent < 0.0 { (-exponent) as usize } else { 0 };
    if (mantissa - 2.5).abs() < 1e-9 {
        decimals += 1;
    }
    decimals
}

/// Formats a tick value with the precision implied by its step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = decimals_for(step);
    let label = format!("{value:.decimals$}");
    // `-0` and `-0.00` read badly on an axis
    if label.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        label.trim_start_matches('-').to_string()
    } else {
        label
    }
}

/// Generates the ticks inside `interval`, at most `max_intervals + 1` of them.
///
/// Returns an empty list for non-finite or zero-width intervals.
pub fn ticks(interval: Interval, max_intervals: usize) -> Vec<Tick> {
    if !interval.is_finite() || interval.span() == 0.0 {
        return Vec::new();
    }

    let step = nice_step(interval.span(), max_intervals);
    let low = interval.low();
    let high = interval.high();
    let tolerance = step * 1e-9;

    let first = (low / step).ceil();
    let mut result = Vec::new();
    let mut index = 0.0;
    loop {
        let value = (first + index) * step;
        if value > high + tolerance {
            break;
        }
        result.push(Tick {
            value,
            label: format_tick(value, step),
        });
        index += 1.0;
    }
    result
}
