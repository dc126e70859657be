//! Sampling a formula over an input range, as a plotting host does per frame.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::formula::FormulaTree;

/// Upper bound on inputs per range.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Relative slack when deciding whether a span is a whole number of steps.
const SPAN_TOLERANCE: f64 = 1e-9;

/// One sampled vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Half-open input range walked in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SampleRange {
    pub fn new(start: f64, end: f64, step: f64) -> DomainResult<Self> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.count().map(|_| ())
    }

    /// Number of inputs in `[low, high)`.
    ///
    /// A span within rounding error of a whole number of steps counts as
    /// exactly that many, so the excluded upper bound never reappears as
    /// `high - ε`.
    pub fn count(&self) -> DomainResult<usize> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(DomainError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(DomainError::InvalidStep(self.step));
        }

        let (low, high) = self.bounds();
        if low < high && low + self.step == low {
            return Err(DomainError::StepBelowResolution {
                start: low,
                step: self.step,
            });
        }

        let span = (high - low) / self.step;
        let nearest = span.round();
        let count = if (span - nearest).abs() <= span * SPAN_TOLERANCE {
            nearest
        } else {
            span.ceil()
        };
        if !count.is_finite() || count > MAX_SAMPLES as f64 {
            return Err(DomainError::TooManySamples {
                count,
                limit: MAX_SAMPLES,
            });
        }
        Ok(count as usize)
    }

    /// Inputs from the lower bound up to, not including, the upper bound.
    ///
    /// Each input is `low + i * step`; an invalid range yields nothing.
    pub fn inputs(&self) -> impl Iterator<Item = f64> {
        let (low, _) = self.bounds();
        let step = self.step;
        let count = self.count().unwrap_or(0);
        (0..count).map(move |i| low + i as f64 * step)
    }

    fn bounds(&self) -> (f64, f64) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

/// Visible input interval of a plot, with `scale` pixels per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_x: f64,
    pub max_x: f64,
    pub scale: f64,
}

impl Viewport {
    pub fn new(min_x: f64, max_x: f64, scale: f64) -> DomainResult<Self> {
        if !min_x.is_finite() || !max_x.is_finite() || min_x > max_x {
            return Err(DomainError::InvalidRange {
                start: min_x,
                end: max_x,
            });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DomainError::InvalidScale(scale));
        }
        Ok(Self {
            min_x,
            max_x,
            scale,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Range to sample so panning does not immediately expose unsampled
    /// edges: both bounds extend by `width * overshoot`, and one vertex is
    /// placed every `pixel_step` pixels.
    pub fn render_range(&self, overshoot: f64, pixel_step: f64) -> DomainResult<SampleRange> {
        let extra = self.width() * overshoot.max(0.0);
        SampleRange::new(
            self.min_x - extra,
            self.max_x + extra,
            pixel_step / self.scale,
        )
    }
}

/// Evaluates `tree` at every input of `range`.
///
/// With `inverse` set the coordinates are swapped, plotting `x = f(y)`.
#[instrument(level = "debug", skip(tree), fields(formula = tree.source()))]
pub fn sample(tree: &FormulaTree, range: &SampleRange, inverse: bool) -> DomainResult<Vec<Point>> {
    range.validate()?;
    Ok(range
        .inputs()
        .map(|input| {
            let value = tree.evaluate(input);
            if inverse {
                Point { x: value, y: input }
            } else {
                Point { x: input, y: value }
            }
        })
        .collect())
}
