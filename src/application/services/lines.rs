//! Line service
//!
//! Keeps the formula lines a plotting host shows and resamples them on demand.

use std::fmt;

use generational_arena::{Arena, Index};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{sample, FormulaTree, Point, SampleRange, Viewport};

/// Stable handle to a line; stays unique after other lines are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(Index);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "{}.{}", slot, generation)
    }
}

/// One user-editable formula line.
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// Tree built from the last submitted text, empty until the first submission
    pub tree: FormulaTree,
    /// Plot `x = f(y)` instead of `y = f(x)`
    pub inverse: bool,
}

impl Line {
    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }
}

/// Sampled vertices of one line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub id: LineId,
    pub formula: String,
    pub points: Vec<Point>,
}

/// Service owning all formula lines of a plot.
#[derive(Debug, Default)]
pub struct LineService {
    lines: Arena<Line>,
    order: Vec<LineId>,
}

impl LineService {
    pub fn new() -> Self {
        Self {
            lines: Arena::new(),
            order: Vec::new(),
        }
    }

    /// Adds an empty line at the end.
    pub fn add_line(&mut self) -> LineId {
        let id = LineId(self.lines.insert(Line::default()));
        self.order.push(id);
        debug!(%id, "line added");
        id
    }

    pub fn remove_line(&mut self, id: LineId) -> ApplicationResult<Line> {
        let line = self
            .lines
            .remove(id.0)
            .ok_or_else(|| ApplicationError::LineNotFound(id.to_string()))?;
        self.order.retain(|&other| other != id);
        debug!(%id, "line removed");
        Ok(line)
    }

    pub fn line(&self, id: LineId) -> ApplicationResult<&Line> {
        self.lines
            .get(id.0)
            .ok_or_else(|| ApplicationError::LineNotFound(id.to_string()))
    }

    /// Line ids in the order they were added.
    pub fn ids(&self) -> &[LineId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replaces the line's tree with one built from `text`.
    ///
    /// Returns whether the new formula is valid, so the host can flag the
    /// input field. An invalid formula still replaces the old one.
    #[instrument(level = "debug", skip(self))]
    pub fn set_formula(&mut self, id: LineId, text: &str, inverse: bool) -> ApplicationResult<bool> {
        let line = self
            .lines
            .get_mut(id.0)
            .ok_or_else(|| ApplicationError::LineNotFound(id.to_string()))?;
        line.tree = FormulaTree::build(text);
        line.inverse = inverse;
        Ok(line.is_valid())
    }

    pub fn evaluate(&self, id: LineId, input: f64) -> ApplicationResult<f64> {
        Ok(self.line(id)?.tree.evaluate(input))
    }

    /// Samples every valid line over `range`, in parallel.
    pub fn sample_all(&self, range: &SampleRange) -> ApplicationResult<Vec<RenderedLine>> {
        range.validate()?;
        let lines: Vec<(LineId, &Line)> = self
            .order
            .iter()
            .filter_map(|&id| self.lines.get(id.0).map(|line| (id, line)))
            .filter(|(_, line)| line.is_valid())
            .collect();

        let rendered = lines
            .par_iter()
            .map(|(id, line)| {
                sample(&line.tree, range, line.inverse).map(|points| RenderedLine {
                    id: *id,
                    formula: line.tree.source().to_string(),
                    points,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered)
    }

    /// Samples every valid line across the viewport plus its overshoot margin.
    #[instrument(level = "debug", skip(self))]
    pub fn render(
        &self,
        viewport: &Viewport,
        overshoot: f64,
        pixel_step: f64,
    ) -> ApplicationResult<Vec<RenderedLine>> {
        let range = viewport.render_range(overshoot, pixel_step)?;
        debug!(?range, lines = self.len(), "render");
        self.sample_all(&range)
    }
}
