//! Plotting feature - the sampling/smoothing/scaling pipeline and per-view state.
//!
//! A draw action runs the data half of the pipeline (sample, filter, smooth)
//! and stores the resulting points; each rendered frame runs the projection
//! half ([`build_geometry`]) against the live canvas size. All geometry is
//! recomputed from scratch per draw, nothing is cached between requests.

pub mod geometry;
pub mod sample;
pub mod smooth;
pub mod ticks;
pub mod viewport;

use std::sync::Arc;

use crate::error::{CatenaryError, Result};
use crate::eval::Evaluator;
use crate::symbols::SymbolTable;

use geometry::{CanvasGeometry, LabelMark, Segment, Stroke};
use sample::{filter_finite, Domain, Sample, SAMPLE_STEP};
use ticks::{plan_ticks, TickMark, TARGET_TICK_COUNT};
use viewport::{AxisPlacement, Range, Viewport};

// Tick mark geometry: half-length of the perpendicular stroke and the
// label offsets from the tick position, all in canvas pixels.
const TICK_HALF_LEN: f64 = 4.0;
const X_LABEL_OFFSET: (f64, f64) = (-8.0, 6.0);
const Y_LABEL_OFFSET: (f64, f64) = (6.0, -8.0);

/// Which input field of a plot view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotField {
    /// The function expression.
    #[default]
    Function,
    /// The lower domain bound.
    XStart,
    /// The upper domain bound.
    XEnd,
}

impl PlotField {
    /// Get the next field in the cycle.
    pub fn next(self) -> Self {
        match self {
            PlotField::Function => PlotField::XStart,
            PlotField::XStart => PlotField::XEnd,
            PlotField::XEnd => PlotField::Function,
        }
    }

    /// Get the field name.
    pub fn name(self) -> &'static str {
        match self {
            PlotField::Function => "f(x)",
            PlotField::XStart => "x start",
            PlotField::XEnd => "x end",
        }
    }
}

/// The stored result of a draw action.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCurve {
    /// Final point sequence, possibly smoothed.
    pub points: Vec<Sample>,
    /// Domain the points were sampled over.
    pub domain: Domain,
}

/// State of one plot view.
#[derive(Debug)]
pub struct PlotState {
    /// Function expression input.
    pub function_input: String,
    /// Lower bound input text.
    pub x_start_input: String,
    /// Upper bound input text.
    pub x_end_input: String,
    /// Field receiving keystrokes.
    pub focus: PlotField,
    /// Symbol table snapshot published to this view.
    pub symbols: Arc<SymbolTable>,
    /// Curve from the most recent successful draw.
    pub curve: Option<PlotCurve>,
    /// Notice or error from the most recent draw.
    pub message: Option<String>,
}

impl PlotState {
    /// Create a plot view over a symbol table snapshot.
    pub fn new(symbols: Arc<SymbolTable>) -> Self {
        Self {
            function_input: String::new(),
            x_start_input: format!("{}", Domain::DEFAULT.start),
            x_end_input: format!("{}", Domain::DEFAULT.end),
            focus: PlotField::default(),
            symbols,
            curve: None,
            message: None,
        }
    }

    /// Replace this view's symbol table snapshot.
    ///
    /// Called by the evaluation context after every successful evaluation;
    /// the old snapshot is dropped, never mutated.
    pub fn publish_symbols(&mut self, symbols: Arc<SymbolTable>) {
        self.symbols = symbols;
    }

    /// Add a character to the focused field.
    pub fn input(&mut self, c: char) {
        self.field_mut().push(c);
    }

    /// Remove the last character from the focused field.
    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    /// Move focus to the next field.
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            PlotField::Function => &mut self.function_input,
            PlotField::XStart => &mut self.x_start_input,
            PlotField::XEnd => &mut self.x_end_input,
        }
    }

    /// Run the draw action: resolve bounds, sample, filter, smooth, store.
    ///
    /// Returns a status line for the application. On failure the stored
    /// curve is cleared - stale geometry next to a fresh error is
    /// misleading.
    pub fn draw(&mut self, evaluator: &Evaluator) -> String {
        let mut warnings = Vec::new();

        let (start, start_ok) = resolve_bound(&self.x_start_input, Domain::DEFAULT.start);
        if !start_ok {
            warnings.push(format!(
                "invalid start value, using {}",
                Domain::DEFAULT.start
            ));
            self.x_start_input = format!("{}", Domain::DEFAULT.start);
        }
        let (end, end_ok) = resolve_bound(&self.x_end_input, Domain::DEFAULT.end);
        if !end_ok {
            warnings.push(format!("invalid end value, using {}", Domain::DEFAULT.end));
            self.x_end_input = format!("{}", Domain::DEFAULT.end);
        }

        let domain = match Domain::new(start, end) {
            Ok(domain) => domain,
            Err(err) => {
                warnings.push(format!("{}, using defaults", err));
                self.x_start_input = format!("{}", Domain::DEFAULT.start);
                self.x_end_input = format!("{}", Domain::DEFAULT.end);
                Domain::DEFAULT
            }
        };

        match compute_curve(evaluator, &self.symbols, &self.function_input, domain) {
            Ok(points) => {
                tracing::info!(
                    expr = %self.function_input,
                    points = points.len(),
                    "plotted function"
                );
                self.curve = Some(PlotCurve { points, domain });
                self.message = if warnings.is_empty() {
                    None
                } else {
                    Some(warnings.join("; "))
                };
                match &self.message {
                    Some(warning) => format!("Plotted with warnings: {}", warning),
                    None => format!("Plotted {}", self.function_input),
                }
            }
            Err(err) => {
                tracing::error!(expr = %self.function_input, error = %err, "plot failed");
                self.curve = None;
                self.message = Some(err.to_string());
                format!("Plot failed: {}", err)
            }
        }
    }

    /// Replace the function field with its derivative (polynomial
    /// coefficient lists only).
    pub fn differentiate(&mut self, evaluator: &Evaluator) -> String {
        match evaluator.differentiate(&self.function_input) {
            Ok(derivative) => {
                self.function_input = derivative;
                self.curve = None;
                self.message = None;
                format!("Derivative: {}", self.function_input)
            }
            Err(err) => {
                self.message = Some(err.to_string());
                format!("Differentiate failed: {}", err)
            }
        }
    }
}

/// Parse a bound field, falling back on parse failure.
fn resolve_bound(text: &str, fallback: f64) -> (f64, bool) {
    match text.trim().parse::<f64>() {
        Ok(value) => (value, true),
        Err(_) => (fallback, false),
    }
}

/// The data half of the pipeline: sweep, evaluate, filter, smooth.
pub fn compute_curve(
    evaluator: &Evaluator,
    symbols: &SymbolTable,
    expr: &str,
    domain: Domain,
) -> Result<Vec<Sample>> {
    let xs = domain.sweep(SAMPLE_STEP);
    let raw = evaluator.plot_eval(symbols, expr, &xs)?;
    let kept = filter_finite(raw);
    if kept.is_empty() {
        return Err(CatenaryError::NoValidPoints);
    }
    Ok(smooth::smooth(&kept))
}

/// The projection half of the pipeline: scale the stored points into canvas
/// pixels and lay out axes, ticks and labels.
pub fn build_geometry(points: &[Sample], domain: Domain, width: f64, height: f64) -> CanvasGeometry {
    if points.is_empty() {
        return CanvasGeometry::empty();
    }

    let range = Range::from_points(points);
    let vp = Viewport::new(domain, range, width, height);
    let x_axis = vp.x_axis_placement();
    let y_axis = vp.y_axis_placement();

    let mut geometry = CanvasGeometry::empty();

    geometry.segments.push(Segment::with_stroke(
        (0.0, x_axis.position),
        (width, x_axis.position),
        stroke_for(x_axis),
    ));
    geometry.segments.push(Segment::with_stroke(
        (y_axis.position, 0.0),
        (y_axis.position, height),
        stroke_for(y_axis),
    ));

    emit_x_ticks(&mut geometry, &vp, x_axis.position);
    emit_y_ticks(&mut geometry, &vp, y_axis.position);

    geometry.curve = points.iter().map(|&p| vp.project(p)).collect();
    geometry
}

fn stroke_for(axis: AxisPlacement) -> Stroke {
    if axis.clamped {
        Stroke::Dashed
    } else {
        Stroke::Solid
    }
}

fn emit_x_ticks(geometry: &mut CanvasGeometry, vp: &Viewport, axis_y: f64) {
    let domain = vp.domain();
    for TickMark { value, label } in plan_ticks(domain.start, domain.end, TARGET_TICK_COUNT) {
        let x = vp.x_to_canvas(value);
        geometry.segments.push(Segment::solid(
            (x, axis_y - TICK_HALF_LEN),
            (x, axis_y + TICK_HALF_LEN),
        ));
        geometry.labels.push(LabelMark {
            x: x + X_LABEL_OFFSET.0,
            y: axis_y + X_LABEL_OFFSET.1,
            text: label,
        });
    }
}

fn emit_y_ticks(geometry: &mut CanvasGeometry, vp: &Viewport, axis_x: f64) {
    let range = vp.range();
    for TickMark { value, label } in plan_ticks(range.min, range.max, TARGET_TICK_COUNT) {
        let y = vp.y_to_canvas(value);
        geometry.segments.push(Segment::solid(
            (axis_x - TICK_HALF_LEN, y),
            (axis_x + TICK_HALF_LEN, y),
        ));
        geometry.labels.push(LabelMark {
            x: axis_x + Y_LABEL_OFFSET.0,
            y: y + Y_LABEL_OFFSET.1,
            text: label,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_function_plots_flat_at_mid_canvas() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        let points = compute_curve(&evaluator, &table, "5", Domain::DEFAULT).unwrap();

        // constant detection: identity pass-through of all 81 samples
        assert_eq!(points.len(), 81);
        assert!(points.iter().all(|p| p.y == 5.0));

        let geometry = build_geometry(&points, Domain::DEFAULT, 640.0, 480.0);
        // range (3.8, 6.2) puts y = 5 exactly mid-canvas
        for &(_, y) in &geometry.curve {
            assert!((y - 240.0).abs() < 1e-9);
        }
    }

    #[test]
    fn all_nan_function_reports_no_valid_points() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        let err = compute_curve(&evaluator, &table, "0 / 0", Domain::DEFAULT).unwrap_err();
        assert!(matches!(err, CatenaryError::NoValidPoints));
    }

    #[test]
    fn parabola_minimum_survives_smoothing() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::new();

        // x^2 - 2 as a coefficient list, sampled at 0.5 spacing
        let domain = Domain::DEFAULT;
        let xs = domain.sweep(0.5);
        assert!(xs.len() >= 41);

        let raw = evaluator.plot_eval(&table, "1 0 -2", &xs).unwrap();
        let kept = filter_finite(raw);
        assert_eq!(kept.len(), xs.len());

        let smoothed = smooth::smooth(&kept);
        assert!(smoothed.len() > kept.len());

        let lowest = smoothed
            .iter()
            .fold(Sample::new(0.0, f64::INFINITY), |best, &p| {
                if p.y < best.y {
                    p
                } else {
                    best
                }
            });
        assert!(lowest.x.abs() <= 0.5);
        assert!((lowest.y - (-2.0)).abs() <= 0.25);
    }

    #[test]
    fn geometry_marks_out_of_range_axis_dashed() {
        // entirely positive data: the x axis is clamped and dashed
        let points: Vec<Sample> = (0..10).map(|i| Sample::new(i as f64, 5.0 + i as f64)).collect();
        let domain = Domain::new(0.0, 9.0).unwrap();
        let geometry = build_geometry(&points, domain, 200.0, 100.0);

        let x_axis = geometry.segments[0];
        assert_eq!(x_axis.stroke, Stroke::Dashed);
        assert_eq!(x_axis.from.1, 90.0);

        // x = 0 is inside the domain, so the y axis stays solid
        let y_axis = geometry.segments[1];
        assert_eq!(y_axis.stroke, Stroke::Solid);
    }

    #[test]
    fn geometry_has_one_label_per_tick_segment() {
        let points: Vec<Sample> = (0..20)
            .map(|i| Sample::new(-10.0 + i as f64, (i as f64).sin()))
            .collect();
        let geometry = build_geometry(&points, Domain::DEFAULT, 640.0, 480.0);

        // two axis lines plus one segment per tick; labels match ticks
        assert_eq!(geometry.segments.len() - 2, geometry.labels.len());
        assert!(!geometry.labels.is_empty());
    }

    #[test]
    fn empty_points_produce_empty_geometry() {
        let geometry = build_geometry(&[], Domain::DEFAULT, 640.0, 480.0);
        assert_eq!(geometry, CanvasGeometry::empty());
    }

    #[test]
    fn draw_action_substitutes_defaults_on_bad_bounds() {
        let evaluator = Evaluator::new();
        let mut state = PlotState::new(Arc::new(SymbolTable::standard()));
        state.function_input = "x".to_string();
        state.x_start_input = "abc".to_string();
        state.x_end_input = "10".to_string();

        let status = state.draw(&evaluator);
        assert!(status.contains("warnings"));
        assert!(state.curve.is_some());
        assert_eq!(state.x_start_input, "-10");
        assert_eq!(state.curve.as_ref().unwrap().domain, Domain::DEFAULT);
    }

    #[test]
    fn draw_action_recovers_from_reversed_domain() {
        let evaluator = Evaluator::new();
        let mut state = PlotState::new(Arc::new(SymbolTable::standard()));
        state.function_input = "x".to_string();
        state.x_start_input = "5".to_string();
        state.x_end_input = "-5".to_string();

        let status = state.draw(&evaluator);
        assert!(status.contains("warnings"));
        assert_eq!(state.curve.as_ref().unwrap().domain, Domain::DEFAULT);
    }

    #[test]
    fn failed_draw_clears_previous_curve() {
        let evaluator = Evaluator::new();
        let mut state = PlotState::new(Arc::new(SymbolTable::standard()));
        state.function_input = "x".to_string();
        state.draw(&evaluator);
        assert!(state.curve.is_some());

        state.function_input = "nope + 1".to_string();
        let status = state.draw(&evaluator);
        assert!(status.contains("Plot failed"));
        assert!(state.curve.is_none());
        assert!(state.message.is_some());
    }

    #[test]
    fn draw_uses_published_symbols() {
        let evaluator = Evaluator::new();
        let mut state = PlotState::new(Arc::new(SymbolTable::standard()));
        state.function_input = "a * x".to_string();

        let status = state.draw(&evaluator);
        assert!(status.contains("Plot failed"));

        state.publish_symbols(Arc::new(SymbolTable::standard().with_binding("a", 2.0)));
        state.draw(&evaluator);
        assert!(state.curve.is_some());
    }
}
