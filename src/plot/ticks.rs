//! Axis tick planning.
//!
//! Produces "nice" tick positions and integer labels for one axis. The step
//! is the span divided by the target count, rounded to a whole number and
//! floor-guarded so it can never be zero.

/// Ticks aimed at per axis.
pub const TARGET_TICK_COUNT: usize = 10;

// Tolerates accumulated floating error at the aligned upper bound.
const UPPER_BOUND_EPSILON: f64 = 1e-4;

/// One tick on an axis: a data-space position and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    /// Position in data units.
    pub value: f64,
    /// Label text, the value rounded to an integer.
    pub label: String,
}

/// Plan tick marks for an axis spanning `start..end`.
///
/// The first tick is aligned up to a multiple of the step, the last aligned
/// down; every multiple in between gets a mark.
pub fn plan_ticks(start: f64, end: f64, target_count: usize) -> Vec<TickMark> {
    let mut step = ((end - start) / target_count as f64).round();
    if step == 0.0 {
        step = 1.0;
    }

    let first = (start / step).ceil() * step;
    let last = (end / step).floor() * step;

    let mut ticks = Vec::new();
    let mut value = first;
    while value <= last + UPPER_BOUND_EPSILON {
        // alignment arithmetic can yield -0.0, which would label as "-0"
        let normalized = if value == 0.0 { 0.0 } else { value };
        ticks.push(TickMark {
            value: normalized,
            label: format!("{:.0}", normalized),
        });
        value += step;
    }
    ticks
}
