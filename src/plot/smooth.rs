//! Curve smoothing with Catmull-Rom splines.
//!
//! Interpolates over sliding windows of four consecutive samples. The
//! resulting curve passes through the two interior control points of each
//! window, covering samples 1..n-2 of the input.

use super::sample::Sample;

/// Interpolated points emitted per window; the parameter step is 1/20 = 0.05.
const SUBDIVISIONS: usize = 20;

/// Catmull-Rom interpolation at parameter `t` in [0, 1].
///
/// The curve passes through `p1` at t = 0 and `p2` at t = 1, with `p0` and
/// `p3` shaping the tangents. x and y are interpolated independently.
pub fn catmull_rom(p0: Sample, p1: Sample, p2: Sample, p3: Sample, t: f64) -> Sample {
    fn component(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        0.5 * (2.0 * p1
            + (-p0 + p2) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
    }

    Sample::new(
        component(p0.x, p1.x, p2.x, p3.x, t),
        component(p0.y, p1.y, p2.y, p3.y, t),
    )
}

/// Smooth a filtered sample sequence.
///
/// Degenerate inputs pass through unchanged: fewer than four points cannot
/// form a window, and a constant function (every y exactly equal) needs no
/// smoothing. Otherwise each window emits points for t = k/20, k in 0..20;
/// the upper bound is exclusive, since the next window's t = 0 point is the
/// same curve location (`p(0) == p1`), so window joins are not doubled.
pub fn smooth(samples: &[Sample]) -> Vec<Sample> {
    if samples.len() < 4 {
        return samples.to_vec();
    }
    if samples.iter().all(|s| s.y == samples[0].y) {
        return samples.to_vec();
    }

    let windows = samples.len() - 3;
    let mut out = Vec::with_capacity(windows * SUBDIVISIONS);
    for window in samples.windows(4) {
        for k in 0..SUBDIVISIONS {
            let t = k as f64 / SUBDIVISIONS as f64;
            out.push(catmull_rom(window[0], window[1], window[2], window[3], t));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_curve(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let x = i as f64 * 0.5;
                Sample::new(x, x * x)
            })
            .collect()
    }

    #[test]
    fn interpolation_passes_through_interior_points() {
        let p0 = Sample::new(0.0, 1.0);
        let p1 = Sample::new(1.0, 3.0);
        let p2 = Sample::new(2.0, -2.0);
        let p3 = Sample::new(3.0, 0.5);

        let at_zero = catmull_rom(p0, p1, p2, p3, 0.0);
        assert_eq!(at_zero, p1);

        let at_one = catmull_rom(p0, p1, p2, p3, 1.0);
        assert_eq!(at_one, p2);
    }

    #[test]
    fn short_input_passes_through() {
        for n in 0..4 {
            let samples = sample_curve(n);
            assert_eq!(smooth(&samples), samples);
        }
    }

    #[test]
    fn constant_function_passes_through() {
        let samples: Vec<Sample> = (0..50).map(|i| Sample::new(i as f64, 5.0)).collect();
        assert_eq!(smooth(&samples), samples);
    }

    #[test]
    fn smoothing_densifies_the_curve() {
        let samples = sample_curve(10);
        let smoothed = smooth(&samples);
        // 7 windows, 20 points each
        assert_eq!(smoothed.len(), (samples.len() - 3) * 20);
    }

    #[test]
    fn smoothed_curve_starts_at_second_sample() {
        let samples = sample_curve(10);
        let smoothed = smooth(&samples);
        assert_eq!(smoothed[0], samples[1]);
    }

    #[test]
    fn window_joins_are_not_doubled() {
        let samples = sample_curve(10);
        let smoothed = smooth(&samples);
        for pair in smoothed.windows(2) {
            assert!(
                pair[0] != pair[1],
                "duplicate point at window boundary: {:?}",
                pair[0]
            );
        }
    }

    #[test]
    fn smoothed_x_is_monotonic_for_monotonic_input() {
        let samples = sample_curve(12);
        let smoothed = smooth(&samples);
        for pair in smoothed.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
    }
}
