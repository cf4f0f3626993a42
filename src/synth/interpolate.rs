//! Keyframe interpolation into a dense per-index target trajectory

use super::shapes::{Curvature, Keyframe, Shape};

/// Target price for every series index
pub type Trajectory = Vec<f64>;

/// Sample `shape` at `length` evenly spaced points.
///
/// Keyframe shapes are interpolated piecewise-linearly over the span
/// `[first.position, last.position]`; parabolic shapes are evaluated at
/// `t` spaced evenly in `[-1, 1]`. Output length always equals `length`.
pub fn interpolate(shape: &Shape, length: usize) -> Trajectory {
    match *shape {
        Shape::Keyframes(frames) => sample_keyframes(frames, length),
        Shape::Parabola {
            base,
            amplitude,
            curvature,
        } => sample_parabola(base, amplitude, curvature, length),
    }
}

fn sample_keyframes(frames: &[Keyframe], length: usize) -> Trajectory {
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return Vec::new();
    };
    let span = last.position - first.position;

    (0..length)
        .map(|i| {
            let x = if length > 1 {
                first.position + span * i as f64 / (length - 1) as f64
            } else {
                first.position
            };
            linear_at(frames, x)
        })
        .collect()
}

/// Piecewise-linear value at `x`, clamped to the end keyframes.
fn linear_at(frames: &[Keyframe], x: f64) -> f64 {
    let first = frames[0];
    let last = frames[frames.len() - 1];
    if x <= first.position {
        return first.price;
    }
    if x >= last.position {
        return last.price;
    }

    // First segment whose right end reaches x
    let seg = frames.partition_point(|k| k.position < x);
    let (a, b) = (frames[seg - 1], frames[seg]);
    let width = b.position - a.position;
    if width <= f64::EPSILON {
        return b.price;
    }
    a.price + (b.price - a.price) * (x - a.position) / width
}

fn sample_parabola(base: f64, amplitude: f64, curvature: Curvature, length: usize) -> Trajectory {
    let sign = match curvature {
        Curvature::Bottom => 1.0,
        Curvature::Top => -1.0,
    };

    (0..length)
        .map(|i| {
            let t = if length > 1 {
                -1.0 + 2.0 * i as f64 / (length - 1) as f64
            } else {
                0.0
            };
            base + sign * amplitude * t * t
        })
        .collect()
}
