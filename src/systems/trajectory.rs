//! Throw prediction - closed-form ballistic path sampled at the fixed step
//!
//! Uses `s = u*t + a*t^2/2` with `a = -g`, where `g` is the gravity the
//! thrown body actually feels (custom gravity or the scaled field). Drag is
//! ignored, so the preview is exact only for bodies without drag.

use crate::core::Vec2;

/// Samples the path at `t = 0, dt, 2dt, ...` for `steps` samples.
///
/// Sampling stops at the first point for which `blocked` returns true;
/// that point is not included.
pub fn predict_trajectory<F>(
    origin: Vec2,
    launch_velocity: Vec2,
    gravity: Vec2,
    dt: f32,
    steps: usize,
    blocked: F,
) -> Vec<Vec2>
where
    F: Fn(Vec2) -> bool,
{
    let acceleration = -gravity;
    let mut points = Vec::with_capacity(steps);

    for i in 0..steps {
        let t = i as f32 * dt;
        let point = origin + launch_velocity * t + acceleration * (0.5 * t * t);
        if blocked(point) {
            break;
        }
        points.push(point);
    }
    points
}
