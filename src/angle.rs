//! Angle math: shortest distances and interpolation on the degree circle.
//!
//! Angles are `f64` degrees and may be unbounded in either direction;
//! everything here reduces modulo 360 internally. These three functions are
//! the entire mathematical basis of lens relaxation and star snapping.

#[cfg(test)]
#[path = "angle_test.rs"]
mod angle_test;

use crate::consts::{FULL_TURN_DEG, HALF_TURN_DEG};

/// Shortest angular distance between two angles, in `[0, 180]`.
///
/// Symmetric in its arguments and zero exactly when `a ≡ b (mod 360)`.
#[must_use]
pub fn shortest_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % FULL_TURN_DEG;
    if diff > HALF_TURN_DEG {
        FULL_TURN_DEG - diff
    } else {
        diff
    }
}

/// Shortest signed delta from `from` to `to`, in `(-180, 180]`.
///
/// Adding the result to `from` moves it toward `to` along the shorter arc.
#[must_use]
pub fn signed_delta(from: f64, to: f64) -> f64 {
    (to - from + HALF_TURN_DEG + FULL_TURN_DEG).rem_euclid(FULL_TURN_DEG) - HALF_TURN_DEG
}

/// Linear interpolation from `a` to `b` by factor `t`.
///
/// `t` is not clamped; callers keep it in `[0, 1]`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
