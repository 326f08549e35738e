//! Lens model: per-lens rotation state and the solved/accuracy predicates.
//!
//! A lens is a rotatable face-selector. `target_angle` moves in discrete
//! face steps (and is never wrapped, so rotation direction survives
//! arbitrarily many turns); `current_angle` chases it with critically
//! damped exponential relaxation every frame. A lens is solved when its
//! current angle sits within the snap tolerance of `correct_angle`.

#[cfg(test)]
#[path = "lens_test.rs"]
mod lens_test;

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::angle;
use crate::config::{LensSpec, NebulaConfig, Skeleton};
use crate::consts::MOVEMENT_FULL_SCALE_DEG;

/// Spread of nebula blob centers around the lens origin, in pixels.
const NEBULA_SPREAD: f64 = 1000.0;

/// Base radius the blob radius factors scale, in pixels.
const NEBULA_BASE_RADIUS: f64 = 400.0;

/// One soft radial-gradient blob of the lens's nebula backdrop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NebulaBlob {
    /// Blob center x, relative to the viewport center.
    pub x: f64,
    /// Blob center y, relative to the viewport center.
    pub y: f64,
    /// Blob radius in pixels before breathing modulation.
    pub radius: f64,
    /// Gradient core color.
    pub color: String,
    /// Breathing phase offset in radians.
    pub phase: f64,
}

/// A rotatable lens and its immutable identity.
#[derive(Debug, Clone)]
pub struct Lens {
    /// Rendered rotation in degrees; chases `target_angle` each frame.
    pub current_angle: f64,
    /// Requested rotation in degrees; accumulates face steps unbounded.
    pub target_angle: f64,
    /// The orientation (in `[0, 360)`) at which this lens is solved.
    pub correct_angle: f64,
    /// Display name.
    pub name: String,
    /// Accent color.
    pub color: String,
    /// Glyph character this lens reveals.
    pub symbol: String,
    /// Constellation name shown on the map.
    pub constellation_name: String,
    /// Normalized constellation skeleton for the map overlay.
    pub skeleton: Skeleton,
    /// Nebula backdrop blobs, randomized once at creation.
    pub nebula: Vec<NebulaBlob>,
}

impl Lens {
    /// Build a lens from its static spec. `face_step` is `360 / sides`.
    #[must_use]
    pub fn from_spec(spec: &LensSpec, face_step: f64, nebula: &NebulaConfig, rng: &mut StdRng) -> Self {
        let blobs = (0..nebula.blobs_per_lens)
            .map(|_| {
                let color_idx = rng.random_range(0..spec.nebula_colors.len().max(1));
                NebulaBlob {
                    x: (rng.random::<f64>() - 0.5) * NEBULA_SPREAD,
                    y: (rng.random::<f64>() - 0.5) * NEBULA_SPREAD,
                    radius: rng.random_range(nebula.min_radius_factor..=nebula.max_radius_factor)
                        * NEBULA_BASE_RADIUS,
                    color: spec
                        .nebula_colors
                        .get(color_idx)
                        .cloned()
                        .unwrap_or_else(|| spec.color.clone()),
                    phase: rng.random::<f64>() * TAU,
                }
            })
            .collect();

        Self {
            current_angle: 0.0,
            target_angle: 0.0,
            correct_angle: (f64::from(spec.target_face - 1) * face_step) % 360.0,
            name: spec.name.clone(),
            color: spec.color.clone(),
            symbol: spec.symbol.clone(),
            constellation_name: spec.constellation_name.clone(),
            skeleton: spec.skeleton.clone(),
            nebula: blobs,
        }
    }

    /// Relax `current_angle` toward `target_angle` by one frame.
    ///
    /// Moves a fixed fraction of the remaining shortest signed delta, so the
    /// approach is exponential and never overshoots.
    pub fn advance(&mut self, lerp_speed: f64) {
        let diff = angle::signed_delta(self.current_angle, self.target_angle);
        self.current_angle += diff * lerp_speed;
    }

    /// Request one discrete rotation. `direction` is `+1` or `-1`.
    pub fn rotate(&mut self, direction: i32, face_step: f64) {
        self.target_angle += f64::from(direction) * face_step;
    }

    /// Whether the lens currently sits within `tolerance` of its correct angle.
    #[must_use]
    pub fn solved(&self, tolerance: f64) -> bool {
        angle::shortest_distance(self.current_angle, self.correct_angle) < tolerance
    }

    /// Alignment accuracy in `[0, 1]`: 1 when exactly correct, 0 at or
    /// beyond `discovery_range` degrees away, quadratic in between.
    #[must_use]
    pub fn accuracy(&self, discovery_range: f64) -> f64 {
        let dist = angle::shortest_distance(self.current_angle, self.correct_angle);
        (1.0 - dist / discovery_range).max(0.0).powi(2)
    }

    /// Drift agitation in `[0, 1]` derived from remaining rotation travel.
    #[must_use]
    pub fn rotation_movement(&self) -> f64 {
        let velocity = (self.target_angle - self.current_angle).abs();
        (velocity / MOVEMENT_FULL_SCALE_DEG).min(1.0)
    }

    /// The 1-based face number currently pointing up, for the side panel.
    #[must_use]
    pub fn face_indicator(&self, sides: u32) -> u32 {
        let step = 360.0 / f64::from(sides);
        let sides = i64::from(sides);
        #[allow(clippy::cast_possible_truncation)]
        let turns = (self.current_angle / step).round() as i64;
        let face = (sides - turns.rem_euclid(sides)).rem_euclid(sides) + 1;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            face as u32
        }
    }
}
