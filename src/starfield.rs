//! Star field: particle population, drift, and glyph convergence.
//!
//! Each star has a fixed polar-sampled origin inside the aperture disc, an
//! accumulated random-walk drift, and a rendered position that chases a
//! target by exponential smoothing. While the active lens rotates, drift is
//! agitated; as the lens approaches its correct orientation, the stars
//! assigned to it are pulled from their drifted base toward stable glyph
//! sample points, reorganizing the diffuse disc into the symbol outline.
//!
//! Invariant: `hypot(origin + drift) <= radius` after every update; the
//! combined vector is rescaled back onto the disc on overflow.

#[cfg(test)]
#[path = "starfield_test.rs"]
mod starfield_test;

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;

use crate::angle::lerp;
use crate::config::{StarConfig, StarShape};
use crate::consts::MOVEMENT_EPSILON;
use crate::glyph::GlyphPoint;

/// One particle of the field.
#[derive(Debug, Clone)]
pub struct Star {
    /// Lens this star reveals a glyph for, or `None` for free-floating stars.
    pub lens_index: Option<usize>,
    /// Fixed base x, sampled uniformly over the disc at creation.
    pub origin_x: f64,
    /// Fixed base y.
    pub origin_y: f64,
    /// Accumulated random-walk x offset.
    pub drift_x: f64,
    /// Accumulated random-walk y offset.
    pub drift_y: f64,
    /// Rendered x; smoothed toward the current target.
    pub curr_x: f64,
    /// Rendered y.
    pub curr_y: f64,
    /// Base radius in pixels.
    pub size: f64,
    /// Twinkle angular speed in radians per millisecond.
    pub twinkle_speed: f64,
    /// Twinkle phase offset in radians.
    pub phase: f64,
    /// Shape this star is rasterized as.
    pub shape: StarShape,
}

/// The full particle population for one viewport size.
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
    radius: f64,
}

impl StarField {
    /// Create a field of exactly `config.count` stars inside a disc of the
    /// given radius. Lens assignment is round-robin (`i % lens_count`),
    /// gated by `group_percentage`; unassigned stars only ever drift.
    /// An empty shape palette falls back to plain circles.
    #[must_use]
    pub fn new(config: &StarConfig, radius: f64, lens_count: usize, rng: &mut StdRng) -> Self {
        let stars = (0..config.count)
            .map(|i| {
                let theta = rng.random::<f64>() * TAU;
                // sqrt keeps the area density uniform over the disc.
                let r = rng.random::<f64>().sqrt() * radius;
                let (x, y) = (theta.cos() * r, theta.sin() * r);
                let lens_index = if rng.random::<f64>() < config.group_percentage {
                    Some(i % lens_count.max(1))
                } else {
                    None
                };
                let shape_idx = rng.random_range(0..config.shapes.len().max(1));

                Star {
                    lens_index,
                    origin_x: x,
                    origin_y: y,
                    drift_x: 0.0,
                    drift_y: 0.0,
                    curr_x: x,
                    curr_y: y,
                    size: rng.random_range(config.min_size..=config.max_size),
                    twinkle_speed: rng.random_range(config.twinkle.min..=config.twinkle.max),
                    phase: rng.random::<f64>() * TAU,
                    shape: config.shapes.get(shape_idx).copied().unwrap_or(StarShape::Circle),
                }
            })
            .collect();

        Self { stars, radius }
    }

    /// Advance every star by one frame.
    ///
    /// `movement` is the active lens's rotation agitation in `[0, 1]`;
    /// `accuracy` its alignment score; `glyph` its snap-target cloud.
    /// Stars of other lenses (and unassigned stars) just follow their
    /// drifted base.
    pub fn update(
        &mut self,
        active_lens: usize,
        accuracy: f64,
        movement: f64,
        glyph: &[GlyphPoint],
        config: &StarConfig,
        rng: &mut StdRng,
    ) {
        let agitated = movement > MOVEMENT_EPSILON;

        for (i, star) in self.stars.iter_mut().enumerate() {
            if agitated {
                star.drift_x += (rng.random::<f64>() - 0.5) * movement * config.movement_strength;
                star.drift_y += (rng.random::<f64>() - 0.5) * movement * config.movement_strength;

                let combined_x = star.origin_x + star.drift_x;
                let combined_y = star.origin_y + star.drift_y;
                let dist = combined_x.hypot(combined_y);
                if dist > self.radius {
                    let scale = self.radius / dist;
                    star.drift_x = combined_x * scale - star.origin_x;
                    star.drift_y = combined_y * scale - star.origin_y;
                }
            }

            let base_x = star.origin_x + star.drift_x;
            let base_y = star.origin_y + star.drift_y;

            let (target_x, target_y) = if star.lens_index == Some(active_lens)
                && accuracy > 0.0
                && !glyph.is_empty()
            {
                // Stable index mapping: the same star always aims at the
                // same glyph point, so the symbol does not swim.
                let p = glyph[i % glyph.len()];
                (lerp(base_x, p.x, accuracy), lerp(base_y, p.y, accuracy))
            } else {
                (base_x, base_y)
            };

            star.curr_x += (target_x - star.curr_x) * config.snap_lerp;
            star.curr_y += (target_y - star.curr_y) * config.snap_lerp;
        }
    }

    /// The stars, in creation order.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// The disc radius the field was built for.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of stars in the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Returns `true` if the field holds no stars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
