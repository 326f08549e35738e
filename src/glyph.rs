//! Glyph sampling: turning a lens's hidden symbol into snap-target points.
//!
//! The simulation core only ever sees an ordered `Vec<GlyphPoint>` per lens;
//! how those points are produced is a host capability behind [`GlyphSampler`].
//! The WASM shell rasterizes the symbol on an offscreen canvas
//! ([`crate::engine::CanvasGlyphSampler`]); native hosts and tests use
//! [`SkeletonSampler`], which walks the constellation skeleton instead and is
//! fully deterministic.
//!
//! Points are in lens-local coordinates centered on the aperture, scaled so
//! the glyph fits comfortably inside the field radius. A sampler may return
//! an empty set; the star field then simply never snaps for that lens.

#[cfg(test)]
#[path = "glyph_test.rs"]
mod glyph_test;

use serde::{Deserialize, Serialize};

use crate::angle::lerp;
use crate::consts::GLYPH_LOCAL_EXTENT;
use crate::lens::Lens;

/// One snap target in lens-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphPoint {
    /// Local x, relative to the aperture center.
    pub x: f64,
    /// Local y, relative to the aperture center.
    pub y: f64,
}

/// Produces the snap-target point cloud for a lens.
///
/// Called once per lens per resize; never on the per-frame path.
pub trait GlyphSampler {
    /// Sample the lens's glyph into local coordinates for a field of the
    /// given radius. An empty result disables snapping for the lens.
    fn sample(&mut self, lens: &Lens, inner_radius: f64) -> Vec<GlyphPoint>;
}

/// Deterministic sampler that distributes points along the constellation
/// skeleton edges. Produces the same cloud for the same lens and radius on
/// every call.
#[derive(Debug, Clone)]
pub struct SkeletonSampler {
    /// Interior points generated per skeleton edge, in addition to its
    /// two endpoints.
    pub samples_per_edge: usize,
}

impl Default for SkeletonSampler {
    fn default() -> Self {
        Self { samples_per_edge: 10 }
    }
}

impl SkeletonSampler {
    /// Map a normalized skeleton coordinate into lens-local space.
    fn to_local(norm: f64, inner_radius: f64) -> f64 {
        (norm - 0.5) * GLYPH_LOCAL_EXTENT * inner_radius
    }
}

impl GlyphSampler for SkeletonSampler {
    fn sample(&mut self, lens: &Lens, inner_radius: f64) -> Vec<GlyphPoint> {
        let skeleton = &lens.skeleton;
        let mut points = Vec::new();

        for p in &skeleton.points {
            points.push(GlyphPoint {
                x: Self::to_local(p[0], inner_radius),
                y: Self::to_local(p[1], inner_radius),
            });
        }

        let steps = self.samples_per_edge + 1;
        for pair in &skeleton.lines {
            let (Some(a), Some(b)) = (skeleton.points.get(pair[0]), skeleton.points.get(pair[1]))
            else {
                continue;
            };
            for i in 1..steps {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / steps as f64;
                points.push(GlyphPoint {
                    x: Self::to_local(lerp(a[0], b[0], t), inner_radius),
                    y: Self::to_local(lerp(a[1], b[1], t), inner_radius),
                });
            }
        }

        points
    }
}
