//! Simulation core: lens rotation, star convergence, and solved tracking.
//!
//! [`SimCore`] owns all mutable puzzle state and is free of browser types,
//! so every behavior here is natively testable. The host drives it with a
//! fixed call shape per animation frame: apply any queued input events, call
//! [`SimCore::tick`] once, then read a [`FrameSnapshot`] via
//! [`SimCore::frame`] and hand it to the renderer. The snapshot is a plain
//! serializable value; rendering never reaches back into the core.

#[cfg(test)]
#[path = "sim_test.rs"]
mod sim_test;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config::{Config, ConfigError, Skeleton, StarShape};
use crate::consts::{ACTIVE_SIZE_BOOST, ACTIVE_STAR_COLOR, BASE_STAR_ALPHA};
use crate::glyph::{GlyphPoint, GlyphSampler};
use crate::input::Event;
use crate::lens::{Lens, NebulaBlob};
use crate::starfield::StarField;

/// Everything the renderer needs for one frame, as owned values.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Aperture radius in pixels.
    pub field_radius: f64,
    /// Index of the lens currently receiving rotation input.
    pub active_lens: usize,
    /// Alignment accuracy of the active lens.
    pub accuracy: f64,
    /// Whether every lens is solved.
    pub is_solved: bool,
    /// Whether the constellation map overlay is showing.
    pub map_visible: bool,
    /// Per-lens display state, in lens-table order.
    pub lenses: Vec<LensFrame>,
    /// Per-star draw commands, in field order.
    pub stars: Vec<StarFrame>,
}

/// Display state of one lens.
#[derive(Debug, Clone, Serialize)]
pub struct LensFrame {
    /// Display name.
    pub name: String,
    /// Accent color.
    pub color: String,
    /// Glyph character.
    pub symbol: String,
    /// Constellation name for the map overlay.
    pub constellation_name: String,
    /// Rendered rotation in degrees.
    pub current_angle: f64,
    /// Whether this lens currently sits on its correct face.
    pub solved: bool,
    /// 1-based face number pointing up.
    pub face: u32,
    /// Normalized skeleton for the map overlay.
    pub skeleton: Skeleton,
    /// Nebula backdrop blobs.
    pub nebula: Vec<NebulaBlob>,
}

/// Draw command for one star.
#[derive(Debug, Clone, Serialize)]
pub struct StarFrame {
    /// Center x relative to the viewport center.
    pub x: f64,
    /// Center y relative to the viewport center.
    pub y: f64,
    /// Radius in pixels, after any accuracy boost.
    pub size: f64,
    /// Shape to rasterize.
    pub shape: StarShape,
    /// Fill color.
    pub color: String,
    /// Fill alpha after twinkle modulation.
    pub alpha: f64,
    /// Halo radius in pixels; zero when the star has no glow.
    pub glow_radius: f64,
    /// Halo alpha; zero when the star has no glow.
    pub glow_alpha: f64,
}

/// The complete mutable puzzle state.
pub struct SimCore {
    config: Config,
    lenses: Vec<Lens>,
    field: StarField,
    glyphs: Vec<Vec<GlyphPoint>>,
    active_lens: usize,
    menu_order: Vec<usize>,
    map_visible: bool,
    solved: Vec<bool>,
    is_solved: bool,
    accuracy: f64,
    width: f64,
    height: f64,
    rng: StdRng,
}

impl SimCore {
    /// Build the puzzle for a viewport of `width` x `height` pixels.
    ///
    /// Validates the configuration, creates the lenses and the star field
    /// from the seeded generator, samples each lens's glyph, and shuffles
    /// the side-panel menu order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration violates any data
    /// model invariant.
    pub fn new(
        config: Config,
        width: f64,
        height: f64,
        sampler: &mut dyn GlyphSampler,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let face_step = config.face_step();
        let lenses: Vec<Lens> = config
            .lenses
            .iter()
            .map(|spec| Lens::from_spec(spec, face_step, &config.nebula, &mut rng))
            .collect();

        let radius = width.min(height) * config.telescope.inner_radius_factor;
        let field = StarField::new(&config.stars, radius, lenses.len(), &mut rng);
        let glyphs = sample_glyphs(&lenses, radius, sampler);

        let mut menu_order: Vec<usize> = (0..lenses.len()).collect();
        menu_order.shuffle(&mut rng);

        let solved = vec![false; lenses.len()];
        Ok(Self {
            config,
            lenses,
            field,
            glyphs,
            active_lens: 0,
            menu_order,
            map_visible: false,
            solved,
            is_solved: false,
            accuracy: 0.0,
            width,
            height,
            rng,
        })
    }

    /// Rebuild the star field and glyph clouds for a new viewport size.
    ///
    /// Lens angles, solved flags, and the menu order are preserved; star
    /// positions and drift are regenerated from scratch.
    pub fn resize(&mut self, width: f64, height: f64, sampler: &mut dyn GlyphSampler) {
        self.width = width;
        self.height = height;
        let radius = width.min(height) * self.config.telescope.inner_radius_factor;
        self.field = StarField::new(&self.config.stars, radius, self.lenses.len(), &mut self.rng);
        self.glyphs = sample_glyphs(&self.lenses, radius, sampler);
        log::info!("viewport {width}x{height}, field radius {radius:.1}");
    }

    /// Request one discrete rotation of the active lens. `direction` is
    /// `+1` (clockwise) or `-1`.
    pub fn rotate(&mut self, direction: i32) {
        let step = self.config.face_step();
        self.lenses[self.active_lens].rotate(direction, step);
    }

    /// Activate the lens shown in the given 0-based side-panel slot.
    /// Out-of-range slots are ignored.
    pub fn select_slot(&mut self, slot: usize) {
        if let Some(&index) = self.menu_order.get(slot) {
            self.active_lens = index;
        }
    }

    /// Activate a lens by its lens-table index. Out-of-range indices are
    /// ignored.
    pub fn select_lens(&mut self, index: usize) {
        if index < self.lenses.len() {
            self.active_lens = index;
        }
    }

    /// Toggle the constellation map overlay; returns the new visibility.
    pub fn toggle_map(&mut self) -> bool {
        self.map_visible = !self.map_visible;
        self.map_visible
    }

    /// Apply one input event.
    pub fn apply(&mut self, event: Event, sampler: &mut dyn GlyphSampler) {
        match event {
            Event::Rotate(direction) => self.rotate(direction),
            Event::SelectSlot(slot) => self.select_slot(slot),
            Event::ToggleMap => {
                self.toggle_map();
            }
            Event::Resize { width, height } => self.resize(width, height, sampler),
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// Order is fixed: every lens relaxes toward its target, solved flags
    /// and the global solved state are recomputed, then the star field
    /// updates against the active lens's accuracy and agitation.
    pub fn tick(&mut self) {
        let lerp_speed = self.config.rotation.lerp_speed;
        for lens in &mut self.lenses {
            lens.advance(lerp_speed);
        }

        let tolerance = self.config.rotation.snap_tolerance;
        for (flag, lens) in self.solved.iter_mut().zip(&self.lenses) {
            *flag = lens.solved(tolerance);
        }
        let newly_solved = self.solved.iter().all(|&s| s);
        if newly_solved && !self.is_solved {
            log::info!("all lenses aligned");
        }
        self.is_solved = newly_solved;

        let active = &self.lenses[self.active_lens];
        self.accuracy = active.accuracy(self.config.stars.discovery_range);
        let movement = active.rotation_movement();
        self.field.update(
            self.active_lens,
            self.accuracy,
            movement,
            &self.glyphs[self.active_lens],
            &self.config.stars,
            &mut self.rng,
        );
    }

    /// Capture the current frame for the renderer. `time` is the host
    /// animation clock in milliseconds and only drives twinkle phase.
    #[must_use]
    pub fn frame(&self, time: f64) -> FrameSnapshot {
        let stars_cfg = &self.config.stars;
        let twinkle = &stars_cfg.twinkle;

        let lenses = self
            .lenses
            .iter()
            .zip(&self.solved)
            .map(|(lens, &solved)| LensFrame {
                name: lens.name.clone(),
                color: lens.color.clone(),
                symbol: lens.symbol.clone(),
                constellation_name: lens.constellation_name.clone(),
                current_angle: lens.current_angle,
                solved,
                face: lens.face_indicator(self.config.telescope.sides),
                skeleton: lens.skeleton.clone(),
                nebula: lens.nebula.clone(),
            })
            .collect();

        let stars = self
            .field
            .stars()
            .iter()
            .map(|star| {
                let shimmer = (time * star.twinkle_speed + star.phase).sin() * twinkle.factor_a
                    + twinkle.factor_b;
                let is_active = star.lens_index == Some(self.active_lens);

                let (size, color, alpha) = if is_active {
                    (
                        star.size * (1.0 + self.accuracy * ACTIVE_SIZE_BOOST),
                        ACTIVE_STAR_COLOR.to_owned(),
                        (BASE_STAR_ALPHA + self.accuracy * BASE_STAR_ALPHA) * shimmer,
                    )
                } else {
                    let dimmed = if self.is_solved { 0.5 } else { 1.0 };
                    (
                        star.size,
                        stars_cfg.unsolved_color.clone(),
                        BASE_STAR_ALPHA * shimmer * dimmed,
                    )
                };

                let (glow_radius, glow_alpha) = if is_active
                    && self.accuracy > stars_cfg.glow_threshold
                {
                    (
                        star.size * stars_cfg.glow_size_factor * self.accuracy,
                        (self.accuracy - stars_cfg.glow_threshold) * stars_cfg.glow_intensity * 0.1,
                    )
                } else {
                    (0.0, 0.0)
                };

                StarFrame {
                    x: star.curr_x,
                    y: star.curr_y,
                    size,
                    shape: star.shape,
                    color,
                    alpha,
                    glow_radius,
                    glow_alpha,
                }
            })
            .collect();

        FrameSnapshot {
            width: self.width,
            height: self.height,
            field_radius: self.field.radius(),
            active_lens: self.active_lens,
            accuracy: self.accuracy,
            is_solved: self.is_solved,
            map_visible: self.map_visible,
            lenses,
            stars,
        }
    }

    /// The immutable configuration the core was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The lenses, in lens-table order.
    #[must_use]
    pub fn lenses(&self) -> &[Lens] {
        &self.lenses
    }

    /// Index of the active lens.
    #[must_use]
    pub fn active_lens(&self) -> usize {
        self.active_lens
    }

    /// Side-panel slot order: `menu_order()[slot]` is a lens-table index.
    #[must_use]
    pub fn menu_order(&self) -> &[usize] {
        &self.menu_order
    }

    /// Whether the constellation map overlay is showing.
    #[must_use]
    pub fn map_visible(&self) -> bool {
        self.map_visible
    }

    /// Per-lens solved flags, in lens-table order.
    #[must_use]
    pub fn solved(&self) -> &[bool] {
        &self.solved
    }

    /// Whether every lens is solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_solved
    }

    /// Alignment accuracy of the active lens as of the last tick.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// The star field.
    #[must_use]
    pub fn field(&self) -> &StarField {
        &self.field
    }
}

fn sample_glyphs(
    lenses: &[Lens],
    radius: f64,
    sampler: &mut dyn GlyphSampler,
) -> Vec<Vec<GlyphPoint>> {
    lenses
        .iter()
        .map(|lens| {
            let points = sampler.sample(lens, radius);
            if points.is_empty() {
                log::warn!("glyph sample for lens `{}` is empty; stars will not snap", lens.name);
            }
            points
        })
        .collect()
}
