//! WASM engine shell: binds the simulation core to a browser canvas.
//!
//! The host JavaScript layer owns the `requestAnimationFrame` loop and the
//! DOM event listeners; it forwards raw event data into [`Engine`] and calls
//! [`Engine::tick`] once per frame. Everything stateful lives in
//! [`crate::sim::SimCore`], which has no browser dependencies; this module
//! only adapts between DOM types and core values.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::consts::{GLYPH_ALPHA_THRESHOLD, GLYPH_RASTER_SIZE};
use crate::glyph::{GlyphPoint, GlyphSampler};
use crate::input;
use crate::lens::Lens;
use crate::render;
use crate::sim::SimCore;
use crate::ui;

/// Samples glyphs by rasterizing the symbol on an offscreen canvas and
/// scanning the alpha channel.
pub struct CanvasGlyphSampler {
    /// Context of the offscreen raster canvas; the element itself is
    /// reachable through it and never attached to the DOM.
    ctx: CanvasRenderingContext2d,
    /// Pixel stride of the alpha scan.
    density: u32,
    /// Raster-to-local scale per field radius.
    scale_factor: f64,
}

impl CanvasGlyphSampler {
    /// Create the offscreen raster canvas. The element is never attached to
    /// the DOM.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas element or its 2D context cannot be
    /// created.
    pub fn new(document: &Document, config: &Config) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(GLYPH_RASTER_SIZE);
        canvas.set_height(GLYPH_RASTER_SIZE);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("offscreen canvas has no 2d context"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            density: config.stars.symbol_sampling_density,
            scale_factor: config.stars.symbol_sampling_scale,
        })
    }

    fn rasterize(&self, symbol: &str) -> Result<Vec<u8>, JsValue> {
        let size = f64::from(GLYPH_RASTER_SIZE);
        self.ctx.clear_rect(0.0, 0.0, size, size);
        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_font(&format!("bold {:.0}px serif", size * 0.5));
        self.ctx.fill_text(symbol, size * 0.5, size * 0.5)?;
        let image = self.ctx.get_image_data(0.0, 0.0, size, size)?;
        Ok(image.data().0)
    }
}

impl GlyphSampler for CanvasGlyphSampler {
    #[allow(clippy::cast_precision_loss)]
    fn sample(&mut self, lens: &Lens, inner_radius: f64) -> Vec<GlyphPoint> {
        let pixels = match self.rasterize(&lens.symbol) {
            Ok(pixels) => pixels,
            Err(err) => {
                log::warn!("glyph raster for `{}` failed: {err:?}", lens.symbol);
                return Vec::new();
            }
        };

        let size = GLYPH_RASTER_SIZE as usize;
        let half = f64::from(GLYPH_RASTER_SIZE) * 0.5;
        let scale = inner_radius * self.scale_factor;
        let step = self.density.max(1) as usize;

        let mut points = Vec::new();
        for y in (0..size).step_by(step) {
            for x in (0..size).step_by(step) {
                let alpha_index = (y * size + x) * 4 + 3;
                if pixels.get(alpha_index).is_some_and(|&a| a > GLYPH_ALPHA_THRESHOLD) {
                    points.push(GlyphPoint {
                        x: (x as f64 - half) * scale,
                        y: (y as f64 - half) * scale,
                    });
                }
            }
        }
        points
    }
}

/// The browser-facing engine. Owns the visible canvas, its 2D context, and
/// the simulation core.
#[wasm_bindgen]
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: SimCore,
    sampler: CanvasGlyphSampler,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine bound to the given canvas, using the built-in
    /// puzzle configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or the configuration
    /// fails validation.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<Engine, JsValue> {
        Self::build(canvas, Config::default())
    }

    /// Create an engine with a JSON configuration override.
    ///
    /// # Errors
    ///
    /// Returns `Err` on malformed JSON, a configuration that fails
    /// validation, or an unavailable 2D context.
    pub fn from_json(canvas: HtmlCanvasElement, config_json: &str) -> Result<Engine, JsValue> {
        let config: Config = serde_json::from_str(config_json)
            .map_err(|err| JsValue::from_str(&format!("bad config: {err}")))?;
        Self::build(canvas, config)
    }

    /// Advance the simulation one frame and redraw. `time` is the
    /// `requestAnimationFrame` timestamp in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a canvas drawing call fails.
    pub fn tick(&mut self, time: f64) -> Result<(), JsValue> {
        self.core.tick();
        let frame = self.core.frame(time);
        render::draw(&self.ctx, &frame, self.core.config(), time)
    }

    /// Forward a `KeyboardEvent.key` value.
    pub fn on_key_down(&mut self, key: &str) {
        if let Some(event) = input::map_key(key, self.core.lenses().len()) {
            self.core.apply(event, &mut self.sampler);
        }
    }

    /// Forward a `WheelEvent.deltaY` value.
    pub fn on_wheel(&mut self, delta_y: f64) {
        if let Some(event) = input::map_wheel(delta_y) {
            self.core.apply(event, &mut self.sampler);
        }
    }

    /// Resize the backing canvas and rebuild the star field.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.canvas.set_width(width.max(1.0) as u32);
            self.canvas.set_height(height.max(1.0) as u32);
        }
        self.core.resize(width.max(1.0), height.max(1.0), &mut self.sampler);
    }

    /// Activate the lens in the given 0-based side-panel slot.
    pub fn select_slot(&mut self, slot: usize) {
        self.core.select_slot(slot);
    }

    /// Rotate the active lens; `direction` is `+1` or `-1`.
    pub fn rotate(&mut self, direction: i32) {
        self.core.rotate(direction);
    }

    /// Show or hide the constellation map; returns the new visibility.
    pub fn toggle_map(&mut self) -> bool {
        self.core.toggle_map()
    }

    /// Whether every lens is solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.core.is_solved()
    }

    /// Side-panel rows as a JSON array, in menu order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn status_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&ui::status_rows(&self.core))
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    fn build(canvas: HtmlCanvasElement, config: Config) -> Result<Engine, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let mut sampler = CanvasGlyphSampler::new(&document, &config)?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seed = js_sys::Date::now() as u64;
        let width = f64::from(canvas.width()).max(1.0);
        let height = f64::from(canvas.height()).max(1.0);

        let core = SimCore::new(config, width, height, &mut sampler, StdRng::seed_from_u64(seed))
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        log::info!("engine ready: {width}x{height}");
        Ok(Engine { canvas, ctx, core, sampler })
    }
}
