//! Rendering: draws the full telescope scene to a 2D context.
//!
//! This module (and the map overlay it dispatches to, [`crate::map`]) is the
//! only place that touches [`web_sys::CanvasRenderingContext2d`]. It receives
//! a read-only [`FrameSnapshot`] plus the static configuration and produces
//! pixels; it never mutates simulation state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::tick`]) handles the result.

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::{Config, StarShape};
use crate::map;
use crate::sim::{FrameSnapshot, StarFrame};

/// Scene background fill.
const BACKGROUND: &str = "#000000";

/// Outer-spike radius of a sparkle as a multiple of star size.
const SPARKLE_OUTER: f64 = 1.8;

/// Inner-notch radius of a sparkle as a multiple of star size.
const SPARKLE_INNER: f64 = 0.5;

/// Draw the full scene: nebula, star field, telescope body, map overlay.
///
/// `time` is the host animation clock in milliseconds and drives the nebula
/// breathing phase only; star twinkle is already baked into the snapshot.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    frame: &FrameSnapshot,
    config: &Config,
    time: f64,
) -> Result<(), JsValue> {
    let cx = frame.width * 0.5;
    let cy = frame.height * 0.5;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

    draw_nebula(ctx, frame, config, cx, cy, time)?;
    draw_stars(ctx, frame, cx, cy)?;
    draw_telescope(ctx, frame, config, cx, cy)?;

    if frame.map_visible {
        map::draw_overlay(ctx, frame)?;
    }

    Ok(())
}

// =============================================================
// Nebula backdrop
// =============================================================

fn draw_nebula(
    ctx: &CanvasRenderingContext2d,
    frame: &FrameSnapshot,
    config: &Config,
    cx: f64,
    cy: f64,
    time: f64,
) -> Result<(), JsValue> {
    let lens = &frame.lenses[frame.active_lens];
    let nebula = &config.nebula;

    ctx.save();
    ctx.translate(cx, cy)?;
    // The backdrop turns with a fraction of the lens angle, so rotation
    // reads as looking through moving glass.
    ctx.rotate((lens.current_angle * nebula.drift_factor).to_radians())?;
    ctx.set_global_composite_operation("screen")?;
    ctx.set_global_alpha(nebula.opacity);

    for blob in &lens.nebula {
        let radius = blob.radius
            + (time * nebula.breathing_speed + blob.phase).sin() * nebula.breathing_intensity;
        if radius <= 0.0 {
            continue;
        }
        let gradient = ctx.create_radial_gradient(blob.x, blob.y, 0.0, blob.x, blob.y, radius)?;
        gradient.add_color_stop(0.0, &blob.color)?;
        gradient.add_color_stop(1.0, "transparent")?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.arc(blob.x, blob.y, radius, 0.0, TAU)?;
        ctx.fill();
    }

    ctx.restore();
    Ok(())
}

// =============================================================
// Star field
// =============================================================

fn draw_stars(
    ctx: &CanvasRenderingContext2d,
    frame: &FrameSnapshot,
    cx: f64,
    cy: f64,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(cx, cy)?;
    ctx.begin_path();
    ctx.arc(0.0, 0.0, frame.field_radius, 0.0, TAU)?;
    ctx.clip();

    // Glow halos first, additively, so bright stars bloom under themselves.
    ctx.set_global_composite_operation("lighter")?;
    for star in &frame.stars {
        if star.glow_radius <= 0.0 {
            continue;
        }
        let gradient = ctx.create_radial_gradient(star.x, star.y, 0.0, star.x, star.y, star.glow_radius)?;
        gradient.add_color_stop(0.0, &star.color)?;
        gradient.add_color_stop(1.0, "transparent")?;
        ctx.set_global_alpha(star.glow_alpha);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.arc(star.x, star.y, star.glow_radius, 0.0, TAU)?;
        ctx.fill();
    }

    ctx.set_global_composite_operation("source-over")?;
    for star in &frame.stars {
        ctx.set_global_alpha(star.alpha.clamp(0.0, 1.0));
        ctx.set_fill_style_str(&star.color);
        draw_star_shape(ctx, star)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_star_shape(ctx: &CanvasRenderingContext2d, star: &StarFrame) -> Result<(), JsValue> {
    match star.shape {
        StarShape::Circle => {
            ctx.begin_path();
            ctx.arc(star.x, star.y, star.size, 0.0, TAU)?;
            ctx.fill();
        }
        StarShape::Sparkle => {
            draw_radial_polygon(ctx, star.x, star.y, &sparkle_radii(star.size), -PI / 2.0);
        }
        StarShape::Diamond => {
            draw_radial_polygon(ctx, star.x, star.y, &[star.size; 4], -PI / 2.0);
        }
        StarShape::Hexagon => {
            draw_radial_polygon(ctx, star.x, star.y, &[star.size; 6], -PI / 2.0);
        }
    }
    Ok(())
}

fn sparkle_radii(size: f64) -> [f64; 8] {
    let outer = size * SPARKLE_OUTER;
    let inner = size * SPARKLE_INNER;
    [outer, inner, outer, inner, outer, inner, outer, inner]
}

/// Fill a closed polygon whose vertices sit at the given radii, evenly
/// spaced around `(cx, cy)` starting from `offset` radians.
fn draw_radial_polygon(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, radii: &[f64], offset: f64) {
    ctx.begin_path();
    for (i, r) in radii.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let angle = offset + TAU * (i as f64) / (radii.len() as f64);
        let px = cx + r * angle.cos();
        let py = cy + r * angle.sin();
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.close_path();
    ctx.fill();
}

// =============================================================
// Telescope body
// =============================================================

fn draw_telescope(
    ctx: &CanvasRenderingContext2d,
    frame: &FrameSnapshot,
    config: &Config,
    cx: f64,
    cy: f64,
) -> Result<(), JsValue> {
    let telescope = &config.telescope;
    let lens = &frame.lenses[frame.active_lens];
    let outer = frame.width.min(frame.height) * telescope.outer_radius_factor;
    let inner = frame.field_radius;
    let sides = telescope.sides;

    ctx.save();
    ctx.translate(cx, cy)?;
    ctx.rotate(lens.current_angle.to_radians())?;

    // Body: polygon with the circular aperture punched out.
    let gradient = ctx.create_radial_gradient(0.0, 0.0, inner, 0.0, 0.0, outer)?;
    gradient.add_color_stop(0.0, &telescope.body_gradient[0])?;
    gradient.add_color_stop(1.0, &telescope.body_gradient[1])?;
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.begin_path();
    polygon_path(ctx, outer, sides);
    ctx.arc(0.0, 0.0, inner, 0.0, TAU)?;
    ctx.fill_with_canvas_winding_rule(web_sys::CanvasWindingRule::Evenodd);

    // Rim.
    ctx.set_stroke_style_str(&telescope.rim_color);
    ctx.set_line_width(telescope.rim_width);
    ctx.begin_path();
    polygon_path(ctx, outer, sides);
    ctx.stroke();
    ctx.begin_path();
    ctx.arc(0.0, 0.0, inner, 0.0, TAU)?;
    ctx.stroke();

    // Face numbers, one per side, turning with the body.
    ctx.set_fill_style_str(&telescope.number_color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{:.0}px serif", telescope.number_font_size));
    let label_radius = outer - telescope.number_padding;
    for i in 0..sides {
        let angle = face_angle(i, sides);
        let x = label_radius * angle.cos();
        let y = label_radius * angle.sin();
        ctx.fill_text(&(i + 1).to_string(), x, y)?;
    }

    ctx.restore();
    Ok(())
}

/// Trace a regular polygon of the given circumradius, one vertex between
/// each pair of face centers so face 1 is flat-side-up at rotation zero.
fn polygon_path(ctx: &CanvasRenderingContext2d, radius: f64, sides: u32) {
    let step = TAU / f64::from(sides);
    for i in 0..sides {
        let angle = face_angle(i, sides) + step * 0.5;
        let px = radius * angle.cos();
        let py = radius * angle.sin();
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.close_path();
}

/// Body-local angle of the center of the 0-based face index.
fn face_angle(index: u32, sides: u32) -> f64 {
    -PI / 2.0 + TAU * f64::from(index) / f64::from(sides)
}
