//! Constellation map overlay.
//!
//! A translucent chart drawn over the whole scene while toggled on: one
//! cell per lens, each showing its constellation skeleton. Solved lenses
//! draw in their accent color with the constellation name beneath; unsolved
//! ones stay a dim anonymous gray. Once the whole puzzle is solved every
//! name is underlined as the completion cue.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::sim::{FrameSnapshot, LensFrame};

/// Chart background fill.
const CHART_FILL: &str = "rgba(2, 4, 12, 0.85)";

/// Skeleton color for a lens that is not yet solved.
const UNSOLVED_COLOR: &str = "#3a4156";

/// Label color for a lens whose name is still hidden.
const HIDDEN_NAME: &str = "???";

/// Fraction of each cell left as margin around the skeleton.
const CELL_MARGIN: f64 = 0.18;

/// Dash segment length for the skeleton lines, in pixels.
const DASH_PX: f64 = 5.0;

/// Skeleton point dot radius in pixels.
const POINT_RADIUS: f64 = 2.5;

/// Name label font size in pixels.
const NAME_FONT_SIZE: f64 = 16.0;

/// Draw the map overlay across the whole viewport.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_overlay(ctx: &CanvasRenderingContext2d, frame: &FrameSnapshot) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(CHART_FILL);
    ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

    let count = frame.lenses.len();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cols = (count as f64).sqrt().ceil().max(1.0) as usize;
    let rows = count.div_ceil(cols);
    #[allow(clippy::cast_precision_loss)]
    let cell_w = frame.width / cols as f64;
    #[allow(clippy::cast_precision_loss)]
    let cell_h = frame.height / rows.max(1) as f64;

    for (i, lens) in frame.lenses.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = (i % cols) as f64 * cell_w;
        #[allow(clippy::cast_precision_loss)]
        let y = (i / cols) as f64 * cell_h;
        draw_constellation(ctx, lens, x, y, cell_w, cell_h, frame.is_solved)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_constellation(
    ctx: &CanvasRenderingContext2d,
    lens: &LensFrame,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    all_solved: bool,
) -> Result<(), JsValue> {
    let margin = w.min(h) * CELL_MARGIN;
    let extent = (w.min(h) - 2.0 * margin).max(1.0);
    let left = x + (w - extent) * 0.5;
    let top = y + (h - extent) * 0.5;
    let color = if lens.solved { lens.color.as_str() } else { UNSOLVED_COLOR };

    let project = |p: &[f64; 2]| (left + p[0] * extent, top + p[1] * extent);

    // Lines first, dashed, so the point dots sit on top.
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(1.0);
    let dash = js_sys::Array::new();
    dash.push(&DASH_PX.into());
    dash.push(&DASH_PX.into());
    ctx.set_line_dash(&dash)?;
    ctx.begin_path();
    for pair in &lens.skeleton.lines {
        let (Some(a), Some(b)) = (lens.skeleton.points.get(pair[0]), lens.skeleton.points.get(pair[1]))
        else {
            continue;
        };
        let (ax, ay) = project(a);
        let (bx, by) = project(b);
        ctx.move_to(ax, ay);
        ctx.line_to(bx, by);
    }
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.set_fill_style_str(color);
    for p in &lens.skeleton.points {
        let (px, py) = project(p);
        ctx.begin_path();
        ctx.arc(px, py, POINT_RADIUS, 0.0, TAU)?;
        ctx.fill();
    }

    // Name label, revealed only once the lens is solved.
    let label = if lens.solved { lens.constellation_name.as_str() } else { HIDDEN_NAME };
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    ctx.set_font(&format!("{NAME_FONT_SIZE:.0}px serif"));
    let label_x = x + w * 0.5;
    let label_y = top + extent + margin * 0.4;
    ctx.fill_text(label, label_x, label_y)?;

    if all_solved {
        let half_width = ctx.measure_text(label)?.width() * 0.5;
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(label_x - half_width, label_y + NAME_FONT_SIZE + 3.0);
        ctx.line_to(label_x + half_width, label_y + NAME_FONT_SIZE + 3.0);
        ctx.stroke();
    }

    Ok(())
}
