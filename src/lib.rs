//! Star-field telescope puzzle engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the full lifecycle of the puzzle canvas: a drifting star field inside a
//! telescope aperture, five rotatable lenses each hiding a symbol, and the
//! convergence effect that pulls stars onto the symbol as a lens approaches
//! its correct orientation. The host JavaScript layer is responsible only
//! for wiring DOM events to [`engine::Engine`] and driving its `tick` from
//! `requestAnimationFrame`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser-facing engine shell and the canvas glyph sampler |
//! | [`sim`] | Testable simulation core and per-frame snapshots |
//! | [`lens`] | Lens rotation state, accuracy, and solved predicates |
//! | [`starfield`] | Star particles: drift, containment, glyph convergence |
//! | [`glyph`] | Glyph sampling trait and the deterministic skeleton sampler |
//! | [`config`] | Tunables, the lens table, and validation |
//! | [`input`] | Raw DOM input to simulation event mapping |
//! | [`ui`] | Side-panel view model |
//! | [`render`] | Scene rendering |
//! | [`map`] | Constellation map overlay rendering |
//! | [`angle`] | Degree arithmetic on the circle |
//! | [`consts`] | Shared numeric constants |

use wasm_bindgen::prelude::wasm_bindgen;

pub mod angle;
pub mod config;
pub mod consts;
pub mod engine;
pub mod glyph;
pub mod input;
pub mod lens;
pub mod map;
pub mod render;
pub mod sim;
pub mod starfield;
pub mod ui;

/// Module entry point: installs the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("starglass {}", env!("CARGO_PKG_VERSION"));
    }
}
