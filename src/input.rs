//! Input mapping: raw host gestures to simulation events.
//!
//! The WASM shell forwards DOM keyboard and wheel data here as plain values;
//! the mapping itself has no browser dependencies. Unrecognized input maps
//! to `None` and is dropped silently.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// One simulation-facing input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Rotate the active lens one face step; `+1` clockwise, `-1` counter.
    Rotate(i32),
    /// Activate the lens in the given 0-based side-panel slot.
    SelectSlot(usize),
    /// Show or hide the constellation map overlay.
    ToggleMap,
    /// The viewport changed size.
    Resize {
        /// New width in pixels.
        width: f64,
        /// New height in pixels.
        height: f64,
    },
}

/// Map a DOM `KeyboardEvent.key` value to an event.
///
/// Digits `1..=lens_count` select side-panel slots, the arrow keys rotate,
/// and `m` toggles the map. Everything else is ignored.
#[must_use]
pub fn map_key(key: &str, lens_count: usize) -> Option<Event> {
    match key {
        "ArrowLeft" => Some(Event::Rotate(-1)),
        "ArrowRight" => Some(Event::Rotate(1)),
        "m" | "M" => Some(Event::ToggleMap),
        _ => match key.parse::<usize>() {
            Ok(digit) if key.len() == 1 && (1..=lens_count).contains(&digit) => {
                Some(Event::SelectSlot(digit - 1))
            }
            _ => None,
        },
    }
}

/// Map a DOM `WheelEvent.deltaY` value to a rotation. Scrolling down
/// rotates clockwise. Zero or non-finite deltas are ignored.
#[must_use]
pub fn map_wheel(delta_y: f64) -> Option<Event> {
    if !delta_y.is_finite() || delta_y == 0.0 {
        return None;
    }
    Some(Event::Rotate(if delta_y > 0.0 { 1 } else { -1 }))
}
