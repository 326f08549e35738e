//! Shared numeric constants for the starglass crate.

// ── Angles ──────────────────────────────────────────────────────

/// Full turn in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Half turn in degrees; the fold point for shortest-distance math.
pub const HALF_TURN_DEG: f64 = 180.0;

// ── Star field ──────────────────────────────────────────────────

/// Rotation velocity (degrees of remaining travel) that counts as
/// full-strength drift agitation.
pub const MOVEMENT_FULL_SCALE_DEG: f64 = 5.0;

/// Drift agitation below this level is treated as a lens at rest.
pub const MOVEMENT_EPSILON: f64 = 0.01;

/// Size boost applied to active-lens stars at accuracy 1.0.
pub const ACTIVE_SIZE_BOOST: f64 = 0.8;

/// Alpha floor for a star before twinkle modulation.
pub const BASE_STAR_ALPHA: f64 = 0.5;

/// Fill color for stars of the active lens.
pub const ACTIVE_STAR_COLOR: &str = "#ffffff";

// ── Glyph sampling ──────────────────────────────────────────────

/// Side length in pixels of the offscreen rasterization canvas.
pub const GLYPH_RASTER_SIZE: u32 = 300;

/// Alpha channel threshold above which a rasterized pixel becomes a
/// glyph sample point.
pub const GLYPH_ALPHA_THRESHOLD: u8 = 128;

/// Half-extent of glyph-local coordinates as a fraction of the field
/// radius. Matches the raster pipeline: a 300px canvas scaled by
/// `radius * symbol_sampling_scale` spans ±1.2 radii edge to edge.
pub const GLYPH_LOCAL_EXTENT: f64 = 1.2;
