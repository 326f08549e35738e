//! Static configuration: tunables, the lens table, and fail-fast validation.
//!
//! `Config` is an immutable value constructed once and passed explicitly into
//! every constructor that needs it — there is no ambient global. Hosts may
//! deserialize a `Config` from JSON or start from [`Config::default`], which
//! mirrors the built-in five-lens puzzle. [`Config::validate`] rejects
//! invariant violations (zero sides, empty lens table, out-of-range faces,
//! non-finite rates) before any simulation state exists, so the per-frame
//! path never has to re-check them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors detected when validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The telescope polygon needs at least three faces.
    #[error("telescope.sides must be at least 3, got {0}")]
    BadSides(u32),
    /// A star field with no stars cannot reveal anything.
    #[error("stars.count must be nonzero")]
    NoStars,
    /// The lens table is empty.
    #[error("at least one lens must be configured")]
    NoLenses,
    /// A lens points at a face the polygon does not have.
    #[error("lens `{name}`: target_face {face} outside 1..={sides}")]
    BadTargetFace { name: String, face: u32, sides: u32 },
    /// A numeric tunable is zero, negative, or non-finite where it must not be.
    #[error("{field} must be positive and finite, got {value}")]
    BadNumber { field: &'static str, value: f64 },
    /// A numeric tunable lies outside its required interval.
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },
    /// The star shape palette is empty.
    #[error("stars.shapes must list at least one shape")]
    NoShapes,
}

/// Visual shape a star is rasterized as. Fixed per star at field creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarShape {
    /// Plain filled disc.
    Circle,
    /// Eight-point sparkle.
    Sparkle,
    /// Four-point diamond.
    Diamond,
    /// Regular hexagon.
    Hexagon,
}

/// Twinkle timing and amplitude tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinkleConfig {
    /// Slowest per-star twinkle angular speed (radians per millisecond).
    pub min: f64,
    /// Fastest per-star twinkle angular speed.
    pub max: f64,
    /// Twinkle modulation amplitude.
    pub factor_a: f64,
    /// Twinkle modulation floor.
    pub factor_b: f64,
}

/// Star field tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarConfig {
    /// Number of stars in the field.
    pub count: usize,
    /// Smallest star radius in pixels.
    pub min_size: f64,
    /// Largest star radius in pixels.
    pub max_size: f64,
    /// Fraction of stars assigned to a lens; the rest only ever drift.
    pub group_percentage: f64,
    /// Twinkle tunables.
    pub twinkle: TwinkleConfig,
    /// Angular distance (degrees) at which accuracy reaches zero.
    pub discovery_range: f64,
    /// Shape palette stars are drawn from at creation.
    pub shapes: Vec<StarShape>,
    /// Tint for stars not belonging to the active lens.
    pub unsolved_color: String,
    /// Glyph raster-to-local scale as a fraction of the field radius per pixel.
    pub symbol_sampling_scale: f64,
    /// Pixel stride of the glyph raster scan.
    pub symbol_sampling_density: u32,
    /// Exponential smoothing rate pulling a star toward its target.
    pub snap_lerp: f64,
    /// Maximum random drift step per frame while a lens rotates.
    pub movement_strength: f64,
    /// Additive glow strength once accuracy passes the threshold.
    pub glow_intensity: f64,
    /// Accuracy above which active-lens stars gain a glow halo.
    pub glow_threshold: f64,
    /// Glow halo radius as a multiple of star size.
    pub glow_size_factor: f64,
}

/// Lens rotation tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Angular distance (degrees) within which a lens counts as solved.
    pub snap_tolerance: f64,
    /// Per-frame relaxation fraction of the remaining signed delta.
    pub lerp_speed: f64,
}

/// Telescope body geometry and trim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelescopeConfig {
    /// Number of polygon faces; the face step is `360 / sides` degrees.
    pub sides: u32,
    /// Aperture (star field) radius as a fraction of the short viewport side.
    pub inner_radius_factor: f64,
    /// Outer polygon radius as a fraction of the short viewport side.
    pub outer_radius_factor: f64,
    /// Rim stroke width in pixels.
    pub rim_width: f64,
    /// Rim stroke color.
    pub rim_color: String,
    /// Radial body gradient, inner then outer stop.
    pub body_gradient: [String; 2],
    /// Face number color.
    pub number_color: String,
    /// Face number font size in pixels.
    pub number_font_size: f64,
    /// Inset of the face numbers from the outer rim, in pixels.
    pub number_padding: f64,
}

/// Nebula backdrop tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NebulaConfig {
    /// Gradient blobs generated per lens.
    pub blobs_per_lens: usize,
    /// Minimum blob radius factor (of the 400px base radius).
    pub min_radius_factor: f64,
    /// Maximum blob radius factor.
    pub max_radius_factor: f64,
    /// Blob fill opacity.
    pub opacity: f64,
    /// Fraction of the lens angle the nebula rotates by.
    pub drift_factor: f64,
    /// Breathing oscillation speed (radians per millisecond).
    pub breathing_speed: f64,
    /// Breathing radius amplitude in pixels.
    pub breathing_intensity: f64,
}

/// Normalized constellation skeleton: points in `[0,1]²` plus index-pair
/// edges. Used by the map overlay and the deterministic glyph fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skeleton {
    /// Normalized star positions.
    pub points: Vec<[f64; 2]>,
    /// Pairs of indices into `points` forming the constellation lines.
    pub lines: Vec<[usize; 2]>,
}

/// Static definition of one lens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensSpec {
    /// Display name shown in the side panel.
    pub name: String,
    /// The face (1-based) that must point up for this lens to be solved.
    pub target_face: u32,
    /// Glyph character revealed by this lens.
    pub symbol: String,
    /// Accent color for panel rows and map highlights.
    pub color: String,
    /// Name of the constellation revealed on the map.
    pub constellation_name: String,
    /// Gradient colors for this lens's nebula blobs.
    pub nebula_colors: Vec<String>,
    /// Constellation skeleton for the map overlay.
    pub skeleton: Skeleton,
}

/// Complete immutable configuration for the puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Star field tunables.
    pub stars: StarConfig,
    /// Lens rotation tunables.
    pub rotation: RotationConfig,
    /// Telescope body tunables.
    pub telescope: TelescopeConfig,
    /// Nebula backdrop tunables.
    pub nebula: NebulaConfig,
    /// The lens table.
    pub lenses: Vec<LensSpec>,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 1800,
            min_size: 0.6,
            max_size: 1.8,
            group_percentage: 1.0,
            twinkle: TwinkleConfig {
                min: 0.0008,
                max: 0.0012,
                factor_a: 0.4,
                factor_b: 0.6,
            },
            discovery_range: 360.0,
            shapes: vec![
                StarShape::Circle,
                StarShape::Sparkle,
                StarShape::Diamond,
                StarShape::Hexagon,
            ],
            unsolved_color: "#eef2ff".to_owned(),
            symbol_sampling_scale: 0.008,
            symbol_sampling_density: 4,
            snap_lerp: 0.15,
            movement_strength: 3.0,
            glow_intensity: 2.5,
            glow_threshold: 0.8,
            glow_size_factor: 8.0,
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { snap_tolerance: 3.0, lerp_speed: 0.08 }
    }
}

impl Default for TelescopeConfig {
    fn default() -> Self {
        Self {
            sides: 9,
            inner_radius_factor: 0.32,
            outer_radius_factor: 0.46,
            rim_width: 3.0,
            rim_color: "#c7a15a".to_owned(),
            body_gradient: ["#2a1b10".to_owned(), "#0a0805".to_owned()],
            number_color: "#d4b46f".to_owned(),
            number_font_size: 14.0,
            number_padding: 22.0,
        }
    }
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            blobs_per_lens: 16,
            min_radius_factor: 0.4,
            max_radius_factor: 0.6,
            opacity: 0.15,
            drift_factor: 0.05,
            breathing_speed: 0.001,
            breathing_intensity: 30.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stars: StarConfig::default(),
            rotation: RotationConfig::default(),
            telescope: TelescopeConfig::default(),
            nebula: NebulaConfig::default(),
            lenses: builtin_lenses(),
        }
    }
}

impl Config {
    /// The face step in degrees between adjacent discrete rotations.
    #[must_use]
    pub fn face_step(&self) -> f64 {
        360.0 / f64::from(self.telescope.sides)
    }

    /// Check every invariant the data model relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violation found; see [`ConfigError`] variants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telescope.sides < 3 {
            return Err(ConfigError::BadSides(self.telescope.sides));
        }
        if self.stars.count == 0 {
            return Err(ConfigError::NoStars);
        }
        if self.lenses.is_empty() {
            return Err(ConfigError::NoLenses);
        }
        if self.stars.shapes.is_empty() {
            return Err(ConfigError::NoShapes);
        }
        for lens in &self.lenses {
            if lens.target_face == 0 || lens.target_face > self.telescope.sides {
                return Err(ConfigError::BadTargetFace {
                    name: lens.name.clone(),
                    face: lens.target_face,
                    sides: self.telescope.sides,
                });
            }
        }

        positive_finite("telescope.inner_radius_factor", self.telescope.inner_radius_factor)?;
        positive_finite("telescope.outer_radius_factor", self.telescope.outer_radius_factor)?;
        positive_finite("rotation.snap_tolerance", self.rotation.snap_tolerance)?;
        positive_finite("stars.discovery_range", self.stars.discovery_range)?;
        positive_finite("stars.min_size", self.stars.min_size)?;
        positive_finite("stars.max_size", self.stars.max_size)?;
        positive_finite("stars.symbol_sampling_scale", self.stars.symbol_sampling_scale)?;
        positive_finite("stars.movement_strength", self.stars.movement_strength)?;
        positive_finite("nebula.min_radius_factor", self.nebula.min_radius_factor)?;
        positive_finite("nebula.max_radius_factor", self.nebula.max_radius_factor)?;
        positive_finite(
            "stars.symbol_sampling_density",
            f64::from(self.stars.symbol_sampling_density),
        )?;

        within("rotation.lerp_speed", self.rotation.lerp_speed, 0.0, 1.0)?;
        within("stars.snap_lerp", self.stars.snap_lerp, 0.0, 1.0)?;
        within("stars.group_percentage", self.stars.group_percentage, 0.0, 1.0)?;
        within("stars.glow_threshold", self.stars.glow_threshold, 0.0, 1.0)?;

        if self.stars.max_size < self.stars.min_size {
            return Err(ConfigError::OutOfRange {
                field: "stars.max_size",
                value: self.stars.max_size,
                min: self.stars.min_size,
                max: f64::INFINITY,
            });
        }
        if self.stars.twinkle.max < self.stars.twinkle.min {
            return Err(ConfigError::OutOfRange {
                field: "stars.twinkle.max",
                value: self.stars.twinkle.max,
                min: self.stars.twinkle.min,
                max: f64::INFINITY,
            });
        }
        if self.nebula.max_radius_factor < self.nebula.min_radius_factor {
            return Err(ConfigError::OutOfRange {
                field: "nebula.max_radius_factor",
                value: self.nebula.max_radius_factor,
                min: self.nebula.min_radius_factor,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

fn positive_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::BadNumber { field, value })
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// The built-in five-lens puzzle table.
#[must_use]
pub fn builtin_lenses() -> Vec<LensSpec> {
    vec![
        LensSpec {
            name: "Navy".to_owned(),
            target_face: 4,
            symbol: "A".to_owned(),
            color: "#3282ff".to_owned(),
            constellation_name: "Iso".to_owned(),
            nebula_colors: vec!["#001f3f".to_owned(), "#0074d9".to_owned(), "#7fdbff".to_owned()],
            skeleton: Skeleton {
                points: vec![
                    [0.51, 0.48],
                    [0.35, 0.16],
                    [0.71, 0.47],
                    [0.27, 0.47],
                    [0.37, 0.79],
                    [0.69, 0.77],
                ],
                lines: vec![[0, 1], [0, 2], [0, 3], [0, 4], [0, 5]],
            },
        },
        LensSpec {
            name: "Orange".to_owned(),
            target_face: 1,
            symbol: "B".to_owned(),
            color: "#ff851b".to_owned(),
            constellation_name: "Uolmar".to_owned(),
            nebula_colors: vec!["#ff4136".to_owned(), "#ff851b".to_owned(), "#ffdc00".to_owned()],
            skeleton: Skeleton {
                points: vec![
                    [0.51, 0.05],
                    [0.51, 0.21],
                    [0.70, 0.44],
                    [0.32, 0.44],
                    [0.51, 0.70],
                    [0.51, 0.95],
                ],
                lines: vec![[0, 1], [1, 2], [1, 3], [2, 4], [3, 4], [4, 5]],
            },
        },
        LensSpec {
            name: "White".to_owned(),
            target_face: 8,
            symbol: "C".to_owned(),
            color: "#ffffff".to_owned(),
            constellation_name: "Aneat".to_owned(),
            nebula_colors: vec!["#dddddd".to_owned(), "#aaaaaa".to_owned(), "#ffffff".to_owned()],
            skeleton: Skeleton {
                points: vec![
                    [0.75, 0.55],
                    [0.72, 0.70],
                    [0.52, 0.95],
                    [0.25, 0.61],
                    [0.36, 0.40],
                    [0.55, 0.25],
                    [0.50, 0.10],
                    [0.53, 0.44],
                    [0.49, 0.56],
                    [0.52, 0.66],
                ],
                lines: vec![
                    [0, 1],
                    [1, 2],
                    [2, 3],
                    [3, 4],
                    [4, 5],
                    [5, 6],
                    [5, 7],
                    [7, 8],
                    [8, 9],
                ],
            },
        },
        LensSpec {
            name: "Red".to_owned(),
            target_face: 5,
            symbol: "I".to_owned(),
            color: "#ff4136".to_owned(),
            constellation_name: "Onisix".to_owned(),
            nebula_colors: vec!["#85144b".to_owned(), "#ff4136".to_owned(), "#3d9970".to_owned()],
            skeleton: Skeleton {
                points: vec![
                    [0.72, 0.05],
                    [0.47, 0.10],
                    [0.25, 0.33],
                    [0.20, 0.58],
                    [0.42, 0.90],
                    [0.65, 0.92],
                    [0.83, 0.64],
                    [0.72, 0.44],
                    [0.56, 0.42],
                    [0.47, 0.50],
                ],
                lines: vec![
                    [0, 1],
                    [1, 2],
                    [2, 3],
                    [3, 4],
                    [4, 5],
                    [5, 6],
                    [6, 7],
                    [7, 8],
                    [8, 9],
                ],
            },
        },
        LensSpec {
            name: "Cyan".to_owned(),
            target_face: 2,
            symbol: "G".to_owned(),
            color: "#7fdbff".to_owned(),
            constellation_name: "Elth".to_owned(),
            nebula_colors: vec!["#39cccc".to_owned(), "#2ecc40".to_owned(), "#01ff70".to_owned()],
            skeleton: Skeleton {
                points: vec![
                    [0.62, 0.92],
                    [0.42, 0.95],
                    [0.35, 0.75],
                    [0.45, 0.59],
                    [0.59, 0.52],
                    [0.75, 0.25],
                    [0.51, 0.07],
                    [0.30, 0.16],
                    [0.24, 0.36],
                    [0.40, 0.47],
                ],
                lines: vec![
                    [0, 1],
                    [1, 2],
                    [2, 3],
                    [3, 4],
                    [4, 5],
                    [5, 6],
                    [6, 7],
                    [7, 8],
                    [8, 9],
                    [9, 4],
                ],
            },
        },
    ]
}
