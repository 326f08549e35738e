#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::config::Config;

const RADIUS: f64 = 200.0;

// =============================================================
// Helpers
// =============================================================

fn make_field(seed: u64) -> (StarField, StarConfig, StdRng) {
    let cfg = Config::default().stars;
    let mut rng = StdRng::seed_from_u64(seed);
    let field = StarField::new(&cfg, RADIUS, 5, &mut rng);
    (field, cfg, rng)
}

fn glyph_cloud() -> Vec<GlyphPoint> {
    vec![
        GlyphPoint { x: 10.0, y: 0.0 },
        GlyphPoint { x: 0.0, y: 10.0 },
        GlyphPoint { x: -10.0, y: 0.0 },
    ]
}

fn containment_ok(field: &StarField) -> bool {
    field.stars().iter().all(|s| {
        (s.origin_x + s.drift_x).hypot(s.origin_y + s.drift_y) <= field.radius() + 1e-9
    })
}

// =============================================================
// Creation
// =============================================================

#[test]
fn creates_exactly_count_stars() {
    let (field, cfg, _) = make_field(1);
    assert_eq!(field.len(), cfg.count);
    assert!(!field.is_empty());
}

#[test]
fn origins_lie_within_the_disc() {
    let (field, _, _) = make_field(2);
    for s in field.stars() {
        assert!(s.origin_x.hypot(s.origin_y) <= RADIUS + 1e-9);
    }
}

#[test]
fn new_stars_start_at_their_origin_with_no_drift() {
    let (field, _, _) = make_field(3);
    for s in field.stars() {
        assert_eq!(s.drift_x, 0.0);
        assert_eq!(s.drift_y, 0.0);
        assert_eq!(s.curr_x, s.origin_x);
        assert_eq!(s.curr_y, s.origin_y);
    }
}

#[test]
fn full_grouping_assigns_every_star_round_robin() {
    let (field, _, _) = make_field(4);
    for (i, s) in field.stars().iter().enumerate() {
        assert_eq!(s.lens_index, Some(i % 5));
    }
}

#[test]
fn zero_grouping_leaves_every_star_unassigned() {
    let mut cfg = Config::default().stars;
    cfg.group_percentage = 0.0;
    let mut rng = StdRng::seed_from_u64(5);
    let field = StarField::new(&cfg, RADIUS, 5, &mut rng);
    assert!(field.stars().iter().all(|s| s.lens_index.is_none()));
}

#[test]
fn sizes_and_twinkle_respect_configured_ranges() {
    let (field, cfg, _) = make_field(6);
    for s in field.stars() {
        assert!((cfg.min_size..=cfg.max_size).contains(&s.size));
        assert!((cfg.twinkle.min..=cfg.twinkle.max).contains(&s.twinkle_speed));
    }
}

#[test]
fn empty_shape_palette_falls_back_to_circles() {
    let mut cfg = Config::default().stars;
    cfg.shapes.clear();
    let mut rng = StdRng::seed_from_u64(18);
    let field = StarField::new(&cfg, RADIUS, 5, &mut rng);
    assert_eq!(field.len(), cfg.count);
    assert!(field.stars().iter().all(|s| s.shape == StarShape::Circle));
}

#[test]
fn creation_is_seed_deterministic() {
    let (a, _, _) = make_field(7);
    let (b, _, _) = make_field(7);
    for (sa, sb) in a.stars().iter().zip(b.stars()) {
        assert_eq!(sa.origin_x, sb.origin_x);
        assert_eq!(sa.origin_y, sb.origin_y);
        assert_eq!(sa.size, sb.size);
        assert_eq!(sa.shape, sb.shape);
    }
}

// =============================================================
// Drift and containment
// =============================================================

#[test]
fn idle_lens_leaves_drift_untouched() {
    let (mut field, cfg, mut rng) = make_field(8);
    let glyph = glyph_cloud();
    for _ in 0..50 {
        field.update(0, 0.0, 0.0, &glyph, &cfg, &mut rng);
    }
    for s in field.stars() {
        assert_eq!(s.drift_x, 0.0);
        assert_eq!(s.drift_y, 0.0);
    }
}

#[test]
fn rotation_agitates_drift() {
    let (mut field, cfg, mut rng) = make_field(9);
    let glyph = glyph_cloud();
    for _ in 0..10 {
        field.update(0, 0.0, 1.0, &glyph, &cfg, &mut rng);
    }
    let moved = field
        .stars()
        .iter()
        .filter(|s| s.drift_x != 0.0 || s.drift_y != 0.0)
        .count();
    assert!(moved > field.len() / 2, "only {moved} stars drifted");
}

#[test]
fn containment_holds_under_sustained_agitation() {
    let (mut field, mut cfg, mut rng) = make_field(10);
    // Exaggerate the walk so stars would escape without the clamp.
    cfg.movement_strength = 50.0;
    let glyph = glyph_cloud();
    for _ in 0..300 {
        field.update(0, 0.0, 1.0, &glyph, &cfg, &mut rng);
        assert!(containment_ok(&field));
    }
}

#[test]
fn movement_below_epsilon_is_treated_as_rest() {
    let (mut field, cfg, mut rng) = make_field(11);
    let glyph = glyph_cloud();
    field.update(0, 0.0, 0.009, &glyph, &cfg, &mut rng);
    for s in field.stars() {
        assert_eq!(s.drift_x, 0.0);
    }
}

// =============================================================
// Glyph convergence
// =============================================================

#[test]
fn full_accuracy_pulls_active_stars_onto_glyph_points() {
    let (mut field, cfg, mut rng) = make_field(12);
    let glyph = glyph_cloud();
    for _ in 0..400 {
        field.update(0, 1.0, 0.0, &glyph, &cfg, &mut rng);
    }
    for (i, s) in field.stars().iter().enumerate() {
        if s.lens_index == Some(0) {
            let p = glyph[i % glyph.len()];
            assert!((s.curr_x - p.x).abs() < 1e-3, "star {i} x: {}", s.curr_x);
            assert!((s.curr_y - p.y).abs() < 1e-3, "star {i} y: {}", s.curr_y);
        }
    }
}

#[test]
fn inactive_lens_stars_hold_their_base() {
    let (mut field, cfg, mut rng) = make_field(13);
    let glyph = glyph_cloud();
    for _ in 0..100 {
        field.update(0, 1.0, 0.0, &glyph, &cfg, &mut rng);
    }
    for s in field.stars() {
        if s.lens_index != Some(0) {
            assert!((s.curr_x - s.origin_x).abs() < 1e-6);
            assert!((s.curr_y - s.origin_y).abs() < 1e-6);
        }
    }
}

#[test]
fn zero_accuracy_never_snaps() {
    let (mut field, cfg, mut rng) = make_field(14);
    let glyph = glyph_cloud();
    for _ in 0..100 {
        field.update(0, 0.0, 0.0, &glyph, &cfg, &mut rng);
    }
    for s in field.stars() {
        assert_eq!(s.curr_x, s.origin_x);
        assert_eq!(s.curr_y, s.origin_y);
    }
}

#[test]
fn empty_glyph_cloud_degrades_to_drift() {
    let (mut field, cfg, mut rng) = make_field(15);
    for _ in 0..100 {
        field.update(0, 1.0, 0.0, &[], &cfg, &mut rng);
    }
    for s in field.stars() {
        assert_eq!(s.curr_x, s.origin_x);
        assert_eq!(s.curr_y, s.origin_y);
    }
}

#[test]
fn glyph_point_mapping_is_stable_across_frames() {
    let glyph = glyph_cloud();
    let (mut field, cfg, mut rng) = make_field(16);
    // Converge, agitate, converge again: each active star must return to
    // the same glyph point both times.
    for _ in 0..400 {
        field.update(0, 1.0, 0.0, &glyph, &cfg, &mut rng);
    }
    let first: Vec<(f64, f64)> = field.stars().iter().map(|s| (s.curr_x, s.curr_y)).collect();

    for _ in 0..50 {
        field.update(0, 0.0, 1.0, &glyph, &cfg, &mut rng);
    }
    for _ in 0..600 {
        field.update(0, 1.0, 0.0, &glyph, &cfg, &mut rng);
    }
    for (i, s) in field.stars().iter().enumerate() {
        if s.lens_index == Some(0) {
            assert!((s.curr_x - first[i].0).abs() < 1e-3);
            assert!((s.curr_y - first[i].1).abs() < 1e-3);
        }
    }
}

#[test]
fn partial_accuracy_lands_between_base_and_glyph() {
    let mut cfg = Config::default().stars;
    cfg.count = 5;
    let mut rng = StdRng::seed_from_u64(17);
    let mut field = StarField::new(&cfg, RADIUS, 5, &mut rng);
    let glyph = vec![GlyphPoint { x: 100.0, y: 100.0 }];

    for _ in 0..400 {
        field.update(0, 0.5, 0.0, &glyph, &cfg, &mut rng);
    }
    let s = &field.stars()[0];
    assert_eq!(s.lens_index, Some(0));
    let expect_x = crate::angle::lerp(s.origin_x, 100.0, 0.5);
    let expect_y = crate::angle::lerp(s.origin_y, 100.0, 0.5);
    assert!((s.curr_x - expect_x).abs() < 1e-3);
    assert!((s.curr_y - expect_y).abs() < 1e-3);
}
