#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// shortest_distance
// =============================================================

#[test]
fn distance_to_self_is_zero() {
    assert_eq!(shortest_distance(42.0, 42.0), 0.0);
    assert_eq!(shortest_distance(0.0, 0.0), 0.0);
}

#[test]
fn distance_ignores_full_turns() {
    assert!(approx_eq(shortest_distance(10.0, 370.0), 0.0));
    assert!(approx_eq(shortest_distance(-350.0, 10.0), 0.0));
    assert!(approx_eq(shortest_distance(5.0, 5.0 + 720.0), 0.0));
}

#[test]
fn distance_is_symmetric() {
    let pairs = [
        (0.0, 90.0),
        (10.0, 350.0),
        (-720.5, 123.4),
        (359.0, 1.0),
        (180.0, -180.0),
    ];
    for (a, b) in pairs {
        assert!(approx_eq(shortest_distance(a, b), shortest_distance(b, a)));
    }
}

#[test]
fn distance_folds_past_half_turn() {
    assert!(approx_eq(shortest_distance(0.0, 190.0), 170.0));
    assert!(approx_eq(shortest_distance(10.0, 350.0), 20.0));
}

#[test]
fn distance_stays_in_range() {
    let mut a = -1000.0;
    while a < 1000.0 {
        let mut b = -1000.0;
        while b < 1000.0 {
            let d = shortest_distance(a, b);
            assert!((0.0..=180.0).contains(&d), "distance({a}, {b}) = {d}");
            b += 73.3;
        }
        a += 61.7;
    }
}

#[test]
fn distance_at_exactly_half_turn() {
    assert!(approx_eq(shortest_distance(0.0, 180.0), 180.0));
}

// =============================================================
// signed_delta
// =============================================================

#[test]
fn delta_zero_when_aligned() {
    assert!(approx_eq(signed_delta(90.0, 90.0), 0.0));
    assert!(approx_eq(signed_delta(0.0, 360.0), 0.0));
}

#[test]
fn delta_takes_shorter_arc() {
    assert!(approx_eq(signed_delta(350.0, 10.0), 20.0));
    assert!(approx_eq(signed_delta(10.0, 350.0), -20.0));
}

#[test]
fn delta_magnitude_matches_distance() {
    let pairs = [(0.0, 90.0), (350.0, 10.0), (-40.0, 120.0), (715.0, 5.0)];
    for (from, to) in pairs {
        assert!(approx_eq(signed_delta(from, to).abs(), shortest_distance(from, to)));
    }
}

#[test]
fn delta_defined_for_large_separations() {
    // A fast scroll can push target hundreds of degrees past current.
    let d = signed_delta(0.0, 1000.0);
    assert!((-180.0..=180.0).contains(&d));
    assert!(approx_eq(d.abs(), shortest_distance(0.0, 1000.0)));

    let d = signed_delta(0.0, -1000.0);
    assert!((-180.0..=180.0).contains(&d));
}

// =============================================================
// lerp
// =============================================================

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
}

#[test]
fn lerp_midpoint() {
    assert!(approx_eq(lerp(0.0, 10.0, 0.5), 5.0));
    assert!(approx_eq(lerp(-4.0, 4.0, 0.5), 0.0));
}

#[test]
fn lerp_does_not_clamp() {
    assert!(approx_eq(lerp(0.0, 10.0, 1.5), 15.0));
    assert!(approx_eq(lerp(0.0, 10.0, -0.5), -5.0));
}
