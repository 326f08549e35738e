use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::config::Config;
use crate::glyph::SkeletonSampler;

fn make_core(seed: u64) -> SimCore {
    let mut sampler = SkeletonSampler::default();
    SimCore::new(Config::default(), 800.0, 600.0, &mut sampler, StdRng::seed_from_u64(seed))
        .unwrap()
}

#[test]
fn rows_follow_the_menu_order() {
    let core = make_core(1);
    let rows = status_rows(&core);
    assert_eq!(rows.len(), core.lenses().len());
    for (row, &index) in rows.iter().zip(core.menu_order()) {
        assert_eq!(row.name, core.lenses()[index].name);
        assert_eq!(row.color, core.lenses()[index].color);
    }
}

#[test]
fn exactly_one_row_is_active() {
    let mut core = make_core(2);
    core.select_slot(3);
    let rows = status_rows(&core);
    let active: Vec<usize> =
        rows.iter().enumerate().filter(|(_, r)| r.active).map(|(i, _)| i).collect();
    assert_eq!(active, vec![3]);
}

#[test]
fn rows_start_on_face_one() {
    let core = make_core(3);
    for row in status_rows(&core) {
        assert_eq!(row.face, 1);
    }
}

#[test]
fn face_numbers_track_rotation() {
    let mut core = make_core(4);
    core.rotate(1);
    for _ in 0..200 {
        core.tick();
    }
    let active = core.active_lens();
    let rows = status_rows(&core);
    let row = rows
        .iter()
        .find(|r| r.name == core.lenses()[active].name)
        .unwrap();
    // One clockwise step brings the highest-numbered face up.
    assert_eq!(row.face, core.config().telescope.sides);
}

#[test]
fn solved_flags_surface_in_the_rows() {
    let mut core = make_core(5);
    core.tick();
    let rows = status_rows(&core);
    // The lens targeting face 1 starts solved; its row must say so.
    let solved_names: Vec<&str> =
        rows.iter().filter(|r| r.solved).map(|r| r.name.as_str()).collect();
    assert_eq!(solved_names, vec!["Orange"]);
}
