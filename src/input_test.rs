use super::*;

#[test]
fn arrow_keys_rotate() {
    assert_eq!(map_key("ArrowLeft", 5), Some(Event::Rotate(-1)));
    assert_eq!(map_key("ArrowRight", 5), Some(Event::Rotate(1)));
}

#[test]
fn m_toggles_the_map_in_either_case() {
    assert_eq!(map_key("m", 5), Some(Event::ToggleMap));
    assert_eq!(map_key("M", 5), Some(Event::ToggleMap));
}

#[test]
fn digits_select_slots_zero_based() {
    assert_eq!(map_key("1", 5), Some(Event::SelectSlot(0)));
    assert_eq!(map_key("5", 5), Some(Event::SelectSlot(4)));
}

#[test]
fn digits_past_the_lens_count_are_ignored() {
    assert_eq!(map_key("6", 5), None);
    assert_eq!(map_key("9", 5), None);
    assert_eq!(map_key("1", 0), None);
}

#[test]
fn zero_is_not_a_slot() {
    assert_eq!(map_key("0", 5), None);
}

#[test]
fn multi_character_numbers_are_ignored() {
    assert_eq!(map_key("12", 5), None);
}

#[test]
fn unrelated_keys_are_ignored() {
    assert_eq!(map_key("a", 5), None);
    assert_eq!(map_key("Escape", 5), None);
    assert_eq!(map_key(" ", 5), None);
}

#[test]
fn wheel_sign_picks_the_direction() {
    assert_eq!(map_wheel(120.0), Some(Event::Rotate(1)));
    assert_eq!(map_wheel(-3.5), Some(Event::Rotate(-1)));
}

#[test]
fn degenerate_wheel_deltas_are_ignored() {
    assert_eq!(map_wheel(0.0), None);
    assert_eq!(map_wheel(f64::NAN), None);
    assert_eq!(map_wheel(f64::INFINITY), None);
}
