use test_case::test_case;
use winit::keyboard::KeyCode;

use crate::client::activation::{ActivationTracker, KeyTransition};

#[test_case(false, false, KeyTransition::NotPressed)]
#[test_case(false, true, KeyTransition::Pressed)]
#[test_case(true, true, KeyTransition::Held)]
#[test_case(true, false, KeyTransition::Released)]
fn test_transition_from_raw_states(previous: bool, current: bool, expected: KeyTransition) {
    assert_eq!(KeyTransition::from_raw_states(previous, current), expected);
}

#[test]
fn test_edges_are_reported_once() {
    let mut tracker = ActivationTracker::new(KeyCode::Backquote);

    assert_eq!(tracker.end_tick(), None);

    tracker.set_pressed(true);
    assert_eq!(tracker.end_tick(), Some(true));
    assert!(tracker.is_held());

    assert_eq!(tracker.end_tick(), None);
    assert_eq!(tracker.transition(), KeyTransition::Held);
    assert!(tracker.is_held());

    tracker.set_pressed(false);
    assert_eq!(tracker.end_tick(), Some(false));
    assert!(!tracker.is_held());
    assert_eq!(tracker.end_tick(), None);
}

#[test]
fn test_tap_within_one_tick_is_not_seen() {
    let mut tracker = ActivationTracker::new(KeyCode::Backquote);

    tracker.set_pressed(true);
    tracker.set_pressed(false);

    assert_eq!(tracker.end_tick(), None);
    assert!(!tracker.is_held());
}

#[test]
fn test_state_changes_only_at_tick_end() {
    let mut tracker = ActivationTracker::new(KeyCode::KeyV);

    tracker.set_pressed(true);

    assert!(!tracker.is_held());
    assert_eq!(tracker.key(), KeyCode::KeyV);
}
