//! Touch-driven pull gestures end to end

mod common;

use common::{Harness, Notice, HEADER_HEIGHT};
use pullrefresh_layout::prelude::*;

#[test]
fn test_short_pull_springs_back() {
    let mut h = Harness::new();

    h.drag(100.0, &[110.0, 140.0, 165.0]);
    assert_eq!(h.layout.scroll_y(), -32.5);
    assert_eq!(h.layout.header_state(), EdgeState::Pull);

    assert!(h.release(165.0));
    assert_eq!(h.layout.header_state(), EdgeState::Reset);
    assert!(h.layout.is_settling());

    h.settle();
    assert_eq!(h.layout.scroll_y(), 0.0);
    assert_eq!(h.refreshes.get(), 0);
    assert!(!h.layout.is_refreshing());
}

#[test]
fn test_pull_past_trigger_refreshes_once() {
    let mut h = Harness::new();

    h.drag(100.0, &[110.0, 200.0]);
    assert_eq!(h.layout.scroll_y(), -50.0);
    assert_eq!(h.layout.header_state(), EdgeState::Pull);

    h.touch(TouchEvent::move_to(0, 100.0, 240.0));
    assert_eq!(h.layout.scroll_y(), -70.0);
    assert_eq!(h.layout.header_state(), EdgeState::Release);

    h.release(240.0);
    assert_eq!(h.refreshes.get(), 1);
    assert!(h.layout.is_refreshing());
    assert_eq!(h.layout.header_state(), EdgeState::Active);

    h.settle();
    assert_eq!(h.layout.scroll_y(), -HEADER_HEIGHT);

    // Pulling further while in flight never triggers again
    h.drag(100.0, &[110.0, 300.0]);
    h.release(300.0);
    h.settle();
    assert_eq!(h.refreshes.get(), 1);
    assert_eq!(h.layout.scroll_y(), -HEADER_HEIGHT);
}

#[test]
fn test_release_threshold_hysteresis() {
    let mut h = Harness::new();

    h.drag(100.0, &[110.0, 220.0]);
    assert_eq!(h.layout.scroll_y(), -60.0);
    assert_eq!(h.layout.header_state(), EdgeState::Release);

    h.touch(TouchEvent::move_to(0, 100.0, 218.0));
    assert_eq!(h.layout.scroll_y(), -59.0);
    assert_eq!(h.layout.header_state(), EdgeState::Pull);

    h.release(218.0);
    h.settle();
    assert_eq!(h.refreshes.get(), 0);
    assert_eq!(h.layout.header_state(), EdgeState::Reset);
    assert_eq!(
        h.layout.state_history(Edge::Header),
        vec![EdgeState::Release, EdgeState::Pull, EdgeState::Reset]
    );
}

#[test]
fn test_release_exactly_at_trigger_refreshes() {
    let mut h = Harness::new();

    h.drag(100.0, &[110.0, 220.0]);
    assert_eq!(h.layout.scroll_y(), -HEADER_HEIGHT);
    h.release(220.0);

    assert_eq!(h.refreshes.get(), 1);
    assert_eq!(h.layout.header_state(), EdgeState::Active);
    assert!(!h.layout.is_settling());
}

#[test]
fn test_indicator_sees_pull_fraction_and_states() {
    let mut h = Harness::new();
    assert_eq!(h.header_notices(), vec![Notice::Reset]);
    h.clear_notices();

    h.drag(100.0, &[110.0, 130.0, 160.0, 240.0]);
    assert_eq!(
        h.header_notices(),
        vec![Notice::Pull(0.25), Notice::Pull(0.5), Notice::Release]
    );
    assert!(h.footer_notices().is_empty());

    h.release(240.0);
    assert_eq!(h.header_notices().last(), Some(&Notice::Refreshing));
}

#[test]
fn test_pull_up_loads_more() {
    let mut h = Harness::new();

    h.drag(500.0, &[490.0, 410.0]);
    assert_eq!(h.layout.scroll_y(), 45.0);
    assert_eq!(h.layout.footer_state(), EdgeState::Pull);

    h.touch(TouchEvent::move_to(0, 100.0, 380.0));
    assert_eq!(h.layout.footer_state(), EdgeState::Release);

    h.release(380.0);
    assert_eq!(h.loads.get(), 1);
    assert!(h.layout.is_loading());
    assert_eq!(h.layout.footer_state(), EdgeState::Active);
    assert_eq!(h.layout.header_state(), EdgeState::Reset);
}

#[test]
fn test_scrolled_content_keeps_gesture() {
    let mut list = ListViewport::new(2000.0, 800.0);
    list.scroll_by(500.0);
    let mut h = Harness::with_list(list, PullConfig::default());

    h.touch(TouchEvent::down(0, 100.0, 100.0));
    assert!(!h.touch(TouchEvent::move_to(0, 100.0, 200.0)));
    assert!(!h.layout.is_being_dragged());
    assert_eq!(h.layout.scroll_y(), 0.0);
}

#[test]
fn test_horizontal_swipe_is_not_claimed() {
    let mut h = Harness::new();

    h.touch(TouchEvent::down(0, 100.0, 100.0));
    assert!(!h.touch(TouchEvent::move_to(0, 160.0, 130.0)));
    assert!(!h.layout.is_being_dragged());
}

#[test]
fn test_disabled_header_passes_drag_through() {
    let mut h = Harness::with_config(PullConfig::default().pull_refresh_enabled(false));

    h.touch(TouchEvent::down(0, 100.0, 100.0));
    assert!(!h.touch(TouchEvent::move_to(0, 100.0, 150.0)));
    assert_eq!(h.layout.scroll_y(), 0.0);
    assert_eq!(h.layout.header_state(), EdgeState::Reset);
    h.release(150.0);

    // The footer still works
    h.drag(500.0, &[490.0, 390.0]);
    assert_eq!(h.layout.scroll_y(), 55.0);
}

#[test]
fn test_reversal_into_disabled_edge_stops_at_rest() {
    let mut h = Harness::with_config(PullConfig::default().pull_load_enabled(false));

    h.drag(100.0, &[110.0, 140.0]);
    assert_eq!(h.layout.scroll_y(), -20.0);

    // Crossing rest toward the disabled footer clamps at 0
    assert!(h.touch(TouchEvent::move_to(0, 100.0, 60.0)));
    assert_eq!(h.layout.scroll_y(), 0.0);
    assert_eq!(h.layout.header_state(), EdgeState::Reset);

    // Further motion that way belongs to the content
    assert!(!h.touch(TouchEvent::move_to(0, 100.0, 40.0)));
    assert_eq!(h.layout.scroll_y(), 0.0);
}

#[test]
fn test_second_finger_takes_over() {
    let mut h = Harness::new();
    let first = TouchPointer::new(0, 100.0, 140.0);

    h.drag(100.0, &[110.0, 140.0]);
    assert_eq!(h.layout.scroll_y(), -20.0);

    let second = TouchPointer::new(1, 200.0, 300.0);
    assert!(h.touch(TouchEvent::pointer_down(second, &[first])));

    // Only the new active pointer moves the offset
    h.touch(TouchEvent::moves(&[first, TouchPointer::new(1, 200.0, 340.0)]));
    assert_eq!(h.layout.scroll_y(), -40.0);

    // Lifting it hands tracking back without a jump
    let lifted = TouchPointer::new(1, 200.0, 340.0);
    h.touch(TouchEvent::pointer_up(lifted, &[first]));
    assert!(h.layout.is_being_dragged());
    assert_eq!(h.layout.scroll_y(), -40.0);

    h.touch(TouchEvent::move_to(0, 100.0, 160.0));
    assert_eq!(h.layout.scroll_y(), -50.0);

    h.release(160.0);
    h.settle();
    assert_eq!(h.layout.scroll_y(), 0.0);
    assert_eq!(h.refreshes.get(), 0);
}

#[test]
fn test_cancel_leaves_offset_visible() {
    let mut h = Harness::new();

    h.drag(100.0, &[110.0, 240.0]);
    assert_eq!(h.layout.header_state(), EdgeState::Release);

    assert!(!h.touch(TouchEvent::Cancel));
    assert!(!h.layout.has_pending_work());
    assert_eq!(h.layout.scroll_y(), -65.0);
    assert_eq!(h.refreshes.get(), 0);
}

#[test]
fn test_new_drag_interrupts_settle() {
    let mut h = Harness::new();

    h.drag(100.0, &[110.0, 160.0]);
    h.release(160.0);
    h.layout.tick(16.0);
    h.layout.tick(16.0);
    assert!(h.layout.is_settling());
    let caught = h.layout.scroll_y();
    assert!(caught < 0.0 && caught > -30.0);

    h.drag(100.0, &[110.0, 120.0]);
    assert!(!h.layout.is_settling());
    assert!((h.layout.scroll_y() - (caught - 10.0)).abs() < 1e-4);
}

#[test]
fn test_disabled_container_ignores_gestures() {
    let mut h = Harness::new();
    h.layout.set_enabled(false);

    h.drag(100.0, &[110.0, 240.0]);
    assert!(!h.release(240.0));
    assert_eq!(h.layout.scroll_y(), 0.0);
    assert_eq!(h.refreshes.get(), 0);
}
