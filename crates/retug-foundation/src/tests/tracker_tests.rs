use crate::touch::{TouchEvent, TouchPhase, TouchPoint};
use crate::tracker::PointerTracker;
use retug_ui_layout::Point;

fn down(id: u64, x: f32, y: f32) -> TouchEvent {
    TouchEvent::single(TouchPhase::Down, id, Point::new(x, y))
}

fn single_move(id: u64, x: f32, y: f32) -> TouchEvent {
    TouchEvent::single(TouchPhase::Move, id, Point::new(x, y))
}

fn two_pointer(
    phase: TouchPhase,
    action_index: usize,
    first: (u64, f32, f32),
    second: (u64, f32, f32),
) -> TouchEvent {
    TouchEvent::new(
        phase,
        action_index,
        [
            TouchPoint::new(first.0, Point::new(first.1, first.2)),
            TouchPoint::new(second.0, Point::new(second.1, second.2)),
        ],
    )
}

#[test]
fn down_begins_session_without_dragging() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(7, 10.0, 20.0));

    assert_eq!(tracker.active_pointer_id(), Some(7));
    assert!(tracker.is_touch_active());
    assert!(!tracker.is_dragging());
    assert_eq!(tracker.last_position(), Point::new(10.0, 20.0));
}

#[test]
fn small_movement_stays_below_slop() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));

    let sample = tracker.on_move(&single_move(1, 0.0, 105.0)).unwrap();
    assert_eq!(sample.delta.y, 5.0);
    assert!(!tracker.is_dragging());
}

#[test]
fn crossing_slop_latches_dragging() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));

    tracker.on_move(&single_move(1, 0.0, 105.0));
    let sample = tracker.on_move(&single_move(1, 0.0, 112.0)).unwrap();
    assert_eq!(sample.delta.y, 7.0);
    assert!(tracker.is_dragging());

    // Dragging stays latched even if the pointer returns near the origin.
    tracker.on_move(&single_move(1, 0.0, 101.0));
    assert!(tracker.is_dragging());
}

#[test]
fn move_without_session_is_ignored() {
    let mut tracker = PointerTracker::new();
    assert!(tracker.on_move(&single_move(1, 0.0, 50.0)).is_none());
    assert!(!tracker.is_dragging());
}

#[test]
fn move_missing_active_pointer_is_ignored() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));

    assert!(tracker.on_move(&single_move(99, 0.0, 150.0)).is_none());
    // Bookkeeping is untouched by the bad event.
    assert_eq!(tracker.active_pointer_id(), Some(1));
    assert_eq!(tracker.last_position(), Point::new(0.0, 100.0));
}

#[test]
fn pointer_down_retargets_to_new_pointer() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));

    let event = two_pointer(TouchPhase::PointerDown, 1, (1, 0.0, 100.0), (2, 40.0, 60.0));
    tracker.on_pointer_down(&event);

    assert_eq!(tracker.active_pointer_id(), Some(2));
    assert_eq!(tracker.last_position(), Point::new(40.0, 60.0));

    // The next move reports a delta relative to the new baseline.
    let sample = tracker
        .on_move(&two_pointer(TouchPhase::Move, 1, (1, 0.0, 100.0), (2, 40.0, 70.0)))
        .unwrap();
    assert_eq!(sample.delta.y, 10.0);
}

#[test]
fn active_pointer_up_retargets_to_remaining_pointer() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));

    // Pointer 1 (index 0) lifts; pointer 2 (index 1) takes over.
    let event = two_pointer(TouchPhase::PointerUp, 0, (1, 0.0, 130.0), (2, 40.0, 60.0));
    tracker.on_pointer_up(&event);

    assert_eq!(tracker.active_pointer_id(), Some(2));
    assert_eq!(
        tracker.last_position(),
        Point::new(40.0, 60.0),
        "baseline must move to the replacement so no jump is reported"
    );
}

#[test]
fn inactive_pointer_up_keeps_active_pointer() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));
    tracker.on_pointer_down(&two_pointer(
        TouchPhase::PointerDown,
        1,
        (1, 0.0, 100.0),
        (2, 40.0, 60.0),
    ));

    // Pointer 1 lifts while pointer 2 is active.
    let event = two_pointer(TouchPhase::PointerUp, 0, (1, 0.0, 150.0), (2, 40.0, 65.0));
    tracker.on_pointer_up(&event);

    assert_eq!(tracker.active_pointer_id(), Some(2));
    assert_eq!(tracker.last_position(), Point::new(40.0, 65.0));
}

#[test]
fn up_or_cancel_ends_session() {
    let mut tracker = PointerTracker::new();
    tracker.on_down(&down(1, 0.0, 100.0));
    tracker.on_up_or_cancel();

    assert!(!tracker.is_touch_active());
    assert_eq!(tracker.active_pointer_id(), None);
}

#[test]
fn consumed_flag_is_shared_across_clones() {
    let event = down(1, 0.0, 0.0);
    let clone = event.clone();
    assert!(!clone.is_consumed());
    event.consume();
    assert!(clone.is_consumed());
}

#[test]
fn synthesized_cancel_gets_fresh_consumption() {
    let event = down(1, 0.0, 0.0);
    event.consume();
    let cancel = event.to_cancel();
    assert_eq!(cancel.phase, TouchPhase::Cancel);
    assert!(!cancel.is_consumed());
    assert_eq!(cancel.pointers.len(), 1);
}
