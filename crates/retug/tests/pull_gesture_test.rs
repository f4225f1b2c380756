//! Touch-stream scenarios: interception, forwarding, the synthesized
//! cancel and multi-touch hand-over.

use retug::RefreshState;
use retug_foundation::{ScrollMetrics, TouchPhase};
use retug_testing::{HeaderHook, RefreshRobot};
use std::cell::Cell;
use std::rc::Rc;

fn counting_listener(robot: &RefreshRobot) -> Rc<Cell<u32>> {
    let calls = Rc::new(Cell::new(0u32));
    let counter = calls.clone();
    robot
        .layout()
        .set_refresh_listener(move || counter.set(counter.get() + 1));
    calls
}

#[test]
fn pull_below_trigger_settles_back_to_reset() {
    let mut robot = RefreshRobot::new(400.0, 600.0);
    let calls = counting_listener(&robot);

    robot.press(200.0, 40.0);
    robot.move_by(0.0, 100.0);
    assert_eq!(robot.layout().state(), RefreshState::Pull);
    assert_eq!(robot.layout().offset(), 50.0);

    robot.release();
    robot.wait_for_idle();

    assert_eq!(robot.layout().state(), RefreshState::Reset);
    assert_eq!(robot.layout().offset(), 0.0);
    assert_eq!(robot.header().hooks(), [HeaderHook::Pull, HeaderHook::Reset]);
    assert_eq!(calls.get(), 0);
}

#[test]
fn position_callbacks_report_the_applied_offsets() {
    let mut robot = RefreshRobot::new(400.0, 600.0);

    robot.press(200.0, 40.0);
    robot.move_by(0.0, 100.0);

    let record = robot.header().last_position().unwrap();
    assert_eq!(record.current_offset, 50.0);
    assert_eq!(record.last_offset, 0.0);
    assert_eq!(record.trigger_distance, 100.0);
    assert!(record.is_touch_active);
    assert_eq!(record.state, RefreshState::Pull);
}

#[test]
fn first_displacing_move_is_followed_by_one_synthesized_cancel() {
    let mut robot = RefreshRobot::new(400.0, 600.0);

    robot.press(200.0, 40.0);
    robot.move_by(0.0, 100.0);
    // The cancel goes out when a move finds the header already displaced.
    assert_eq!(robot.content().dispatched_phases(), [TouchPhase::Down]);

    robot.move_by(0.0, 20.0);
    assert_eq!(
        robot.content().dispatched_phases(),
        [TouchPhase::Down, TouchPhase::Cancel]
    );

    // At most once per touch session.
    robot.move_by(0.0, 20.0);
    robot.release();
    assert_eq!(
        robot.content().dispatched_phases(),
        [TouchPhase::Down, TouchPhase::Cancel, TouchPhase::Up]
    );
}

#[test]
fn pull_is_damped_beyond_the_trigger_distance() {
    let mut robot = RefreshRobot::new(400.0, 600.0);

    robot.pull(400.0, 4);

    let offset = robot.layout().offset();
    assert!(offset > robot.layout().trigger_distance());
    assert!(offset < 300.0);
    assert!((offset - 146.6919).abs() < 1e-3);
}

#[test]
fn release_below_trigger_after_retreating_does_not_refresh() {
    let mut robot = RefreshRobot::new(400.0, 600.0);
    let calls = counting_listener(&robot);

    robot.pull(400.0, 4);
    // Push back up across the trigger with the finger still down; the
    // loading commit only happens on a touch-free settle.
    robot.move_by(0.0, -120.0);
    assert_eq!(robot.layout().state(), RefreshState::Pull);
    assert!(robot.layout().offset() < robot.layout().trigger_distance());

    robot.release();
    robot.wait_for_idle();

    assert_eq!(robot.layout().state(), RefreshState::Reset);
    assert_eq!(robot.header().hooks(), [HeaderHook::Pull, HeaderHook::Reset]);
    assert_eq!(calls.get(), 0);
}

#[test]
fn scrollable_content_keeps_pull_down_gestures() {
    let mut robot = RefreshRobot::new(400.0, 600.0);
    robot
        .content()
        .set_metrics(ScrollMetrics::Custom { can_scroll_up: true });

    robot.press(200.0, 40.0);
    robot.move_by(0.0, 100.0);

    assert_eq!(robot.layout().state(), RefreshState::Reset);
    assert_eq!(robot.layout().offset(), 0.0);
    assert_eq!(
        robot.content().dispatched_phases(),
        [TouchPhase::Down, TouchPhase::Move]
    );
}

#[test]
fn disabled_layout_passes_events_through() {
    let mut robot = RefreshRobot::new(400.0, 600.0);
    robot.layout().set_enabled(false);

    robot.press(200.0, 40.0);
    robot.move_by(0.0, 100.0);
    robot.release();

    assert_eq!(robot.layout().state(), RefreshState::Reset);
    assert_eq!(robot.layout().offset(), 0.0);
    assert_eq!(
        robot.content().dispatched_phases(),
        [TouchPhase::Down, TouchPhase::Move, TouchPhase::Up]
    );
}

#[test]
fn second_pointer_takes_over_without_a_jump() {
    let mut robot = RefreshRobot::new(400.0, 600.0);

    robot.press(200.0, 40.0);
    robot.move_pointer_by(1, 0.0, 100.0);
    assert_eq!(robot.layout().offset(), 50.0);

    // A second finger lands and drives the pull.
    robot.press(240.0, 300.0);
    robot.move_pointer_by(2, 0.0, 40.0);
    assert_eq!(robot.layout().offset(), 70.0);

    // Lifting it hands the gesture back to the first finger with no
    // phantom movement from the hand-over itself.
    robot.lift_pointer(2);
    assert_eq!(robot.layout().offset(), 70.0);

    robot.move_pointer_by(1, 0.0, 20.0);
    assert_eq!(robot.layout().offset(), 80.0);

    robot.release();
    robot.wait_for_idle();
    assert_eq!(robot.layout().state(), RefreshState::Reset);
}

#[test]
fn cancel_mid_pull_settles_back() {
    let mut robot = RefreshRobot::new(400.0, 600.0);

    robot.pull(100.0, 1);
    assert_eq!(robot.layout().offset(), 50.0);

    robot.cancel();
    robot.wait_for_idle();

    assert_eq!(robot.layout().state(), RefreshState::Reset);
    assert_eq!(robot.layout().offset(), 0.0);
    assert_eq!(robot.header().hooks(), [HeaderHook::Pull, HeaderHook::Reset]);
}
