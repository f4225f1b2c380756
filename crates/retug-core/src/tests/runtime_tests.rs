use crate::runtime::RuntimeHandle;
use crate::time::{Clock, MonotonicClock};
use crate::timer::TimerRegistration;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

#[test]
fn frame_callback_fires_once_with_frame_time() {
    let runtime = RuntimeHandle::new();
    let seen = Rc::new(Cell::new(None));
    let seen_clone = seen.clone();
    runtime.register_frame_callback(move |nanos| seen_clone.set(Some(nanos)));

    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(seen.get(), Some(FRAME_NANOS));

    seen.set(None);
    runtime.drain_frame_callbacks(2 * FRAME_NANOS);
    assert_eq!(seen.get(), None, "one-shot callback must not fire twice");
}

#[test]
fn cancelled_frame_callback_does_not_fire() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_clone.set(true));

    registration.cancel();
    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert!(!fired.get());
}

#[test]
fn dropping_frame_registration_cancels() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    {
        let _registration = runtime
            .frame_clock()
            .with_frame_nanos(move |_| fired_clone.set(true));
    }
    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert!(!fired.get());
}

#[test]
fn callback_registered_during_drain_waits_for_next_pump() {
    let runtime = RuntimeHandle::new();
    let times = Rc::new(RefCell::new(Vec::new()));

    let times_outer = times.clone();
    let reentrant = runtime.clone();
    runtime.register_frame_callback(move |nanos| {
        times_outer.borrow_mut().push(nanos);
        let times_inner = times_outer.clone();
        reentrant.register_frame_callback(move |nanos| {
            times_inner.borrow_mut().push(nanos);
        });
    });

    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(*times.borrow(), vec![FRAME_NANOS]);

    runtime.drain_frame_callbacks(2 * FRAME_NANOS);
    assert_eq!(*times.borrow(), vec![FRAME_NANOS, 2 * FRAME_NANOS]);
}

#[test]
fn with_frame_millis_converts_frame_time() {
    let runtime = RuntimeHandle::new();
    let seen = Rc::new(Cell::new(None));
    let seen_clone = seen.clone();
    let _registration = runtime
        .frame_clock()
        .with_frame_millis(move |millis| seen_clone.set(Some(millis)));

    runtime.drain_frame_callbacks(33_000_000);
    assert_eq!(seen.get(), Some(33));
}

#[test]
fn timer_does_not_fire_before_deadline() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    runtime.post_delayed(100, move || fired_clone.set(true));

    runtime.drain_frame_callbacks(99_000_000);
    assert!(!fired.get());

    runtime.drain_frame_callbacks(100_000_000);
    assert!(fired.get());
}

#[test]
fn timers_fire_in_deadline_order() {
    let runtime = RuntimeHandle::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let order_late = order.clone();
    runtime.post_delayed(200, move || order_late.borrow_mut().push("late"));
    let order_early = order.clone();
    runtime.post_delayed(50, move || order_early.borrow_mut().push("early"));

    runtime.drain_frame_callbacks(250_000_000);
    assert_eq!(*order.borrow(), vec!["early", "late"]);
}

#[test]
fn timer_deadlines_are_relative_to_runtime_time() {
    let runtime = RuntimeHandle::new();
    runtime.drain_frame_callbacks(1_000_000_000);

    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    runtime.post_delayed(500, move || fired_clone.set(true));

    runtime.drain_frame_callbacks(1_400_000_000);
    assert!(!fired.get());
    runtime.drain_frame_callbacks(1_500_000_000);
    assert!(fired.get());
}

#[test]
fn replacing_timer_registration_cancels_previous() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(RefCell::new(Vec::new()));

    let fired_first = fired.clone();
    let mut slot = Some(TimerRegistration::schedule(&runtime, 50, move || {
        fired_first.borrow_mut().push("first");
    }));
    let fired_second = fired.clone();
    slot = Some(TimerRegistration::schedule(&runtime, 80, move || {
        fired_second.borrow_mut().push("second");
    }));

    runtime.drain_frame_callbacks(200_000_000);
    assert_eq!(*fired.borrow(), vec!["second"]);
    drop(slot);
}

#[test]
fn cancelling_timer_registration_prevents_fire() {
    let runtime = RuntimeHandle::new();
    let fired = Rc::new(Cell::new(false));
    let fired_clone = fired.clone();
    let registration =
        TimerRegistration::schedule(&runtime, 10, move || fired_clone.set(true));

    registration.cancel();
    runtime.drain_frame_callbacks(100_000_000);
    assert!(!fired.get());
}

#[test]
fn runtime_reports_idle_when_empty() {
    let runtime = RuntimeHandle::new();
    assert!(runtime.is_idle());

    runtime.register_frame_callback(|_| {});
    assert!(runtime.has_pending_frame_callbacks());
    assert!(!runtime.is_idle());
    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert!(runtime.is_idle());

    let id = runtime.post_delayed(1_000, || {}).unwrap();
    assert!(runtime.has_pending_timers());
    runtime.cancel_timer(id);
    assert!(runtime.is_idle());
}

#[test]
fn timers_run_before_frame_callbacks_in_one_pump() {
    let runtime = RuntimeHandle::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let order_frame = order.clone();
    runtime.register_frame_callback(move |_| order_frame.borrow_mut().push("frame"));
    let order_timer = order.clone();
    runtime.post_delayed(0, move || order_timer.borrow_mut().push("timer"));

    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(*order.borrow(), vec!["timer", "frame"]);
}

#[test]
fn monotonic_clock_reports_elapsed_time() {
    let clock = MonotonicClock::new();
    let start = clock.now();
    let first = clock.elapsed_nanos(start);
    let second = clock.elapsed_nanos(start);
    assert!(second >= first);
}
