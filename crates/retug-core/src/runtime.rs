use crate::collections::map::HashMap;
use crate::frame_clock::FrameClock;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Identifies a pending frame callback within one [`RuntimeHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCallbackId(u64);

/// Identifies a pending deferred timer within one [`RuntimeHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

type FrameCallback = Box<dyn FnOnce(u64)>;

struct ScheduledTimer {
    deadline_millis: u64,
    callback: Box<dyn FnOnce()>,
}

struct RuntimeInner {
    next_frame_callback_id: u64,
    frame_callbacks: Vec<(FrameCallbackId, FrameCallback)>,
    next_timer_id: u64,
    timers: HashMap<TimerId, ScheduledTimer>,
    now_millis: u64,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            next_frame_callback_id: 0,
            frame_callbacks: Vec::new(),
            next_timer_id: 0,
            timers: HashMap::default(),
            now_millis: 0,
        }
    }
}

/// Cloneable handle to the single-threaded retug runtime.
///
/// The runtime owns two registries: frame callbacks, which fire on the next
/// pump with the frame timestamp, and deferred timers, which fire on the
/// first pump whose timestamp is at or past their deadline. The host drives
/// both by calling [`drain_frame_callbacks`](Self::drain_frame_callbacks)
/// with a monotonically increasing frame time.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner::new())),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Registers a callback for the next frame pump. The callback receives
    /// the frame timestamp in nanoseconds.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let mut inner = self.inner.borrow_mut();
        let id = FrameCallbackId(inner.next_frame_callback_id);
        inner.next_frame_callback_id += 1;
        inner.frame_callbacks.push((id, Box::new(callback)));
        Some(id)
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.inner
            .borrow_mut()
            .frame_callbacks
            .retain(|(candidate, _)| *candidate != id);
    }

    /// Schedules `callback` to run on the first frame pump at or after
    /// `delay_millis` from the runtime's current time.
    pub fn post_delayed(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<TimerId> {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_timer_id);
        inner.next_timer_id += 1;
        let deadline_millis = inner.now_millis.saturating_add(delay_millis);
        inner.timers.insert(
            id,
            ScheduledTimer {
                deadline_millis,
                callback: Box::new(callback),
            },
        );
        Some(id)
    }

    pub fn cancel_timer(&self, id: TimerId) {
        self.inner.borrow_mut().timers.remove(&id);
    }

    /// Runs due timers, then the frame callbacks registered before this
    /// pump. Callbacks registered while draining wait for the next pump.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let (due, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            let now_millis = frame_time_nanos / 1_000_000;
            if now_millis > inner.now_millis {
                inner.now_millis = now_millis;
            }
            let now_millis = inner.now_millis;
            let mut due: SmallVec<[(u64, TimerId); 4]> = inner
                .timers
                .iter()
                .filter(|(_, timer)| timer.deadline_millis <= now_millis)
                .map(|(id, timer)| (timer.deadline_millis, *id))
                .collect();
            due.sort_unstable();
            let callbacks = std::mem::take(&mut inner.frame_callbacks);
            (due, callbacks)
        };

        for (_, id) in due {
            // A timer callback may cancel a sibling that was also due.
            let timer = self.inner.borrow_mut().timers.remove(&id);
            if let Some(timer) = timer {
                log::trace!("timer {:?} fired at {} ms", id, frame_time_nanos / 1_000_000);
                (timer.callback)();
            }
        }

        for (_, callback) in callbacks {
            callback(frame_time_nanos);
        }
    }

    pub fn has_pending_frame_callbacks(&self) -> bool {
        !self.inner.borrow().frame_callbacks.is_empty()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.inner.borrow().timers.is_empty()
    }

    /// True when neither frame callbacks nor timers are pending.
    pub fn is_idle(&self) -> bool {
        let inner = self.inner.borrow();
        inner.frame_callbacks.is_empty() && inner.timers.is_empty()
    }

    /// The runtime's current time, in milliseconds of frame time.
    pub fn now_millis(&self) -> u64 {
        self.inner.borrow().now_millis
    }
}

impl Default for RuntimeHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
