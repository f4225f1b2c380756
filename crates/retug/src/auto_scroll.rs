use retug_animation::{AnimationSpec, ScrollSession};
use retug_core::FrameCallbackRegistration;

/// One frame's movement from an auto-scroll session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrollStep {
    /// Raw delta to route through the spinner.
    pub delta: f32,
    /// True when the session's sample landed on its target.
    pub finished: bool,
}

/// Owns the in-flight settle session and its pending frame callback.
///
/// Starting a new target always cancels the previous one: last request
/// wins, nothing queues. `stop` discards the session without any completion
/// signal; natural completion is observed through the final
/// [`sample`](Self::sample) and handled by the controller.
pub(crate) struct AutoScroll {
    session: Option<ScrollSession>,
    registration: Option<FrameCallbackRegistration>,
    last_value: f32,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self {
            session: None,
            registration: None,
            last_value: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Begins a session from `from` to `to`. Returns false when there is no
    /// distance to cover (and leaves nothing running).
    pub fn start(&mut self, from: f32, to: f32, spec: AnimationSpec) -> bool {
        self.stop();
        if to == from {
            return false;
        }
        self.session = Some(ScrollSession::new(from, to, spec));
        self.last_value = from;
        true
    }

    /// Cancels the pending frame callback and discards the session.
    pub fn stop(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.session = None;
        self.last_value = 0.0;
    }

    pub fn set_registration(&mut self, registration: FrameCallbackRegistration) {
        self.registration = Some(registration);
    }

    /// Forgets the registration once its callback has fired.
    pub fn clear_registration(&mut self) {
        self.registration = None;
    }

    /// Samples the session at `frame_time_nanos`, returning the delta since
    /// the previous frame. `None` when nothing is running.
    pub fn sample(&mut self, frame_time_nanos: u64) -> Option<ScrollStep> {
        let session = self.session.as_mut()?;
        let sample = session.sample(frame_time_nanos);
        let delta = sample.value - self.last_value;
        self.last_value = sample.value;
        Some(ScrollStep {
            delta,
            finished: sample.finished,
        })
    }

    /// Drops the session after a natural completion.
    pub fn finish(&mut self) {
        self.session = None;
        self.last_value = 0.0;
    }
}
