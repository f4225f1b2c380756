use crate::runtime::{RuntimeHandle, TimerId};

/// Owns a pending deferred timer; dropping it cancels the timer.
///
/// Callers that keep at most one timer per purpose store the registration in
/// an `Option` field. Replacing the field cancels the previous timer, so a
/// stale deadline can never fire after being superseded.
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub fn schedule(
        runtime: &RuntimeHandle,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Self {
        match runtime.post_delayed(delay_millis, callback) {
            Some(id) => Self {
                runtime: runtime.clone(),
                id: Some(id),
            },
            None => Self {
                runtime: runtime.clone(),
                id: None,
            },
        }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}
