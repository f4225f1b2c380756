/// Lifecycle of the refresh indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// Idle, header fully retracted.
    Reset,
    /// Header displaced by an active pull or a settle still in flight.
    Pull,
    /// A refresh is running; the header stays pinned at the trigger
    /// distance until the host reports completion.
    Loading,
    /// Completion reported; the header is showing its done visual before
    /// retracting.
    Complete,
}

/// Result of routing one raw delta through the spinner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinnerUpdate {
    /// The offset change actually applied, after tension damping, the floor
    /// at zero, and the loading snap.
    pub applied_delta: f32,
    /// State entered by this delta, if any. A single delta enters at most
    /// one state.
    pub transition: Option<RefreshState>,
}

/// The refresh state machine plus the tension transform.
///
/// Pure state: raw vertical deltas go in through [`apply`](Self::apply),
/// damped offset changes and state transitions come out. The controller
/// owns the side effects (header hooks, the listener, view placement).
pub struct Spinner {
    state: RefreshState,
    current_offset: f32,
    last_offset: f32,
    header_height: f32,
    total_drag_distance: f32,
    max_drag_distance: f32,
    max_drag_override: Option<f32>,
    has_measured_header: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            state: RefreshState::Reset,
            current_offset: 0.0,
            last_offset: 0.0,
            header_height: 0.0,
            total_drag_distance: 0.0,
            max_drag_distance: 0.0,
            max_drag_override: None,
            has_measured_header: false,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// Vertical displacement of header and content from rest. Never
    /// negative.
    pub fn offset(&self) -> f32 {
        self.current_offset
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }

    /// Offset at which a release commits to a refresh. Defaults to the
    /// header's natural height.
    pub fn total_drag_distance(&self) -> f32 {
        self.total_drag_distance
    }

    /// Asymptotic bound of the tension curve. Defaults to three times the
    /// trigger distance.
    pub fn max_drag_distance(&self) -> f32 {
        self.max_drag_distance
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn has_measured_header(&self) -> bool {
        self.has_measured_header
    }

    pub fn is_at_rest(&self) -> bool {
        self.current_offset == 0.0
    }

    /// Overrides the tension bound. Takes effect immediately and survives
    /// header re-measurement.
    pub fn set_max_drag_distance(&mut self, max_drag_distance: f32) {
        self.max_drag_override = Some(max_drag_distance);
        self.max_drag_distance = max_drag_distance;
    }

    /// Latches the drag thresholds from the header's measured height.
    /// Subsequent calls are ignored until
    /// [`mark_header_unmeasured`](Self::mark_header_unmeasured).
    pub fn on_header_measured(&mut self, height: f32) {
        if self.has_measured_header {
            return;
        }
        self.has_measured_header = true;
        self.header_height = height;
        self.total_drag_distance = height;
        self.max_drag_distance = self.max_drag_override.unwrap_or(height * 3.0);
    }

    /// Forces the thresholds to re-latch on the next measure pass; used
    /// when the header is swapped.
    pub fn mark_header_unmeasured(&mut self) {
        self.has_measured_header = false;
    }

    pub fn set_state(&mut self, state: RefreshState) {
        self.state = state;
    }

    /// Resets the previous-offset bookkeeping at the start of a touch
    /// session so the first position callback reports no phantom movement.
    pub fn rebaseline(&mut self) {
        self.last_offset = self.current_offset;
    }

    /// Routes one raw vertical delta through damping and the transition
    /// rules, then applies it to the offset.
    ///
    /// The rules run in order; an earlier transition changes the state the
    /// later rules see, so one delta enters at most one state.
    pub fn apply(&mut self, raw_delta: f32, is_touch_active: bool) -> SpinnerUpdate {
        let mut delta = raw_delta;
        let mut target = (self.current_offset + delta).max(0.0);

        // Tension damping resists pull-down only; retraction is never
        // damped. The tension fraction is computed from the undamped
        // target, which keeps the offset asymptotically below the bound no
        // matter how large a single delta is.
        if delta > 0.0 {
            let span = self.max_drag_distance - self.total_drag_distance;
            if span > 0.0 {
                let extra = target - self.total_drag_distance;
                let tension = extra.clamp(0.0, span) * 2.0 / span;
                let damped = tension - (tension / 2.0) * (tension / 2.0);
                delta *= 1.0 - damped;
                target = (self.current_offset + delta).max(0.0);
            }
        }

        let mut transition = None;
        let mut new_offset = target;

        // 1. Leaving rest under a pull begins the lifecycle.
        if self.state == RefreshState::Reset && self.current_offset == 0.0 && target > 0.0 {
            self.state = RefreshState::Pull;
            transition = Some(RefreshState::Pull);
        }

        // 2. The header fully retracting ends it.
        if target <= 0.0
            && self.current_offset > 0.0
            && (self.state == RefreshState::Pull || self.state == RefreshState::Complete)
        {
            self.state = RefreshState::Reset;
            transition = Some(RefreshState::Reset);
        }

        // 3. Settling down across the trigger distance with no finger on
        // screen commits the refresh. The offset snaps exactly onto the
        // trigger distance so discrete frame steps cannot leave the header
        // resting a fraction off its loading height.
        if self.state == RefreshState::Pull
            && !is_touch_active
            && self.current_offset > self.total_drag_distance
            && target <= self.total_drag_distance
        {
            self.state = RefreshState::Loading;
            transition = Some(RefreshState::Loading);
            new_offset = self.total_drag_distance;
        }

        let applied_delta = new_offset - self.current_offset;
        if applied_delta != 0.0 {
            self.last_offset = self.current_offset;
            self.current_offset = new_offset;
        }

        SpinnerUpdate {
            applied_delta,
            transition,
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/spinner_tests.rs"]
mod tests;
