//! Recording doubles for the header and content seams.
//!
//! Both fixtures log every call the engine makes into them so tests can
//! assert on hook order, position callbacks and view placement without a
//! real view tree.

use retug::{RefreshContent, RefreshHeader, RefreshState};
use retug_foundation::{ScrollMetrics, TouchEvent, TouchPhase};
use retug_ui_layout::{Constraints, LayoutChild, Size};
use std::cell::{Cell, RefCell};

/// Which lifecycle hook fired on a [`RecordingHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHook {
    Reset,
    Pull,
    Refreshing,
    Complete,
}

/// One `on_position_change` invocation as the header saw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRecord {
    pub current_offset: f32,
    pub last_offset: f32,
    pub trigger_distance: f32,
    pub is_touch_active: bool,
    pub state: RefreshState,
}

/// Header indicator that records everything and renders nothing.
pub struct RecordingHeader {
    natural_size: Size,
    hooks: RefCell<Vec<HeaderHook>>,
    positions: RefCell<Vec<PositionRecord>>,
    frame: Cell<Option<[f32; 4]>>,
}

impl RecordingHeader {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            natural_size: Size::new(width, height),
            hooks: RefCell::new(Vec::new()),
            positions: RefCell::new(Vec::new()),
            frame: Cell::new(None),
        }
    }

    /// All lifecycle hooks fired so far, in order.
    pub fn hooks(&self) -> Vec<HeaderHook> {
        self.hooks.borrow().clone()
    }

    /// Drains the hook log, for step-by-step assertions.
    pub fn take_hooks(&self) -> Vec<HeaderHook> {
        std::mem::take(&mut *self.hooks.borrow_mut())
    }

    pub fn positions(&self) -> Vec<PositionRecord> {
        self.positions.borrow().clone()
    }

    pub fn last_position(&self) -> Option<PositionRecord> {
        self.positions.borrow().last().copied()
    }

    /// Most recent placement as `[left, top, right, bottom]`.
    pub fn frame(&self) -> Option<[f32; 4]> {
        self.frame.get()
    }
}

impl LayoutChild for RecordingHeader {
    fn measure(&self, constraints: Constraints) -> Size {
        let (width, height) =
            constraints.constrain(self.natural_size.width, self.natural_size.height);
        Size::new(width, height)
    }

    fn place(&self, left: f32, top: f32, right: f32, bottom: f32) {
        self.frame.set(Some([left, top, right, bottom]));
    }
}

impl RefreshHeader for RecordingHeader {
    fn on_position_change(
        &self,
        current_offset: f32,
        last_offset: f32,
        trigger_distance: f32,
        is_touch_active: bool,
        state: RefreshState,
    ) {
        self.positions.borrow_mut().push(PositionRecord {
            current_offset,
            last_offset,
            trigger_distance,
            is_touch_active,
            state,
        });
    }

    fn on_reset(&self) {
        self.hooks.borrow_mut().push(HeaderHook::Reset);
    }

    fn on_pull(&self) {
        self.hooks.borrow_mut().push(HeaderHook::Pull);
    }

    fn on_refreshing(&self) {
        self.hooks.borrow_mut().push(HeaderHook::Refreshing);
    }

    fn on_complete(&self) {
        self.hooks.borrow_mut().push(HeaderHook::Complete);
    }
}

/// Content double with host-settable scroll metrics.
///
/// Fills whatever constraints it is measured with and records every touch
/// event forwarded to it.
pub struct RecordingContent {
    metrics: Cell<ScrollMetrics>,
    dispatched: RefCell<Vec<TouchPhase>>,
    frame: Cell<Option<[f32; 4]>>,
}

impl RecordingContent {
    /// Content resting at its scroll start, the position that hands
    /// pull-down gestures to the refresh layer.
    pub fn at_start() -> Self {
        Self::with_metrics(ScrollMetrics::AT_START)
    }

    pub fn with_metrics(metrics: ScrollMetrics) -> Self {
        Self {
            metrics: Cell::new(metrics),
            dispatched: RefCell::new(Vec::new()),
            frame: Cell::new(None),
        }
    }

    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        self.metrics.set(metrics);
    }

    /// Phases of every event forwarded here, in order.
    pub fn dispatched_phases(&self) -> Vec<TouchPhase> {
        self.dispatched.borrow().clone()
    }

    /// Drains the forwarded-event log.
    pub fn take_dispatched(&self) -> Vec<TouchPhase> {
        std::mem::take(&mut *self.dispatched.borrow_mut())
    }

    /// Most recent placement as `[left, top, right, bottom]`.
    pub fn frame(&self) -> Option<[f32; 4]> {
        self.frame.get()
    }

    /// Top edge of the most recent placement; tracks the refresh offset.
    pub fn top(&self) -> Option<f32> {
        self.frame.get().map(|[_, top, _, _]| top)
    }
}

impl LayoutChild for RecordingContent {
    fn measure(&self, constraints: Constraints) -> Size {
        let (width, height) = constraints.constrain(constraints.max_width, constraints.max_height);
        Size::new(width, height)
    }

    fn place(&self, left: f32, top: f32, right: f32, bottom: f32) {
        self.frame.set(Some([left, top, right, bottom]));
    }
}

impl RefreshContent for RecordingContent {
    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    fn dispatch_touch(&self, event: &TouchEvent) -> bool {
        self.dispatched.borrow_mut().push(event.phase);
        true
    }
}
