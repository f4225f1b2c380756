use crate::spinner::RefreshState;
use retug_foundation::{ScrollMetrics, TouchEvent};
use retug_ui_layout::LayoutChild;

/// Capability interface for pluggable header indicators.
///
/// The engine calls [`on_position_change`](Self::on_position_change) after
/// every applied offset change and one lifecycle hook on each state entry.
/// What the header renders from that is entirely its own business.
pub trait RefreshHeader: LayoutChild {
    /// Invoked after every applied offset change.
    ///
    /// `trigger_distance` is the offset at which a release commits to a
    /// refresh; headers typically switch their "release to refresh" visual
    /// when `current_offset` crosses it.
    fn on_position_change(
        &self,
        current_offset: f32,
        last_offset: f32,
        trigger_distance: f32,
        is_touch_active: bool,
        state: RefreshState,
    );

    fn on_reset(&self) {}

    fn on_pull(&self) {}

    fn on_refreshing(&self) {}

    fn on_complete(&self) {}
}

/// The scrollable content beneath the header.
///
/// The engine needs two things from it: whether it can still scroll toward
/// its start (to decide who owns a pull-down), and a way to forward touch
/// events it does not intercept.
pub trait RefreshContent: LayoutChild {
    /// Current scroll position snapshot.
    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Delivers a touch event to the content view's own gesture handling.
    /// Returns true when the content handled the event.
    fn dispatch_touch(&self, event: &TouchEvent) -> bool;
}
