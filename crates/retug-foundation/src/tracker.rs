use crate::gesture_constants::TOUCH_SLOP;
use crate::touch::{PointerId, TouchEvent};
use retug_ui_layout::Point;

/// One move event resolved against the active pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSample {
    /// The active pointer's position for this event.
    pub position: Point,
    /// Movement since the previous tracked position.
    pub delta: Point,
}

/// Multi-touch bookkeeping for a drag gesture.
///
/// Tracks which pointer currently drives the gesture, where it started, and
/// whether movement has exceeded the touch slop. When the active pointer
/// lifts while others remain, tracking re-targets to a remaining pointer and
/// re-baselines so the gesture continues without a jump.
pub struct PointerTracker {
    active_pointer_id: Option<PointerId>,
    initial_down: Point,
    last_position: Point,
    is_dragging: bool,
    is_touch_active: bool,
    touch_slop: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::with_touch_slop(TOUCH_SLOP)
    }

    pub fn with_touch_slop(touch_slop: f32) -> Self {
        Self {
            active_pointer_id: None,
            initial_down: Point::ZERO,
            last_position: Point::ZERO,
            is_dragging: false,
            is_touch_active: false,
            touch_slop,
        }
    }

    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.active_pointer_id
    }

    /// True once movement has exceeded the touch slop in this session.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// True between down and up/cancel.
    pub fn is_touch_active(&self) -> bool {
        self.is_touch_active
    }

    pub fn last_position(&self) -> Point {
        self.last_position
    }

    /// Begins a touch session from the first pointer of a down event.
    pub fn on_down(&mut self, event: &TouchEvent) {
        let Some(pointer) = event.pointers.first() else {
            log::error!("Got a down event with no pointers.");
            return;
        };
        self.active_pointer_id = Some(pointer.id);
        self.initial_down = pointer.position;
        self.last_position = pointer.position;
        self.is_dragging = false;
        self.is_touch_active = true;
    }

    /// Resolves a move event against the active pointer.
    ///
    /// Returns `None` when no pointer is tracked or the event no longer
    /// carries the active pointer; the caller treats that event as
    /// passthrough. The delta is measured against the previous tracked
    /// position, before the slop latch is updated.
    pub fn on_move(&mut self, event: &TouchEvent) -> Option<MoveSample> {
        let Some(active_id) = self.active_pointer_id else {
            log::error!("Got a move event but don't have an active pointer id.");
            return None;
        };
        let Some(position) = event.position_of(active_id) else {
            log::error!("Active pointer {active_id} missing from move event.");
            return None;
        };

        let delta = Point::new(
            position.x - self.last_position.x,
            position.y - self.last_position.y,
        );
        self.last_position = position;

        if !self.is_dragging && (position.y - self.initial_down.y).abs() > self.touch_slop {
            self.is_dragging = true;
        }

        Some(MoveSample { position, delta })
    }

    /// An additional pointer went down: it becomes the active pointer, with
    /// tracking re-baselined to its position.
    pub fn on_pointer_down(&mut self, event: &TouchEvent) {
        let Some(pointer) = event.action_pointer() else {
            log::error!("Got a pointer-down event with an invalid action index.");
            return;
        };
        self.last_position = pointer.position;
        self.active_pointer_id = Some(pointer.id);
    }

    /// A non-final pointer went up. If it was the active pointer, tracking
    /// re-targets to another remaining pointer; either way the last position
    /// re-baselines to the active pointer so no jump is reported.
    pub fn on_pointer_up(&mut self, event: &TouchEvent) {
        let Some(mut active_id) = self.active_pointer_id else {
            log::error!("Got a pointer-up event but don't have an active pointer id.");
            return;
        };
        let Some(departing) = event.action_pointer() else {
            log::error!("Got a pointer-up event with an invalid action index.");
            return;
        };
        if departing.id == active_id {
            let replacement_index = if event.action_index == 0 { 1 } else { 0 };
            let Some(replacement) = event.pointers.get(replacement_index) else {
                log::error!("Pointer-up event left no replacement pointer to track.");
                return;
            };
            active_id = replacement.id;
            self.active_pointer_id = Some(active_id);
        }

        match event.position_of(active_id) {
            Some(position) => self.last_position = position,
            None => log::error!("Active pointer {active_id} missing from pointer-up event."),
        }
    }

    /// Ends the touch session.
    pub fn on_up_or_cancel(&mut self) {
        self.is_touch_active = false;
        self.active_pointer_id = None;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
