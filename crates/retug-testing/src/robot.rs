//! Robot-style driver for gesture and animation tests.
//!
//! Wires a [`RefreshLayout`] to recording fixtures, synthesizes touch
//! streams and pumps the runtime's frame clock, so tests read as a script
//! of user actions.

use crate::fixtures::{RecordingContent, RecordingHeader};
use retug::RefreshLayout;
use retug_core::RuntimeHandle;
use retug_foundation::{PointerId, TouchEvent, TouchPhase, TouchPoint};
use retug_ui_layout::{Constraints, Point, Size};
use std::rc::Rc;

/// One display frame at 60 Hz, in nanoseconds.
pub const FRAME_NANOS: u64 = 16_666_667;

const MAX_IDLE_FRAMES: u32 = 2_000;

/// Drives a [`RefreshLayout`] the way a host view would: touch events in,
/// frame pumps and layout passes around them.
pub struct RefreshRobot {
    runtime: RuntimeHandle,
    layout: RefreshLayout,
    header: Rc<RecordingHeader>,
    content: Rc<RecordingContent>,
    viewport: Size,
    pointers: Vec<TouchPoint>,
    next_pointer_id: PointerId,
    now_nanos: u64,
}

impl RefreshRobot {
    /// Builds a controller with a recording header (80 x 100) and recording
    /// content filling the viewport, measured and laid out once.
    pub fn new(width: f32, height: f32) -> Self {
        let runtime = RuntimeHandle::new();
        let layout = RefreshLayout::new(runtime.clone());
        let header = Rc::new(RecordingHeader::new(80.0, 100.0));
        let content = Rc::new(RecordingContent::at_start());
        layout.set_header(header.clone());
        layout.add_child(content.clone());
        let robot = Self {
            runtime,
            layout,
            header,
            content,
            viewport: Size::new(width, height),
            pointers: Vec::new(),
            next_pointer_id: 1,
            now_nanos: 0,
        };
        robot.perform_layout();
        robot
    }

    pub fn runtime(&self) -> &RuntimeHandle {
        &self.runtime
    }

    pub fn layout(&self) -> &RefreshLayout {
        &self.layout
    }

    pub fn header(&self) -> &RecordingHeader {
        &self.header
    }

    pub fn content(&self) -> &RecordingContent {
        &self.content
    }

    /// Runs a measure and layout pass at the viewport size.
    pub fn perform_layout(&self) {
        self.layout
            .measure(Constraints::tight(self.viewport.width, self.viewport.height));
        self.layout.layout();
    }

    /// Puts a finger down. The first press sends a down event; further
    /// presses send pointer-down events carrying every held pointer.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let id = self.next_pointer_id;
        self.next_pointer_id += 1;
        self.pointers.push(TouchPoint::new(id, Point::new(x, y)));
        let event = if self.pointers.len() == 1 {
            TouchEvent::single(TouchPhase::Down, id, Point::new(x, y))
        } else {
            TouchEvent::new(
                TouchPhase::PointerDown,
                self.pointers.len() - 1,
                self.pointers.iter().copied(),
            )
        };
        self.layout.dispatch_touch_event(&event)
    }

    /// Moves the only held pointer by a delta.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> bool {
        assert_eq!(
            self.pointers.len(),
            1,
            "move_by needs exactly one pointer down; use move_pointer_by"
        );
        let id = self.pointers[0].id;
        self.move_pointer_by(id, dx, dy)
    }

    /// Moves one held pointer by a delta; the move event carries every held
    /// pointer, as a host view would deliver it.
    pub fn move_pointer_by(&mut self, id: PointerId, dx: f32, dy: f32) -> bool {
        let index = self.pointer_index(id);
        let position = self.pointers[index].position;
        self.pointers[index].position = Point::new(position.x + dx, position.y + dy);
        let event = TouchEvent::new(TouchPhase::Move, index, self.pointers.iter().copied());
        self.layout.dispatch_touch_event(&event)
    }

    /// Lifts the only held pointer.
    pub fn release(&mut self) -> bool {
        assert_eq!(
            self.pointers.len(),
            1,
            "release needs exactly one pointer down; use lift_pointer"
        );
        let id = self.pointers[0].id;
        self.lift_pointer(id)
    }

    /// Lifts one pointer: an up event when it is the last, a pointer-up
    /// otherwise.
    pub fn lift_pointer(&mut self, id: PointerId) -> bool {
        let index = self.pointer_index(id);
        let event = if self.pointers.len() == 1 {
            let point = self.pointers[0];
            TouchEvent::single(TouchPhase::Up, point.id, point.position)
        } else {
            TouchEvent::new(TouchPhase::PointerUp, index, self.pointers.iter().copied())
        };
        let claimed = self.layout.dispatch_touch_event(&event);
        self.pointers.remove(index);
        claimed
    }

    /// Cancels the touch session, lifting every pointer.
    pub fn cancel(&mut self) -> bool {
        let event = TouchEvent::new(TouchPhase::Cancel, 0, self.pointers.iter().copied());
        self.pointers.clear();
        self.layout.dispatch_touch_event(&event)
    }

    /// Presses at the viewport's center top and pulls straight down in
    /// equal steps, leaving the finger on screen.
    pub fn pull(&mut self, raw_dy: f32, steps: usize) {
        let x = self.viewport.width / 2.0;
        self.press(x, 40.0);
        let step = raw_dy / steps as f32;
        for _ in 0..steps {
            self.move_by(0.0, step);
        }
    }

    /// Advances one display frame and pumps due timers and frame callbacks.
    pub fn advance_frame(&mut self) {
        self.now_nanos += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.now_nanos);
    }

    pub fn advance_frames(&mut self, count: u32) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Jumps the clock forward and pumps once; for skipping over timer
    /// delays without simulating every frame in between.
    pub fn advance_millis(&mut self, millis: u64) {
        self.now_nanos += millis * 1_000_000;
        self.runtime.drain_frame_callbacks(self.now_nanos);
    }

    /// Pumps frames until the runtime has no pending timers or frame
    /// callbacks.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..MAX_IDLE_FRAMES {
            if self.runtime.is_idle() {
                return;
            }
            self.advance_frame();
        }
        panic!("runtime still busy after {MAX_IDLE_FRAMES} frames");
    }

    fn pointer_index(&self, id: PointerId) -> usize {
        match self.pointers.iter().position(|pointer| pointer.id == id) {
            Some(index) => index,
            None => panic!("pointer {id} is not down"),
        }
    }
}
