use retug_ui_layout::Point;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

/// Lifecycle phase of a [`TouchEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// First pointer went down.
    Down,
    /// An additional pointer went down while others are held.
    PointerDown,
    Move,
    /// A non-final pointer went up; at least one pointer remains.
    PointerUp,
    /// The last pointer went up.
    Up,
    Cancel,
}

/// One pointer's contribution to a multi-touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: PointerId,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Multi-pointer touch event with consumption tracking.
///
/// Consumption is shared across clones via `Rc<Cell>`, so the refresh layer
/// consuming an event is visible to every handler holding a copy. This is
/// how the engine claims a drag without the content view also reacting.
#[derive(Clone, Debug)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Index into `pointers` of the pointer that triggered this event.
    pub action_index: usize,
    pub pointers: SmallVec<[TouchPoint; 2]>,
    consumed: Rc<Cell<bool>>,
}

impl TouchEvent {
    pub fn new(
        phase: TouchPhase,
        action_index: usize,
        pointers: impl IntoIterator<Item = TouchPoint>,
    ) -> Self {
        Self {
            phase,
            action_index,
            pointers: pointers.into_iter().collect(),
            consumed: Rc::new(Cell::new(false)),
        }
    }

    /// Convenience constructor for single-pointer events.
    pub fn single(phase: TouchPhase, id: PointerId, position: Point) -> Self {
        Self::new(phase, 0, [TouchPoint::new(id, position)])
    }

    /// Mark this event as consumed, preventing other handlers from
    /// processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    /// Check if this event has been consumed by another handler.
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// The pointer that triggered this event, if the action index is valid.
    pub fn action_pointer(&self) -> Option<&TouchPoint> {
        self.pointers.get(self.action_index)
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|pointer| pointer.id == id)
    }

    pub fn position_of(&self, id: PointerId) -> Option<Point> {
        self.find_pointer_index(id)
            .map(|index| self.pointers[index].position)
    }

    /// Creates a cancel event carrying this event's pointers, with a fresh
    /// consumption flag so the synthesized cancel is delivered regardless of
    /// what happened to the source event.
    pub fn to_cancel(&self) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            action_index: self.action_index,
            pointers: self.pointers.clone(),
            consumed: Rc::new(Cell::new(false)),
        }
    }
}
