//! Input foundation for retug.
//!
//! Hosts translate their native pointer events into [`TouchEvent`] values
//! and feed them to the engine. The [`PointerTracker`] does the multi-touch
//! bookkeeping (active pointer, slop, re-targeting) the engine builds its
//! gesture decisions on.

pub mod gesture_constants;
mod scroll_boundary;
mod touch;
mod tracker;

pub use scroll_boundary::*;
pub use touch::*;
pub use tracker::*;
