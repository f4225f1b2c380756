//! Pull-to-refresh gesture engine.
//!
//! [`RefreshLayout`] sits between raw touch input and a scrollable content
//! view. It interprets drag gestures into a refresh lifecycle
//! (reset → pull → loading → complete → reset), damps the pull with a
//! tension curve past the trigger distance, and settles the indicator with
//! frame-driven tween animations. The host supplies the views (through
//! [`RefreshHeader`] and [`RefreshContent`]), feeds touch events in, and
//! pumps the shared [`retug_core::RuntimeHandle`] once per display frame.
//!
//! Refresh completion is reported back by the host at an arbitrary later
//! time via [`RefreshLayout::refresh_complete`]; until then the engine keeps
//! the header pinned open at the trigger distance.

pub mod constants;

mod auto_scroll;
mod header;
mod refresh_layout;
mod spinner;

pub use header::{RefreshContent, RefreshHeader};
pub use refresh_layout::RefreshLayout;
pub use spinner::{RefreshState, Spinner, SpinnerUpdate};
