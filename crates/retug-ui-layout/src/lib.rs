//! Layout contracts for retug.
//!
//! The engine does not render anything itself. It measures and places host
//! views through the [`LayoutChild`] trait using the geometry types here,
//! all in logical pixels.

mod child;
mod constraints;
mod geometry;

pub use child::*;
pub use constraints::*;
pub use geometry::*;
