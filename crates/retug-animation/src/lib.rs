//! Animation primitives for retug.
//!
//! The engine never animates continuously on its own. Every settle movement
//! is a [`ScrollSession`]: a one-shot tween from the current spinner offset
//! to a target, sampled once per frame by the runtime pump.

mod animation;

pub use animation::*;
