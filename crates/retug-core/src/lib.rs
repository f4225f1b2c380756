//! Core runtime services for retug.
//!
//! Hosts embed a [`RuntimeHandle`] and pump it once per display frame via
//! [`RuntimeHandle::drain_frame_callbacks`]. Everything above this crate
//! (gesture tracking, spinner animation, timers) is driven from that single
//! entry point, which keeps the whole engine deterministic under test.

pub mod collections;
pub mod frame_clock;
pub mod runtime;
pub mod time;
pub mod timer;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, RuntimeHandle, TimerId};
pub use time::{Clock, MonotonicClock};
pub use timer::TimerRegistration;
