//! Timing constants for the refresh lifecycle.
//!
//! Durations are frame-time milliseconds, matched to the feel of the
//! platform pull-to-refresh implementations this engine descends from.

use retug_animation::{AnimationSpec, Easing};

/// Settle animation back to the rest position, used on release below the
/// trigger distance and when a completed refresh retracts.
pub const SCROLL_TO_TOP_SPEC: AnimationSpec =
    AnimationSpec::tween(800, Easing::LinearOutSlowInEasing);

/// Shorter settle onto the trigger distance, used when a release leaves the
/// header pulled past its loading height and for the auto-refresh pull-out.
pub const SCROLL_TO_REFRESH_SPEC: AnimationSpec =
    AnimationSpec::tween(250, Easing::LinearOutSlowInEasing);

/// How long the completed state stays visible before the header retracts.
pub const SHOW_COMPLETE_DELAY_MILLIS: u64 = 500;

/// Default delay before an auto-refresh starts pulling the header out,
/// giving a freshly created host view time to settle.
pub const DEFAULT_AUTO_REFRESH_DELAY_MILLIS: u64 = 500;
