//! Shared gesture constants for consistent touch handling.
//!
//! These values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor. Current implementation uses
//! fixed values that work well for typical desktop/mobile displays.

/// Touch slop in logical pixels.
///
/// A pointer must move more than this distance from its initial press
/// position before the engine treats the gesture as a drag. Until then,
/// events pass through so the content view can still recognize taps.
///
/// Value of 8.0 was chosen as a reasonable touch slop that:
/// - Is large enough to ignore minor finger jitter on touch screens
/// - Is small enough to feel responsive for intentional drags
/// - Matches common platform conventions (Android uses ~8dp for ViewConfiguration.TOUCH_SLOP)
pub const TOUCH_SLOP: f32 = 8.0;

/// Scale factor applied to raw vertical pointer deltas before they reach the
/// spinner. The indicator moves at half finger speed, which keeps the pull
/// feeling weighty even before tension damping kicks in.
pub const DRAG_RATE: f32 = 0.5;
