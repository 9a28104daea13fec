//! Defaults, sizing, and styling constants for the carousel.

use std::time::Duration;

/// Resize handler coalescing delay in milliseconds
pub const RESIZE_DEBOUNCE_MS: u64 = 250;

/// Slide transition duration in milliseconds
pub const DURATION_MS: u64 = 200;

/// Minimum horizontal drag distance (px) that navigates
pub const THRESHOLD: f64 = 20.0;

/// Interval between animation ticks (~60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Nav button side length
#[cfg(feature = "controls")]
pub const BUTTON_SIZE: f32 = 28.0;

/// Chevron glyph size
#[cfg(feature = "controls")]
pub const ICON_FONT: f32 = 18.0;

/// Page dot radius
#[cfg(feature = "controls")]
pub const DOT_RADIUS: f64 = 4.0;

/// Horizontal distance between dot centers
#[cfg(feature = "controls")]
pub const DOT_SPACING: f64 = 16.0;

/// Gap between control elements
#[cfg(feature = "controls")]
pub const GAP: f32 = 8.0;
