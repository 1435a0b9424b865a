//! Shared gesture constants for touch handling on panels.
//!
//! # DPI Considerations
//!
//! These values are in logical (device-independent) pixels and milliseconds.
//! [`GestureConfig::for_density`] converts the distance threshold for hosts
//! that feed physical pixels.

use sheetkit_ui_graphics::Dp;

/// Drag threshold in logical pixels.
///
/// A touch has to move at least this far (Euclidean distance) from where it
/// went down before it counts as a drag. Anything shorter is a tap or hold.
pub const DRAG_THRESHOLD: f32 = 6.0;

/// Release speed, in logical pixels per millisecond, above which a drag
/// release is a flick rather than a settle.
pub const FLICK_SPEED_THRESHOLD: f32 = 0.5;

/// Tunable gesture thresholds. Defaults match the constants above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    pub drag_threshold: f32,
    pub flick_speed_threshold: f32,
}

impl GestureConfig {
    /// Thresholds for a host that reports positions in physical pixels.
    pub fn for_density(density: f32) -> Self {
        Self {
            drag_threshold: Dp(DRAG_THRESHOLD).to_px(density),
            flick_speed_threshold: Dp(FLICK_SPEED_THRESHOLD).to_px(density),
        }
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_flick_speed_threshold(mut self, threshold: f32) -> Self {
        self.flick_speed_threshold = threshold;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            flick_speed_threshold: FLICK_SPEED_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_scales_thresholds() {
        let config = GestureConfig::for_density(2.0);
        assert_eq!(config.drag_threshold, 12.0);
        assert_eq!(config.flick_speed_threshold, 1.0);
        assert_eq!(GestureConfig::for_density(1.0), GestureConfig::default());
    }
}
