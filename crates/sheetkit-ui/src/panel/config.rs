//! Panel configuration.

use crate::layout_probe::PanelHeight;
use sheetkit_foundation::GestureConfig;

/// Default duration of the host's height transition.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Extra wait after a transition before geometry is read back.
pub const ANIMATION_SLACK_MS: u64 = 50;

/// Gap kept between a fully expanded panel and the top of the viewport.
pub const DEFAULT_VIEWPORT_MARGIN: f32 = 20.0;

/// Delay before an open panel re-validates its size after a window resize.
pub const VIEWPORT_SETTLE_DELAY_MS: u64 = 500;

/// Released heights at or below this close a bottom panel.
pub const DEFAULT_AUTO_CLOSE_HEIGHT: f32 = 110.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
    /// Hard lower clamp. Drags below it are ignored.
    pub min_height: f32,
    /// Explicit upper clamp, combined with the content and viewport bounds.
    pub max_height: Option<f32>,
    pub min_initial_height: Option<f32>,
    pub max_initial_height: Option<f32>,
    /// Drops the content-derived bound from the max height.
    pub height_can_exceed_contents: bool,
    /// Target of an upward flick.
    pub flick_up_height: PanelHeight,
    /// Track release velocity and snap on flicks.
    pub flick_gestures: bool,
    pub animation_duration_ms: u64,
    pub viewport_margin: f32,
    pub settle_delay_ms: u64,
    pub gestures: GestureConfig,
}

impl PanelConfig {
    pub fn with_min_height(mut self, min_height: f32) -> Self {
        self.min_height = min_height;
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn with_initial_height_range(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.min_initial_height = min;
        self.max_initial_height = max;
        self
    }

    pub fn with_height_can_exceed_contents(mut self, enabled: bool) -> Self {
        self.height_can_exceed_contents = enabled;
        self
    }

    pub fn with_flick_up_height(mut self, height: impl Into<PanelHeight>) -> Self {
        self.flick_up_height = height.into();
        self
    }

    pub fn with_flick_gestures(mut self, enabled: bool) -> Self {
        self.flick_gestures = enabled;
        self
    }

    pub fn with_animation_duration(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    pub fn with_viewport_margin(mut self, margin: f32) -> Self {
        self.viewport_margin = margin;
        self
    }

    pub fn with_gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    /// How long to wait for a height transition to finish.
    pub fn transition_delay_ms(&self) -> u64 {
        self.animation_duration_ms + ANIMATION_SLACK_MS
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_height: 0.0,
            max_height: None,
            min_initial_height: None,
            max_initial_height: None,
            height_can_exceed_contents: false,
            flick_up_height: PanelHeight::FULL_VIEWPORT,
            flick_gestures: false,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            settle_delay_ms: VIEWPORT_SETTLE_DELAY_MS,
            gestures: GestureConfig::default(),
        }
    }
}

/// Configuration of a [`BottomPanel`](super::BottomPanel).
///
/// `app_data` is attached to every event the panel sends to its group.
#[derive(Clone, Debug, PartialEq)]
pub struct BottomPanelConfig<D = ()> {
    pub panel: PanelConfig,
    pub auto_close_height: Option<f32>,
    pub app_data: D,
}

impl<D> BottomPanelConfig<D> {
    pub fn new(app_data: D) -> Self {
        Self {
            panel: PanelConfig::default().with_flick_gestures(true),
            auto_close_height: Some(DEFAULT_AUTO_CLOSE_HEIGHT),
            app_data,
        }
    }

    pub fn with_panel(mut self, panel: PanelConfig) -> Self {
        self.panel = panel;
        self
    }

    pub fn with_auto_close_height(mut self, height: Option<f32>) -> Self {
        self.auto_close_height = height;
        self
    }
}

impl<D: Default> Default for BottomPanelConfig<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}
