//! The boundary between the panel engine and the host's rendering layer.
//!
//! The engine never computes rendered geometry on its own. It hands the
//! renderer a [`HeightConstraints`] value and reads back whatever the layout
//! actually produced, since CSS-style clamping, transitions and safe areas
//! can make the two differ.

use sheetkit_ui_graphics::{EdgeInsets, Rect};

/// A panel height as requested by the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelHeight {
    /// Logical pixels.
    Px(f32),
    /// Percentage of the viewport height, `100.0` being the full viewport.
    ViewportPercent(f32),
}

impl PanelHeight {
    /// The flick-open target: as tall as the viewport allows.
    pub const FULL_VIEWPORT: PanelHeight = PanelHeight::ViewportPercent(100.0);

    /// Resolves to logical pixels. Viewport-relative heights need the
    /// viewport height.
    pub fn resolve(&self, viewport_height: Option<f32>) -> Option<f32> {
        match *self {
            PanelHeight::Px(px) => Some(px),
            PanelHeight::ViewportPercent(percent) => {
                viewport_height.map(|height| height * percent / 100.0)
            }
        }
    }

    pub fn as_px(&self) -> Option<f32> {
        match *self {
            PanelHeight::Px(px) => Some(px),
            PanelHeight::ViewportPercent(_) => None,
        }
    }
}

impl From<f32> for PanelHeight {
    fn from(px: f32) -> Self {
        PanelHeight::Px(px)
    }
}

/// Window geometry as reported by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub height: f32,
    pub safe_area: EdgeInsets,
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            safe_area: EdgeInsets::default(),
        }
    }

    pub fn with_safe_area(mut self, safe_area: EdgeInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Height left for a panel once `margin` and the top and bottom safe-area
    /// insets are taken off.
    pub fn usable_height(&self, margin: f32) -> f32 {
        (self.height - margin - self.safe_area.vertical_sum()).max(0.0)
    }
}

/// What the engine asks the renderer to lay out.
///
/// `height` may fall outside `[min_height, max_height]` while a drag or an
/// animation is in flight; the renderer is expected to clamp, the same way a
/// `max-height` style would.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightConstraints {
    pub height: PanelHeight,
    pub min_height: f32,
    pub max_height: Option<f32>,
    /// Whether the panel is shown. A closed panel sits below the viewport.
    pub open: bool,
    /// Whether the renderer should transition to the new height rather than
    /// jump.
    pub animate: bool,
}

impl HeightConstraints {
    /// The height a renderer following these constraints would produce.
    pub fn clamped_height(&self, viewport_height: Option<f32>) -> Option<f32> {
        let height = self.height.resolve(viewport_height)?;
        let height = match self.max_height {
            Some(max) => height.min(max),
            None => height,
        };
        Some(height.max(self.min_height))
    }
}

/// Geometry capability implemented by the rendering layer.
///
/// Every read may fail while the panel is not attached yet; the engine treats
/// `None` as "nothing to do this frame".
pub trait LayoutProbe {
    /// The panel's current rendered rectangle in viewport coordinates.
    fn current_rect(&self) -> Option<Rect>;

    /// How far the trailing child's content extends past its visible extent.
    /// Negative values are treated as zero.
    fn content_overflow(&self) -> Option<f32>;

    /// Current window geometry.
    fn viewport(&self) -> Option<Viewport>;

    /// Lay the panel out under `constraints`. Later reads must reflect it.
    fn apply_height(&self, constraints: &HeightConstraints);
}
