//! Stand-in renderer for the demo: a single panel docked to the bottom of a
//! phone-sized viewport.

use sheetkit_ui::{HeightConstraints, LayoutProbe, Viewport};
use sheetkit_ui_graphics::{EdgeInsets, Rect};
use std::cell::Cell;
use std::rc::Rc;

pub const SCREEN_WIDTH: f32 = 390.0;
pub const SCREEN_HEIGHT: f32 = 844.0;

pub struct DockedLayout {
    name: &'static str,
    height: Cell<f32>,
    content_height: f32,
    open: Cell<bool>,
    safe_area: EdgeInsets,
}

impl DockedLayout {
    pub fn new(name: &'static str, height: f32, content_height: f32) -> Rc<Self> {
        Rc::new(Self {
            name,
            height: Cell::new(height),
            content_height,
            open: Cell::new(false),
            // Notch and home indicator.
            safe_area: EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0),
        })
    }

    fn top(&self) -> f32 {
        if self.open.get() {
            SCREEN_HEIGHT - self.height.get()
        } else {
            SCREEN_HEIGHT
        }
    }
}

impl LayoutProbe for DockedLayout {
    fn current_rect(&self) -> Option<Rect> {
        Some(Rect::new(0.0, self.top(), SCREEN_WIDTH, self.height.get()))
    }

    fn content_overflow(&self) -> Option<f32> {
        Some(self.content_height - self.height.get())
    }

    fn viewport(&self) -> Option<Viewport> {
        Some(Viewport::new(SCREEN_HEIGHT).with_safe_area(self.safe_area))
    }

    fn apply_height(&self, constraints: &HeightConstraints) {
        if let Some(height) = constraints.clamped_height(Some(SCREEN_HEIGHT)) {
            self.height.set(height);
        }
        self.open.set(constraints.open);
        log::debug!(
            "[{}] layout: height={:.0} top={:.0}{}",
            self.name,
            self.height.get(),
            self.top(),
            if constraints.animate { " (animated)" } else { "" }
        );
    }
}
