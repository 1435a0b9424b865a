//! Renderer stand-in shared by the unit tests.

use crate::layout_probe::{HeightConstraints, LayoutProbe, Viewport};
use sheetkit_ui_graphics::Rect;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Renderer stand-in: clamps like a `max-height` style and anchors the panel
/// to the bottom of the viewport.
pub(crate) struct StubLayout {
    pub viewport_height: Cell<f32>,
    pub content_height: Cell<f32>,
    pub height: Cell<f32>,
    pub open: Cell<bool>,
    pub attached: Cell<bool>,
    pub applied: RefCell<Vec<HeightConstraints>>,
}

impl StubLayout {
    pub fn new(viewport_height: f32, height: f32, content_height: f32) -> Rc<Self> {
        Rc::new(Self {
            viewport_height: Cell::new(viewport_height),
            content_height: Cell::new(content_height),
            height: Cell::new(height),
            open: Cell::new(true),
            attached: Cell::new(true),
            applied: RefCell::new(Vec::new()),
        })
    }

    /// Same as [`new`](Self::new), laid out below the viewport.
    pub fn closed(viewport_height: f32, height: f32, content_height: f32) -> Rc<Self> {
        let layout = Self::new(viewport_height, height, content_height);
        layout.open.set(false);
        layout
    }

    pub fn top(&self) -> f32 {
        if self.open.get() {
            self.viewport_height.get() - self.height.get()
        } else {
            self.viewport_height.get()
        }
    }

    pub fn last_applied(&self) -> Option<HeightConstraints> {
        self.applied.borrow().last().copied()
    }
}

impl LayoutProbe for StubLayout {
    fn current_rect(&self) -> Option<Rect> {
        self.attached
            .get()
            .then(|| Rect::new(0.0, self.top(), 400.0, self.height.get()))
    }

    fn content_overflow(&self) -> Option<f32> {
        self.attached
            .get()
            .then(|| self.content_height.get() - self.height.get())
    }

    fn viewport(&self) -> Option<Viewport> {
        Some(Viewport::new(self.viewport_height.get()))
    }

    fn apply_height(&self, constraints: &HeightConstraints) {
        if let Some(height) = constraints.clamped_height(Some(self.viewport_height.get())) {
            self.height.set(height);
        }
        self.open.set(constraints.open);
        self.applied.borrow_mut().push(*constraints);
    }
}
