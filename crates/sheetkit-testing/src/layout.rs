//! In-memory renderer for panel tests.

use sheetkit_ui::{HeightConstraints, LayoutProbe, Viewport};
use sheetkit_ui_graphics::{EdgeInsets, Rect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A [`LayoutProbe`] that lays a single panel out the way a browser would:
/// the requested height is clamped by the min/max constraints, and the panel
/// is anchored to the bottom of the viewport while open and parked just below
/// it while closed.
///
/// Content height is tracked separately from the panel height so the
/// trailing-content overflow shrinks as the panel grows.
#[derive(Debug)]
pub struct FakeLayout {
    viewport_height: Cell<f32>,
    safe_area: Cell<EdgeInsets>,
    width: Cell<f32>,
    height: Cell<f32>,
    content_height: Cell<f32>,
    open: Cell<bool>,
    attached: Cell<bool>,
    applied: RefCell<Vec<HeightConstraints>>,
}

impl FakeLayout {
    /// An open panel of `height` whose content is exactly as tall.
    pub fn new(viewport_height: f32, height: f32) -> Rc<Self> {
        Rc::new(Self {
            viewport_height: Cell::new(viewport_height),
            safe_area: Cell::new(EdgeInsets::default()),
            width: Cell::new(390.0),
            height: Cell::new(height),
            content_height: Cell::new(height),
            open: Cell::new(true),
            attached: Cell::new(true),
            applied: RefCell::new(Vec::new()),
        })
    }

    /// A panel that starts laid out below the viewport.
    pub fn closed(viewport_height: f32, height: f32) -> Rc<Self> {
        let layout = Self::new(viewport_height, height);
        layout.open.set(false);
        layout
    }

    pub fn with_content_height(self: Rc<Self>, content_height: f32) -> Rc<Self> {
        self.content_height.set(content_height);
        self
    }

    pub fn with_safe_area(self: Rc<Self>, safe_area: EdgeInsets) -> Rc<Self> {
        self.safe_area.set(safe_area);
        self
    }

    pub fn height(&self) -> f32 {
        self.height.get()
    }

    pub fn top(&self) -> f32 {
        if self.open.get() {
            self.viewport_height.get() - self.height.get()
        } else {
            self.viewport_height.get()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Simulates a window resize. The controller still has to be told.
    pub fn set_viewport_height(&self, height: f32) {
        self.viewport_height.set(height);
    }

    pub fn set_content_height(&self, height: f32) {
        self.content_height.set(height);
    }

    /// Detaches the panel; every geometry read fails until re-attached.
    pub fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    /// Every constraint set pushed by the engine, oldest first.
    pub fn applied(&self) -> Vec<HeightConstraints> {
        self.applied.borrow().clone()
    }

    pub fn last_applied(&self) -> Option<HeightConstraints> {
        self.applied.borrow().last().copied()
    }
}

impl LayoutProbe for FakeLayout {
    fn current_rect(&self) -> Option<Rect> {
        if !self.attached.get() {
            return None;
        }
        Some(Rect::new(
            0.0,
            self.top(),
            self.width.get(),
            self.height.get(),
        ))
    }

    fn content_overflow(&self) -> Option<f32> {
        self.attached
            .get()
            .then(|| self.content_height.get() - self.height.get())
    }

    fn viewport(&self) -> Option<Viewport> {
        Some(Viewport::new(self.viewport_height.get()).with_safe_area(self.safe_area.get()))
    }

    fn apply_height(&self, constraints: &HeightConstraints) {
        match constraints.clamped_height(Some(self.viewport_height.get())) {
            Some(height) if height.is_finite() => self.height.set(height),
            _ => log::warn!("fake layout ignored unresolvable height {constraints:?}"),
        }
        self.open.set(constraints.open);
        self.applied.borrow_mut().push(*constraints);
    }
}
