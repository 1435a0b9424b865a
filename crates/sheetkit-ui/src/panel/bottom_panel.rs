//! Bottom sheet built on the height controller.
//!
//! The host owns the open flag and drives it through [`BottomPanel::set_open`];
//! the panel turns each flip into host callbacks and group events in a fixed
//! order. Dragging an open panel below `auto_close_height`, or flicking it
//! down, asks the host to close it.
//!
//! Ordering guarantees, for a host that closes one panel and opens another in
//! the same pass:
//! - `on_close` and the group `Closed` event fire synchronously.
//! - `on_open` fires synchronously, the group `Opened` event on the next
//!   scheduler turn.
//!
//! so group listeners always see the displaced panel close first.

use super::callbacks::{BottomPanelCallbacks, PanelCallbacks, ResizeVerdict};
use super::config::BottomPanelConfig;
use super::group::{PanelEvent, PanelGroup, PanelId};
use super::height_controller::{DragPhase, PanelHeightController};
use crate::drag_handle::TouchDragHandle;
use crate::layout_probe::LayoutProbe;
use sheetkit_core::PendingTasks;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Default)]
struct OpenState {
    is_open: bool,
    /// Top edge of the panel while it is hidden below the viewport.
    top_when_closed: Option<f32>,
    /// Set when the next close was requested by the panel itself.
    auto_closed: bool,
    pending: PendingTasks,
}

struct BottomPanelInner<D> {
    id: PanelId,
    group: PanelGroup<D>,
    controller: PanelHeightController,
    config: BottomPanelConfig<D>,
    callbacks: BottomPanelCallbacks,
    state: RefCell<OpenState>,
}

pub struct BottomPanel<D: Clone + 'static = ()> {
    inner: Rc<BottomPanelInner<D>>,
}

impl<D: Clone + 'static> Clone for BottomPanel<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<D: Clone + 'static> BottomPanel<D> {
    /// Creates a closed panel registered with `group`.
    pub fn new(
        probe: Rc<dyn LayoutProbe>,
        group: &PanelGroup<D>,
        config: BottomPanelConfig<D>,
        callbacks: BottomPanelCallbacks,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<BottomPanelInner<D>>| {
            let controller = PanelHeightController::new(
                probe,
                group.scheduler().clone(),
                config.panel.clone(),
                controller_callbacks(weak),
            );
            controller.set_open(false);
            BottomPanelInner {
                id: group.allocate_panel_id(),
                group: group.clone(),
                controller,
                config,
                callbacks,
                state: RefCell::new(OpenState::default()),
            }
        });
        log::debug!("created bottom {}", inner.id);
        Self { inner }
    }

    fn from_weak(weak: &Weak<BottomPanelInner<D>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn id(&self) -> PanelId {
        self.inner.id
    }

    pub fn controller(&self) -> &PanelHeightController {
        &self.inner.controller
    }

    pub fn config(&self) -> &BottomPanelConfig<D> {
        &self.inner.config
    }

    pub fn app_data(&self) -> &D {
        &self.inner.config.app_data
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open
    }

    pub fn top_when_closed(&self) -> Option<f32> {
        self.inner.state.borrow().top_when_closed
    }

    /// A drag handle wired to this panel's controller.
    pub fn drag_handle(&self) -> TouchDragHandle {
        TouchDragHandle::new(self.inner.controller.clone())
    }

    /// First layout pass.
    pub fn mount(&self) {
        self.inner.controller.mount();
        let Some(rect) = self.inner.controller.rendered_rect() else {
            return;
        };
        let mut state = self.inner.state.borrow_mut();
        let hidden_top = if state.is_open {
            rect.bottom()
        } else {
            rect.top()
        };
        state.top_when_closed = Some(hidden_top);
    }

    /// Applies the host's open flag. Repeating the current value does nothing.
    pub fn set_open(&self, open: bool) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.is_open == open {
                return;
            }
            state.is_open = open;
        }
        if open {
            self.open();
        } else {
            self.close();
        }
    }

    pub fn viewport_resized(&self) {
        self.inner.controller.viewport_resized();
    }

    /// Tears the panel down; nothing it scheduled fires afterwards.
    pub fn dispose(&self) {
        self.inner.controller.dispose();
        let pending = std::mem::take(&mut self.inner.state.borrow_mut().pending);
        drop(pending);
    }

    fn open(&self) {
        // Still laid out closed here, so this is the hidden position.
        if let Some(rect) = self.inner.controller.rendered_rect() {
            self.inner.state.borrow_mut().top_when_closed = Some(rect.top());
        }
        self.inner.controller.set_open(true);
        let height = self.measured_height();
        log::debug!("{} opened at {height}px", self.inner.id);
        if let Some(on_open) = &self.inner.callbacks.on_open {
            on_open(height);
        }

        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.group.scheduler().post(move || {
            let Some(panel) = Self::from_weak(&weak) else {
                return;
            };
            let height = panel.measured_height();
            let top = panel.top_when_closed().unwrap_or(0.0) - height;
            panel.emit(|panel, app_data| PanelEvent::Opened {
                panel,
                height,
                top,
                app_data,
            });
        });
        self.inner.state.borrow_mut().pending.push(handle);
    }

    fn close(&self) {
        let (auto_closed, unannounced) = {
            let mut state = self.inner.state.borrow_mut();
            (
                std::mem::take(&mut state.auto_closed),
                std::mem::take(&mut state.pending),
            )
        };
        // An open that has not been announced yet stays unannounced.
        drop(unannounced);
        self.inner.controller.set_open(false);
        let height = self.measured_height();
        log::debug!(
            "{} closed at {height}px{}",
            self.inner.id,
            if auto_closed { " (auto)" } else { "" }
        );
        if !auto_closed {
            if let Some(on_close) = &self.inner.callbacks.on_close {
                on_close(height);
            }
        }
        let top = self.top_when_closed().unwrap_or(0.0) + height;
        self.emit(|panel, app_data| PanelEvent::Closed {
            panel,
            height,
            top,
            app_data,
        });
    }

    fn auto_close(&self) {
        self.inner.state.borrow_mut().auto_closed = true;
        log::debug!("{} requesting auto-close", self.inner.id);
        if let Some(on_auto_close) = &self.inner.callbacks.on_auto_close {
            on_auto_close();
        }
    }

    fn can_auto_close(&self) -> bool {
        self.is_open()
            && self.inner.config.auto_close_height.is_some()
            && self.inner.callbacks.on_auto_close.is_some()
    }

    fn handle_resizing(&self, top: f32) {
        if let Some(on_resizing) = &self.inner.callbacks.panel.on_resizing {
            on_resizing(top);
        }
        self.emit(|panel, app_data| PanelEvent::Resizing {
            panel,
            top,
            app_data,
        });
    }

    fn handle_resized(&self, height: f32, top: f32) -> ResizeVerdict {
        let released = self.inner.controller.phase() == DragPhase::Resolving;
        let below_threshold = self
            .inner
            .config
            .auto_close_height
            .is_some_and(|threshold| height <= threshold);
        if released && below_threshold && self.can_auto_close() {
            self.auto_close();
            // Put the size back once the close transition has run.
            return ResizeVerdict::RejectAfter(self.inner.config.panel.transition_delay_ms());
        }

        let verdict = self
            .inner
            .callbacks
            .panel
            .on_resized
            .as_ref()
            .map(|on_resized| on_resized(height, top))
            .unwrap_or(ResizeVerdict::Accept);
        if !verdict.is_rejected() {
            self.emit(|panel, app_data| PanelEvent::Resized {
                panel,
                height,
                top,
                app_data,
            });
        }
        verdict
    }

    fn handle_flick_down(&self) -> bool {
        if self.can_auto_close() {
            self.auto_close();
            return true;
        }
        self.inner
            .callbacks
            .panel
            .on_flick_down
            .as_ref()
            .is_some_and(|on_flick_down| on_flick_down())
    }

    fn measured_height(&self) -> f32 {
        let controller = &self.inner.controller;
        controller
            .rendered_rect()
            .map(|rect| rect.height)
            .or_else(|| controller.height().as_px())
            .unwrap_or(0.0)
    }

    fn emit(&self, event: impl FnOnce(PanelId, D) -> PanelEvent<D>) {
        self.inner
            .group
            .emit(event(self.inner.id, self.inner.config.app_data.clone()));
    }
}

/// Controller callbacks that route through the panel. They hold the panel
/// weakly and go quiet once it is dropped.
fn controller_callbacks<D: Clone + 'static>(weak: &Weak<BottomPanelInner<D>>) -> PanelCallbacks {
    let resizing = weak.clone();
    let resized = weak.clone();
    let flick_down = weak.clone();
    PanelCallbacks::new()
        .on_resizing(move |top| {
            if let Some(panel) = BottomPanel::from_weak(&resizing) {
                panel.handle_resizing(top);
            }
        })
        .on_resized(move |height, top| {
            BottomPanel::from_weak(&resized)
                .map(|panel| panel.handle_resized(height, top))
                .unwrap_or(ResizeVerdict::Accept)
        })
        .on_flick_down(move || {
            BottomPanel::from_weak(&flick_down).is_some_and(|panel| panel.handle_flick_down())
        })
}

impl<D: Clone + fmt::Debug + 'static> fmt::Debug for BottomPanel<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("BottomPanel")
            .field("id", &self.inner.id)
            .field("open", &state.is_open)
            .field("top_when_closed", &state.top_when_closed)
            .field("app_data", &self.inner.config.app_data)
            .field("controller", &self.inner.controller)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/bottom_panel_tests.rs"]
mod tests;
