//! Host callbacks.
//!
//! Every handler is optional. A missing handler is not the same as one that
//! declines: with no `on_resized` a resize is simply accepted, while a
//! handler can still return [`ResizeVerdict::Accept`] explicitly.

use std::fmt;
use std::rc::Rc;

/// Host's answer to a settled resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeVerdict {
    /// Keep the new height.
    Accept,
    /// Snap back to the height the drag started from, right away.
    Reject,
    /// Snap back after the given number of milliseconds.
    RejectAfter(u64),
}

impl ResizeVerdict {
    /// Maps a millisecond delay, `0` meaning accept.
    pub fn from_delay(delay_ms: u64) -> Self {
        if delay_ms == 0 {
            ResizeVerdict::Accept
        } else {
            ResizeVerdict::RejectAfter(delay_ms)
        }
    }

    pub fn is_rejected(&self) -> bool {
        !matches!(self, ResizeVerdict::Accept)
    }
}

impl From<bool> for ResizeVerdict {
    fn from(reject: bool) -> Self {
        if reject {
            ResizeVerdict::Reject
        } else {
            ResizeVerdict::Accept
        }
    }
}

/// Called with the panel's live top while it is being dragged.
pub type ResizingHandler = Rc<dyn Fn(f32)>;
/// Called with `(height, top)` once a resize settles.
pub type ResizedHandler = Rc<dyn Fn(f32, f32) -> ResizeVerdict>;
/// Called on a downward flick. Returning `true` delays the height restore
/// until the host's closing animation is done.
pub type FlickDownHandler = Rc<dyn Fn() -> bool>;
/// Called with the panel height on open/close.
pub type HeightHandler = Rc<dyn Fn(f32)>;

/// Callbacks of a [`PanelHeightController`](super::PanelHeightController).
#[derive(Clone, Default)]
pub struct PanelCallbacks {
    pub on_resizing: Option<ResizingHandler>,
    pub on_resized: Option<ResizedHandler>,
    pub on_flick_down: Option<FlickDownHandler>,
}

impl PanelCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_resizing(mut self, handler: impl Fn(f32) + 'static) -> Self {
        self.on_resizing = Some(Rc::new(handler));
        self
    }

    pub fn on_resized(mut self, handler: impl Fn(f32, f32) -> ResizeVerdict + 'static) -> Self {
        self.on_resized = Some(Rc::new(handler));
        self
    }

    pub fn on_flick_down(mut self, handler: impl Fn() -> bool + 'static) -> Self {
        self.on_flick_down = Some(Rc::new(handler));
        self
    }
}

impl fmt::Debug for PanelCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelCallbacks")
            .field("on_resizing", &self.on_resizing.is_some())
            .field("on_resized", &self.on_resized.is_some())
            .field("on_flick_down", &self.on_flick_down.is_some())
            .finish()
    }
}

/// Callbacks of a [`BottomPanel`](super::BottomPanel).
///
/// The resize handlers are forwarded to the wrapped controller.
#[derive(Clone, Default)]
pub struct BottomPanelCallbacks {
    pub panel: PanelCallbacks,
    pub on_open: Option<HeightHandler>,
    pub on_close: Option<HeightHandler>,
    /// Asked to close the panel after it was dragged or flicked shut.
    pub on_auto_close: Option<Rc<dyn Fn()>>,
}

impl BottomPanelCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_panel(mut self, panel: PanelCallbacks) -> Self {
        self.panel = panel;
        self
    }

    pub fn on_open(mut self, handler: impl Fn(f32) + 'static) -> Self {
        self.on_open = Some(Rc::new(handler));
        self
    }

    pub fn on_close(mut self, handler: impl Fn(f32) + 'static) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }

    pub fn on_auto_close(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_auto_close = Some(Rc::new(handler));
        self
    }
}

impl fmt::Debug for BottomPanelCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomPanelCallbacks")
            .field("panel", &self.panel)
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_auto_close", &self.on_auto_close.is_some())
            .finish()
    }
}
