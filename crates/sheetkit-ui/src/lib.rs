//! Panels for sheetkit: the resizable-panel gesture and layout engine.
//!
//! [`PanelHeightController`] is the state machine behind every resizable
//! surface. [`BottomPanel`] adds host-driven open/close semantics on top of
//! it and reports to a shared [`PanelGroup`]. [`TouchDragHandle`] connects
//! raw touch input to a controller.
//!
//! Nothing here renders. Geometry comes in through [`LayoutProbe`], which the
//! host's rendering layer implements.

pub mod drag_handle;
pub mod layout_probe;
pub mod panel;

#[cfg(test)]
mod test_support;

pub use drag_handle::TouchDragHandle;
pub use layout_probe::{HeightConstraints, LayoutProbe, PanelHeight, Viewport};
pub use panel::{
    BottomPanel, BottomPanelCallbacks, BottomPanelConfig, DragPhase, PanelCallbacks,
    PanelConfig, PanelEvent, PanelGroup, PanelHeightController, PanelId, ResizeVerdict,
    Subscription,
};

pub mod prelude {
    pub use crate::drag_handle::TouchDragHandle;
    pub use crate::layout_probe::*;
    pub use crate::panel::*;
    pub use sheetkit_foundation::prelude::*;
    pub use sheetkit_ui_graphics::prelude::*;
}
