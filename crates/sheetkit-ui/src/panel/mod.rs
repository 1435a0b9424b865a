mod bottom_panel;
mod callbacks;
mod config;
mod group;
mod height_controller;

pub use bottom_panel::BottomPanel;
pub use callbacks::{
    BottomPanelCallbacks, FlickDownHandler, HeightHandler, PanelCallbacks, ResizeVerdict,
    ResizedHandler, ResizingHandler,
};
pub use config::*;
pub use group::{PanelEvent, PanelGroup, PanelId, Subscription};
pub use height_controller::{DragPhase, PanelHeightController};
