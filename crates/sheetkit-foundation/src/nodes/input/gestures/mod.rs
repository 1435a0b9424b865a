pub mod drag;
pub mod fling;
pub mod touch;

pub use drag::{DragGesture, DragSignal};
pub use fling::FlickSample;
pub use touch::{TouchSignal, TouchTracker};
