//! Foundation elements for sheetkit: touch input and gesture recognisers

pub mod gesture_constants;
pub mod nodes;

pub use gesture_constants::*;
pub use nodes::input::gestures::{
    DragGesture, DragSignal, FlickSample, TouchSignal, TouchTracker,
};
pub use nodes::input::{PointerEventKind, TouchEvent};

pub mod prelude {
    pub use crate::gesture_constants::GestureConfig;
    pub use crate::nodes::input::gestures::{
        DragGesture, DragSignal, FlickSample, TouchSignal, TouchTracker,
    };
    pub use crate::nodes::input::prelude::*;
}
