//! Pure geometry data for sheetkit
//!
//! Points, rectangles and inset values shared by the gesture layer
//! and the panel engine. Nothing in here knows about rendering.

mod geometry;
mod unit;

pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Rect};
    pub use crate::unit::Dp;
}
