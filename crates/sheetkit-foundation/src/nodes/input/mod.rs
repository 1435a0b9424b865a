pub mod gestures;
pub mod types;

pub use types::{PointerEventKind, TouchEvent};

pub mod prelude {
    pub use super::types::{PointerEventKind, TouchEvent};
}
