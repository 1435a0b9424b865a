//! Testing utilities and harness for sheetkit

pub mod layout;
pub mod recorder;
pub mod robot;
pub mod testing;

pub use layout::FakeLayout;
pub use recorder::{EventKind, EventRecorder};
pub use robot::TouchRobot;
pub use testing::PanelTestRule;

pub mod prelude {
    pub use crate::layout::FakeLayout;
    pub use crate::recorder::{EventKind, EventRecorder};
    pub use crate::robot::TouchRobot;
    pub use crate::testing::PanelTestRule;
}
