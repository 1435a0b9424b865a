//! Core runtime for the sheetkit panel engine.
//!
//! sheetkit is single threaded: gesture handling, layout reads and deferred
//! work all happen on the UI thread. This crate owns the pieces that every
//! other crate shares, namely the [`Scheduler`] used to sequence work after
//! transitions and the [`Clock`] abstraction a host uses to drive it.

pub mod collections;
pub mod platform;
pub mod scheduler;

pub use platform::Clock;
pub use scheduler::{PendingTasks, Scheduler, TaskHandle, TaskId};

pub mod prelude {
    pub use crate::platform::Clock;
    pub use crate::scheduler::{PendingTasks, Scheduler, TaskHandle};
}
