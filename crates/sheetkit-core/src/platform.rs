//! Platform abstraction traits for sheetkit runtime services.
//!
//! The scheduler keeps its own virtual time. A host feeds it real time
//! through a [`Clock`] so the engine itself never touches `std::time`.

/// Provides timing information for the runtime.
pub trait Clock {
    /// Instant type produced by this clock implementation.
    type Instant: Copy;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
