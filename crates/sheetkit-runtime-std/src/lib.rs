//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `sheetkit-core`. A host event loop
//! constructs a [`StdRuntime`] and calls [`StdRuntime::pump`] once per
//! iteration so that deferred panel work runs on wall-clock time.

use std::fmt;

use sheetkit_core::{Clock, Scheduler};
use web_time::{Duration, Instant};

/// Clock implementation backed by [`web_time`], which maps to `std::time`
/// on native targets and to `performance.now()` on the web.
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

/// Drives a [`Scheduler`] from any [`Clock`].
pub struct ClockDriver<C: Clock> {
    clock: C,
    origin: C::Instant,
    offset_ms: u64,
    scheduler: Scheduler,
}

impl<C: Clock> ClockDriver<C> {
    /// Starts driving `scheduler`; the scheduler's current time is treated
    /// as the clock's `now`.
    pub fn new(clock: C, scheduler: Scheduler) -> Self {
        let origin = clock.now();
        let offset_ms = scheduler.now_ms();
        Self {
            clock,
            origin,
            offset_ms,
            scheduler,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.offset_ms
            .saturating_add(self.clock.elapsed_millis(self.origin))
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Advances the scheduler to the clock's elapsed time and runs what fell
    /// due. Returns the number of tasks that ran.
    pub fn pump(&self) -> usize {
        let elapsed = self.elapsed_ms();
        let ran = self.scheduler.advance_to(elapsed);
        if ran > 0 {
            log::trace!("pumped {ran} task(s) at {elapsed}ms");
        }
        ran
    }

    /// Time until the next task falls due, if any. Hosts can use this as
    /// their event loop wait timeout.
    pub fn time_until_next_task(&self) -> Option<Duration> {
        let due = self.scheduler.next_due_ms()?;
        let elapsed = self.elapsed_ms();
        Some(Duration::from_millis(due.saturating_sub(elapsed)))
    }
}

/// Convenience container bundling the standard clock and a scheduler.
pub struct StdRuntime {
    driver: ClockDriver<StdClock>,
}

impl StdRuntime {
    /// Creates a new standard runtime instance with a fresh scheduler.
    pub fn new() -> Self {
        Self {
            driver: ClockDriver::new(StdClock, Scheduler::new()),
        }
    }

    /// Returns a handle to the scheduler shared by every panel of the host.
    pub fn scheduler(&self) -> Scheduler {
        self.driver.scheduler().clone()
    }

    /// Runs deferred work that fell due since the last call.
    pub fn pump(&self) -> usize {
        self.driver.pump()
    }

    pub fn time_until_next_task(&self) -> Option<Duration> {
        self.driver.time_until_next_task()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", self.driver.scheduler())
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
