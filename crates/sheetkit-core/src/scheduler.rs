//! Deferred task scheduling on a virtual millisecond clock.
//!
//! Everything in sheetkit runs on the UI thread. Work that has to wait for a
//! CSS-style transition to finish, or that must be observed after the current
//! event pass, is queued here instead of on raw timers. The host advances the
//! clock (see `sheetkit-runtime-std` for a wall-clock driver), and tests
//! advance it by hand.
//!
//! Tasks due at the same instant run in the order they were scheduled, so a
//! zero-delay task always runs after all work done synchronously in the pass
//! that scheduled it.

use crate::collections::map::HashMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

pub type TaskId = u64;

type Task = Box<dyn FnOnce() + 'static>;

struct SchedulerInner {
    now_ms: Cell<u64>,
    next_id: Cell<TaskId>,
    // Keyed by (due time, id); ids are monotonic so ties keep FIFO order.
    queue: RefCell<BTreeMap<(u64, TaskId), Task>>,
    due_by_id: RefCell<HashMap<TaskId, u64>>,
}

impl SchedulerInner {
    fn cancel(&self, id: TaskId) -> bool {
        let due = self.due_by_id.borrow_mut().remove(&id);
        match due {
            Some(due) => {
                // Drop the closure outside the borrow; it may own handles that
                // cancel other tasks when dropped.
                let task = self.queue.borrow_mut().remove(&(due, id));
                drop(task);
                log::trace!("cancelled task {id} (due at {due}ms)");
                true
            }
            None => false,
        }
    }

    fn pop_due(&self, until_ms: u64) -> Option<(u64, TaskId, Task)> {
        let mut queue = self.queue.borrow_mut();
        let (&(due, id), _) = queue.iter().next()?;
        if due > until_ms {
            return None;
        }
        let task = queue.remove(&(due, id))?;
        drop(queue);
        self.due_by_id.borrow_mut().remove(&id);
        Some((due, id, task))
    }
}

/// Cooperative single-threaded task queue.
///
/// Cloning a `Scheduler` yields another handle to the same queue.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                now_ms: Cell::new(0),
                next_id: Cell::new(1),
                queue: RefCell::new(BTreeMap::new()),
                due_by_id: RefCell::new(HashMap::default()),
            }),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.now_ms.get()
    }

    /// Queues `task` to run once `delay_ms` has elapsed.
    ///
    /// The task is cancelled when the returned handle is dropped, unless the
    /// handle is [detached](TaskHandle::detach).
    pub fn schedule(&self, delay_ms: u64, task: impl FnOnce() + 'static) -> TaskHandle {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let due = self.now_ms().saturating_add(delay_ms);
        self.inner
            .queue
            .borrow_mut()
            .insert((due, id), Box::new(task));
        self.inner.due_by_id.borrow_mut().insert(id, due);
        log::trace!("scheduled task {id} for {due}ms");
        TaskHandle {
            scheduler: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Queues `task` to run after the current pass.
    pub fn post(&self, task: impl FnOnce() + 'static) -> TaskHandle {
        self.schedule(0, task)
    }

    /// Cancels a pending task. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.inner.cancel(id)
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.inner.due_by_id.borrow().contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.inner.due_by_id.borrow().len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Due time of the earliest pending task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.inner
            .queue
            .borrow()
            .keys()
            .next()
            .map(|&(due, _)| due)
    }

    /// Runs every task that is already due without moving the clock.
    pub fn run_pending(&self) -> usize {
        self.advance_to(self.now_ms())
    }

    /// Moves the clock forward by `delta_ms`, running tasks as they fall due.
    pub fn advance_by(&self, delta_ms: u64) -> usize {
        self.advance_to(self.now_ms().saturating_add(delta_ms))
    }

    /// Moves the clock to `target_ms`, running tasks as they fall due.
    ///
    /// Tasks scheduled by a running task are picked up in the same call if
    /// they fall due before `target_ms`. The clock never moves backwards.
    pub fn advance_to(&self, target_ms: u64) -> usize {
        let mut ran = 0;
        while let Some((due, id, task)) = self.inner.pop_due(target_ms) {
            if due > self.now_ms() {
                self.inner.now_ms.set(due);
            }
            log::trace!("running task {id} at {due}ms");
            task();
            ran += 1;
        }
        if target_ms > self.now_ms() {
            self.inner.now_ms.set(target_ms);
        }
        ran
    }

    /// Jumps the clock from task to task until the queue is empty.
    ///
    /// Stops after `max_tasks` to guard against tasks that keep rescheduling
    /// themselves.
    pub fn run_until_idle(&self, max_tasks: usize) -> usize {
        let mut ran = 0;
        while ran < max_tasks {
            let Some(due) = self.next_due_ms() else {
                break;
            };
            let Some((due, id, task)) = self.inner.pop_due(due) else {
                break;
            };
            if due > self.now_ms() {
                self.inner.now_ms.set(due);
            }
            log::trace!("running task {id} at {due}ms");
            task();
            ran += 1;
        }
        if ran == max_tasks && self.has_pending() {
            log::warn!("scheduler still busy after {max_tasks} tasks");
        }
        ran
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms())
            .field("pending", &self.pending_count())
            .finish()
    }
}

/// Owning handle to a scheduled task.
///
/// Dropping the handle cancels the task if it has not run yet, which is how
/// panels make sure nothing fires after teardown.
pub struct TaskHandle {
    scheduler: Weak<SchedulerInner>,
    id: Option<TaskId>,
}

impl TaskHandle {
    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns true while the task is still queued.
    pub fn is_pending(&self) -> bool {
        match (self.id, self.scheduler.upgrade()) {
            (Some(id), Some(inner)) => inner.due_by_id.borrow().contains_key(&id),
            _ => false,
        }
    }

    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    /// Lets the task run even though the handle goes away.
    pub fn detach(mut self) {
        self.id = None;
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(inner) = self.scheduler.upgrade() {
                inner.cancel(id);
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// A small set of outstanding task handles owned by one component.
///
/// Finished handles are pruned on insert; dropping the set cancels whatever
/// is still queued.
#[derive(Default, Debug)]
pub struct PendingTasks {
    handles: SmallVec<[TaskHandle; 4]>,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: TaskHandle) {
        self.handles.retain(|handle| handle.is_pending());
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.iter().filter(|h| h.is_pending()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cancel_all(&mut self) {
        // Dropping each handle cancels it.
        self.handles.clear();
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
