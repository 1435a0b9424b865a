use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_for_tasks = Rc::clone(&log);
    let make = move |label: &'static str| {
        let log = Rc::clone(&log_for_tasks);
        Box::new(move || log.borrow_mut().push(label)) as Box<dyn FnOnce()>
    };
    (log, make)
}

#[test]
fn tasks_run_in_due_order() {
    let scheduler = Scheduler::new();
    let (log, make) = recorder();

    scheduler.schedule(20, make("late")).detach();
    scheduler.schedule(5, make("early")).detach();
    scheduler.post(make("now")).detach();

    assert_eq!(scheduler.advance_by(10), 2);
    assert_eq!(*log.borrow(), vec!["now", "early"]);
    assert_eq!(scheduler.now_ms(), 10);

    scheduler.advance_by(10);
    assert_eq!(*log.borrow(), vec!["now", "early", "late"]);
}

#[test]
fn same_instant_tasks_keep_fifo_order() {
    let scheduler = Scheduler::new();
    let (log, make) = recorder();

    scheduler.post(make("first")).detach();
    scheduler.post(make("second")).detach();
    scheduler.post(make("third")).detach();

    scheduler.run_pending();
    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn dropping_handle_cancels_task() {
    let scheduler = Scheduler::new();
    let (log, make) = recorder();

    let handle = scheduler.schedule(5, make("dropped"));
    assert!(handle.is_pending());
    drop(handle);

    assert!(!scheduler.has_pending());
    scheduler.advance_by(100);
    assert!(log.borrow().is_empty());
}

#[test]
fn explicit_cancel_by_id() {
    let scheduler = Scheduler::new();
    let (log, make) = recorder();

    let handle = scheduler.schedule(5, make("cancelled"));
    let id = handle.id().expect("fresh handle has an id");
    handle.detach();

    assert!(scheduler.is_pending(id));
    assert!(scheduler.cancel(id));
    assert!(!scheduler.cancel(id));
    scheduler.advance_by(10);
    assert!(log.borrow().is_empty());
}

#[test]
fn tasks_scheduled_from_tasks_run_in_same_advance() {
    let scheduler = Scheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let inner_scheduler = scheduler.clone();
    let inner_log = Rc::clone(&log);
    scheduler
        .schedule(5, move || {
            inner_log.borrow_mut().push(inner_scheduler.now_ms());
            let nested_log = Rc::clone(&inner_log);
            let nested_scheduler = inner_scheduler.clone();
            inner_scheduler
                .schedule(3, move || {
                    nested_log.borrow_mut().push(nested_scheduler.now_ms());
                })
                .detach();
        })
        .detach();

    scheduler.advance_by(10);
    assert_eq!(*log.borrow(), vec![5, 8]);
    assert_eq!(scheduler.now_ms(), 10);
}

#[test]
fn run_until_idle_jumps_clock() {
    let scheduler = Scheduler::new();
    let (log, make) = recorder();

    scheduler.schedule(350, make("animation")).detach();
    scheduler.schedule(500, make("settle")).detach();

    assert_eq!(scheduler.next_due_ms(), Some(350));
    assert_eq!(scheduler.run_until_idle(16), 2);
    assert_eq!(scheduler.now_ms(), 500);
    assert_eq!(*log.borrow(), vec!["animation", "settle"]);
}

#[test]
fn pending_tasks_cancel_all() {
    let scheduler = Scheduler::new();
    let (log, make) = recorder();
    let mut pending = PendingTasks::new();

    pending.push(scheduler.schedule(1, make("a")));
    pending.push(scheduler.schedule(2, make("b")));
    assert_eq!(pending.len(), 2);

    scheduler.advance_by(1);
    assert_eq!(pending.len(), 1);

    pending.cancel_all();
    assert!(pending.is_empty());
    scheduler.advance_by(10);
    assert_eq!(*log.borrow(), vec!["a"]);
}
