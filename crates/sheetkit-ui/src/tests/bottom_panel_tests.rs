use super::*;
use crate::panel::group::Subscription;
use crate::test_support::StubLayout;
use sheetkit_core::Scheduler;
use std::cell::Cell;

type Events = Rc<RefCell<Vec<PanelEvent<&'static str>>>>;

fn record(group: &PanelGroup<&'static str>) -> (Events, Subscription) {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let subscription = group.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    (events, subscription)
}

fn kinds(events: &Events) -> Vec<(&'static str, PanelId)> {
    events
        .borrow()
        .iter()
        .map(|event| {
            let kind = match event {
                PanelEvent::Opened { .. } => "opened",
                PanelEvent::Closed { .. } => "closed",
                PanelEvent::Resizing { .. } => "resizing",
                PanelEvent::Resized { .. } => "resized",
            };
            (kind, event.panel())
        })
        .collect()
}

fn panel(
    group: &PanelGroup<&'static str>,
    name: &'static str,
    callbacks: BottomPanelCallbacks,
) -> (BottomPanel<&'static str>, Rc<StubLayout>) {
    let layout = StubLayout::closed(800.0, 300.0, 300.0);
    let panel = BottomPanel::new(
        layout.clone(),
        group,
        BottomPanelConfig::new(name),
        callbacks,
    );
    panel.mount();
    (panel, layout)
}

/// Auto-close handler that closes `slot`'s panel, as a host would.
fn closing_host(
    slot: &Rc<RefCell<Option<BottomPanel<&'static str>>>>,
    count: &Rc<Cell<usize>>,
) -> impl Fn() {
    let (slot, count) = (slot.clone(), count.clone());
    move || {
        count.set(count.get() + 1);
        if let Some(panel) = slot.borrow().as_ref() {
            panel.set_open(false);
        }
    }
}

#[test]
fn mount_captures_hidden_position() {
    let group = PanelGroup::new(Scheduler::new());
    let (panel, layout) = panel(&group, "layers", BottomPanelCallbacks::new());
    assert!(!panel.is_open());
    assert_eq!(panel.top_when_closed(), Some(800.0));
    assert_eq!(layout.last_applied().map(|c| c.open), Some(false));
}

#[test]
fn open_notifies_host_then_group_on_next_turn() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let opened_with = Rc::new(Cell::new(None));
    let sink = opened_with.clone();
    let (panel, layout) = panel(
        &group,
        "layers",
        BottomPanelCallbacks::new().on_open(move |height| sink.set(Some(height))),
    );

    panel.set_open(true);
    assert_eq!(opened_with.get(), Some(300.0));
    assert_eq!(layout.top(), 500.0);
    assert!(events.borrow().is_empty());

    group.scheduler().run_pending();
    assert_eq!(
        *events.borrow(),
        vec![PanelEvent::Opened {
            panel: panel.id(),
            height: 300.0,
            top: 500.0,
            app_data: "layers",
        }]
    );

    // Same value again is not a transition.
    panel.set_open(true);
    group.scheduler().run_pending();
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn close_is_reported_synchronously() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let closes = Rc::new(Cell::new(0));
    let sink = closes.clone();
    let (panel, _) = panel(
        &group,
        "layers",
        BottomPanelCallbacks::new().on_close(move |_| sink.set(sink.get() + 1)),
    );
    panel.set_open(true);
    group.scheduler().run_pending();

    panel.set_open(false);
    assert_eq!(closes.get(), 1);
    assert_eq!(
        events.borrow().last(),
        Some(&PanelEvent::Closed {
            panel: panel.id(),
            height: 300.0,
            top: 1_100.0,
            app_data: "layers",
        })
    );
}

#[test]
fn displaced_panel_closes_before_the_new_one_opens() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let (search, _) = panel(&group, "search", BottomPanelCallbacks::new());
    let (layers, _) = panel(&group, "layers", BottomPanelCallbacks::new());

    search.set_open(true);
    group.scheduler().run_pending();

    // Host swaps panels in one pass, opening first.
    layers.set_open(true);
    search.set_open(false);
    group.scheduler().run_pending();

    assert_eq!(
        kinds(&events),
        vec![
            ("opened", search.id()),
            ("closed", search.id()),
            ("opened", layers.id()),
        ]
    );
}

#[test]
fn open_then_close_in_one_pass_is_never_announced_as_open() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let (panel, _) = panel(&group, "layers", BottomPanelCallbacks::new());
    panel.set_open(true);
    panel.set_open(false);
    group.scheduler().run_pending();
    assert_eq!(kinds(&events), vec![("closed", panel.id())]);
}

#[test]
fn live_and_settled_resizes_reach_the_group() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let (panel, _) = panel(&group, "layers", BottomPanelCallbacks::new());
    panel.set_open(true);
    group.scheduler().run_pending();
    events.borrow_mut().clear();

    let controller = panel.controller();
    controller.drag_start();
    group.scheduler().advance_by(1_000);
    controller.drag(100.0);
    controller.drag_end();

    assert_eq!(
        *events.borrow(),
        vec![
            PanelEvent::Resizing {
                panel: panel.id(),
                top: 600.0,
                app_data: "layers",
            },
            PanelEvent::Resized {
                panel: panel.id(),
                height: 200.0,
                top: 600.0,
                app_data: "layers",
            },
        ]
    );
}

#[test]
fn rejected_resize_is_not_broadcast() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let callbacks = BottomPanelCallbacks::new()
        .with_panel(PanelCallbacks::new().on_resized(|_, _| ResizeVerdict::Reject));
    let (panel, layout) = panel(&group, "layers", callbacks);
    panel.set_open(true);
    group.scheduler().run_pending();

    let controller = panel.controller();
    controller.drag_start();
    group.scheduler().advance_by(1_000);
    controller.drag(100.0);
    controller.drag_end();

    assert!(!kinds(&events).contains(&("resized", panel.id())));
    assert_eq!(layout.height.get(), 300.0);
}

#[test]
fn dragging_below_threshold_auto_closes() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let slot = Rc::new(RefCell::new(None));
    let auto_closes = Rc::new(Cell::new(0));
    let closes = Rc::new(Cell::new(0));
    let resized = Rc::new(Cell::new(0));
    let (close_sink, resized_sink) = (closes.clone(), resized.clone());
    let callbacks = BottomPanelCallbacks::new()
        .with_panel(PanelCallbacks::new().on_resized(move |_, _| {
            resized_sink.set(resized_sink.get() + 1);
            ResizeVerdict::Accept
        }))
        .on_close(move |_| close_sink.set(close_sink.get() + 1))
        .on_auto_close(closing_host(&slot, &auto_closes));
    let (panel, layout) = panel(&group, "layers", callbacks);
    *slot.borrow_mut() = Some(panel.clone());
    panel.set_open(true);
    group.scheduler().run_pending();

    let controller = panel.controller();
    controller.drag_start();
    group.scheduler().advance_by(1_000);
    controller.drag(200.0);
    controller.drag_end();

    assert_eq!(auto_closes.get(), 1);
    assert!(!panel.is_open());
    assert_eq!(closes.get(), 0, "auto-close suppresses on_close");
    assert_eq!(resized.get(), 0);
    assert!(kinds(&events).contains(&("closed", panel.id())));
    assert_eq!(layout.height.get(), 100.0);

    // Size comes back once the close transition is over.
    group.scheduler().advance_by(350);
    assert_eq!(layout.height.get(), 300.0);

    // The suppression applies once.
    panel.set_open(true);
    panel.set_open(false);
    assert_eq!(closes.get(), 1);
}

#[test]
fn flick_down_on_open_panel_auto_closes() {
    let group = PanelGroup::new(Scheduler::new());
    let slot = Rc::new(RefCell::new(None));
    let auto_closes = Rc::new(Cell::new(0));
    let callbacks = BottomPanelCallbacks::new().on_auto_close(closing_host(&slot, &auto_closes));
    let (panel, layout) = panel(&group, "layers", callbacks);
    *slot.borrow_mut() = Some(panel.clone());
    panel.set_open(true);

    let controller = panel.controller();
    controller.drag_start();
    group.scheduler().advance_by(10);
    controller.drag(60.0);
    controller.drag_end();

    assert_eq!(auto_closes.get(), 1);
    assert!(!panel.is_open());
    group.scheduler().advance_by(350);
    assert_eq!(layout.height.get(), 300.0);
}

fn flick_down_short_panel(
    group: &PanelGroup<&'static str>,
    callbacks: BottomPanelCallbacks,
) -> BottomPanel<&'static str> {
    let layout = StubLayout::closed(800.0, 100.0, 100.0);
    let panel = BottomPanel::new(layout, group, BottomPanelConfig::new("layers"), callbacks);
    panel.mount();
    panel
}

fn flick_down(panel: &BottomPanel<&'static str>, scheduler: &Scheduler) {
    let controller = panel.controller();
    controller.drag_start();
    scheduler.advance_by(10);
    controller.drag(30.0);
    controller.drag_end();
}

#[test]
fn flick_down_below_threshold_auto_closes_once() {
    let group = PanelGroup::new(Scheduler::new());
    let auto_closes = Rc::new(Cell::new(0));
    let flick_downs = Rc::new(Cell::new(0));
    let (auto_sink, flick_sink) = (auto_closes.clone(), flick_downs.clone());
    // Host that closes on a later turn.
    let callbacks = BottomPanelCallbacks::new()
        .with_panel(PanelCallbacks::new().on_flick_down(move || {
            flick_sink.set(flick_sink.get() + 1);
            false
        }))
        .on_auto_close(move || auto_sink.set(auto_sink.get() + 1));
    let panel = flick_down_short_panel(&group, callbacks);
    panel.set_open(true);

    flick_down(&panel, group.scheduler());
    assert_eq!(auto_closes.get(), 1);
    assert_eq!(flick_downs.get(), 0);
}

#[test]
fn flick_down_below_threshold_with_closing_host_skips_flick_handler() {
    let group = PanelGroup::new(Scheduler::new());
    let slot = Rc::new(RefCell::new(None));
    let auto_closes = Rc::new(Cell::new(0));
    let flick_downs = Rc::new(Cell::new(0));
    let flick_sink = flick_downs.clone();
    let callbacks = BottomPanelCallbacks::new()
        .with_panel(PanelCallbacks::new().on_flick_down(move || {
            flick_sink.set(flick_sink.get() + 1);
            false
        }))
        .on_auto_close(closing_host(&slot, &auto_closes));
    let panel = flick_down_short_panel(&group, callbacks);
    *slot.borrow_mut() = Some(panel.clone());
    panel.set_open(true);

    flick_down(&panel, group.scheduler());
    assert_eq!(auto_closes.get(), 1);
    assert_eq!(flick_downs.get(), 0);
    assert!(!panel.is_open());
}

#[test]
fn no_auto_close_without_threshold() {
    let group = PanelGroup::new(Scheduler::new());
    let auto_closes = Rc::new(Cell::new(0));
    let sink = auto_closes.clone();
    let layout = StubLayout::closed(800.0, 300.0, 300.0);
    let panel = BottomPanel::new(
        layout.clone(),
        &group,
        BottomPanelConfig::new("layers").with_auto_close_height(None),
        BottomPanelCallbacks::new().on_auto_close(move || sink.set(sink.get() + 1)),
    );
    panel.mount();
    panel.set_open(true);

    let controller = panel.controller();
    controller.drag_start();
    group.scheduler().advance_by(1_000);
    controller.drag(200.0);
    controller.drag_end();

    assert_eq!(auto_closes.get(), 0);
    assert!(panel.is_open());
    assert_eq!(controller.height(), crate::PanelHeight::Px(100.0));
}

#[test]
fn dispose_drops_pending_announcement() {
    let group = PanelGroup::new(Scheduler::new());
    let (events, _subscription) = record(&group);
    let (panel, _) = panel(&group, "layers", BottomPanelCallbacks::new());
    panel.set_open(true);
    panel.dispose();
    group.scheduler().run_pending();
    assert!(events.borrow().is_empty());
}
