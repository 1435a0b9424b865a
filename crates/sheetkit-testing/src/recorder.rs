//! Records host callbacks and group events into a single ordered log.

use sheetkit_ui::{
    BottomPanelCallbacks, PanelCallbacks, PanelEvent, PanelGroup, PanelId, ResizeVerdict,
    Subscription,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One observed notification.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    Open(f32),
    Close(f32),
    AutoClose,
    Resizing(f32),
    Resized(f32, f32),
    FlickDown,
    GroupOpened(PanelId, f32),
    GroupClosed(PanelId, f32),
    GroupResizing(PanelId, f32),
    GroupResized(PanelId, f32),
}

struct RecorderState {
    events: RefCell<Vec<EventKind>>,
    verdict: Cell<ResizeVerdict>,
    delay_restore_on_flick: Cell<bool>,
}

/// Shared log. Clones append to the same list.
#[derive(Clone)]
pub struct EventRecorder {
    state: Rc<RecorderState>,
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRecorder {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RecorderState {
                events: RefCell::new(Vec::new()),
                verdict: Cell::new(ResizeVerdict::Accept),
                delay_restore_on_flick: Cell::new(false),
            }),
        }
    }

    /// Answer returned from the recorded `on_resized` handler.
    pub fn set_verdict(&self, verdict: ResizeVerdict) {
        self.state.verdict.set(verdict);
    }

    /// Answer returned from the recorded `on_flick_down` handler.
    pub fn set_delay_restore_on_flick(&self, delay: bool) {
        self.state.delay_restore_on_flick.set(delay);
    }

    pub fn push(&self, event: EventKind) {
        self.state.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<EventKind> {
        self.state.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<EventKind> {
        std::mem::take(&mut *self.state.events.borrow_mut())
    }

    pub fn count(&self, matches: impl Fn(&EventKind) -> bool) -> usize {
        self.state
            .events
            .borrow()
            .iter()
            .filter(|event| matches(event))
            .count()
    }

    pub fn clear(&self) {
        self.state.events.borrow_mut().clear();
    }

    /// Controller callbacks that log into this recorder.
    pub fn panel_callbacks(&self) -> PanelCallbacks {
        let (resizing, resized, flick) = (self.clone(), self.clone(), self.clone());
        PanelCallbacks::new()
            .on_resizing(move |top| resizing.push(EventKind::Resizing(top)))
            .on_resized(move |height, top| {
                resized.push(EventKind::Resized(height, top));
                resized.state.verdict.get()
            })
            .on_flick_down(move || {
                flick.push(EventKind::FlickDown);
                flick.state.delay_restore_on_flick.get()
            })
    }

    /// Bottom panel callbacks that log into this recorder. `on_auto_close`
    /// is left to the caller since closing is the host's decision.
    pub fn bottom_panel_callbacks(&self) -> BottomPanelCallbacks {
        let (open, close) = (self.clone(), self.clone());
        BottomPanelCallbacks::new()
            .with_panel(self.panel_callbacks())
            .on_open(move |height| open.push(EventKind::Open(height)))
            .on_close(move |height| close.push(EventKind::Close(height)))
    }

    /// Logs every event of `group` until the subscription is dropped.
    pub fn observe<D: 'static>(&self, group: &PanelGroup<D>) -> Subscription {
        let recorder = self.clone();
        group.subscribe(move |event| {
            recorder.push(match *event {
                PanelEvent::Opened { panel, top, .. } => EventKind::GroupOpened(panel, top),
                PanelEvent::Closed { panel, top, .. } => EventKind::GroupClosed(panel, top),
                PanelEvent::Resizing { panel, top, .. } => EventKind::GroupResizing(panel, top),
                PanelEvent::Resized { panel, height, .. } => EventKind::GroupResized(panel, height),
            })
        })
    }
}
