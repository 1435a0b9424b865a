use crate::layout::FakeLayout;
use crate::recorder::{EventKind, EventRecorder};
use sheetkit_core::Scheduler;
use sheetkit_ui::{
    BottomPanel, BottomPanelConfig, PanelConfig, PanelGroup, PanelHeightController, Subscription,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Headless harness for panel tests.
///
/// Owns the virtual clock, one panel group and a recorder that observes the
/// group. Panels created through the rule share all three.
pub struct PanelTestRule<D: Clone + 'static = ()> {
    scheduler: Scheduler,
    group: PanelGroup<D>,
    recorder: EventRecorder,
    _subscription: Subscription,
}

impl<D: Clone + 'static> PanelTestRule<D> {
    pub fn new() -> Self {
        let scheduler = Scheduler::new();
        let group = PanelGroup::new(scheduler.clone());
        let recorder = EventRecorder::new();
        let subscription = recorder.observe(&group);
        Self {
            scheduler,
            group,
            recorder,
            _subscription: subscription,
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn group(&self) -> &PanelGroup<D> {
        &self.group
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    /// Resizable panel over `layout`, mounted, reporting to the recorder.
    pub fn resizable_panel(
        &self,
        layout: &Rc<FakeLayout>,
        config: PanelConfig,
    ) -> PanelHeightController {
        let controller = PanelHeightController::new(
            layout.clone(),
            self.scheduler.clone(),
            config,
            self.recorder.panel_callbacks(),
        );
        controller.mount();
        controller
    }

    /// Bottom panel over `layout`, mounted and closed. Host callbacks log
    /// into the recorder; auto-close closes the panel like a host would.
    pub fn bottom_panel(
        &self,
        layout: &Rc<FakeLayout>,
        config: BottomPanelConfig<D>,
    ) -> BottomPanel<D> {
        let closer: Rc<RefCell<Option<BottomPanel<D>>>> = Rc::default();
        let recorder = self.recorder.clone();
        let slot = closer.clone();
        let callbacks = self.recorder.bottom_panel_callbacks().on_auto_close(move || {
            recorder.push(EventKind::AutoClose);
            let panel = slot.borrow().clone();
            if let Some(panel) = panel {
                panel.set_open(false);
            }
        });
        let panel = BottomPanel::new(layout.clone(), &self.group, config, callbacks);
        panel.mount();
        // Panel and slot keep each other alive for the rest of the test.
        *closer.borrow_mut() = Some(panel.clone());
        panel
    }

    /// Moves the clock forward, running whatever falls due.
    pub fn advance_time(&self, millis: u64) {
        self.scheduler.advance_by(millis);
    }

    /// Runs work posted for the current instant.
    pub fn run_pending(&self) {
        self.scheduler.run_pending();
    }

    pub fn run_until_idle(&self) {
        self.scheduler.run_until_idle(1_000);
    }
}

impl<D: Clone + 'static> Default for PanelTestRule<D> {
    fn default() -> Self {
        Self::new()
    }
}
