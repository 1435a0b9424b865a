//! Drag-to-resize state machine shared by every resizable panel.
//!
//! The controller owns the requested height and its bounds, and decides what
//! a drag release means: snap open, snap back, or settle where the finger
//! left the panel. Geometry always comes back from the [`LayoutProbe`]
//! rather than being computed here, so the values reported to the host are
//! what is actually on screen.
//!
//! Phases run `Idle → Dragging → Resolving → Idle`, passing through
//! `FlickingDown` when the release was a downward flick. Host callbacks are
//! never called while internal state is borrowed, so a callback may call back
//! into the controller.

use super::callbacks::{PanelCallbacks, ResizeVerdict};
use super::config::PanelConfig;
use crate::layout_probe::{HeightConstraints, LayoutProbe, PanelHeight};
use sheetkit_core::{PendingTasks, Scheduler, TaskHandle};
use sheetkit_foundation::FlickSample;
use sheetkit_ui_graphics::Rect;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// The drag ended and the release is being resolved.
    Resolving,
    /// A downward flick is being resolved. Size reports made in this phase
    /// only restate the start size.
    FlickingDown,
}

struct HeightState {
    phase: DragPhase,
    current_height: PanelHeight,
    max_height: Option<f32>,
    start_height: f32,
    start_top: f32,
    /// Whether `drag` was called since drag start.
    dragged: bool,
    flick: FlickSample,
    animating: bool,
    open: bool,
    /// Nothing is pushed to the renderer before the first measured layout.
    mounted: bool,
    disposed: bool,
    // Restores and deferred reports; cancelled on dispose.
    pending: PendingTasks,
    // Debounced window-resize re-validation.
    settle: Option<TaskHandle>,
}

struct ControllerInner {
    probe: Rc<dyn LayoutProbe>,
    scheduler: Scheduler,
    config: PanelConfig,
    callbacks: RefCell<PanelCallbacks>,
    state: RefCell<HeightState>,
}

/// Handle to a panel's height state machine. Clones share the same panel.
#[derive(Clone)]
pub struct PanelHeightController {
    inner: Rc<ControllerInner>,
}

impl PanelHeightController {
    pub fn new(
        probe: Rc<dyn LayoutProbe>,
        scheduler: Scheduler,
        config: PanelConfig,
        callbacks: PanelCallbacks,
    ) -> Self {
        let initial_height = config
            .min_initial_height
            .map(PanelHeight::Px)
            .unwrap_or(PanelHeight::Px(config.min_height));
        Self {
            inner: Rc::new(ControllerInner {
                probe,
                scheduler,
                callbacks: RefCell::new(callbacks),
                state: RefCell::new(HeightState {
                    phase: DragPhase::Idle,
                    current_height: initial_height,
                    max_height: config.max_height,
                    start_height: 0.0,
                    start_top: 0.0,
                    dragged: false,
                    flick: FlickSample::default(),
                    animating: false,
                    open: true,
                    mounted: false,
                    disposed: false,
                    pending: PendingTasks::new(),
                    settle: None,
                }),
                config,
            }),
        }
    }

    fn from_weak(weak: &Weak<ControllerInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn downgrade(&self) -> Weak<ControllerInner> {
        Rc::downgrade(&self.inner)
    }

    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.inner.scheduler
    }

    pub fn probe(&self) -> &Rc<dyn LayoutProbe> {
        &self.inner.probe
    }

    pub fn height(&self) -> PanelHeight {
        self.inner.state.borrow().current_height
    }

    pub fn min_height(&self) -> f32 {
        self.inner.config.min_height
    }

    pub fn max_height(&self) -> Option<f32> {
        self.inner.state.borrow().max_height
    }

    pub fn phase(&self) -> DragPhase {
        self.inner.state.borrow().phase
    }

    pub fn is_animating(&self) -> bool {
        self.inner.state.borrow().animating
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().open
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.borrow().disposed
    }

    /// Height snapshot of the current (or last) drag.
    pub fn start_height(&self) -> f32 {
        self.inner.state.borrow().start_height
    }

    /// Last sampled release speed, in logical px per ms.
    pub fn flick_speed(&self) -> f32 {
        self.inner.state.borrow().flick.speed
    }

    /// Rendered rectangle as currently laid out.
    pub fn rendered_rect(&self) -> Option<Rect> {
        self.inner.probe.current_rect()
    }

    pub fn has_pending_work(&self) -> bool {
        let state = self.inner.state.borrow();
        !state.pending.is_empty() || state.settle.as_ref().is_some_and(|h| h.is_pending())
    }

    /// Replaces the host callbacks.
    pub fn set_callbacks(&self, callbacks: PanelCallbacks) {
        *self.inner.callbacks.borrow_mut() = callbacks;
    }

    /// First layout pass: derives the max height and the initial height.
    ///
    /// The natural rendered height is pulled into the initial-height range
    /// first and then into the hard bounds.
    pub fn mount(&self) {
        let Some(rect) = self.inner.probe.current_rect() else {
            log::debug!("panel mount skipped: no geometry yet");
            return;
        };
        let config = &self.inner.config;
        let max_height = self.compute_max_height(self.measure_optimal_height());
        let mut initial = rect.height;
        if let Some(lower) = config.min_initial_height {
            initial = initial.max(lower);
        }
        if let Some(upper) = config.max_initial_height {
            initial = initial.min(upper);
        }
        let initial = clamp_height(initial, config.min_height, max_height);
        {
            let mut state = self.inner.state.borrow_mut();
            state.max_height = max_height;
            state.current_height = PanelHeight::Px(initial);
            state.mounted = true;
        }
        log::debug!("panel mounted at {initial}px (max {max_height:?})");
        self.apply();
    }

    /// Sets the height outside of a gesture, e.g. from host state.
    pub fn set_height(&self, height: PanelHeight) {
        self.inner.state.borrow_mut().current_height = height;
        self.apply();
    }

    /// Marks the panel as shown or hidden. Hiding cancels a pending window
    /// resize re-validation. May be called before [`mount`](Self::mount).
    pub fn set_open(&self, open: bool) {
        let cancelled = {
            let mut state = self.inner.state.borrow_mut();
            state.open = open;
            if open {
                None
            } else {
                state.settle.take()
            }
        };
        drop(cancelled);
        self.apply();
    }

    /// Recomputes the max height from the current content and viewport.
    pub fn update_max_height(&self) {
        let max_height = self.compute_max_height(self.measure_optimal_height());
        self.inner.state.borrow_mut().max_height = max_height;
        self.apply();
    }

    pub fn drag_start(&self) {
        if self.is_disposed() {
            return;
        }
        if !self.is_mounted() {
            self.mount();
        }
        let Some(rect) = self.inner.probe.current_rect() else {
            log::debug!("drag start ignored: no geometry");
            return;
        };
        // Let the panel grow far enough during the drag to reveal content
        // that is currently scrolled out of view.
        let optimal = rect.height + self.content_overflow();
        let max_height = self.compute_max_height(Some(optimal));
        let now = self.inner.scheduler.now_ms();
        let superseded = {
            let mut state = self.inner.state.borrow_mut();
            state.phase = DragPhase::Dragging;
            state.start_height = rect.height;
            state.start_top = rect.top();
            state.dragged = false;
            state.max_height = max_height;
            state.animating = false;
            if self.inner.config.flick_gestures {
                state.flick = FlickSample::start(now);
            }
            std::mem::take(&mut state.pending)
        };
        // A new drag supersedes restores still waiting from the last one.
        drop(superseded);
        log::trace!(
            "drag start at height {} top {} (max {max_height:?})",
            rect.height,
            rect.top()
        );
        self.apply();
    }

    /// Applies a drag step. `displacement` is measured from the drag start,
    /// positive toward the bottom of the screen.
    pub fn drag(&self, displacement: f32) {
        if !displacement.is_finite() {
            return;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != DragPhase::Dragging {
                return;
            }
            state.dragged = true;
            if self.inner.config.flick_gestures {
                let now = self.inner.scheduler.now_ms();
                state.flick.record(displacement, now);
            }
            let candidate = state.start_height - displacement;
            if !candidate.is_finite() || candidate < self.inner.config.min_height {
                return;
            }
            state.current_height = PanelHeight::Px(candidate);
        }
        self.apply();
        let Some(rect) = self.inner.probe.current_rect() else {
            return;
        };
        let handler = self.inner.callbacks.borrow().on_resizing.clone();
        if let Some(on_resizing) = handler {
            on_resizing(rect.top());
        }
    }

    pub fn drag_end(&self) {
        let (dragged, flick) = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != DragPhase::Dragging {
                return;
            }
            state.phase = DragPhase::Resolving;
            (state.dragged, state.flick)
        };
        if dragged {
            let config = &self.inner.config;
            if config.flick_gestures && flick.is_flick(config.gestures.flick_speed_threshold) {
                if flick.speed < 0.0 {
                    self.flick_up();
                } else {
                    self.flick_down();
                }
            } else {
                self.settle_release();
            }
        }
        self.inner.state.borrow_mut().phase = DragPhase::Idle;
    }

    /// Window size changed: re-derive the bounds and, for an open panel,
    /// re-report the size once the layout has settled.
    pub fn viewport_resized(&self) {
        if self.is_disposed() {
            return;
        }
        self.update_max_height();
        if !self.is_open() {
            return;
        }
        let weak = self.downgrade();
        let handle = self
            .inner
            .scheduler
            .schedule(self.inner.config.settle_delay_ms, move || {
                if let Some(controller) = Self::from_weak(&weak) {
                    controller.revalidate();
                }
            });
        // Replacing the handle cancels the previous re-validation.
        let previous = self.inner.state.borrow_mut().settle.replace(handle);
        drop(previous);
    }

    /// Tears the panel down. Pending restores and reports never run.
    pub fn dispose(&self) {
        let (pending, settle) = {
            let mut state = self.inner.state.borrow_mut();
            state.disposed = true;
            state.phase = DragPhase::Idle;
            state.animating = false;
            (std::mem::take(&mut state.pending), state.settle.take())
        };
        drop(pending);
        drop(settle);
        log::debug!("panel disposed");
    }

    fn flick_up(&self) {
        let target = self.inner.config.flick_up_height;
        {
            let mut state = self.inner.state.borrow_mut();
            state.current_height = target;
            state.animating = true;
        }
        log::debug!("flick up to {target:?}");
        self.apply();

        let weak = self.downgrade();
        let handle = self
            .inner
            .scheduler
            .schedule(self.inner.config.transition_delay_ms(), move || {
                if let Some(controller) = Self::from_weak(&weak) {
                    controller.finish_flick_up();
                }
            });
        self.inner.state.borrow_mut().pending.push(handle);
    }

    fn finish_flick_up(&self) {
        self.inner.state.borrow_mut().animating = false;
        self.apply();
        let Some(rect) = self.inner.probe.current_rect() else {
            return;
        };
        self.persist(rect.height);
        let verdict = self.report_resized(rect.height, rect.top());
        self.apply_verdict(verdict);
    }

    fn flick_down(&self) {
        let (start_height, start_top) = {
            let state = self.inner.state.borrow();
            (state.start_height, state.start_top)
        };
        self.inner.state.borrow_mut().phase = DragPhase::FlickingDown;
        log::debug!("flick down, reporting start height {start_height}");
        // The host learns the panel is back at its start size; what it does
        // with that (usually closing) is up to the flick-down handler.
        self.report_resized(start_height, start_top);
        let handler = self.inner.callbacks.borrow().on_flick_down.clone();
        let delay_restore = handler.is_some_and(|on_flick_down| on_flick_down());
        if delay_restore {
            self.schedule_restore(self.inner.config.transition_delay_ms());
        } else {
            self.restore_start_height();
        }
    }

    fn settle_release(&self) {
        let Some(rect) = self.inner.probe.current_rect() else {
            return;
        };
        let start_height = self.inner.state.borrow().start_height;
        if rect.height == start_height {
            return;
        }
        let verdict = self.report_resized(rect.height, rect.top());
        if !verdict.is_rejected() {
            self.persist(rect.height);
        }
        self.apply_verdict(verdict);
    }

    fn revalidate(&self) {
        let Some(rect) = self.inner.probe.current_rect() else {
            return;
        };
        if self.phase() == DragPhase::Idle {
            self.persist(rect.height);
        }
        log::debug!("re-validating size after window resize");
        self.report_resized(rect.height, rect.top());
    }

    fn apply_verdict(&self, verdict: ResizeVerdict) {
        match verdict {
            ResizeVerdict::Accept => self.update_max_height(),
            ResizeVerdict::Reject => self.restore_start_height(),
            ResizeVerdict::RejectAfter(delay_ms) => self.schedule_restore(delay_ms),
        }
    }

    fn report_resized(&self, height: f32, top: f32) -> ResizeVerdict {
        let handler = self.inner.callbacks.borrow().on_resized.clone();
        let verdict = handler
            .map(|on_resized| on_resized(height, top))
            .unwrap_or(ResizeVerdict::Accept);
        log::trace!("resized to {height} at {top}: {verdict:?}");
        verdict
    }

    fn schedule_restore(&self, delay_ms: u64) {
        let weak = self.downgrade();
        let handle = self.inner.scheduler.schedule(delay_ms, move || {
            if let Some(controller) = Self::from_weak(&weak) {
                controller.restore_start_height();
            }
        });
        self.inner.state.borrow_mut().pending.push(handle);
    }

    fn restore_start_height(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.current_height = PanelHeight::Px(state.start_height);
        }
        self.apply();
    }

    fn persist(&self, height: f32) {
        self.inner.state.borrow_mut().current_height = PanelHeight::Px(height);
    }

    fn content_overflow(&self) -> f32 {
        self.inner
            .probe
            .content_overflow()
            .filter(|overflow| overflow.is_finite())
            .unwrap_or(0.0)
            .max(0.0)
    }

    fn measure_optimal_height(&self) -> Option<f32> {
        let rect = self.inner.probe.current_rect()?;
        Some(rect.height + self.content_overflow())
    }

    /// Smallest of the content bound, the explicit max and the usable
    /// viewport height. Never below `min_height`.
    fn compute_max_height(&self, optimal: Option<f32>) -> Option<f32> {
        let config = &self.inner.config;
        let content_bound = if config.height_can_exceed_contents {
            None
        } else {
            optimal
        };
        let viewport_bound = self
            .inner
            .probe
            .viewport()
            .map(|viewport| viewport.usable_height(config.viewport_margin));

        [content_bound, config.max_height, viewport_bound]
            .into_iter()
            .flatten()
            .filter(|bound| bound.is_finite())
            .reduce(f32::min)
            .map(|bound| bound.max(config.min_height))
    }

    fn constraints(&self) -> HeightConstraints {
        let state = self.inner.state.borrow();
        HeightConstraints {
            height: state.current_height,
            min_height: self.inner.config.min_height,
            max_height: state.max_height,
            open: state.open,
            animate: state.animating || state.phase != DragPhase::Dragging,
        }
    }

    fn apply(&self) {
        if !self.is_mounted() {
            return;
        }
        let constraints = self.constraints();
        self.inner.probe.apply_height(&constraints);
    }
}

fn clamp_height(height: f32, min_height: f32, max_height: Option<f32>) -> f32 {
    let height = match max_height {
        Some(max) => height.min(max),
        None => height,
    };
    height.max(min_height)
}

impl fmt::Debug for PanelHeightController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("PanelHeightController")
            .field("phase", &state.phase)
            .field("height", &state.current_height)
            .field("max_height", &state.max_height)
            .field("open", &state.open)
            .field("animating", &state.animating)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/height_controller_tests.rs"]
mod tests;
