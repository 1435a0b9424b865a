//! Robot-style touch input for drag handles.
//!
//! The robot owns a [`TouchDragHandle`] and moves the scheduler clock between
//! touch events, so release velocity and deferred work behave the way they
//! would with a real finger.
//!
//! # Example
//!
//! ```ignore
//! let mut robot = TouchRobot::new(panel.drag_handle(), rule.scheduler());
//! robot.swipe(Point::new(0.0, 500.0), Point::new(0.0, 700.0), 10, 400);
//! ```

use sheetkit_core::Scheduler;
use sheetkit_foundation::{PointerEventKind, TouchEvent};
use sheetkit_ui::TouchDragHandle;
use sheetkit_ui_graphics::Point;

pub struct TouchRobot {
    handle: TouchDragHandle,
    scheduler: Scheduler,
    cursor: Option<Point>,
}

impl TouchRobot {
    pub fn new(handle: TouchDragHandle, scheduler: &Scheduler) -> Self {
        Self {
            handle,
            scheduler: scheduler.clone(),
            cursor: None,
        }
    }

    pub fn handle(&self) -> &TouchDragHandle {
        &self.handle
    }

    pub fn press(&mut self, at: Point) {
        self.cursor = Some(at);
        self.handle.handle_touch(&TouchEvent::down(at));
    }

    pub fn move_to(&mut self, to: Point) {
        self.cursor = Some(to);
        self.handle.handle_touch(&TouchEvent::moved(to));
    }

    pub fn release(&mut self) {
        self.cursor = None;
        self.handle.handle_touch(&TouchEvent::up());
    }

    pub fn cancel(&mut self) {
        self.cursor = None;
        self.handle.handle_touch(&TouchEvent::cancel());
    }

    /// Sends a move that carries two contacts, as a pinch would.
    pub fn pinch_move(&mut self, first: Point, second: Point) {
        self.handle
            .handle_touch(&TouchEvent::new(PointerEventKind::Move, [first, second]));
    }

    /// Advances the clock without touching the handle.
    pub fn wait(&mut self, millis: u64) {
        self.scheduler.advance_by(millis);
    }

    /// Press at `from`, move to `to` in `steps` even moves spread over
    /// `duration_ms`, then release.
    pub fn swipe(&mut self, from: Point, to: Point, steps: u32, duration_ms: u64) {
        let steps = steps.max(1);
        let step_ms = duration_ms / u64::from(steps);
        self.press(from);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.wait(step_ms);
            self.move_to(Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
        self.release();
    }

    /// Vertical swipe from `y` by `dy`.
    pub fn swipe_vertically(&mut self, y: f32, dy: f32, steps: u32, duration_ms: u64) {
        self.swipe(Point::new(0.0, y), Point::new(0.0, y + dy), steps, duration_ms);
    }

    /// Press and release in place.
    pub fn tap(&mut self, at: Point) {
        self.press(at);
        self.release();
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }
}
