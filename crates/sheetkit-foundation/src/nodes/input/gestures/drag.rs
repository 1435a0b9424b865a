//! Drag gesture recogniser.
//!
//! Turns a [`TouchTracker`] session into a drag-start / drag / drag-end
//! protocol. Displacements are reported relative to a *last position* that
//! the consumer hands back in, not relative to an internal cursor: a
//! consumer that leaves the last position at the drag origin gets absolute
//! displacement from the start, one that updates it after every callback
//! gets per-event deltas.

use super::touch::{TouchSignal, TouchTracker};
use crate::gesture_constants::DRAG_THRESHOLD;
use crate::nodes::input::types::TouchEvent;
use sheetkit_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragSignal {
    /// Movement crossed the threshold. Carries the initial touch point.
    Start(Point),
    /// Displacement since the consumer-supplied last position.
    Drag(Point),
    End,
    /// The session ended without ever becoming a drag.
    Tap(Point),
}

#[derive(Debug, Clone)]
pub struct DragGesture {
    tracker: TouchTracker,
    threshold: f32,
    dragging: bool,
    last_position: Option<Point>,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self::with_threshold(DRAG_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            tracker: TouchTracker::new(),
            threshold,
            dragging: false,
            last_position: None,
        }
    }

    pub fn handle(&mut self, event: &TouchEvent) -> Option<DragSignal> {
        match self.tracker.handle(event)? {
            TouchSignal::Start(_) => {
                self.dragging = false;
                self.last_position = None;
                None
            }
            TouchSignal::Move(position) => {
                let initial = self.tracker.initial_position()?;
                if !self.dragging {
                    if initial.distance_to(position) >= self.threshold {
                        self.dragging = true;
                        log::trace!("drag started at {initial:?}");
                        return Some(DragSignal::Start(initial));
                    }
                    return None;
                }
                let last = self.last_position?;
                Some(DragSignal::Drag(position - last))
            }
            TouchSignal::End { cancelled } => {
                let initial = self.tracker.initial_position();
                let was_dragging = self.dragging;
                self.reset();
                if was_dragging {
                    Some(DragSignal::End)
                } else if cancelled {
                    None
                } else {
                    initial.map(DragSignal::Tap)
                }
            }
        }
    }

    /// Sets the reference point for subsequent [`DragSignal::Drag`] values.
    pub fn set_last_position(&mut self, position: Option<Point>) {
        self.last_position = position;
    }

    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_pressed(&self) -> bool {
        self.tracker.is_pressed()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.dragging = false;
        self.last_position = None;
    }
}
