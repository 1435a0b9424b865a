//! Single-finger touch capture.

use crate::nodes::input::types::{PointerEventKind, TouchEvent};
use sheetkit_ui_graphics::Point;

/// Output of [`TouchTracker::handle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchSignal {
    Start(Point),
    Move(Point),
    End { cancelled: bool },
}

/// Tracks one touch session on a gesture surface.
///
/// Only events with exactly one contact start or continue a session. Events
/// with no contacts or with several are ignored outright: no signal and no
/// state change. End and cancel are the exception since the lifted finger
/// is no longer reported.
#[derive(Default, Debug, Clone)]
pub struct TouchTracker {
    initial_position: Option<Point>,
    pressed: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &TouchEvent) -> Option<TouchSignal> {
        match event.kind {
            PointerEventKind::Down => {
                let position = event.single_touch()?;
                if self.initial_position.is_some() {
                    // A second Down without an Up in between restarts the session.
                    log::debug!("touch down while a session was active; restarting");
                }
                self.initial_position = Some(position);
                self.pressed = true;
                Some(TouchSignal::Start(position))
            }
            PointerEventKind::Move => {
                self.initial_position?;
                let position = event.single_touch()?;
                Some(TouchSignal::Move(position))
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let was_active = self.initial_position.is_some();
                self.reset();
                was_active.then_some(TouchSignal::End {
                    cancelled: event.kind == PointerEventKind::Cancel,
                })
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.initial_position.is_some()
    }

    /// Whether the surface should render in its pressed state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn initial_position(&self) -> Option<Point> {
        self.initial_position
    }

    pub fn reset(&mut self) {
        self.initial_position = None;
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_finger_session() {
        let mut tracker = TouchTracker::new();
        let start = Point::new(10.0, 20.0);

        assert_eq!(
            tracker.handle(&TouchEvent::down(start)),
            Some(TouchSignal::Start(start))
        );
        assert!(tracker.is_pressed());
        assert_eq!(
            tracker.handle(&TouchEvent::moved(Point::new(10.0, 25.0))),
            Some(TouchSignal::Move(Point::new(10.0, 25.0)))
        );
        assert_eq!(
            tracker.handle(&TouchEvent::up()),
            Some(TouchSignal::End { cancelled: false })
        );
        assert!(!tracker.is_active());
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn multi_touch_events_are_ignored() {
        let mut tracker = TouchTracker::new();
        let two_fingers = [Point::new(0.0, 0.0), Point::new(50.0, 50.0)];

        assert_eq!(
            tracker.handle(&TouchEvent::new(PointerEventKind::Down, two_fingers)),
            None
        );
        assert!(!tracker.is_active());

        tracker.handle(&TouchEvent::down(Point::ZERO));
        assert_eq!(
            tracker.handle(&TouchEvent::new(PointerEventKind::Move, two_fingers)),
            None
        );
        assert_eq!(tracker.initial_position(), Some(Point::ZERO));
    }

    #[test]
    fn zero_touch_move_is_ignored() {
        let mut tracker = TouchTracker::new();
        tracker.handle(&TouchEvent::down(Point::ZERO));
        assert_eq!(
            tracker.handle(&TouchEvent::new(PointerEventKind::Move, Vec::<Point>::new())),
            None
        );
        assert!(tracker.is_active());
    }

    #[test]
    fn move_without_session_is_ignored() {
        let mut tracker = TouchTracker::new();
        assert_eq!(tracker.handle(&TouchEvent::moved(Point::ZERO)), None);
        assert_eq!(tracker.handle(&TouchEvent::up()), None);
    }

    #[test]
    fn cancel_reports_cancelled_end() {
        let mut tracker = TouchTracker::new();
        tracker.handle(&TouchEvent::down(Point::ZERO));
        assert_eq!(
            tracker.handle(&TouchEvent::cancel()),
            Some(TouchSignal::End { cancelled: true })
        );
        assert!(!tracker.is_pressed());
    }
}
