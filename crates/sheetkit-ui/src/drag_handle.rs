//! Touch drag handle: the grip at the top of a panel.

use crate::panel::PanelHeightController;
use sheetkit_foundation::{DragGesture, DragSignal, TouchEvent};
use sheetkit_ui_graphics::Point;
use std::fmt;
use std::rc::Rc;

/// Binds a [`DragGesture`] to a panel controller.
///
/// The handle keeps the gesture's last position at the drag origin, so every
/// drag step carries the total displacement since the finger went down.
pub struct TouchDragHandle {
    gesture: DragGesture,
    controller: PanelHeightController,
    on_tap: Option<Rc<dyn Fn(Point)>>,
}

impl TouchDragHandle {
    pub fn new(controller: PanelHeightController) -> Self {
        let threshold = controller.config().gestures.drag_threshold;
        Self {
            gesture: DragGesture::with_threshold(threshold),
            controller,
            on_tap: None,
        }
    }

    /// Called when a touch ends without turning into a drag.
    pub fn on_tap(mut self, handler: impl Fn(Point) + 'static) -> Self {
        self.on_tap = Some(Rc::new(handler));
        self
    }

    pub fn controller(&self) -> &PanelHeightController {
        &self.controller
    }

    /// Whether a finger is currently down on the handle.
    pub fn is_pressed(&self) -> bool {
        self.gesture.is_pressed()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn handle_touch(&mut self, event: &TouchEvent) {
        let Some(signal) = self.gesture.handle(event) else {
            return;
        };
        match signal {
            DragSignal::Start(origin) => {
                self.gesture.set_last_position(Some(origin));
                self.controller.drag_start();
            }
            DragSignal::Drag(displacement) => self.controller.drag(displacement.y),
            DragSignal::End => self.controller.drag_end(),
            DragSignal::Tap(position) => {
                if let Some(on_tap) = self.on_tap.clone() {
                    on_tap(position);
                }
            }
        }
    }
}

impl fmt::Debug for TouchDragHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchDragHandle")
            .field("gesture", &self.gesture)
            .field("controller", &self.controller)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{PanelCallbacks, PanelConfig};
    use crate::test_support::StubLayout;
    use sheetkit_core::Scheduler;
    use std::cell::RefCell;

    fn handle(layout: &Rc<StubLayout>, resizing: &Rc<RefCell<Vec<f32>>>) -> TouchDragHandle {
        let sink = resizing.clone();
        let controller = PanelHeightController::new(
            layout.clone(),
            Scheduler::new(),
            PanelConfig::default(),
            PanelCallbacks::new().on_resizing(move |top| sink.borrow_mut().push(top)),
        );
        controller.mount();
        TouchDragHandle::new(controller)
    }

    #[test]
    fn sub_threshold_movement_never_resizes() {
        let layout = StubLayout::new(800.0, 300.0, 300.0);
        let resizing = Rc::new(RefCell::new(Vec::new()));
        let mut handle = handle(&layout, &resizing);

        handle.handle_touch(&TouchEvent::down(Point::new(10.0, 500.0)));
        for dy in [1.0, 3.0, 5.0, 5.9] {
            handle.handle_touch(&TouchEvent::moved(Point::new(10.0, 500.0 + dy)));
        }
        assert!(handle.is_pressed());
        assert!(resizing.borrow().is_empty());
        handle.handle_touch(&TouchEvent::up());
        assert!(!handle.is_pressed());
        assert_eq!(layout.height.get(), 300.0);
    }

    #[test]
    fn displacement_is_measured_from_touch_down() {
        let layout = StubLayout::new(800.0, 300.0, 300.0);
        let resizing = Rc::new(RefCell::new(Vec::new()));
        let mut handle = handle(&layout, &resizing);

        handle.handle_touch(&TouchEvent::down(Point::new(10.0, 500.0)));
        handle.handle_touch(&TouchEvent::moved(Point::new(10.0, 510.0)));
        assert!(handle.is_dragging());
        handle.handle_touch(&TouchEvent::moved(Point::new(10.0, 520.0)));
        handle.handle_touch(&TouchEvent::moved(Point::new(10.0, 560.0)));
        assert_eq!(*resizing.borrow(), vec![520.0, 560.0]);
        assert_eq!(layout.height.get(), 240.0);

        handle.handle_touch(&TouchEvent::up());
        assert!(!handle.is_dragging());
        assert_eq!(
            handle.controller().height(),
            crate::PanelHeight::Px(240.0)
        );
    }

    #[test]
    fn tap_reaches_handler() {
        let layout = StubLayout::new(800.0, 300.0, 300.0);
        let resizing = Rc::new(RefCell::new(Vec::new()));
        let taps = Rc::new(RefCell::new(Vec::new()));
        let sink = taps.clone();
        let mut handle = handle(&layout, &resizing).on_tap(move |p| sink.borrow_mut().push(p));

        handle.handle_touch(&TouchEvent::down(Point::new(4.0, 502.0)));
        handle.handle_touch(&TouchEvent::up());
        assert_eq!(*taps.borrow(), vec![Point::new(4.0, 502.0)]);
    }
}
