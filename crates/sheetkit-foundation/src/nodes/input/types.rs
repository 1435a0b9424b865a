use sheetkit_ui_graphics::Point;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw touch event as delivered by the host.
///
/// `touches` holds every contact currently on the surface, not just the one
/// that changed. Gesture recognisers only act on single-contact events.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub kind: PointerEventKind,
    pub touches: SmallVec<[Point; 2]>,
}

impl TouchEvent {
    pub fn new(kind: PointerEventKind, touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            kind,
            touches: touches.into_iter().collect(),
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerEventKind::Down, [position])
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerEventKind::Move, [position])
    }

    /// Touch end. Platforms report the lifted finger as gone, so no contacts.
    pub fn up() -> Self {
        Self {
            kind: PointerEventKind::Up,
            touches: SmallVec::new(),
        }
    }

    pub fn cancel() -> Self {
        Self {
            kind: PointerEventKind::Cancel,
            touches: SmallVec::new(),
        }
    }

    /// The only contact, if there is exactly one.
    pub fn single_touch(&self) -> Option<Point> {
        match self.touches.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
