//! Pointer and keyboard event types, and the drag disambiguation machine.
//!
//! The host surface forwards raw pointer-down/move/up and key events; the
//! types here keep the core independent of any particular windowing or DOM
//! layer. Click-versus-lasso disambiguation is an explicit state machine
//! rather than closure-captured coordinates: a press enters `Dragging`, and
//! release resolves to a click when pointer travel stayed under the pixel
//! threshold, otherwise to a lasso rectangle.

/// A point in the rendering surface's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Build from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

/// Modifier keys held during a pointer or key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// `a`: add an observation from the selected available block.
    Add,
    /// `d` or Backspace: delete the selected observation(s).
    Delete,
    /// Escape: abort an in-progress lasso.
    Escape,
}

/// Whether a key event was consumed (host should prevent default handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    Handled,
    Ignored,
}

/// How a completed pointer gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Travel stayed under the threshold: a plain or shift click at the
    /// release point.
    Click { at: Point, shift: bool },
    /// A rubber-band rectangle was dragged out.
    Lasso { rect: Rect, shift: bool },
}

/// Pointer gesture state: `Idle` until a press, `Dragging` until release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        origin: Point,
        current: Point,
        shift: bool,
    },
}

impl DragState {
    /// Begin a gesture. A press while already dragging restarts from the new
    /// origin.
    pub fn pointer_down(&mut self, at: Point, modifiers: Modifiers) {
        *self = DragState::Dragging {
            origin: at,
            current: at,
            shift: modifiers.shift,
        };
    }

    /// Track pointer motion, returning the live lasso rectangle for the
    /// renderer while a drag is in progress.
    pub fn pointer_move(&mut self, at: Point) -> Option<Rect> {
        match self {
            DragState::Dragging {
                origin, current, ..
            } => {
                *current = at;
                Some(Rect::from_corners(*origin, at))
            }
            DragState::Idle => None,
        }
    }

    /// Complete the gesture, resolving click versus lasso by pointer travel.
    pub fn pointer_up(&mut self, at: Point, threshold: f32) -> Option<GestureOutcome> {
        let DragState::Dragging { origin, shift, .. } = *self else {
            return None;
        };
        *self = DragState::Idle;

        if origin.distance_to(at) < threshold {
            Some(GestureOutcome::Click { at, shift })
        } else {
            Some(GestureOutcome::Lasso {
                rect: Rect::from_corners(origin, at),
                shift,
            })
        }
    }

    /// Abort an in-progress gesture. Returns true if one was active.
    pub fn abort(&mut self) -> bool {
        let was_dragging = matches!(self, DragState::Dragging { .. });
        *self = DragState::Idle;
        was_dragging
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Current lasso rectangle, if a drag is in progress.
    pub fn live_rect(&self) -> Option<Rect> {
        match self {
            DragState::Dragging {
                origin, current, ..
            } => Some(Rect::from_corners(*origin, *current)),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_any_corners() {
        let r = Rect::from_corners(Point::new(10.0, 2.0), Point::new(3.0, 8.0));
        assert_eq!(r.min, Point::new(3.0, 2.0));
        assert_eq!(r.max, Point::new(10.0, 8.0));
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(2.0, 5.0)));
    }

    #[test]
    fn test_short_travel_resolves_as_click() {
        let mut drag = DragState::default();
        drag.pointer_down(Point::new(100.0, 100.0), Modifiers::SHIFT);
        drag.pointer_move(Point::new(102.0, 101.0));
        let outcome = drag.pointer_up(Point::new(102.0, 101.0), 5.0).unwrap();
        assert_eq!(
            outcome,
            GestureOutcome::Click {
                at: Point::new(102.0, 101.0),
                shift: true
            }
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_long_travel_resolves_as_lasso() {
        let mut drag = DragState::default();
        drag.pointer_down(Point::new(10.0, 10.0), Modifiers::NONE);
        let live = drag.pointer_move(Point::new(50.0, 40.0)).unwrap();
        assert_eq!(live, Rect::from_corners(Point::new(10.0, 10.0), Point::new(50.0, 40.0)));

        let outcome = drag.pointer_up(Point::new(60.0, 45.0), 5.0).unwrap();
        match outcome {
            GestureOutcome::Lasso { rect, shift } => {
                assert!(!shift);
                assert_eq!(rect.min, Point::new(10.0, 10.0));
                assert_eq!(rect.max, Point::new(60.0, 45.0));
            }
            other => panic!("expected lasso, got {:?}", other),
        }
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.pointer_up(Point::new(0.0, 0.0), 5.0), None);
    }

    #[test]
    fn test_abort_cancels_drag() {
        let mut drag = DragState::default();
        drag.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        assert!(drag.abort());
        assert_eq!(drag.pointer_up(Point::new(90.0, 90.0), 5.0), None);
        assert!(!drag.abort());
    }

    #[test]
    fn test_move_while_idle_reports_nothing() {
        let mut drag = DragState::default();
        assert_eq!(drag.pointer_move(Point::new(1.0, 1.0)), None);
    }
}
