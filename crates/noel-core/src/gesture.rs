//! Tap vs. drag classification for a single pointer.

use glam::Vec2;

/// What a finished gesture turned out to be.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Released without moving past the threshold.
    Tap,
    /// Moved past the threshold at some point while pressed.
    Drag,
    /// Release with no matching press.
    Ignored,
}

impl GestureOutcome {
    #[inline]
    pub fn is_tap(self) -> bool {
        self == GestureOutcome::Tap
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerGesture {
    pub down: bool,
    pub dragging: bool,
    pub start: Vec2,
}

#[derive(Clone, Debug)]
pub struct PointerClassifier {
    gesture: PointerGesture,
    threshold_px: f32,
}

impl PointerClassifier {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            gesture: PointerGesture::default(),
            threshold_px,
        }
    }

    pub fn gesture(&self) -> PointerGesture {
        self.gesture
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.gesture = PointerGesture {
            down: true,
            dragging: false,
            start: Vec2::new(x, y),
        };
    }

    /// Promote to a drag once the pointer strays past the threshold. Sticky
    /// until the gesture ends.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.gesture.down && Vec2::new(x, y).distance(self.gesture.start) > self.threshold_px {
            self.gesture.dragging = true;
        }
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        let outcome = match (self.gesture.down, self.gesture.dragging) {
            (true, false) => GestureOutcome::Tap,
            (true, true) => GestureOutcome::Drag,
            (false, _) => GestureOutcome::Ignored,
        };
        self.reset();
        outcome
    }

    /// Touch release always counts as a tap; touch devices skip the
    /// drag distinction.
    pub fn touch_end(&mut self) -> GestureOutcome {
        self.reset();
        GestureOutcome::Tap
    }

    fn reset(&mut self) {
        self.gesture.down = false;
        self.gesture.dragging = false;
    }
}

impl Default for PointerClassifier {
    fn default() -> Self {
        Self::new(crate::constants::DRAG_THRESHOLD_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_without_press_is_ignored() {
        let mut c = PointerClassifier::default();
        c.pointer_move(500.0, 500.0);
        assert!(!c.gesture().dragging);
        assert_eq!(c.pointer_up(), GestureOutcome::Ignored);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut c = PointerClassifier::new(15.0);
        c.pointer_down(0.0, 0.0);
        c.pointer_move(9.0, 12.0); // exactly 15 px
        assert_eq!(c.pointer_up(), GestureOutcome::Tap);
    }

    #[test]
    fn drag_is_sticky_after_returning_to_start() {
        let mut c = PointerClassifier::new(15.0);
        c.pointer_down(100.0, 100.0);
        c.pointer_move(130.0, 100.0);
        c.pointer_move(100.0, 100.0);
        assert_eq!(c.pointer_up(), GestureOutcome::Drag);
        assert_eq!(c.gesture().down, false);
    }
}
