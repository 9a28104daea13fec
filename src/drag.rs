//! Drag gesture tracking.
//!
//! A gesture locks its axis on the first move: horizontal gestures drag the
//! carousel, vertical ones are treated as page scrolls and ignored until the
//! pointer is released.

/// Axis decision for the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    /// No move event seen yet.
    #[default]
    Undetermined,
    /// Horizontal gesture; the carousel follows the pointer.
    Horizontal,
    /// Vertical gesture; rejected for the rest of the gesture.
    Vertical,
}

/// Navigation outcome of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Prev,
    Next,
    Stay,
}

/// Pointer coordinates of the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub start_x: f64,
    pub start_y: f64,
    /// Last tracked horizontal position; `None` until a horizontal move.
    pub end_x: Option<f64>,
    pub lock: AxisLock,
}

impl DragState {
    /// Start a new gesture at (`x`, `y`).
    pub fn begin(&mut self, x: f64, y: f64) {
        *self = Self {
            start_x: x,
            start_y: y,
            ..Self::default()
        };
    }

    /// Lock the axis from the first move to (`x`, `y`). Later calls return the
    /// existing lock unchanged.
    pub fn lock_axis(&mut self, x: f64, y: f64) -> AxisLock {
        if self.lock == AxisLock::Undetermined {
            let dx = (self.start_x - x).abs();
            let dy = (self.start_y - y).abs();
            self.lock = if dy < dx {
                AxisLock::Horizontal
            } else {
                AxisLock::Vertical
            };
        }
        self.lock
    }

    /// Record a horizontal position if the gesture is horizontal.
    pub fn track(&mut self, x: f64) -> bool {
        if self.lock == AxisLock::Horizontal {
            self.end_x = Some(x);
            true
        } else {
            false
        }
    }

    /// Pixels the pointer travelled since the start (`end - start`), when a
    /// horizontal position was tracked.
    pub fn displacement(&self) -> Option<f64> {
        self.end_x.map(|end| end - self.start_x)
    }

    /// Offset (px) the frame is pulled by the pointer; positive moves content
    /// left.
    pub fn pull(&self) -> f64 {
        self.end_x.map_or(0.0, |end| self.start_x - end)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Rightward travel beyond `threshold` goes back, leftward goes forward.
pub fn classify(displacement: f64, threshold: f64) -> Swipe {
    if displacement.abs() <= threshold {
        Swipe::Stay
    } else if displacement > 0.0 {
        Swipe::Prev
    } else {
        Swipe::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_locks_axis() {
        let mut drag = DragState::default();
        drag.begin(100.0, 100.0);
        assert_eq!(drag.lock_axis(90.0, 103.0), AxisLock::Horizontal);
        // A later, mostly vertical move does not change the decision.
        assert_eq!(drag.lock_axis(88.0, 180.0), AxisLock::Horizontal);
    }

    #[test]
    fn vertical_gesture_is_never_tracked() {
        let mut drag = DragState::default();
        drag.begin(100.0, 100.0);
        assert_eq!(drag.lock_axis(99.0, 120.0), AxisLock::Vertical);
        assert!(!drag.track(10.0));
        assert_eq!(drag.displacement(), None);
        assert_eq!(drag.pull(), 0.0);
    }

    #[test]
    fn equal_travel_counts_as_vertical() {
        let mut drag = DragState::default();
        drag.begin(0.0, 0.0);
        assert_eq!(drag.lock_axis(5.0, 5.0), AxisLock::Vertical);
    }

    #[test]
    fn displacement_and_pull_have_opposite_signs() {
        let mut drag = DragState::default();
        drag.begin(200.0, 0.0);
        drag.lock_axis(190.0, 0.0);
        assert!(drag.track(150.0));
        assert_eq!(drag.displacement(), Some(-50.0));
        assert_eq!(drag.pull(), 50.0);
    }

    #[test]
    fn begin_resets_previous_gesture() {
        let mut drag = DragState::default();
        drag.begin(0.0, 0.0);
        drag.lock_axis(30.0, 0.0);
        drag.track(30.0);
        drag.begin(5.0, 6.0);
        assert_eq!(
            drag,
            DragState {
                start_x: 5.0,
                start_y: 6.0,
                end_x: None,
                lock: AxisLock::Undetermined,
            }
        );
    }

    #[test]
    fn classify_respects_threshold() {
        assert_eq!(classify(20.0, 20.0), Swipe::Stay);
        assert_eq!(classify(-19.0, 20.0), Swipe::Stay);
        assert_eq!(classify(21.0, 20.0), Swipe::Prev);
        assert_eq!(classify(-25.0, 20.0), Swipe::Next);
    }
}
