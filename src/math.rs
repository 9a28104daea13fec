//! Motion math: CSS cubic-bezier timing curves and slide animation sampling.
//! All curve inputs and outputs use normalized f64 in 0.0–1.0.

use std::time::Instant;

use crate::slider::Transition;

const EPSILON: f64 = 1e-7;

/// A CSS `cubic-bezier(x1, y1, x2, y2)` timing curve with fixed endpoints
/// at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    pub(crate) fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Find the curve parameter whose x equals `x`.
    fn solve_t(&self, x: f64) -> f64 {
        // Newton first; it converges in a few steps for well-behaved curves.
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        // Bisection fallback
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let sx = self.sample_x(t);
            if (sx - x).abs() < EPSILON {
                return t;
            }
            if x > sx {
                lo = t;
            } else {
                hi = t;
            }
            t = (hi - lo) * 0.5 + lo;
            if hi - lo < EPSILON {
                break;
            }
        }
        t
    }

    /// Eased progress for linear progress `x`.
    pub(crate) fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_t(x))
    }
}

/// Linear interpolation between `a` and `b`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// An in-flight offset animation between two frame positions.
#[derive(Debug, Clone)]
pub struct SlideAnimation {
    from: f64,
    to: f64,
    started: Instant,
    transition: Transition,
}

impl SlideAnimation {
    pub fn new(from: f64, to: f64, started: Instant, transition: Transition) -> Self {
        Self {
            from,
            to,
            started,
            transition,
        }
    }

    /// Target offset this animation settles on.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Offset at `now`, and whether the animation has finished.
    pub fn sample(&self, now: Instant) -> (f64, bool) {
        let total = self.transition.duration.as_secs_f64();
        if total <= 0.0 {
            return (self.to, true);
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let progress = (elapsed / total).min(1.0);
        if progress >= 1.0 {
            return (self.to, true);
        }
        let eased = self.transition.easing.apply(progress);
        (lerp(self.from, self.to, eased), false)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Easing;

    #[test]
    fn endpoints_are_fixed() {
        let curve = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
        assert_eq!(curve.apply(0.0), 0.0);
        assert_eq!(curve.apply(1.0), 1.0);
        assert_eq!(curve.apply(-3.0), 0.0);
        assert_eq!(curve.apply(7.0), 1.0);
    }

    #[test]
    fn linear_curve_is_identity() {
        let curve = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for i in 1..10 {
            let x = i as f64 / 10.0;
            assert!((curve.apply(x) - x).abs() < 1e-5, "x = {x}");
        }
    }

    #[test]
    fn ease_out_is_monotonic_and_ahead_of_linear() {
        let curve = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
        let mut last = 0.0;
        for i in 1..100 {
            let x = i as f64 / 100.0;
            let y = curve.apply(x);
            assert!(y >= last - 1e-9);
            assert!(y >= x - 1e-6);
            last = y;
        }
    }

    #[test]
    fn animation_runs_from_start_to_target() {
        let start = Instant::now();
        let anim = SlideAnimation::new(
            0.0,
            300.0,
            start,
            Transition {
                duration: Duration::from_millis(200),
                easing: Easing::Linear,
            },
        );

        assert_eq!(anim.sample(start), (0.0, false));
        let (mid, done) = anim.sample(start + Duration::from_millis(100));
        assert!(!done);
        assert!((mid - 150.0).abs() < 1e-3);
        assert_eq!(anim.sample(start + Duration::from_millis(250)), (300.0, true));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let start = Instant::now();
        let anim = SlideAnimation::new(
            40.0,
            0.0,
            start,
            Transition {
                duration: Duration::ZERO,
                easing: Easing::EaseOut,
            },
        );
        assert_eq!(anim.sample(start), (0.0, true));
        assert_eq!(anim.target(), 0.0);
    }
}
