//! Presentation-side tween of the panel rectangle.
//!
//! Terminals have no compositor transitions, so the popup animates its own
//! rectangle between frames. When a tween runs to completion it reports a
//! `Transform` completion, which the lifecycle consumes exactly like a
//! stylesheet transition-end signal.

use std::time::Duration;

use super::geometry::FloatRect;
use super::lifecycle::TransitionProperty;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: FloatRect,
    to: FloatRect,
    elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    duration: Duration,
    displayed: Option<FloatRect>,
    tween: Option<Tween>,
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

impl Transition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            displayed: None,
            tween: None,
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn displayed(&self) -> Option<FloatRect> {
        self.displayed
    }

    pub fn in_flight(&self) -> bool {
        self.tween.is_some()
    }

    /// Give the very first frame somewhere to start from.
    pub fn seed(&mut self, rect: FloatRect) {
        if self.displayed.is_none() {
            self.displayed = Some(rect);
        }
    }

    /// Point the panel at `target`, animating when asked. A zero-length
    /// animation completes on the spot and reports so.
    pub fn retarget(&mut self, target: FloatRect, animate: bool) -> Option<TransitionProperty> {
        let Some(displayed) = self.displayed else {
            self.displayed = Some(target);
            return None;
        };
        let heading = self.tween.map(|t| t.to).unwrap_or(displayed);
        if heading == target {
            return None;
        }
        if !animate {
            self.displayed = Some(target);
            self.tween = None;
            return None;
        }
        if self.duration.is_zero() {
            self.displayed = Some(target);
            self.tween = None;
            return Some(TransitionProperty::Transform);
        }
        self.tween = Some(Tween {
            from: displayed,
            to: target,
            elapsed: Duration::ZERO,
        });
        None
    }

    /// Advance the running tween by `dt`.
    pub fn advance(&mut self, dt: Duration) -> Option<TransitionProperty> {
        let tween = self.tween.as_mut()?;
        tween.elapsed = tween.elapsed.saturating_add(dt);
        let progress = tween.elapsed.as_secs_f64() / self.duration.as_secs_f64().max(f64::EPSILON);
        if progress >= 1.0 {
            self.displayed = Some(tween.to);
            self.tween = None;
            return Some(TransitionProperty::Transform);
        }
        self.displayed = Some(FloatRect::lerp(
            tween.from,
            tween.to,
            ease_out_cubic(progress),
        ));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(y: i32) -> FloatRect {
        FloatRect {
            x: 0,
            y,
            width: 10,
            height: 4,
        }
    }

    #[test]
    fn first_target_is_taken_verbatim() {
        let mut t = Transition::new(Duration::from_millis(100));
        assert_eq!(t.retarget(rect(5), true), None);
        assert_eq!(t.displayed(), Some(rect(5)));
        assert!(!t.in_flight());
    }

    #[test]
    fn animated_retarget_reports_completion_once() {
        let mut t = Transition::new(Duration::from_millis(100));
        t.seed(rect(-20));
        t.retarget(rect(10), true);
        assert!(t.in_flight());
        assert_eq!(t.advance(Duration::from_millis(50)), None);
        let mid = t.displayed().unwrap().y;
        assert!(mid > -20 && mid < 10);
        assert_eq!(
            t.advance(Duration::from_millis(60)),
            Some(TransitionProperty::Transform)
        );
        assert_eq!(t.displayed(), Some(rect(10)));
        assert_eq!(t.advance(Duration::from_millis(60)), None);
    }

    #[test]
    fn snap_cancels_tween_without_completion() {
        let mut t = Transition::new(Duration::from_millis(100));
        t.seed(rect(0));
        t.retarget(rect(10), true);
        assert_eq!(t.retarget(rect(3), false), None);
        assert!(!t.in_flight());
        assert_eq!(t.displayed(), Some(rect(3)));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut t = Transition::new(Duration::ZERO);
        t.seed(rect(0));
        assert_eq!(
            t.retarget(rect(10), true),
            Some(TransitionProperty::Transform)
        );
    }
}
