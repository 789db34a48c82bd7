//! Eased scroll transition between two page offsets
//!
//! The transition can be re-targeted mid-flight: it restarts from wherever it
//! currently is, so a new scroll input bends the motion instead of queueing.

use std::time::{Duration, Instant};

use crate::config::EasingType;
use crate::motion::timing::{is_complete_at, progress_at};
use crate::motion::{lerp, EasingTypeExt};

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTransition {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

impl ScrollTransition {
    pub fn new(from: f64, to: f64, duration: Duration, easing: EasingType, now: Instant) -> Self {
        Self {
            start: now,
            from,
            to,
            duration,
            easing,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Interpolated scroll offset at `now`
    pub fn position_at(&self, now: Instant) -> f64 {
        if self.is_complete_at(now) {
            return self.to;
        }
        let t = self.easing.apply(progress_at(self.start, self.duration, now));
        lerp(self.from, self.to, t)
    }

    #[inline]
    pub fn is_complete_at(&self, now: Instant) -> bool {
        is_complete_at(self.start, self.duration, now)
    }

    pub fn easing(&self) -> EasingType {
        self.easing
    }

    /// Aim at a new target from the current position, restarting the clock
    /// with the new motion's duration and curve
    pub fn retarget(&mut self, to: f64, duration: Duration, easing: EasingType, now: Instant) {
        self.from = self.position_at(now);
        self.to = to;
        self.duration = duration;
        self.easing = easing;
        self.start = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eases_out_toward_target() {
        let now = Instant::now();
        let tr = ScrollTransition::new(0.0, 100.0, Duration::from_millis(200), EasingType::Power2Out, now);
        assert_eq!(tr.position_at(now), 0.0);
        let half = tr.position_at(now + Duration::from_millis(100));
        assert!((half - 87.5).abs() < 1e-6);
        assert_eq!(tr.position_at(now + Duration::from_millis(200)), 100.0);
        assert!(tr.is_complete_at(now + Duration::from_millis(250)));
    }

    #[test]
    fn test_retarget_starts_from_current_position() {
        let now = Instant::now();
        let mut tr = ScrollTransition::new(0.0, 100.0, Duration::from_millis(200), EasingType::Linear, now);
        let later = now + Duration::from_millis(100);
        tr.retarget(300.0, Duration::from_millis(200), EasingType::Linear, later);
        assert!((tr.from() - 50.0).abs() < 1e-6);
        assert_eq!(tr.target(), 300.0);
        assert!((tr.position_at(later) - 50.0).abs() < 1e-6);
        assert!(!tr.is_complete_at(later + Duration::from_millis(150)));
    }

    #[test]
    fn test_retarget_switches_curve() {
        let now = Instant::now();
        let mut tr = ScrollTransition::new(0.0, 100.0, Duration::from_millis(200), EasingType::Power2Out, now);
        tr.retarget(100.0, Duration::from_millis(200), EasingType::Linear, now);
        assert_eq!(tr.easing(), EasingType::Linear);
        let half = tr.position_at(now + Duration::from_millis(100));
        assert!((half - 50.0).abs() < 1e-6);
    }
}
