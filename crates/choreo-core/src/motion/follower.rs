//! Scrub smoothing
//!
//! A scrubbed timeline can trail the scroll position instead of jumping to it.
//! `ScrubFollower` keeps the applied progress and moves it toward the
//! scroll-derived target each tick, covering ~99% of the gap within `lag`.

use std::time::Duration;

/// Remaining gap below which the follower lands exactly on its target
const SETTLE_EPSILON: f64 = 1e-4;

/// Decay rate: after one `lag` only e^-5 (< 1%) of the gap remains
const DECAY_PER_LAG: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrubFollower {
    lag: Option<Duration>,
    current: f64,
    target: f64,
    primed: bool,
}

impl ScrubFollower {
    /// Follower that trails by `lag`; `None` applies targets immediately
    pub fn new(lag: Option<Duration>) -> Self {
        Self {
            lag: lag.filter(|l| !l.is_zero()),
            current: 0.0,
            target: 0.0,
            primed: false,
        }
    }

    pub fn immediate() -> Self {
        Self::new(None)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether a tick would still move the applied progress
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Set a new target. The very first target is applied immediately so a
    /// page loaded mid-scroll starts in the right state.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if self.lag.is_none() || !self.primed {
            self.current = target;
            self.primed = true;
        }
    }

    /// Jump straight to `value`, dropping any pending catch-up
    pub fn jump_to(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.primed = true;
    }

    /// Advance by `dt`. Returns true if the applied progress changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.is_settled() {
            return false;
        }
        let Some(lag) = self.lag else {
            self.current = self.target;
            return true;
        };

        let alpha = 1.0 - (-DECAY_PER_LAG * dt.as_secs_f64() / lag.as_secs_f64()).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SETTLE_EPSILON {
            self.current = self.target;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_follower_tracks_target() {
        let mut follower = ScrubFollower::immediate();
        follower.set_target(0.4);
        assert_eq!(follower.current(), 0.4);
        follower.set_target(0.9);
        assert_eq!(follower.current(), 0.9);
        assert!(!follower.advance(Duration::from_millis(16)));
    }

    #[test]
    fn test_first_target_is_applied_immediately() {
        let mut follower = ScrubFollower::new(Some(Duration::from_millis(600)));
        follower.set_target(0.5);
        assert_eq!(follower.current(), 0.5);
        assert!(follower.is_settled());
    }

    #[test]
    fn test_smoothed_follower_trails_then_settles() {
        let mut follower = ScrubFollower::new(Some(Duration::from_millis(600)));
        follower.set_target(0.0);
        follower.set_target(1.0);
        assert_eq!(follower.current(), 0.0);

        assert!(follower.advance(Duration::from_millis(100)));
        let partial = follower.current();
        assert!(partial > 0.0 && partial < 1.0);

        for _ in 0..200 {
            follower.advance(Duration::from_millis(16));
        }
        assert_eq!(follower.current(), 1.0);
        assert!(follower.is_settled());
    }

    #[test]
    fn test_jump_to_cancels_catch_up() {
        let mut follower = ScrubFollower::new(Some(Duration::from_secs(1)));
        follower.set_target(0.0);
        follower.set_target(1.0);
        follower.jump_to(0.25);
        assert!(follower.is_settled());
        assert_eq!(follower.current(), 0.25);
    }
}
