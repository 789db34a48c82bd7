//! Timing derived from the keyboard scroll settings

use std::time::Duration;

pub use choreo_core::{EasingType, ScrollConfig};

/// Frame interval used when `animation_fps` is 0
const FALLBACK_FRAME: Duration = Duration::from_millis(16);

pub trait ScrollConfigExt {
    /// Length of one keyboard scroll transition
    fn animation_duration(&self) -> Duration;

    /// Poll interval while the page is moving; never slower than `idle_tick`
    fn frame_interval(&self, idle_tick: Duration) -> Duration;

    /// Whether keyboard scrolling animates at all
    fn is_smooth(&self) -> bool;

    /// Page px covered by `steps` line steps (negative scrolls up)
    fn step_distance(&self, steps: i32) -> f64;
}

impl ScrollConfigExt for ScrollConfig {
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    fn frame_interval(&self, idle_tick: Duration) -> Duration {
        let frame = match self.animation_fps {
            0 => FALLBACK_FRAME,
            fps => Duration::from_millis((1000 / fps as u64).max(1)),
        };
        frame.min(idle_tick.max(Duration::from_millis(1)))
    }

    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }

    fn step_distance(&self, steps: i32) -> f64 {
        self.scroll_step_px * steps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_follows_fps() {
        let config = ScrollConfig::default();
        let idle = Duration::from_millis(100);
        assert_eq!(config.frame_interval(idle), Duration::from_millis(16));

        let slow = ScrollConfig { animation_fps: 5, ..Default::default() };
        assert_eq!(slow.frame_interval(idle), idle);

        let unset = ScrollConfig { animation_fps: 0, ..Default::default() };
        assert_eq!(unset.frame_interval(idle), FALLBACK_FRAME);
        assert_eq!(config.frame_interval(Duration::ZERO), Duration::from_millis(1));
    }

    #[test]
    fn test_smooth_needs_a_duration() {
        let disabled = ScrollConfig { smooth_enabled: false, ..Default::default() };
        assert!(!disabled.is_smooth());
        let instant = ScrollConfig { animation_duration_ms: 0, ..Default::default() };
        assert!(!instant.is_smooth());
        assert!(ScrollConfig::default().is_smooth());
    }

    #[test]
    fn test_step_distance() {
        let config = ScrollConfig { scroll_step_px: 40.0, ..Default::default() };
        assert_eq!(config.step_distance(3), 120.0);
        assert_eq!(config.step_distance(-1), -40.0);
    }
}
