//! Scroll animation controller
//!
//! Keyboard input moves the simulated page with a short eased transition;
//! snap plans from the orchestrator reuse the same transition, so either
//! kind of motion can be re-targeted mid-flight.

use std::time::{Duration, Instant};

use choreo_core::snap::{ScrollTransition, SnapPlan};

use super::config::{ScrollConfig, ScrollConfigExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    User,
    Snap,
}

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    transition: Option<(ScrollTransition, Motion)>,
    config: ScrollConfig,
    /// Current scroll offset in page px
    current: f64,
    /// Scroll delta batched until the next `update`
    pending_delta: f64,
    /// Time of the last user input not yet followed by a settle check
    last_input: Option<Instant>,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            transition: None,
            config,
            current: 0.0,
            pending_delta: 0.0,
            last_input: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether a snap transition is in flight
    pub fn is_snapping(&self) -> bool {
        matches!(self.transition, Some((_, Motion::Snap)))
    }

    /// Pending work that needs the animation frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.transition.is_some() || self.pending_delta != 0.0
    }

    #[inline]
    pub fn current_scroll(&self) -> f64 {
        self.current
    }

    /// Final position once the active transition completes
    pub fn target_scroll(&self) -> f64 {
        self.transition
            .as_ref()
            .map(|(t, _)| t.target())
            .unwrap_or(self.current)
    }

    /// Jump without animating (page remount, resize)
    pub fn set_scroll(&mut self, scroll: f64) {
        self.transition = None;
        self.current = scroll;
        self.pending_delta = 0.0;
    }

    /// Animate to an absolute offset (anchor jumps, top/bottom)
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64, now: Instant) {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        self.last_input = Some(now);
        self.pending_delta = 0.0;
        if !self.config.is_smooth() {
            self.set_scroll(target);
            return;
        }
        self.start(target, self.config.animation_duration(), self.config.easing, Motion::User, now);
    }

    /// Scroll by `delta` px; rapid presses are batched until `update`
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64, now: Instant) {
        self.last_input = Some(now);
        if !self.config.is_smooth() {
            self.set_scroll((self.current + delta).clamp(0.0, max_scroll.max(0.0)));
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self, max_scroll: f64, now: Instant) {
        self.scroll_by(self.config.step_distance(1), max_scroll, now);
    }

    pub fn scroll_up(&mut self, max_scroll: f64, now: Instant) {
        self.scroll_by(self.config.step_distance(-1), max_scroll, now);
    }

    pub fn scroll_half_page_down(&mut self, viewport_px: f64, max_scroll: f64, now: Instant) {
        self.scroll_by(viewport_px / 2.0, max_scroll, now);
    }

    pub fn scroll_half_page_up(&mut self, viewport_px: f64, max_scroll: f64, now: Instant) {
        self.scroll_by(-viewport_px / 2.0, max_scroll, now);
    }

    pub fn scroll_full_page_down(&mut self, viewport_px: f64, max_scroll: f64, now: Instant) {
        self.scroll_by(viewport_px, max_scroll, now);
    }

    pub fn scroll_full_page_up(&mut self, viewport_px: f64, max_scroll: f64, now: Instant) {
        self.scroll_by(-viewport_px, max_scroll, now);
    }

    /// Play a snap from the current position. Snaps always animate.
    pub fn snap_to(&mut self, plan: &SnapPlan, now: Instant) {
        self.start(plan.to_px, plan.duration, plan.easing, Motion::Snap, now);
    }

    /// Advance to `now` and return the scroll offset to publish
    pub fn update(&mut self, max_scroll: f64, now: Instant) -> f64 {
        let max_scroll = max_scroll.max(0.0);
        if self.pending_delta != 0.0 {
            // user input during a snap starts from where the page is, not
            // from the snap target
            let base = if self.is_snapping() {
                self.current
            } else {
                self.target_scroll()
            };
            let target = (base + self.pending_delta).clamp(0.0, max_scroll);
            self.pending_delta = 0.0;
            self.start(target, self.config.animation_duration(), self.config.easing, Motion::User, now);
        }

        if let Some((transition, _)) = &self.transition {
            if transition.is_complete_at(now) {
                self.current = transition.target().min(max_scroll);
                self.transition = None;
            } else {
                self.current = transition.position_at(now).min(max_scroll);
            }
        }
        self.current
    }

    /// True once, when user input has been idle for `delay` and nothing is
    /// moving
    pub fn take_settled(&mut self, delay: Duration, now: Instant) -> bool {
        if self.needs_update() {
            return false;
        }
        match self.last_input {
            Some(at) if now.saturating_duration_since(at) >= delay => {
                self.last_input = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.transition = None;
        self.pending_delta = 0.0;
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.current = 0.0;
        self.last_input = None;
    }

    fn start(
        &mut self,
        target: f64,
        duration: Duration,
        easing: choreo_core::EasingType,
        motion: Motion,
        now: Instant,
    ) {
        if (target - self.current).abs() < f64::EPSILON {
            self.transition = None;
            return;
        }
        match &mut self.transition {
            Some((transition, kind)) => {
                transition.retarget(target, duration, easing, now);
                *kind = motion;
            }
            None => {
                self.transition = Some((
                    ScrollTransition::new(self.current, target, duration, easing, now),
                    motion,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::EasingType;

    fn smooth() -> ScrollAnimator {
        ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: 100,
            ..Default::default()
        })
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        let now = Instant::now();
        animator.scroll_to(100.0, 200.0, now);
        assert_eq!(animator.current_scroll(), 100.0);
        assert!(!animator.is_animating());

        animator.scroll_by(500.0, 200.0, now);
        assert_eq!(animator.current_scroll(), 200.0);
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = smooth();
        let now = Instant::now();
        animator.scroll_by(10.0, 200.0, now);
        animator.scroll_by(10.0, 200.0, now);
        animator.scroll_by(10.0, 200.0, now);
        animator.update(200.0, now);
        assert_eq!(animator.target_scroll(), 30.0);

        animator.update(200.0, now + Duration::from_millis(150));
        assert_eq!(animator.current_scroll(), 30.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_clamps_to_extent() {
        let mut animator = smooth();
        let now = Instant::now();
        animator.set_scroll(50.0);
        animator.scroll_to(300.0, 100.0, now);
        assert_eq!(animator.target_scroll(), 100.0);
        animator.scroll_by(-500.0, 100.0, now);
        animator.update(100.0, now);
        assert_eq!(animator.target_scroll(), 0.0);
    }

    #[test]
    fn test_user_input_retargets_snap_from_current_position() {
        let mut animator = smooth();
        let now = Instant::now();
        animator.set_scroll(1000.0);
        let plan = SnapPlan {
            from_px: 1000.0,
            to_px: 2000.0,
            duration: Duration::from_millis(200),
            easing: EasingType::Linear,
        };
        animator.snap_to(&plan, now);
        assert!(animator.is_snapping());

        let mid = now + Duration::from_millis(100);
        assert!((animator.update(5000.0, mid) - 1500.0).abs() < 1e-6);

        animator.scroll_by(-40.0, 5000.0, mid);
        animator.update(5000.0, mid);
        assert!(!animator.is_snapping());
        assert!((animator.target_scroll() - 1460.0).abs() < 1e-6);
        assert!((animator.current_scroll() - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn test_interrupting_motion_takes_its_own_easing() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: 100,
            easing: EasingType::Linear,
            ..Default::default()
        });
        let now = Instant::now();
        let plan = SnapPlan {
            from_px: 0.0,
            to_px: 1000.0,
            duration: Duration::from_millis(200),
            easing: EasingType::Power2Out,
        };
        animator.snap_to(&plan, now);
        animator.scroll_by(100.0, 5000.0, now);
        animator.update(5000.0, now);

        // user motion from 0 to 100 over 100ms, linear: halfway at 50ms
        let mid = animator.update(5000.0, now + Duration::from_millis(50));
        assert!((mid - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_take_settled_fires_once() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        let now = Instant::now();
        let delay = Duration::from_millis(120);
        assert!(!animator.take_settled(delay, now));

        animator.scroll_by(40.0, 1000.0, now);
        assert!(!animator.take_settled(delay, now + Duration::from_millis(50)));
        assert!(animator.take_settled(delay, now + Duration::from_millis(130)));
        assert!(!animator.take_settled(delay, now + Duration::from_millis(500)));
    }
}
