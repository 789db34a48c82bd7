//! Progress and interpolation helpers

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, clamped to [0, 1]
#[inline]
pub fn progress_at(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation started at `start` has finished by `now`
#[inline]
pub fn is_complete_at(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values, exact at both ends
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

/// Position of `value` inside `[start, end]`, clamped to [0, 1]
///
/// A zero-length range reports 0 before `start` and 1 from `start` on.
#[inline]
pub fn normalize(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.abs() < f64::EPSILON {
        return if value < start { 0.0 } else { 1.0 };
    }
    ((value - start) / span).clamp(0.0, 1.0)
}

/// Local progress of a track that starts at `offset` and lasts `duration`
/// on a timeline currently at `position`
#[inline]
pub fn local_progress(position: f64, offset: f64, duration: f64) -> f64 {
    normalize(position, offset, offset + duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(1.0, 0.0, 0.25) - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress_at(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_at() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert_eq!(progress_at(start, duration, start), 0.0);
        let half = progress_at(start, duration, start + Duration::from_millis(100));
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(progress_at(start, duration, start + Duration::from_secs(1)), 1.0);
        assert!(is_complete_at(start, duration, start + duration));
        assert!(!is_complete_at(start, duration, start + Duration::from_millis(199)));
    }

    #[test]
    fn test_local_progress() {
        assert_eq!(local_progress(0.0, 0.7, 0.3), 0.0);
        assert!((local_progress(0.85, 0.7, 0.3) - 0.5).abs() < 1e-9);
        assert_eq!(local_progress(1.0, 0.7, 0.3), 1.0);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        assert_eq!(normalize(4.0, 5.0, 5.0), 0.0);
        assert_eq!(normalize(5.0, 5.0, 5.0), 1.0);
    }
}
