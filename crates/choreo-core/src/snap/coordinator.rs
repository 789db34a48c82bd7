use std::time::Duration;

use serde::Serialize;

use crate::config::{EasingType, SnapConfig};

use super::targets::SnapTargetSet;

/// Below this many pixels a snap is not worth animating
const MIN_SNAP_DISTANCE_PX: f64 = 0.5;

/// A snap the caller should animate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapPlan {
    pub from_px: f64,
    pub to_px: f64,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    pub easing: EasingType,
}

mod duration_ms {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

/// Installed snap behavior: decides where a settled scroll should land and
/// how long the move takes
#[derive(Debug, Clone, PartialEq)]
pub struct SnapCoordinator {
    targets: SnapTargetSet,
    buffer: f64,
    min_duration: Duration,
    max_duration: Duration,
    full_duration_distance: f64,
    easing: EasingType,
}

impl SnapCoordinator {
    pub fn new(targets: SnapTargetSet, config: &SnapConfig) -> Self {
        let min_duration = Duration::from_millis(config.min_duration_ms);
        let max_duration = Duration::from_millis(config.max_duration_ms).max(min_duration);
        Self {
            targets,
            buffer: config.buffer.max(0.0),
            min_duration,
            max_duration,
            full_duration_distance: config.full_duration_distance,
            easing: config.easing,
        }
    }

    pub fn targets(&self) -> &SnapTargetSet {
        &self.targets
    }

    /// Normalized settle position for a normalized scroll value
    pub fn snap(&self, value: f64) -> f64 {
        self.targets.snap(value, self.buffer)
    }

    /// Transition length for a move of `distance` normalized units, scaled
    /// linearly between the configured bounds
    pub fn transition_duration(&self, distance: f64) -> Duration {
        let scale = if self.full_duration_distance > 0.0 {
            (distance.abs() / self.full_duration_distance).min(1.0)
        } else {
            1.0
        };
        let span_ms = (self.max_duration - self.min_duration).as_millis() as f64;
        self.min_duration + Duration::from_millis((span_ms * scale).round() as u64)
    }

    /// Plan the settle move for a resting scroll offset, or `None` when the
    /// offset is already where it should be
    pub fn plan(&self, scroll_y: f64, max_scroll: f64) -> Option<SnapPlan> {
        if max_scroll <= 0.0 || self.targets.is_empty() {
            return None;
        }
        let value = (scroll_y / max_scroll).clamp(0.0, 1.0);
        let snapped = self.snap(value);
        let to_px = snapped * max_scroll;
        if (to_px - scroll_y).abs() < MIN_SNAP_DISTANCE_PX {
            return None;
        }
        Some(SnapPlan {
            from_px: scroll_y,
            to_px,
            duration: self.transition_duration(snapped - value),
            easing: self.easing,
        })
    }
}
