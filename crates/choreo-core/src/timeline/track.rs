use crate::config::EasingType;
use crate::motion::{local_progress, EasingTypeExt};
use crate::{Error, Result};

use super::style::ElementKey;
use super::value::{Property, Tween, Value};

/// Default span of a track on its timeline (the entrance/exit band width)
pub const DEFAULT_TRACK_DURATION: f64 = 0.3;

/// A set of property tweens played over a slice of a timeline
///
/// The i-th target starts at `offset + i * stagger` and runs for `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    targets: Vec<ElementKey>,
    offset: f64,
    duration: f64,
    stagger: f64,
    ease: EasingType,
    tweens: Vec<Tween>,
}

impl KeyframeTrack {
    /// Start building a track for `targets` positioned at `offset`
    pub fn builder<I>(targets: I, offset: f64) -> TrackBuilder
    where
        I: IntoIterator<Item = ElementKey>,
    {
        TrackBuilder {
            targets: targets.into_iter().collect(),
            offset,
            duration: DEFAULT_TRACK_DURATION,
            stagger: 0.0,
            ease: EasingType::Linear,
            tweens: Vec::new(),
        }
    }

    pub fn targets(&self) -> &[ElementKey] {
        &self.targets
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn stagger(&self) -> f64 {
        self.stagger
    }

    pub fn ease(&self) -> EasingType {
        self.ease
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Timeline position where the target at `index` starts moving
    #[inline]
    pub fn start_for(&self, index: usize) -> f64 {
        self.offset + self.stagger * index as f64
    }

    /// Timeline position where the last target finishes
    pub fn end(&self) -> f64 {
        self.start_for(self.targets.len().saturating_sub(1)) + self.duration
    }

    /// Eased local progress of the target at `index`
    #[inline]
    pub fn eased_at(&self, index: usize, position: f64) -> f64 {
        self.ease
            .apply(local_progress(position, self.start_for(index), self.duration))
    }

    /// Property values of the target at `index` when the timeline is at `position`
    pub fn sample(&self, index: usize, position: f64) -> impl Iterator<Item = (Property, Value)> + '_ {
        let t = self.eased_at(index, position);
        self.tweens.iter().map(move |tw| (tw.property, tw.value_at(t)))
    }
}

/// Builder for [`KeyframeTrack`]; all validation happens in `build`
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    targets: Vec<ElementKey>,
    offset: f64,
    duration: f64,
    stagger: f64,
    ease: EasingType,
    tweens: Vec<(Property, Value, Value)>,
}

impl TrackBuilder {
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn ease(mut self, ease: EasingType) -> Self {
        self.ease = ease;
        self
    }

    pub fn tween(mut self, property: Property, from: Value, to: Value) -> Self {
        self.tweens.push((property, from, to));
        self
    }

    pub fn build(self) -> Result<KeyframeTrack> {
        if self.targets.is_empty() {
            return Err(Error::InvalidTrack("track has no targets".to_string()));
        }
        if self.tweens.is_empty() {
            return Err(Error::InvalidTrack(format!(
                "track on {} animates nothing",
                self.targets[0]
            )));
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(Error::InvalidTrack(format!("offset {} out of range", self.offset)));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(Error::InvalidTrack(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        if !self.stagger.is_finite() || self.stagger < 0.0 {
            return Err(Error::InvalidTrack(format!(
                "stagger must be non-negative, got {}",
                self.stagger
            )));
        }

        let mut tweens = Vec::with_capacity(self.tweens.len());
        for (property, from, to) in self.tweens {
            if tweens.iter().any(|t: &Tween| t.property == property) {
                return Err(Error::InvalidTrack(format!(
                    "{} tweened twice in one track",
                    property
                )));
            }
            tweens.push(Tween::new(property, from, to)?);
        }

        Ok(KeyframeTrack {
            targets: self.targets,
            offset: self.offset,
            duration: self.duration,
            stagger: self.stagger,
            ease: self.ease,
            tweens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_content() -> KeyframeTrack {
        KeyframeTrack::builder(ElementKey::group("services.left.content", 3), 0.12)
            .duration(0.12)
            .stagger(0.02)
            .tween(Property::Y, Value::px(18.0), Value::px(0.0))
            .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_stagger_offsets() {
        let track = card_content();
        assert!((track.start_for(0) - 0.12).abs() < 1e-9);
        assert!((track.start_for(2) - 0.16).abs() < 1e-9);
        assert!((track.end() - 0.28).abs() < 1e-9);
    }

    #[test]
    fn test_sample_before_during_after() {
        let track = card_content();

        let before: Vec<_> = track.sample(0, 0.0).collect();
        assert_eq!(before, vec![(Property::Y, Value::px(18.0)), (Property::Opacity, Value::num(0.0))]);

        // halfway through the first child, the third has not started
        let mid = track.sample(0, 0.18).find(|(p, _)| *p == Property::Opacity).unwrap();
        assert!((mid.1.amount - 0.5).abs() < 1e-9);
        let third = track.sample(2, 0.18).find(|(p, _)| *p == Property::Opacity).unwrap();
        assert!((third.1.amount - 0.1666).abs() < 1e-3);

        let after: Vec<_> = track.sample(2, 1.0).collect();
        assert_eq!(after, vec![(Property::Y, Value::px(0.0)), (Property::Opacity, Value::num(1.0))]);
    }

    #[test]
    fn test_build_rejects_bad_tracks() {
        let no_targets = KeyframeTrack::builder(Vec::<ElementKey>::new(), 0.0)
            .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
            .build();
        assert!(matches!(no_targets, Err(Error::InvalidTrack(_))));

        let no_tweens = KeyframeTrack::builder([ElementKey::single("a")], 0.0).build();
        assert!(matches!(no_tweens, Err(Error::InvalidTrack(_))));

        let zero_duration = KeyframeTrack::builder([ElementKey::single("a")], 0.0)
            .duration(0.0)
            .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
            .build();
        assert!(matches!(zero_duration, Err(Error::InvalidTrack(_))));

        let mixed_units = KeyframeTrack::builder([ElementKey::single("a")], 0.0)
            .tween(Property::X, Value::px(10.0), Value::vw(5.0))
            .build();
        assert!(matches!(mixed_units, Err(Error::UnitMismatch { .. })));
    }
}
