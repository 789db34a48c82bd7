use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::style::{ElementKey, ElementStyle};
use super::track::KeyframeTrack;
use super::value::{Property, Value};

/// An ordered set of keyframe tracks sharing one position axis
///
/// Scrubbed section timelines use scroll progress in [0, 1]; intro timelines
/// use seconds since mount. Resolution is a pure function of the position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<KeyframeTrack>,
}

/// Which track currently owns an `(element, property)` pair
#[derive(Debug, Clone, Copy)]
struct Owner {
    start: f64,
    order: usize,
    value: Value,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, track: KeyframeTrack) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn push(&mut self, track: KeyframeTrack) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[KeyframeTrack] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Position at which the last track finishes
    pub fn duration(&self) -> f64 {
        self.tracks.iter().map(|t| t.end()).fold(0.0, f64::max)
    }

    /// Every element this timeline writes to
    pub fn elements(&self) -> BTreeSet<ElementKey> {
        self.tracks
            .iter()
            .flat_map(|t| t.targets().iter().cloned())
            .collect()
    }

    /// Resolve every animated property at `position`
    ///
    /// When several tracks animate the same property of the same element, the
    /// one that started most recently wins (later registration breaks ties).
    /// Before any of them has started, the earliest track's `from` value is
    /// shown, so elements sit in their pre-entrance state.
    pub fn resolve(&self, position: f64) -> VisualState {
        let mut started: BTreeMap<(ElementKey, Property), Owner> = BTreeMap::new();
        let mut pending: BTreeMap<(ElementKey, Property), Owner> = BTreeMap::new();

        for (order, track) in self.tracks.iter().enumerate() {
            for (index, key) in track.targets().iter().enumerate() {
                let start = track.start_for(index);
                if start <= position {
                    for (property, value) in track.sample(index, position) {
                        let candidate = Owner { start, order, value };
                        started
                            .entry((key.clone(), property))
                            .and_modify(|owner| {
                                if (start, order) >= (owner.start, owner.order) {
                                    *owner = candidate;
                                }
                            })
                            .or_insert(candidate);
                    }
                } else {
                    for tween in track.tweens() {
                        let candidate = Owner {
                            start,
                            order,
                            value: tween.from,
                        };
                        pending
                            .entry((key.clone(), tween.property))
                            .and_modify(|owner| {
                                if (start, order) < (owner.start, owner.order) {
                                    *owner = candidate;
                                }
                            })
                            .or_insert(candidate);
                    }
                }
            }
        }

        for (slot, owner) in pending {
            started.entry(slot).or_insert(owner);
        }

        let mut state = VisualState::default();
        for ((key, property), owner) in started {
            state.styles.entry(key).or_default().insert(property, owner.value);
        }
        state
    }
}

/// Resolved styles of every element a timeline animates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualState {
    styles: BTreeMap<ElementKey, ElementStyle>,
}

/// Serializable view of one element's resolved style
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedElement {
    pub element: String,
    pub index: usize,
    pub properties: BTreeMap<Property, String>,
}

impl VisualState {
    pub fn get(&self, key: &ElementKey, property: Property) -> Option<Value> {
        self.styles.get(key).and_then(|s| s.get(&property)).copied()
    }

    pub fn style_of(&self, key: &ElementKey) -> Option<&ElementStyle> {
        self.styles.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementKey, &ElementStyle)> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Overlay `other` on top of this state
    pub fn merge(&mut self, other: VisualState) {
        for (key, style) in other.styles {
            self.styles.entry(key).or_default().extend(style);
        }
    }

    /// Flatten into entries suitable for JSON output
    pub fn to_entries(&self) -> Vec<ResolvedElement> {
        self.styles
            .iter()
            .map(|(key, style)| ResolvedElement {
                element: key.element.clone(),
                index: key.index,
                properties: style.iter().map(|(p, v)| (*p, v.to_string())).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;

    fn bg() -> ElementKey {
        ElementKey::single("about.bg")
    }

    /// Background that scales in over 0..0.3 and out over 0.7..1.0
    fn entrance_exit() -> Timeline {
        Timeline::new()
            .with_track(
                KeyframeTrack::builder([bg()], 0.0)
                    .tween(Property::Scale, Value::num(1.1), Value::num(1.0))
                    .tween(Property::Opacity, Value::num(0.6), Value::num(1.0))
                    .build()
                    .unwrap(),
            )
            .with_track(
                KeyframeTrack::builder([bg()], 0.7)
                    .ease(EasingType::Power2In)
                    .tween(Property::Scale, Value::num(1.0), Value::num(1.06))
                    .tween(Property::Opacity, Value::num(1.0), Value::num(0.0))
                    .build()
                    .unwrap(),
            )
    }

    #[test]
    fn test_entrance_start_and_end() {
        let timeline = entrance_exit();
        let start = timeline.resolve(0.0);
        assert_eq!(start.get(&bg(), Property::Scale), Some(Value::num(1.1)));
        assert_eq!(start.get(&bg(), Property::Opacity), Some(Value::num(0.6)));

        let end = timeline.resolve(1.0);
        assert_eq!(end.get(&bg(), Property::Scale), Some(Value::num(1.06)));
        assert_eq!(end.get(&bg(), Property::Opacity), Some(Value::num(0.0)));
    }

    #[test]
    fn test_dwell_band_holds_entrance_values() {
        let timeline = entrance_exit();
        for p in [0.3, 0.45, 0.6, 0.69] {
            let state = timeline.resolve(p);
            assert_eq!(state.get(&bg(), Property::Scale), Some(Value::num(1.0)), "p={}", p);
            assert_eq!(state.get(&bg(), Property::Opacity), Some(Value::num(1.0)), "p={}", p);
        }
    }

    #[test]
    fn test_exit_is_eased() {
        let timeline = entrance_exit();
        let state = timeline.resolve(0.85);
        let opacity = state.get(&bg(), Property::Opacity).unwrap().amount;
        // power2.in at t=0.5 is 0.125 of the way down
        assert!((opacity - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_is_pure() {
        let timeline = entrance_exit();
        for p in [0.0, 0.1, 0.33, 0.7, 0.91, 1.0] {
            assert_eq!(timeline.resolve(p), timeline.resolve(p));
        }
    }

    #[test]
    fn test_untouched_properties_are_absent() {
        let timeline = entrance_exit();
        assert_eq!(timeline.resolve(0.5).get(&bg(), Property::X), None);
        assert_eq!(timeline.resolve(0.5).len(), 1);
    }

    #[test]
    fn test_duration_and_elements() {
        let timeline = entrance_exit();
        assert!((timeline.duration() - 1.0).abs() < 1e-9);
        assert_eq!(timeline.elements().len(), 1);
        assert!(Timeline::new().is_empty());
    }

    #[test]
    fn test_entries_for_json() {
        let entries = entrance_exit().resolve(1.0).to_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].element, "about.bg");
        assert_eq!(entries[0].properties[&Property::Opacity], "0");
    }
}
