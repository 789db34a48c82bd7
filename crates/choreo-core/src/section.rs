use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timeline::{ElementKey, Timeline};
use crate::trigger::ScrubbedTimeline;
use crate::{Error, Result};

/// Unique section identifier (doubles as the anchor name, e.g. `#services`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declarative description of a page section and its choreography
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: SectionId,
    /// Rendered height in viewport heights (pin spacing excluded)
    pub height: f64,
    pub timelines: Vec<ScrubbedTimeline>,
    /// Time-based timeline played once after mount
    pub intro: Option<Timeline>,
    /// Position on the page; sections without one follow every ordered section
    pub order: Option<usize>,
}

impl SectionSpec {
    pub fn new(id: impl Into<SectionId>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
            timelines: Vec::new(),
            intro: None,
            order: None,
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Sort key for page placement
    pub(crate) fn page_rank(&self) -> usize {
        self.order.unwrap_or(usize::MAX)
    }

    pub fn with_timeline(mut self, timeline: ScrubbedTimeline) -> Self {
        self.timelines.push(timeline);
        self
    }

    pub fn with_intro(mut self, intro: Timeline) -> Self {
        self.intro = Some(intro);
        self
    }

    /// Whether the section is held in the viewport while it plays
    pub fn pinned(&self) -> bool {
        self.timelines.iter().any(|t| t.trigger.is_pin())
    }

    /// Extra scroll distance (in viewport heights) the pin adds to the page
    pub fn pin_distance(&self) -> Option<f64> {
        self.timelines.iter().find_map(|t| match t.trigger {
            crate::trigger::Trigger::Pin { distance } => Some(distance),
            _ => None,
        })
    }

    /// Every element handle the section needs before it can animate
    pub fn elements(&self) -> BTreeSet<ElementKey> {
        let mut elements: BTreeSet<ElementKey> = self
            .timelines
            .iter()
            .flat_map(|t| {
                let rest = t.leave_back.iter().flat_map(|r| r.elements().cloned());
                t.timeline.elements().into_iter().chain(rest)
            })
            .collect();
        if let Some(intro) = &self.intro {
            elements.extend(intro.elements());
        }
        elements
    }

    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidTrack(format!(
                "section {} has non-positive height {}",
                self.id, self.height
            )));
        }
        let pins = self.timelines.iter().filter(|t| t.trigger.is_pin()).count();
        if pins > 1 {
            return Err(Error::InvalidTrack(format!(
                "section {} declares {} pin triggers",
                self.id, pins
            )));
        }
        if let Some(distance) = self.pin_distance() {
            if !distance.is_finite() || distance < 0.0 {
                return Err(Error::InvalidTrack(format!(
                    "section {} has invalid pin distance {}",
                    self.id, distance
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{KeyframeTrack, Property, Value};
    use crate::trigger::{RestState, Scrub, Trigger};

    fn fade(element: &str) -> Timeline {
        Timeline::new().with_track(
            KeyframeTrack::builder([ElementKey::single(element)], 0.0)
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_pinned_section() {
        let spec = SectionSpec::new("about", 1.0).with_timeline(
            ScrubbedTimeline::new(Trigger::Pin { distance: 1.25 }, Scrub::seconds(0.6), fade("about.bg"))
                .reset_on_leave_back(
                    RestState::new().set(ElementKey::single("about.panel"), &[(Property::X, Value::px(0.0))]),
                ),
        );
        assert!(spec.pinned());
        assert_eq!(spec.pin_distance(), Some(1.25));
        assert_eq!(spec.elements().len(), 2);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_two_pins_rejected() {
        let pin = ScrubbedTimeline::new(Trigger::Pin { distance: 1.0 }, Scrub::Immediate, fade("a"));
        let spec = SectionSpec::new("twice", 1.0)
            .with_timeline(pin.clone())
            .with_timeline(pin);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_unpinned_section() {
        let spec = SectionSpec::new("footer", 0.45);
        assert!(!spec.pinned());
        assert_eq!(spec.pin_distance(), None);
        assert!(spec.elements().is_empty());
    }
}
