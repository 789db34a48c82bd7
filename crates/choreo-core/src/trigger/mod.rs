//! Scroll-linked triggers
//!
//! A trigger turns the page scroll position into the local progress of one
//! timeline. Pin triggers hold their section in the viewport for a fixed
//! scroll distance; viewport triggers scrub while an anchor crosses two
//! viewport-relative thresholds and never hold scroll.

pub mod pin;

use std::time::Duration;

use serde::Serialize;

use crate::motion::normalize;
use crate::timeline::{ElementKey, Property, Timeline, Value};

pub use pin::PinRecord;

/// How a timeline is attached to scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Pin the section at the top of the viewport for `distance` viewport
    /// heights of scrolling (`end: "+=130%"` is a distance of 1.3)
    Pin { distance: f64 },
    /// Scrub while an anchor moves between two viewport thresholds
    ///
    /// `anchor` is measured from the section top in viewport heights;
    /// `start`/`end` are fractions of the viewport height (`"top 80%"` → 0.8).
    Viewport { anchor: f64, start: f64, end: f64 },
}

impl Trigger {
    pub fn is_pin(&self) -> bool {
        matches!(self, Trigger::Pin { .. })
    }

    /// Page-scroll range over which progress runs from 0 to 1
    pub fn range(&self, section_top: f64, viewport_height: f64) -> TriggerRange {
        match *self {
            Trigger::Pin { distance } => TriggerRange {
                start: section_top,
                end: section_top + distance * viewport_height,
            },
            Trigger::Viewport { anchor, start, end } => {
                let anchor_top = section_top + anchor * viewport_height;
                TriggerRange {
                    start: anchor_top - start * viewport_height,
                    end: anchor_top - end * viewport_height,
                }
            }
        }
    }
}

/// Scroll range in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TriggerRange {
    pub start: f64,
    pub end: f64,
}

impl TriggerRange {
    /// Local progress for a scroll position, clamped to [0, 1]
    #[inline]
    pub fn progress(&self, scroll_y: f64) -> f64 {
        normalize(scroll_y, self.start, self.end)
    }
}

/// How closely applied progress follows scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scrub {
    Immediate,
    /// Catch up with the scroll position over the given lag
    Smoothed(Duration),
}

impl Scrub {
    pub fn seconds(secs: f64) -> Self {
        Scrub::Smoothed(Duration::from_secs_f64(secs))
    }

    pub fn lag(&self) -> Option<Duration> {
        match self {
            Scrub::Immediate => None,
            Scrub::Smoothed(lag) => Some(*lag),
        }
    }
}

/// Values forced onto elements when scroll reverses back past a section's start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestState {
    entries: Vec<(ElementKey, Property, Value)>,
}

impl RestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: ElementKey, values: &[(Property, Value)]) -> Self {
        for (property, value) in values {
            self.entries.push((key.clone(), *property, *value));
        }
        self
    }

    pub fn entries(&self) -> &[(ElementKey, Property, Value)] {
        &self.entries
    }

    pub fn elements(&self) -> impl Iterator<Item = &ElementKey> {
        self.entries.iter().map(|(k, _, _)| k)
    }
}

/// A timeline bound to a trigger
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubbedTimeline {
    pub trigger: Trigger,
    pub scrub: Scrub,
    pub timeline: Timeline,
    pub leave_back: Option<RestState>,
}

impl ScrubbedTimeline {
    pub fn new(trigger: Trigger, scrub: Scrub, timeline: Timeline) -> Self {
        Self {
            trigger,
            scrub,
            timeline,
            leave_back: None,
        }
    }

    /// Restore `rest` whenever scroll moves back past the trigger start
    pub fn reset_on_leave_back(mut self, rest: RestState) -> Self {
        self.leave_back = Some(rest);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_range() {
        let range = Trigger::Pin { distance: 1.3 }.range(900.0, 900.0);
        assert_eq!(range.start, 900.0);
        assert!((range.end - 2070.0).abs() < 1e-9);
        assert_eq!(range.progress(0.0), 0.0);
        assert!((range.progress(1485.0) - 0.5).abs() < 1e-9);
        assert_eq!(range.progress(5000.0), 1.0);
    }

    #[test]
    fn test_viewport_range() {
        // header 0.15vh below a section at 5000px: "top 80%" -> "top 55%"
        let trigger = Trigger::Viewport { anchor: 0.15, start: 0.8, end: 0.55 };
        let range = trigger.range(5000.0, 1000.0);
        assert!((range.start - 4350.0).abs() < 1e-9);
        assert!((range.end - 4600.0).abs() < 1e-9);
        assert!(!trigger.is_pin());
    }

    #[test]
    fn test_scrub_lag() {
        assert_eq!(Scrub::Immediate.lag(), None);
        assert_eq!(Scrub::seconds(0.6).lag(), Some(Duration::from_millis(600)));
    }
}
