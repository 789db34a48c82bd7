//! Page geometry
//!
//! Sections stack vertically in mount order. A pinned section is followed by
//! a spacer as tall as its pin distance, which is the scroll it consumes while
//! held in place.

use serde::Serialize;

use crate::section::{SectionId, SectionSpec};
use crate::trigger::PinRecord;

/// Bounding box of a mounted section in page-scroll coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: f64,
    /// Bottom edge including pin spacing
    pub bottom: f64,
    /// `(start, end)` scroll offsets while pinned
    pub pin: Option<(f64, f64)>,
}

impl SectionBounds {
    pub fn pin_record(&self) -> Option<PinRecord> {
        self.pin
            .map(|(start, end)| PinRecord::new(self.id.clone(), start, end))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub sections: Vec<SectionBounds>,
    pub document_height: f64,
    /// Largest reachable scroll offset (0 when the page fits the viewport)
    pub max_scroll: f64,
}

impl PageLayout {
    pub fn compute<'a, I>(sections: I, viewport_height: f64) -> Self
    where
        I: IntoIterator<Item = &'a SectionSpec>,
    {
        let mut cursor = 0.0;
        let mut bounds = Vec::new();

        for spec in sections {
            let top = cursor;
            let height = spec.height * viewport_height;
            let pin = spec
                .pin_distance()
                .map(|d| (top, top + d * viewport_height));
            let spacer = pin.map(|(start, end)| end - start).unwrap_or(0.0);
            cursor += height + spacer;
            bounds.push(SectionBounds {
                id: spec.id.clone(),
                top,
                bottom: cursor,
                pin,
            });
        }

        Self {
            sections: bounds,
            document_height: cursor,
            max_scroll: (cursor - viewport_height).max(0.0),
        }
    }

    pub fn bounds(&self, id: &SectionId) -> Option<&SectionBounds> {
        self.sections.iter().find(|b| &b.id == id)
    }

    /// Pin records of every pinned section, in page order
    pub fn pin_records(&self) -> Vec<PinRecord> {
        self.sections.iter().filter_map(|b| b.pin_record()).collect()
    }

    /// Section whose box contains `scroll_y` (the one at the top of the viewport)
    pub fn section_at(&self, scroll_y: f64) -> Option<&SectionBounds> {
        self.sections
            .iter()
            .find(|b| scroll_y >= b.top && scroll_y < b.bottom)
            .or_else(|| self.sections.last().filter(|b| scroll_y >= b.bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{ElementKey, KeyframeTrack, Property, Timeline, Value};
    use crate::trigger::{Scrub, ScrubbedTimeline, Trigger};

    fn pinned(id: &str, distance: f64) -> SectionSpec {
        let timeline = Timeline::new().with_track(
            KeyframeTrack::builder([ElementKey::single(id)], 0.0)
                .tween(Property::Opacity, Value::num(0.0), Value::num(1.0))
                .build()
                .unwrap(),
        );
        SectionSpec::new(id, 1.0).with_timeline(ScrubbedTimeline::new(
            Trigger::Pin { distance },
            Scrub::Immediate,
            timeline,
        ))
    }

    #[test]
    fn test_pin_spacing_pushes_following_sections() {
        let sections = vec![pinned("hero", 1.3), pinned("services", 1.3), SectionSpec::new("footer", 0.5)];
        let layout = PageLayout::compute(&sections, 1000.0);

        let hero = layout.bounds(&SectionId::from("hero")).unwrap();
        assert_eq!(hero.pin, Some((0.0, 1300.0)));
        assert!((hero.bottom - 2300.0).abs() < 1e-9);

        let services = layout.bounds(&SectionId::from("services")).unwrap();
        assert!((services.top - 2300.0).abs() < 1e-9);
        assert_eq!(services.pin, Some((2300.0, 3600.0)));

        assert!((layout.document_height - 5100.0).abs() < 1e-9);
        assert!((layout.max_scroll - 4100.0).abs() < 1e-9);
        assert_eq!(layout.pin_records().len(), 2);
    }

    #[test]
    fn test_short_page_has_no_extent() {
        let sections = vec![SectionSpec::new("only", 0.5)];
        let layout = PageLayout::compute(&sections, 1000.0);
        assert_eq!(layout.max_scroll, 0.0);
        assert!(layout.pin_records().is_empty());
    }

    #[test]
    fn test_section_at() {
        let sections = vec![pinned("hero", 1.0), SectionSpec::new("footer", 0.5)];
        let layout = PageLayout::compute(&sections, 1000.0);
        assert_eq!(layout.section_at(0.0).unwrap().id.as_str(), "hero");
        assert_eq!(layout.section_at(1999.0).unwrap().id.as_str(), "hero");
        assert_eq!(layout.section_at(2000.0).unwrap().id.as_str(), "footer");
        assert_eq!(layout.section_at(9000.0).unwrap().id.as_str(), "footer");
    }
}
