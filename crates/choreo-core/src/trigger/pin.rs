use serde::Serialize;

use crate::section::SectionId;

/// Scroll span during which a pinned section is held in the viewport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinRecord {
    pub section: SectionId,
    /// Page scroll offset where pinning begins
    pub start: f64,
    /// Page scroll offset where normal scroll resumes
    pub end: f64,
}

impl PinRecord {
    pub fn new(section: SectionId, start: f64, end: f64) -> Self {
        Self { section, start, end }
    }

    /// Midpoint of the pinned span
    #[inline]
    pub fn center(&self) -> f64 {
        self.start + (self.end - self.start) * 0.5
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, scroll_y: f64) -> bool {
        (self.start..=self.end).contains(&scroll_y)
    }
}
