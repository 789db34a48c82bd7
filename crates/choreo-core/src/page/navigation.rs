//! Fixed navigation bar state
//!
//! The bar switches to its solid "scrolled" look past a small threshold and
//! its links jump to section tops.

use serde::Serialize;

use crate::layout::PageLayout;
use crate::section::SectionId;

/// Scroll offset (px) past which the bar is drawn as scrolled
pub const SCROLLED_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

impl NavLink {
    /// Section id the link points at (`#services` -> `services`)
    pub fn section(&self) -> Option<SectionId> {
        self.href
            .strip_prefix('#')
            .filter(|s| !s.is_empty())
            .map(SectionId::from)
    }
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink { label: "Services", href: "#services" },
    NavLink { label: "About", href: "#about" },
    NavLink { label: "Contact", href: "#contact" },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub scrolled: bool,
}

impl NavState {
    pub fn from_scroll(scroll_y: f64) -> Self {
        Self {
            scrolled: scroll_y > SCROLLED_THRESHOLD,
        }
    }
}

/// Scroll offset that brings `anchor` (`#id`, or `#` for the top) to the top
/// of the viewport, clamped to the scrollable extent
pub fn anchor_target(layout: &PageLayout, anchor: &str) -> Option<f64> {
    let id = anchor.strip_prefix('#')?;
    if id.is_empty() {
        return Some(0.0);
    }
    let bounds = layout.bounds(&SectionId::from(id))?;
    Some(bounds.top.min(layout.max_scroll))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::landing_page;

    #[test]
    fn test_scrolled_threshold() {
        assert!(!NavState::from_scroll(0.0).scrolled);
        assert!(!NavState::from_scroll(100.0).scrolled);
        assert!(NavState::from_scroll(100.5).scrolled);
    }

    #[test]
    fn test_links_resolve_to_sections() {
        let page = landing_page().unwrap();
        let layout = PageLayout::compute(&page, 1000.0);
        for link in NAV_LINKS {
            let id = link.section().unwrap();
            assert!(layout.bounds(&id).is_some(), "{}", link.href);
        }
        // hero is 1vh + 1.3vh of pin spacing
        let services = anchor_target(&layout, "#services").unwrap();
        assert!((services - 2300.0).abs() < 1e-9);
        assert_eq!(anchor_target(&layout, "#"), Some(0.0));
        assert_eq!(anchor_target(&layout, "#pricing"), None);
        assert_eq!(anchor_target(&layout, "services"), None);
        let contact = anchor_target(&layout, "#contact").unwrap();
        assert!(contact <= layout.max_scroll);
    }
}
