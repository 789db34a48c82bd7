//! The integrator landing page
//!
//! Seven sections in page order: hero, services, about, feature, solutions,
//! contact and footer. Element handles are named `section.element`; staggered
//! siblings share a name and differ by index.

pub mod intro;
pub mod navigation;
pub mod sections;

use crate::section::{SectionId, SectionSpec};
use crate::Result;

pub use intro::hero_intro;
pub use navigation::{anchor_target, NavLink, NavState, NAV_LINKS, SCROLLED_THRESHOLD};

/// Every section of the page, top to bottom, each tagged with its position
pub fn landing_page() -> Result<Vec<SectionSpec>> {
    let sections = vec![
        sections::hero()?,
        sections::services()?,
        sections::about()?,
        sections::feature()?,
        sections::solutions()?,
        sections::contact()?,
        sections::footer(),
    ];
    Ok(sections
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.with_order(i))
        .collect())
}

/// Look up one section definition by id
pub fn section(id: &SectionId) -> Result<Option<SectionSpec>> {
    Ok(landing_page()?.into_iter().find(|s| &s.id == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewportConfig;
    use crate::layout::PageLayout;
    use crate::snap::collect_snap_targets;
    use crate::timeline::InlineStyles;
    use crate::{AppConfig, Orchestrator};

    #[test]
    fn test_page_builds_and_validates() {
        let page = landing_page().unwrap();
        let ids: Vec<_> = page.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            ["hero", "services", "about", "feature", "solutions", "contact", "footer"]
        );
        for (i, spec) in page.iter().enumerate() {
            spec.validate().unwrap();
            assert_eq!(spec.order, Some(i));
        }
        let pinned: Vec<_> = page.iter().filter(|s| s.pinned()).map(|s| s.id.as_str()).collect();
        assert_eq!(pinned, ["hero", "services", "about", "feature"]);
    }

    #[test]
    fn test_page_snap_targets() {
        let page = landing_page().unwrap();
        let viewport = ViewportConfig::default();
        let layout = PageLayout::compute(&page, viewport.height);
        let targets = collect_snap_targets(&layout.pin_records(), layout.max_scroll);
        assert_eq!(targets.len(), 4);
        let ranges = targets.ranges();
        assert_eq!(ranges[0].start, 0.0);
        for pair in ranges.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
        assert!(ranges[3].end < 1.0);
    }

    #[test]
    fn test_hero_ready_last_still_tops_the_page() {
        let page = landing_page().unwrap();
        let (hero, rest) = page.split_first().unwrap();
        let mut sink = InlineStyles::new();
        let mut orchestrator = Orchestrator::new(&AppConfig::default());

        assert!(orchestrator.mount(hero.clone(), &mut sink).is_none());
        for spec in rest {
            sink.mount(spec.elements());
            orchestrator.mount(spec.clone(), &mut sink).unwrap();
        }
        sink.mount(hero.elements());
        orchestrator.mount(hero.clone(), &mut sink).unwrap();

        let fresh = PageLayout::compute(&page, ViewportConfig::default().height);
        assert_eq!(orchestrator.layout(), &fresh);
        assert_eq!(orchestrator.layout().sections[0].top, 0.0);
    }

    #[test]
    fn test_section_lookup() {
        assert!(section(&SectionId::from("contact")).unwrap().is_some());
        assert!(section(&SectionId::from("pricing")).unwrap().is_none());
    }
}
