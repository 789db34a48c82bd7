use tracing::debug;

use crate::trigger::PinRecord;

use super::targets::{SnapRange, SnapTargetSet};

/// Normalize pin records against the page's scrollable extent
///
/// Returns an empty set when the page cannot scroll or nothing is pinned;
/// callers treat that as "leave scrolling unconstrained".
pub fn collect_snap_targets(pins: &[PinRecord], max_scroll: f64) -> SnapTargetSet {
    if !max_scroll.is_finite() || max_scroll <= 0.0 {
        debug!(max_scroll, "No scrollable extent, skipping snap targets");
        return SnapTargetSet::default();
    }
    if pins.is_empty() {
        debug!("No pinned sections, skipping snap targets");
        return SnapTargetSet::default();
    }

    let ranges = pins
        .iter()
        .map(|pin| SnapRange {
            start: pin.start / max_scroll,
            end: pin.end / max_scroll,
            center: pin.center() / max_scroll,
        })
        .collect();

    SnapTargetSet::new(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionId;

    #[test]
    fn test_normalizes_and_sorts() {
        let pins = vec![
            PinRecord::new(SectionId::from("about"), 4000.0, 5000.0),
            PinRecord::new(SectionId::from("hero"), 1000.0, 2000.0),
        ];
        let set = collect_snap_targets(&pins, 10_000.0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.ranges()[0].start, 0.1);
        assert_eq!(set.ranges()[0].end, 0.2);
        assert!((set.ranges()[0].center - 0.15).abs() < 1e-12);
        assert_eq!(set.ranges()[1].start, 0.4);
    }

    #[test]
    fn test_empty_when_no_extent() {
        let pins = vec![PinRecord::new(SectionId::from("hero"), 0.0, 100.0)];
        assert!(collect_snap_targets(&pins, 0.0).is_empty());
        assert!(collect_snap_targets(&pins, f64::NAN).is_empty());
    }

    #[test]
    fn test_empty_when_nothing_pinned() {
        assert!(collect_snap_targets(&[], 5000.0).is_empty());
    }
}
