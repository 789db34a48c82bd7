use serde::Serialize;

/// A pinned range in normalized scroll units (0 = top, 1 = max scroll)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapRange {
    pub start: f64,
    pub end: f64,
    pub center: f64,
}

impl SnapRange {
    /// Whether `value` falls inside the range widened by `buffer` on both sides
    #[inline]
    pub fn contains(&self, value: f64, buffer: f64) -> bool {
        value >= self.start - buffer && value <= self.end + buffer
    }
}

/// Pinned ranges sorted by ascending start
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SnapTargetSet {
    ranges: Vec<SnapRange>,
}

impl SnapTargetSet {
    /// Build a set, sorting by start. Equal starts keep their given order.
    pub fn new(mut ranges: Vec<SnapRange>) -> Self {
        ranges.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { ranges }
    }

    pub fn ranges(&self) -> &[SnapRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether `value` lies inside any range (with `buffer` forgiveness)
    pub fn is_inside(&self, value: f64, buffer: f64) -> bool {
        self.ranges.iter().any(|r| r.contains(value, buffer))
    }

    /// Adjusted settle position for a normalized scroll `value`
    ///
    /// Outside every range the value is returned unchanged. Inside, the closest
    /// center among the containing ranges wins; on an exact tie the range with
    /// the smaller start is kept.
    pub fn snap(&self, value: f64, buffer: f64) -> f64 {
        let mut containing = self.ranges.iter().filter(|r| r.contains(value, buffer));
        let Some(first) = containing.next() else {
            return value;
        };
        containing
            .fold(first.center, |closest, r| {
                if (r.center - value).abs() < (closest - value).abs() {
                    r.center
                } else {
                    closest
                }
            })
    }
}
