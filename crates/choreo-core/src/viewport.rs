//! Scroll position broadcast
//!
//! The host (terminal UI, test driver) publishes the page scroll offset into a
//! `ScrollSource`; each mounted orchestrator holds a subscription. Dropping the
//! receiver is the unsubscribe.

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScrollPosition {
    pub scroll_y: f64,
    pub max_scroll: f64,
}

impl ScrollPosition {
    pub fn new(scroll_y: f64, max_scroll: f64) -> Self {
        Self { scroll_y, max_scroll }
    }

    /// Position as a fraction of the scrollable extent
    pub fn normalized(&self) -> f64 {
        if self.max_scroll <= 0.0 {
            0.0
        } else {
            (self.scroll_y / self.max_scroll).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug)]
pub struct ScrollSource {
    tx: watch::Sender<ScrollPosition>,
}

impl Default for ScrollSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSource {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ScrollPosition::default());
        Self { tx }
    }

    pub fn publish(&self, position: ScrollPosition) {
        self.tx.send_replace(position);
    }

    pub fn subscribe(&self) -> watch::Receiver<ScrollPosition> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn current(&self) -> ScrollPosition {
        *self.tx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized() {
        assert_eq!(ScrollPosition::new(500.0, 1000.0).normalized(), 0.5);
        assert_eq!(ScrollPosition::new(500.0, 0.0).normalized(), 0.0);
        assert_eq!(ScrollPosition::new(1500.0, 1000.0).normalized(), 1.0);
    }

    #[test]
    fn test_subscription_lifecycle() {
        let source = ScrollSource::new();
        assert_eq!(source.subscriber_count(), 0);
        let mut rx = source.subscribe();
        assert_eq!(source.subscriber_count(), 1);

        source.publish(ScrollPosition::new(120.0, 4000.0));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().scroll_y, 120.0);
        assert_eq!(source.current().max_scroll, 4000.0);

        drop(rx);
        assert_eq!(source.subscriber_count(), 0);
    }
}
