use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::scroll::{ScrollConfig, ScrollConfigExt};

/// Polls terminal events at the idle tick rate, or at the animation frame
/// rate while something is moving
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_scroll_config(tick_rate_ms, &ScrollConfig::default())
    }

    /// Animation ticks follow the scroll config's frame rate
    pub fn with_scroll_config(tick_rate_ms: u64, scroll: &ScrollConfig) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        Self {
            tick_rate,
            animation_tick: scroll.frame_interval(tick_rate),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // crossterm reports releases on some platforms
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_tick_from_scroll_config() {
        let handler = EventHandler::with_scroll_config(100, &ScrollConfig::default());
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
        assert_eq!(handler.animation_tick, Duration::from_millis(16));

        let slow = ScrollConfig { animation_fps: 4, ..Default::default() };
        let handler = EventHandler::with_scroll_config(100, &slow);
        assert_eq!(handler.animation_tick, Duration::from_millis(100));
    }
}
