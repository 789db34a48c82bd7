use std::time::{Duration, Instant};

use anyhow::Result;
use choreo_core::layout::SectionBounds;
use choreo_core::page::{self, anchor_target, NavState, NAV_LINKS};
use choreo_core::timeline::InlineStyles;
use choreo_core::{AppConfig, DeferredSnapshot, Orchestrator, ScrollPosition, ScrollSource, SectionSpec};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::input::Action;
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Current application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scrolling the page
    Normal,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    pub theme: Theme,
    pub mode: Mode,
    /// Choreography driving the simulated page
    pub orchestrator: Orchestrator,
    /// Inline styles of every mounted element
    pub styles: InlineStyles,
    /// Keyboard scrolling and snap playback
    pub scroller: ScrollAnimator,
    /// Whether the element inspector panel is visible
    pub show_inspector: bool,
    /// First key of a two-key sequence
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    source: ScrollSource,
    specs: Vec<SectionSpec>,
    snapshot_tx: mpsc::UnboundedSender<DeferredSnapshot>,
    snapshot_rx: mpsc::UnboundedReceiver<DeferredSnapshot>,
    last_frame: Instant,
}

impl App {
    /// Build the landing page and mount it. Must be called inside a tokio runtime.
    pub fn new(config: AppConfig, theme: Theme) -> Result<Self> {
        let specs = page::landing_page()?;
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            orchestrator: Orchestrator::new(&config),
            scroller: ScrollAnimator::new(config.ui.scroll.clone()),
            show_inspector: config.ui.show_inspector,
            config,
            theme,
            mode: Mode::Normal,
            styles: InlineStyles::new(),
            pending_key: None,
            status_message: None,
            should_quit: false,
            source: ScrollSource::new(),
            specs,
            snapshot_tx,
            snapshot_rx,
            last_frame: Instant::now(),
        };
        app.mount_page();
        Ok(app)
    }

    /// Render the markup, mount every section and schedule the snap snapshot
    fn mount_page(&mut self) {
        for spec in &self.specs {
            self.styles.mount(spec.elements());
        }
        let mut mounted = 0;
        for spec in &self.specs {
            if self.orchestrator.mount(spec.clone(), &mut self.styles).is_some() {
                mounted += 1;
            }
        }
        self.orchestrator.attach(&self.source);
        self.source.publish(ScrollPosition::new(
            self.scroller.current_scroll(),
            self.orchestrator.max_scroll(),
        ));
        self.schedule_snapshot();
        info!(sections = mounted, max_scroll = self.orchestrator.max_scroll(), "Mounted landing page");
    }

    fn schedule_snapshot(&mut self) {
        let snapshot = self.orchestrator.schedule_snapshot();
        let tx = self.snapshot_tx.clone();
        tokio::spawn(async move {
            if snapshot.wait().await {
                let _ = tx.send(snapshot);
            }
        });
    }

    /// Hand finished background work back to the orchestrator
    pub fn drain_tasks(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.try_recv() {
            if self.orchestrator.complete_snapshot(&snapshot) {
                let ranges = self.orchestrator.snap_targets().map(|t| t.len()).unwrap_or(0);
                debug!(ranges, "Snap snapshot completed");
            }
        }
    }

    /// Advance scrolling, intro playback and scrub smoothing to `now`
    pub fn frame(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let max_scroll = self.orchestrator.max_scroll();
        let scroll_y = self.scroller.update(max_scroll, now);
        self.source.publish(ScrollPosition::new(scroll_y, max_scroll));
        self.orchestrator.poll(&mut self.styles);
        self.orchestrator.tick(dt, &mut self.styles);

        let settle_delay = Duration::from_millis(self.config.snap.settle_delay_ms);
        if self.scroller.take_settled(settle_delay, now) {
            if let Some(plan) = self.orchestrator.snap_plan(scroll_y) {
                debug!(from = plan.from_px, to = plan.to_px, "Snapping");
                self.scroller.snap_to(&plan, now);
            }
        }
    }

    /// Whether the event loop should run at the animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroller.needs_update() || self.orchestrator.is_animating()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroller.current_scroll()
    }

    /// Section at the top of the viewport
    pub fn current_section(&self) -> Option<&SectionBounds> {
        self.orchestrator.layout().section_at(self.scroll_y())
    }

    pub fn nav_state(&self) -> NavState {
        NavState::from_scroll(self.scroll_y())
    }

    /// Scroll position as a percentage of the extent
    pub fn scroll_percent(&self) -> f64 {
        ScrollPosition::new(self.scroll_y(), self.orchestrator.max_scroll()).normalized() * 100.0
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let max_scroll = self.orchestrator.max_scroll();
        let viewport_px = self.orchestrator.viewport().height;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroller.scroll_down(max_scroll, now),
            Action::ScrollUp => self.scroller.scroll_up(max_scroll, now),
            Action::ScrollHalfPageDown => self.scroller.scroll_half_page_down(viewport_px, max_scroll, now),
            Action::ScrollHalfPageUp => self.scroller.scroll_half_page_up(viewport_px, max_scroll, now),
            Action::ScrollPageDown => self.scroller.scroll_full_page_down(viewport_px, max_scroll, now),
            Action::ScrollPageUp => self.scroller.scroll_full_page_up(viewport_px, max_scroll, now),
            Action::JumpToTop => self.scroller.scroll_to(0.0, max_scroll, now),
            Action::JumpToBottom => self.scroller.scroll_to(max_scroll, max_scroll, now),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSection => {
                if let Some(top) = self.next_section_top() {
                    self.scroller.scroll_to(top, max_scroll, now);
                }
            }
            Action::PrevSection => {
                if let Some(top) = self.prev_section_top() {
                    self.scroller.scroll_to(top, max_scroll, now);
                }
            }
            Action::NavLink(index) => self.follow_nav_link(index, now),
            Action::ToggleInspector => self.show_inspector = !self.show_inspector,
            Action::RecomputeSnap => {
                let ranges = self.orchestrator.recompute_snap_targets();
                self.status_message = Some(format!("Snap targets: {} pinned ranges", ranges));
            }
            Action::Remount => self.remount(),
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            Action::None => {}
        }
    }

    /// Tear the choreography down and mount it again from the top
    pub fn remount(&mut self) {
        self.orchestrator.teardown(&mut self.styles);
        if !self.styles.is_clean() {
            warn!("Inline styles left behind after teardown");
        }
        self.styles = InlineStyles::new();
        self.scroller.reset();
        self.mount_page();
        self.status_message = Some("Remounted".to_string());
    }

    /// Unmount everything before exit
    pub fn teardown(&mut self) {
        self.orchestrator.teardown(&mut self.styles);
    }

    fn follow_nav_link(&mut self, index: usize, now: Instant) {
        let href = match index {
            0 => "#",
            i => match NAV_LINKS.get(i - 1) {
                Some(link) => link.href,
                None => return,
            },
        };
        match anchor_target(self.orchestrator.layout(), href) {
            Some(target) => {
                self.scroller.scroll_to(target, self.orchestrator.max_scroll(), now);
            }
            None => self.status_message = Some(format!("No section for {}", href)),
        }
    }

    /// Section tops and pin centers, the places section jumps stop at
    fn section_stops(&self) -> Vec<f64> {
        let mut stops: Vec<f64> = self
            .orchestrator
            .layout()
            .sections
            .iter()
            .map(|b| match b.pin {
                Some((start, end)) => (start + end) / 2.0,
                None => b.top,
            })
            .map(|y| y.min(self.orchestrator.max_scroll()))
            .collect();
        stops.dedup_by(|a, b| (*a - *b).abs() < 1.0);
        stops
    }

    fn next_section_top(&self) -> Option<f64> {
        let y = self.scroller.target_scroll();
        self.section_stops().into_iter().find(|&s| s > y + 1.0)
    }

    fn prev_section_top(&self) -> Option<f64> {
        let y = self.scroller.target_scroll();
        self.section_stops().into_iter().rev().find(|&s| s < y - 1.0)
    }
}
