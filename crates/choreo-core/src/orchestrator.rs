//! Scroll choreography orchestrator
//!
//! Owns every mounted section, keeps page layout and trigger ranges current,
//! turns scroll positions into applied styles and installs the page-wide snap
//! once the deferred snapshot completes.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cancellation::CancellationToken;
use crate::config::{AppConfig, SnapConfig, ViewportConfig};
use crate::layout::PageLayout;
use crate::motion::ScrubFollower;
use crate::section::{SectionId, SectionSpec};
use crate::snap::{collect_snap_targets, SnapCoordinator, SnapPlan, SnapTargetSet};
use crate::timeline::{StyleContext, StyleSink, Timeline, VisualState};
use crate::trigger::{PinRecord, RestState, Trigger, TriggerRange};
use crate::viewport::{ScrollPosition, ScrollSource};

/// A trigger of a mounted section with its live scrub state
#[derive(Debug)]
struct ActiveTrigger {
    trigger: Trigger,
    timeline: Timeline,
    leave_back: Option<RestState>,
    follower: ScrubFollower,
    range: TriggerRange,
    /// Scroll has been past the range start since the last leave-back
    entered: bool,
}

#[derive(Debug)]
struct IntroPlayback {
    timeline: Timeline,
    elapsed: f64,
    duration: f64,
    finished: bool,
}

#[derive(Debug)]
struct Section {
    spec: SectionSpec,
    triggers: Vec<ActiveTrigger>,
    intro: Option<IntroPlayback>,
    style: StyleContext,
}

impl Section {
    fn new(spec: SectionSpec, smoothing: bool) -> Self {
        let triggers = spec
            .timelines
            .iter()
            .map(|t| ActiveTrigger {
                trigger: t.trigger,
                timeline: t.timeline.clone(),
                leave_back: t.leave_back.clone(),
                follower: ScrubFollower::new(if smoothing { t.scrub.lag() } else { None }),
                range: TriggerRange::default(),
                entered: false,
            })
            .collect();
        let intro = spec.intro.clone().map(|timeline| IntroPlayback {
            duration: timeline.duration(),
            timeline,
            elapsed: 0.0,
            finished: false,
        });
        Self {
            spec,
            triggers,
            intro,
            style: StyleContext::new(),
        }
    }

    fn id(&self) -> &SectionId {
        &self.spec.id
    }

    /// Current visual state: scroll timelines in registration order, then the
    /// intro on top while it is still playing
    fn visual_state(&self) -> VisualState {
        let mut state = VisualState::default();
        for trigger in &self.triggers {
            state.merge(trigger.timeline.resolve(trigger.follower.current()));
        }
        if let Some(intro) = self.intro.as_ref().filter(|i| !i.finished) {
            state.merge(intro.timeline.resolve(intro.elapsed));
        }
        state
    }

    fn render(&mut self, sink: &mut dyn StyleSink) {
        let state = self.visual_state();
        for (key, style) in state.iter() {
            for (property, value) in style {
                self.style.apply(sink, key, *property, *value);
            }
        }
    }

    fn apply_rest(&mut self, rest: &RestState, sink: &mut dyn StyleSink) {
        for (key, property, value) in rest.entries() {
            self.style.apply(sink, key, *property, *value);
        }
    }

    /// Advance intro playback. Returns true if anything moved.
    fn advance_intro(&mut self, dt: f64) -> bool {
        let Some(intro) = self.intro.as_mut().filter(|i| !i.finished) else {
            return false;
        };
        intro.elapsed = (intro.elapsed + dt).min(intro.duration);
        true
    }

    /// Mark the intro done once its last frame has been rendered
    fn finish_intro_if_complete(&mut self) {
        if let Some(intro) = self.intro.as_mut() {
            if !intro.finished && intro.elapsed >= intro.duration {
                intro.finished = true;
                debug!(section = %self.spec.id, "Intro timeline finished");
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.intro.as_ref().is_some_and(|i| !i.finished)
            || self.triggers.iter().any(|t| !t.follower.is_settled())
    }
}

/// Handle to the delayed pin-range snapshot
///
/// The host waits on it (typically in a spawned task) and then hands it back
/// to [`Orchestrator::complete_snapshot`].
#[derive(Debug, Clone)]
pub struct DeferredSnapshot {
    id: Uuid,
    token: CancellationToken,
    delay: Duration,
}

impl DeferredSnapshot {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Sleep out the delay. Returns false if the snapshot was cancelled first.
    pub async fn wait(&self) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(self.delay) => !self.token.is_cancelled(),
            _ = self.token.cancelled() => false,
        }
    }
}

pub struct Orchestrator {
    snap_config: SnapConfig,
    smoothing: bool,
    viewport: ViewportConfig,
    sections: Vec<Section>,
    layout: PageLayout,
    scroll_rx: Option<watch::Receiver<ScrollPosition>>,
    last_scroll: Option<f64>,
    pending_snapshot: Option<(Uuid, CancellationToken)>,
    snap: Option<SnapCoordinator>,
    snapshot_taken: bool,
}

impl Orchestrator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            snap_config: config.snap.clone(),
            smoothing: config.scrub.smoothing,
            viewport: config.viewport,
            sections: Vec::new(),
            layout: PageLayout::default(),
            scroll_rx: None,
            last_scroll: None,
            pending_snapshot: None,
            snap: None,
            snapshot_taken: false,
        }
    }

    /// Register a section and apply its state for the current scroll position
    ///
    /// Returns `None` without touching the sink if the section is invalid or any
    /// element handle it animates is not mounted yet.
    pub fn mount(&mut self, spec: SectionSpec, sink: &mut dyn StyleSink) -> Option<SectionId> {
        if let Err(e) = spec.validate() {
            warn!(section = %spec.id, error = %e, "Rejected section");
            return None;
        }
        if let Some(missing) = spec.elements().into_iter().find(|k| !sink.is_mounted(k)) {
            debug!(section = %spec.id, element = %missing, "Element handle missing, skipping section");
            return None;
        }
        if self.sections.iter().any(|s| s.id() == &spec.id) {
            warn!(section = %spec.id, "Section mounted twice, replacing previous instance");
            self.unmount(&spec.id, sink);
        }

        let id = spec.id.clone();
        // page position comes from the spec, not from when its handles showed up
        let rank = spec.page_rank();
        let index = self
            .sections
            .iter()
            .position(|s| s.spec.page_rank() > rank)
            .unwrap_or(self.sections.len());
        self.sections.insert(index, Section::new(spec, self.smoothing));
        self.relayout();

        let scroll_y = self.last_scroll.unwrap_or(0.0);
        if let Some(section) = self.sections.get_mut(index) {
            for trigger in &mut section.triggers {
                trigger.follower.set_target(trigger.range.progress(scroll_y));
                trigger.entered = scroll_y > trigger.range.start;
            }
            section.render(sink);
        }
        if index + 1 < self.sections.len() {
            // sections below moved down
            self.refresh_targets(scroll_y, sink);
        }

        if self.snapshot_taken {
            self.recompute_snap_targets();
        }
        info!(section = %id, pinned = self.layout.bounds(&id).is_some_and(|b| b.pin.is_some()), "Mounted section");
        Some(id)
    }

    /// Revert every style the section wrote and drop its pin
    pub fn unmount(&mut self, id: &SectionId, sink: &mut dyn StyleSink) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.id() == id) else {
            return false;
        };
        let mut section = self.sections.remove(index);
        section.style.revert(sink);
        self.relayout();
        if index < self.sections.len() {
            // sections below moved up
            self.refresh_targets(self.last_scroll.unwrap_or(0.0), sink);
        }
        if self.snapshot_taken {
            self.recompute_snap_targets();
        }
        info!(section = %id, "Unmounted section");
        true
    }

    /// Subscribe to a scroll source, replacing any previous subscription
    pub fn attach(&mut self, source: &ScrollSource) {
        self.scroll_rx = Some(source.subscribe());
    }

    /// Apply the latest published scroll position if it changed
    pub fn poll(&mut self, sink: &mut dyn StyleSink) -> bool {
        let Some(rx) = self.scroll_rx.as_mut() else {
            return false;
        };
        match rx.has_changed() {
            Ok(true) => {
                let position = *rx.borrow_and_update();
                self.on_scroll(position.scroll_y, sink);
                true
            }
            Ok(false) => false,
            Err(_) => {
                debug!("Scroll source closed, dropping subscription");
                self.scroll_rx = None;
                false
            }
        }
    }

    /// Feed a page scroll offset to every trigger
    pub fn on_scroll(&mut self, scroll_y: f64, sink: &mut dyn StyleSink) {
        let moving_back = self.last_scroll.is_some_and(|prev| scroll_y < prev);
        self.last_scroll = Some(scroll_y);

        for section in &mut self.sections {
            let mut resets = Vec::new();
            for trigger in &mut section.triggers {
                let target = trigger.range.progress(scroll_y);
                trigger.follower.set_target(target);

                if scroll_y > trigger.range.start {
                    trigger.entered = true;
                } else if trigger.entered && moving_back {
                    trigger.entered = false;
                    if let Some(rest) = &trigger.leave_back {
                        trigger.follower.jump_to(target);
                        resets.push(rest.clone());
                    }
                }
            }
            section.render(sink);
            for rest in &resets {
                debug!(section = %section.spec.id, "Leave-back reset");
                section.apply_rest(rest, sink);
            }
        }
    }

    /// Advance intro playback and scrub smoothing by `dt`
    ///
    /// Returns true if any section re-rendered.
    pub fn tick(&mut self, dt: Duration, sink: &mut dyn StyleSink) -> bool {
        let secs = dt.as_secs_f64();
        let mut changed = false;
        for section in &mut self.sections {
            let mut dirty = section.advance_intro(secs);
            for trigger in &mut section.triggers {
                dirty |= trigger.follower.advance(dt);
            }
            if dirty {
                section.render(sink);
                section.finish_intro_if_complete();
                changed = true;
            }
        }
        changed
    }

    /// Whether further ticks would still change anything
    pub fn is_animating(&self) -> bool {
        self.sections.iter().any(Section::is_animating)
    }

    /// Start the delayed pin snapshot, superseding any pending one
    pub fn schedule_snapshot(&mut self) -> DeferredSnapshot {
        if let Some((_, token)) = self.pending_snapshot.take() {
            token.cancel();
        }
        let snapshot = DeferredSnapshot {
            id: Uuid::new_v4(),
            token: CancellationToken::new(),
            delay: Duration::from_millis(self.snap_config.snapshot_delay_ms),
        };
        self.pending_snapshot = Some((snapshot.id, snapshot.token.clone()));
        debug!(id = %snapshot.id, delay_ms = self.snap_config.snapshot_delay_ms, "Scheduled snap snapshot");
        snapshot
    }

    /// Collect pins for a snapshot whose delay elapsed
    ///
    /// Returns false for cancelled or superseded snapshots.
    pub fn complete_snapshot(&mut self, snapshot: &DeferredSnapshot) -> bool {
        if snapshot.token.check_cancelled("snap snapshot").is_err() {
            debug!(id = %snapshot.id, "Snapshot cancelled");
            return false;
        }
        match &self.pending_snapshot {
            Some((id, _)) if *id == snapshot.id => {}
            _ => {
                debug!(id = %snapshot.id, "Stale snapshot ignored");
                return false;
            }
        }
        self.pending_snapshot = None;
        self.snapshot_taken = true;
        self.recompute_snap_targets();
        true
    }

    /// Rebuild the snap target set from the current layout
    pub fn recompute_snap_targets(&mut self) -> usize {
        if !self.snap_config.enabled {
            self.snap = None;
            return 0;
        }
        let targets = collect_snap_targets(&self.layout.pin_records(), self.layout.max_scroll);
        if targets.is_empty() {
            if self.snap.take().is_some() {
                debug!("Removed global snap");
            }
            return 0;
        }
        let count = targets.len();
        self.snap = Some(SnapCoordinator::new(targets, &self.snap_config));
        debug!(ranges = count, max_scroll = self.layout.max_scroll, "Installed global snap");
        count
    }

    /// Relayout for a new viewport and re-apply the current scroll position
    pub fn resize(&mut self, viewport: ViewportConfig, sink: &mut dyn StyleSink) {
        self.viewport = viewport;
        self.relayout();
        if let Some(scroll_y) = self.last_scroll {
            self.on_scroll(scroll_y.min(self.layout.max_scroll), sink);
        }
        if self.snapshot_taken {
            self.recompute_snap_targets();
        }
    }

    /// Settle position in page px for a resting `scroll_y`, if snapping is installed
    pub fn snap_target(&self, scroll_y: f64) -> Option<f64> {
        let snap = self.snap.as_ref()?;
        let max_scroll = self.layout.max_scroll;
        let value = ScrollPosition::new(scroll_y, max_scroll).normalized();
        Some(snap.snap(value) * max_scroll)
    }

    pub fn snap_plan(&self, scroll_y: f64) -> Option<SnapPlan> {
        self.snap.as_ref()?.plan(scroll_y, self.layout.max_scroll)
    }

    pub fn snap_targets(&self) -> Option<&SnapTargetSet> {
        self.snap.as_ref().map(|s| s.targets())
    }

    pub fn pin_records(&self) -> Vec<PinRecord> {
        self.layout.pin_records()
    }

    pub fn max_scroll(&self) -> f64 {
        self.layout.max_scroll
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn viewport(&self) -> ViewportConfig {
        self.viewport
    }

    pub fn last_scroll(&self) -> Option<f64> {
        self.last_scroll
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(Section::id)
    }

    /// Applied progress of the section's first trigger
    pub fn section_progress(&self, id: &SectionId) -> Option<f64> {
        self.sections
            .iter()
            .find(|s| s.id() == id)
            .and_then(|s| s.triggers.first())
            .map(|t| t.follower.current())
    }

    /// Undo everything: cancel the pending snapshot, revert every section,
    /// remove the snap and drop the scroll subscription. Safe to call twice.
    pub fn teardown(&mut self, sink: &mut dyn StyleSink) {
        if let Some((_, token)) = self.pending_snapshot.take() {
            token.cancel();
        }
        let count = self.sections.len();
        for mut section in self.sections.drain(..) {
            section.style.revert(sink);
        }
        self.snap = None;
        self.scroll_rx = None;
        self.layout = PageLayout::default();
        self.last_scroll = None;
        self.snapshot_taken = false;
        if count > 0 {
            info!(sections = count, "Tore down choreography");
        }
    }

    /// Re-aim every trigger at `scroll_y` after a layout change
    fn refresh_targets(&mut self, scroll_y: f64, sink: &mut dyn StyleSink) {
        for section in &mut self.sections {
            for trigger in &mut section.triggers {
                trigger.follower.set_target(trigger.range.progress(scroll_y));
            }
            section.render(sink);
        }
    }

    fn relayout(&mut self) {
        let vh = self.viewport.height;
        self.layout = PageLayout::compute(self.sections.iter().map(|s| &s.spec), vh);
        for (section, bounds) in self.sections.iter_mut().zip(&self.layout.sections) {
            for trigger in &mut section.triggers {
                trigger.range = trigger.trigger.range(bounds.top, vh);
            }
        }
    }
}
