use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ReportData, Solution};
use crate::core::{RegionId, SectionId, WidgetId};
use crate::error::DeckResult;
use crate::platform::{
    FrameHandle, FrameScheduler, HeadlessViewport, ManualFrameScheduler, ScrollHost,
    VisibilityEntry, VisibilitySource,
};
use crate::render::{ChartConfig, GraphicsBackend, SurfaceId};

use super::{
    ActiveSectionListener, ChartLifecycleManager, ChartSnapshot, CounterAnimator, CounterDisplay,
    CounterSnapshot, DeckConfig, DeckSnapshot, FrameUpdate, LinkActivation, MountOutcome,
    NavLinkView, NavItem, NavigationController, SectionActivityTracker, SolutionCardView,
    SolutionSelector,
};

/// Effect of one visibility delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub active_section: SectionId,
    pub active_changed: bool,
    pub counters_fired: Vec<WidgetId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeardownReport {
    pub sections_deregistered: usize,
    pub counters_disarmed: usize,
    pub charts_destroyed: usize,
}

/// The page: owns the platform handles and routes their callbacks.
///
/// Section entries go to the activity tracker, counter entries and frame
/// callbacks go to the counter animator, chart mounts go to the lifecycle
/// manager. The three never talk to each other.
pub struct DeckPage<V, F, B>
where
    V: VisibilitySource,
    F: FrameScheduler,
    B: GraphicsBackend,
{
    config: DeckConfig,
    visibility: V,
    frames: F,
    tracker: SectionActivityTracker,
    counters: CounterAnimator,
    displays: IndexMap<WidgetId, CounterDisplay>,
    charts: ChartLifecycleManager<B>,
    navigation: NavigationController,
    solutions: SolutionSelector,
}

impl<V, F, B> DeckPage<V, F, B>
where
    V: VisibilitySource,
    F: FrameScheduler,
    B: GraphicsBackend,
{
    pub fn new(
        config: DeckConfig,
        nav_items: Vec<NavItem>,
        visibility: V,
        frames: F,
        backend: B,
    ) -> DeckResult<Self> {
        config.validate()?;
        let tracker = SectionActivityTracker::from_config(&config)?;
        let counters = CounterAnimator::from_config(&config.counter)?;
        let navigation = NavigationController::new(nav_items, config.scroll_behavior);
        Ok(Self {
            config,
            visibility,
            frames,
            tracker,
            counters,
            displays: IndexMap::new(),
            charts: ChartLifecycleManager::new(backend),
            navigation,
            solutions: SolutionSelector::default(),
        })
    }

    /// Builds a page whose navigation bar lists the report's sections.
    pub fn from_report(
        config: DeckConfig,
        report: &ReportData,
        visibility: V,
        frames: F,
        backend: B,
    ) -> DeckResult<Self> {
        report.validate()?;
        let mut page = Self::new(config, report.nav_items(), visibility, frames, backend)?;
        page.solutions = SolutionSelector::from_report(report);
        Ok(page)
    }

    pub fn mount_section(&mut self, id: SectionId, region: RegionId) -> DeckResult<()> {
        self.tracker.register(id, region, &mut self.visibility)
    }

    pub fn unmount_section(&mut self, id: &SectionId) -> bool {
        self.tracker.deregister(id, &mut self.visibility)
    }

    pub fn mount_counter(
        &mut self,
        widget: WidgetId,
        region: RegionId,
        target: u64,
        display: CounterDisplay,
    ) -> DeckResult<()> {
        self.counters
            .arm(widget.clone(), region, target, &mut self.visibility)?;
        self.displays.insert(widget, display);
        Ok(())
    }

    pub fn unmount_counter(&mut self, widget: &WidgetId) -> bool {
        self.displays.shift_remove(widget);
        self.counters
            .disarm(widget, &mut self.visibility, &mut self.frames)
    }

    pub fn mount_chart(
        &mut self,
        widget: WidgetId,
        surface: SurfaceId,
        config: ChartConfig,
    ) -> DeckResult<MountOutcome> {
        self.charts.mount(widget, surface, config)
    }

    pub fn unmount_chart(&mut self, widget: &WidgetId) -> bool {
        self.charts.unmount(widget)
    }

    /// Routes one platform delivery to the tracker and the counters.
    pub fn handle_visibility(&mut self, entries: &[VisibilityEntry]) -> VisibilityReport {
        let active_changed = self.tracker.handle_entries(entries);
        let counters_fired =
            self.counters
                .handle_entries(entries, &mut self.visibility, &mut self.frames);
        VisibilityReport {
            active_section: self.tracker.active().clone(),
            active_changed,
            counters_fired,
        }
    }

    pub fn on_animation_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> Option<FrameUpdate> {
        self.counters
            .on_frame(handle, timestamp_ms, &mut self.frames)
    }

    /// Activates the nav link for `target` against an external scroll host.
    pub fn navigate<H>(&self, target: &SectionId, host: &mut H) -> LinkActivation
    where
        H: ScrollHost + ?Sized,
    {
        self.navigation
            .on_link_activate(target, &self.tracker, host)
    }

    #[must_use]
    pub fn nav_links(&self) -> Vec<NavLinkView> {
        self.navigation.links(self.tracker.active())
    }

    pub fn subscribe(&mut self, listener: Box<dyn ActiveSectionListener>) -> DeckResult<()> {
        self.tracker.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, listener_id: &str) -> bool {
        self.tracker.unsubscribe(listener_id)
    }

    #[must_use]
    pub fn active_section(&self) -> &SectionId {
        self.tracker.active()
    }

    /// Expands a solution card; the active section is unaffected.
    pub fn select_solution(&mut self, key: &str) -> DeckResult<&Solution> {
        self.solutions.select(key)
    }

    #[must_use]
    pub fn solution_cards(&self) -> Vec<SolutionCardView> {
        self.solutions.cards()
    }

    #[must_use]
    pub fn solutions(&self) -> &SolutionSelector {
        &self.solutions
    }

    /// Text a counter widget currently shows.
    #[must_use]
    pub fn counter_text(&self, widget: &WidgetId) -> Option<String> {
        let value = self.counters.displayed(widget)?;
        let display = self.displays.get(widget).cloned().unwrap_or_default();
        Some(display.render(value))
    }

    /// Releases every widget: charts destroyed, frames cancelled, observations
    /// removed.
    pub fn teardown(&mut self) -> TeardownReport {
        let charts_destroyed = self.charts.unmount_all();
        let counters_disarmed = self
            .counters
            .disarm_all(&mut self.visibility, &mut self.frames);
        self.displays.clear();

        let sections: Vec<SectionId> = self.tracker.sections().cloned().collect();
        let mut sections_deregistered = 0;
        for id in &sections {
            if self.tracker.deregister(id, &mut self.visibility) {
                sections_deregistered += 1;
            }
        }

        let report = TeardownReport {
            sections_deregistered,
            counters_disarmed,
            charts_destroyed,
        };
        debug!(
            sections = report.sections_deregistered,
            counters = report.counters_disarmed,
            charts = report.charts_destroyed,
            "deck torn down"
        );
        report
    }

    #[must_use]
    pub fn snapshot(&self) -> DeckSnapshot {
        let counters = self
            .counters
            .counters()
            .map(|(widget, state)| CounterSnapshot {
                widget: widget.clone(),
                target: state.target(),
                displayed: state.displayed(),
                phase: state.phase(),
                text: self
                    .displays
                    .get(widget)
                    .cloned()
                    .unwrap_or_default()
                    .render(state.displayed()),
            })
            .collect();
        let charts = self
            .charts
            .widgets()
            .filter_map(|widget| {
                let binding = self.charts.binding(widget)?;
                Some(ChartSnapshot {
                    widget: widget.clone(),
                    surface: binding.surface(),
                    live: binding.is_live(),
                    shape: binding.config().shape(),
                })
            })
            .collect();

        DeckSnapshot {
            active_section: self.tracker.active().clone(),
            tracking_degraded: self.tracker.is_degraded(),
            sections: self.tracker.sections().cloned().collect(),
            counters,
            charts,
            pending_frames: self.counters.pending_frames(),
            active_solution: self.solutions.active_key().map(str::to_owned),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[must_use]
    pub fn tracker(&self) -> &SectionActivityTracker {
        &self.tracker
    }

    #[must_use]
    pub fn counters(&self) -> &CounterAnimator {
        &self.counters
    }

    #[must_use]
    pub fn charts(&self) -> &ChartLifecycleManager<B> {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut ChartLifecycleManager<B> {
        &mut self.charts
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    #[must_use]
    pub fn visibility(&self) -> &V {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut V {
        &mut self.visibility
    }

    #[must_use]
    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }
}

impl<V, F, B> DeckPage<V, F, B>
where
    V: VisibilitySource + ScrollHost,
    F: FrameScheduler,
    B: GraphicsBackend,
{
    /// Activates a nav link when the visibility source also scrolls the page.
    pub fn navigate_in_place(&mut self, target: &SectionId) -> LinkActivation {
        self.navigation
            .on_link_activate(target, &self.tracker, &mut self.visibility)
    }
}

impl<F, B> DeckPage<HeadlessViewport, F, B>
where
    F: FrameScheduler,
    B: GraphicsBackend,
{
    /// Delivers everything the headless viewport queued since the last flush.
    pub fn flush_visibility(&mut self) -> VisibilityReport {
        let entries = self.visibility.take_entries();
        self.handle_visibility(&entries)
    }

    /// User scroll to `y`, followed by the resulting delivery.
    pub fn scroll_page_to(&mut self, y: f64) -> VisibilityReport {
        self.visibility.scroll_page_to(y);
        self.flush_visibility()
    }
}

impl<V, B> DeckPage<V, ManualFrameScheduler, B>
where
    V: VisibilitySource,
    B: GraphicsBackend,
{
    /// Runs every due frame callback at `timestamp_ms`.
    pub fn pump_frames(&mut self, timestamp_ms: f64) -> Vec<FrameUpdate> {
        self.frames
            .take_due()
            .into_iter()
            .filter_map(|(handle, _)| self.on_animation_frame(handle, timestamp_ms))
            .collect()
    }
}

impl<V, F, B> std::fmt::Debug for DeckPage<V, F, B>
where
    V: VisibilitySource,
    F: FrameScheduler,
    B: GraphicsBackend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckPage")
            .field("active_section", self.tracker.active())
            .field("sections", &self.tracker.section_count())
            .field("counters", &self.counters.counter_count())
            .field("charts", &self.charts.live_instance_count())
            .finish()
    }
}
