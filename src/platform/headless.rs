use indexmap::IndexMap;
use tracing::trace;

use crate::core::{ObserveOptions, RegionBounds, RegionId, Viewport};
use crate::error::{DeckError, DeckResult};

use super::{ObservedTarget, ScrollBehavior, ScrollHost, VisibilityBatch, VisibilityEntry, VisibilitySource};

#[derive(Debug, Clone, Copy)]
struct Observation {
    region: RegionId,
    options: ObserveOptions,
    last_intersecting: Option<bool>,
}

/// Geometric page model implementing the visibility and scrolling contracts.
///
/// Regions are placed in document coordinates; scrolling moves the viewport
/// and queues one entry per observation whose intersecting state flipped.
/// Newly observed regions queue an initial entry, as intersection observers
/// report the starting state of every target.
#[derive(Debug)]
pub struct HeadlessViewport {
    viewport: Viewport,
    header_height: f64,
    scroll_y: f64,
    clock_ms: f64,
    regions: IndexMap<RegionId, RegionBounds>,
    observations: IndexMap<ObservedTarget, Observation>,
    pending: VisibilityBatch,
    last_scroll_behavior: Option<ScrollBehavior>,
}

impl HeadlessViewport {
    pub fn new(viewport: Viewport, header_height: f64) -> DeckResult<Self> {
        let viewport = viewport.validate()?;
        if !header_height.is_finite() || header_height < 0.0 {
            return Err(DeckError::InvalidData(
                "header height must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            viewport,
            header_height,
            scroll_y: 0.0,
            clock_ms: 0.0,
            regions: IndexMap::new(),
            observations: IndexMap::new(),
            pending: VisibilityBatch::new(),
            last_scroll_behavior: None,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Moves the platform clock forward; entries are stamped with it.
    pub fn advance_clock(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.clock_ms += delta_ms;
        }
    }

    /// Places (or moves) a region and re-measures every observation.
    pub fn place_region(&mut self, region: RegionId, bounds: RegionBounds) {
        self.regions.insert(region, bounds);
        self.remeasure();
    }

    /// Removes a region from the document. Observations of it go quiet.
    pub fn remove_region(&mut self, region: RegionId) -> bool {
        self.regions.shift_remove(&region).is_some()
    }

    #[must_use]
    pub fn region_bounds(&self, region: RegionId) -> Option<RegionBounds> {
        self.regions.get(&region).copied()
    }

    #[must_use]
    pub fn document_height(&self) -> f64 {
        self.regions
            .values()
            .map(|bounds| bounds.bottom())
            .fold(f64::from(self.viewport.height), f64::max)
    }

    #[must_use]
    pub fn max_scroll_y(&self) -> f64 {
        (self.document_height() - f64::from(self.viewport.height)).max(0.0)
    }

    /// User scroll: moves the viewport to `y` (clamped to the document).
    pub fn scroll_page_to(&mut self, y: f64) {
        if !y.is_finite() {
            return;
        }
        self.scroll_y = y.clamp(0.0, self.max_scroll_y());
        trace!(scroll_y = self.scroll_y, "headless viewport scrolled");
        self.remeasure();
    }

    #[must_use]
    pub fn is_observing(&self, target: &ObservedTarget) -> bool {
        self.observations.contains_key(target)
    }

    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    /// Drains queued entries in delivery order.
    pub fn take_entries(&mut self) -> VisibilityBatch {
        std::mem::take(&mut self.pending)
    }

    fn remeasure(&mut self) {
        let viewport_height = f64::from(self.viewport.height);
        for (target, observation) in &mut self.observations {
            let Some(bounds) = self.regions.get(&observation.region) else {
                continue;
            };
            let measured = observation.options.measure(
                bounds.top - self.scroll_y,
                bounds.height,
                viewport_height,
            );
            if observation.last_intersecting == Some(measured.is_intersecting) {
                continue;
            }
            observation.last_intersecting = Some(measured.is_intersecting);
            self.pending.push(VisibilityEntry {
                target: target.clone(),
                is_intersecting: measured.is_intersecting,
                intersection_ratio: measured.ratio,
                time_ms: self.clock_ms,
            });
        }
    }
}

impl VisibilitySource for HeadlessViewport {
    fn observe(
        &mut self,
        target: ObservedTarget,
        region: RegionId,
        options: ObserveOptions,
    ) -> DeckResult<()> {
        let options = options.validate()?;
        self.observations.insert(
            target,
            Observation {
                region,
                options,
                last_intersecting: None,
            },
        );
        self.remeasure();
        Ok(())
    }

    fn unobserve(&mut self, target: &ObservedTarget) {
        self.observations.shift_remove(target);
        self.pending.retain(|entry| &entry.target != target);
    }
}

impl ScrollHost for HeadlessViewport {
    fn region_top(&self, region: RegionId) -> Option<f64> {
        self.regions
            .get(&region)
            .map(|bounds| bounds.top - self.scroll_y)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn header_height(&self) -> f64 {
        self.header_height
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.last_scroll_behavior = Some(behavior);
        self.scroll_page_to(top);
    }
}
