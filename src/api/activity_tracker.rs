use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{ObserveOptions, RegionId, SectionId};
use crate::error::{DeckError, DeckResult};
use crate::platform::{ObservedTarget, VisibilityEntry, VisibilitySource};

use super::{ActiveSectionCell, ActiveSectionListener, DeckConfig};

/// Decides which section is in focus while the page scrolls.
///
/// Every registered region is observed against the focus band. Whenever a
/// region's overlap with the band turns positive its id becomes active; when
/// several regions qualify in one delivery, the last reported one wins.
#[derive(Debug)]
pub struct SectionActivityTracker {
    sections: IndexMap<SectionId, RegionId>,
    active: ActiveSectionCell,
    options: ObserveOptions,
    degraded: bool,
}

impl SectionActivityTracker {
    pub fn new(initial: SectionId, options: ObserveOptions) -> DeckResult<Self> {
        Ok(Self {
            sections: IndexMap::new(),
            active: ActiveSectionCell::new(initial),
            options: options.validate()?,
            degraded: false,
        })
    }

    pub fn from_config(config: &DeckConfig) -> DeckResult<Self> {
        Self::new(
            config.initial_section.clone(),
            config.focus_band.observe_options()?,
        )
    }

    #[must_use]
    pub fn active(&self) -> &SectionId {
        self.active.get()
    }

    #[must_use]
    pub fn active_cell(&self) -> &ActiveSectionCell {
        &self.active
    }

    /// `true` once visibility observation turned out to be unavailable; the
    /// seeded section then stays active for the rest of the page lifetime.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    #[must_use]
    pub fn observe_options(&self) -> ObserveOptions {
        self.options
    }

    /// Adds a section to observation. Re-registering an id moves it to `region`.
    pub fn register<V>(&mut self, id: SectionId, region: RegionId, source: &mut V) -> DeckResult<()>
    where
        V: VisibilitySource + ?Sized,
    {
        let target = ObservedTarget::Section(id.clone());
        if let Some(previous) = self.sections.insert(id.clone(), region) {
            if self.degraded {
                return Ok(());
            }
            source.unobserve(&target);
            trace!(section = %id, %previous, %region, "section region replaced");
        }
        if self.degraded {
            return Ok(());
        }

        match source.observe(target, region, self.options) {
            Ok(()) => {
                debug!(section = %id, %region, "section registered");
                Ok(())
            }
            Err(DeckError::CapabilityUnavailable(capability)) => {
                warn!(
                    %capability,
                    initial = %self.active.get(),
                    "section tracking unavailable; keeping the initial section active"
                );
                self.degraded = true;
                Ok(())
            }
            Err(err) => {
                self.sections.shift_remove(&id);
                Err(err)
            }
        }
    }

    /// Removes a section from observation. Returns `false` for unknown ids.
    pub fn deregister<V>(&mut self, id: &SectionId, source: &mut V) -> bool
    where
        V: VisibilitySource + ?Sized,
    {
        if self.sections.shift_remove(id).is_none() {
            return false;
        }
        if !self.degraded {
            source.unobserve(&ObservedTarget::Section(id.clone()));
        }
        debug!(section = %id, "section deregistered");
        true
    }

    /// Applies one delivery of visibility entries.
    ///
    /// Entries for counters or unregistered sections are ignored. Returns
    /// `true` when the active section changed.
    pub fn handle_entries<'a, I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = &'a VisibilityEntry>,
    {
        if self.degraded {
            return false;
        }

        let mut latest: Option<&SectionId> = None;
        for entry in entries {
            let ObservedTarget::Section(id) = &entry.target else {
                continue;
            };
            if !self.sections.contains_key(id) {
                trace!(section = %id, "ignoring entry for unregistered section");
                continue;
            }
            if entry.is_intersecting && entry.intersection_ratio > 0.0 {
                latest = Some(id);
            }
        }

        let Some(next) = latest else {
            return false;
        };
        let previous = self.active.get().clone();
        let changed = self.active.set(next.clone());
        if changed {
            debug!(%previous, current = %self.active.get(), "active section changed");
        }
        changed
    }

    pub fn subscribe(&mut self, listener: Box<dyn ActiveSectionListener>) -> DeckResult<()> {
        self.active.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, listener_id: &str) -> bool {
        self.active.unsubscribe(listener_id)
    }

    #[must_use]
    pub fn region_of(&self, id: &SectionId) -> Option<RegionId> {
        self.sections.get(id).copied()
    }

    #[must_use]
    pub fn is_registered(&self, id: &SectionId) -> bool {
        self.sections.contains_key(id)
    }

    /// Registered ids in registration order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.keys()
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
