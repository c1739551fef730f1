use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ObserveOptions, RegionId, WidgetId};
use crate::error::{DeckError, DeckResult};
use crate::platform::{FrameHandle, FrameScheduler, ObservedTarget, VisibilityEntry, VisibilitySource};

use super::CounterConfig;

/// Lifecycle of one reveal counter. Leaving `Idle` is the "has fired" flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CounterPhase {
    Idle,
    Animating { start_ms: f64 },
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    target: u64,
    displayed: u64,
    phase: CounterPhase,
    pending_frame: Option<FrameHandle>,
    region: RegionId,
}

impl CounterState {
    fn idle(target: u64, region: RegionId) -> Self {
        Self {
            target,
            displayed: 0,
            phase: CounterPhase::Idle,
            pending_frame: None,
            region,
        }
    }

    fn finish(&mut self) {
        self.displayed = self.target;
        self.phase = CounterPhase::Done;
        self.pending_frame = None;
    }

    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }

    #[must_use]
    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    #[must_use]
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    #[must_use]
    pub fn region(&self) -> RegionId {
        self.region
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        !matches!(self.phase, CounterPhase::Idle)
    }
}

fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if !elapsed_ms.is_finite() || duration_ms <= 0.0 {
        return if elapsed_ms > 0.0 { 1.0 } else { 0.0 };
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Value shown `elapsed_ms` after the animation started: linear, floored.
#[must_use]
pub fn counter_value_at(target: u64, elapsed_ms: f64, duration_ms: f64) -> u64 {
    let progress = progress(elapsed_ms, duration_ms);
    if progress >= 1.0 {
        return target;
    }
    // Cast saturates; the min guards float rounding near the end.
    ((progress * target as f64).floor() as u64).min(target)
}

/// Result of feeding one animation frame to a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameUpdate {
    pub widget: WidgetId,
    pub displayed: u64,
    pub finished: bool,
}

/// One-shot reveal counters.
///
/// Each armed widget counts from 0 to its target over a fixed duration after
/// it first becomes visible, then stays at the target. A counter never
/// restarts, even if it scrolls out and back in.
#[derive(Debug)]
pub struct CounterAnimator {
    counters: IndexMap<WidgetId, CounterState>,
    duration_ms: f64,
    options: ObserveOptions,
}

impl CounterAnimator {
    pub fn new(duration_ms: f64, options: ObserveOptions) -> DeckResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(DeckError::InvalidConfig(
                "counter duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            counters: IndexMap::new(),
            duration_ms,
            options: options.validate()?,
        })
    }

    pub fn from_config(config: &CounterConfig) -> DeckResult<Self> {
        let config = config.validate()?;
        Self::new(config.duration_ms, config.observe_options()?)
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Starts watching `widget` for its first appearance.
    ///
    /// Arming a widget twice is rejected; `disarm` it first. When visibility
    /// cannot be observed the counter shows its target straight away.
    pub fn arm<V>(
        &mut self,
        widget: WidgetId,
        region: RegionId,
        target: u64,
        source: &mut V,
    ) -> DeckResult<()>
    where
        V: VisibilitySource + ?Sized,
    {
        if self.counters.contains_key(&widget) {
            return Err(DeckError::InvalidData(format!(
                "counter `{widget}` is already armed"
            )));
        }

        let mut state = CounterState::idle(target, region);
        match source.observe(ObservedTarget::Counter(widget.clone()), region, self.options) {
            Ok(()) => {
                debug!(counter = %widget, target, %region, "counter armed");
            }
            Err(DeckError::CapabilityUnavailable(capability)) => {
                warn!(counter = %widget, %capability, "counter cannot observe visibility; showing target");
                state.finish();
            }
            Err(err) => return Err(err),
        }
        self.counters.insert(widget, state);
        Ok(())
    }

    /// Applies one delivery of visibility entries.
    ///
    /// The first intersecting entry of an idle counter fires it: the start
    /// time is the entry time, the first frame is requested and the widget is
    /// no longer observed. Returns the widgets that fired.
    pub fn handle_entries<'a, I, V, S>(
        &mut self,
        entries: I,
        source: &mut V,
        scheduler: &mut S,
    ) -> Vec<WidgetId>
    where
        I: IntoIterator<Item = &'a VisibilityEntry>,
        V: VisibilitySource + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let mut fired = Vec::new();
        for entry in entries {
            let ObservedTarget::Counter(widget) = &entry.target else {
                continue;
            };
            let Some(state) = self.counters.get_mut(widget) else {
                trace!(counter = %widget, "ignoring entry for unknown counter");
                continue;
            };
            if state.has_fired() || !entry.is_intersecting {
                continue;
            }

            source.unobserve(&entry.target);
            if state.target == 0 {
                state.finish();
                debug!(counter = %widget, "counter with zero target finished");
            } else {
                match scheduler.request_frame(widget) {
                    Ok(handle) => {
                        state.phase = CounterPhase::Animating {
                            start_ms: entry.time_ms,
                        };
                        state.pending_frame = Some(handle);
                        debug!(counter = %widget, start_ms = entry.time_ms, "counter fired");
                    }
                    Err(err) => {
                        warn!(counter = %widget, error = %err, "animation frames unavailable; showing target");
                        state.finish();
                    }
                }
            }
            fired.push(widget.clone());
        }
        fired
    }

    /// Advances the counter that requested `handle` to `timestamp_ms`.
    ///
    /// Stale, cancelled or unknown handles are ignored and yield `None`.
    pub fn on_frame<S>(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        scheduler: &mut S,
    ) -> Option<FrameUpdate>
    where
        S: FrameScheduler + ?Sized,
    {
        let (widget, state) = self
            .counters
            .iter_mut()
            .find(|(_, state)| state.pending_frame == Some(handle))?;
        state.pending_frame = None;
        let CounterPhase::Animating { start_ms } = state.phase else {
            return None;
        };

        let elapsed = timestamp_ms - start_ms;
        let value = counter_value_at(state.target, elapsed, self.duration_ms);
        state.displayed = state.displayed.max(value);

        if progress(elapsed, self.duration_ms) >= 1.0 {
            state.finish();
            debug!(counter = %widget, value = state.displayed, "counter finished");
        } else {
            match scheduler.request_frame(widget) {
                Ok(next) => state.pending_frame = Some(next),
                Err(err) => {
                    warn!(counter = %widget, error = %err, "frame request failed; showing target");
                    state.finish();
                }
            }
        }

        Some(FrameUpdate {
            widget: widget.clone(),
            displayed: state.displayed,
            finished: matches!(state.phase, CounterPhase::Done),
        })
    }

    /// Forgets `widget`, cancelling its pending frame and observation.
    pub fn disarm<V, S>(&mut self, widget: &WidgetId, source: &mut V, scheduler: &mut S) -> bool
    where
        V: VisibilitySource + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let Some(state) = self.counters.shift_remove(widget) else {
            return false;
        };
        if let Some(handle) = state.pending_frame {
            scheduler.cancel_frame(handle);
            debug!(counter = %widget, "pending counter frame cancelled");
        }
        if !state.has_fired() {
            source.unobserve(&ObservedTarget::Counter(widget.clone()));
        }
        true
    }

    /// Disarms every counter. Returns how many were removed.
    pub fn disarm_all<V, S>(&mut self, source: &mut V, scheduler: &mut S) -> usize
    where
        V: VisibilitySource + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let widgets: Vec<WidgetId> = self.counters.keys().cloned().collect();
        let mut removed = 0;
        for widget in &widgets {
            if self.disarm(widget, source, scheduler) {
                removed += 1;
            }
        }
        removed
    }

    #[must_use]
    pub fn displayed(&self, widget: &WidgetId) -> Option<u64> {
        self.counters.get(widget).map(CounterState::displayed)
    }

    #[must_use]
    pub fn state(&self, widget: &WidgetId) -> Option<&CounterState> {
        self.counters.get(widget)
    }

    pub fn counters(&self) -> impl Iterator<Item = (&WidgetId, &CounterState)> {
        self.counters.iter()
    }

    #[must_use]
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Counters currently waiting on a frame callback.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.counters
            .values()
            .filter(|state| state.pending_frame.is_some())
            .count()
    }
}
