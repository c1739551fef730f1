//! Platform primitives the page machinery depends on.
//!
//! Browsers provide these natively (intersection observers, animation frames,
//! window scrolling). The crate only consumes them through these traits and
//! ships deterministic headless implementations for tests and tooling.

mod frames;
mod headless;
mod unavailable;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ObserveOptions, RegionId, SectionId, WidgetId};
use crate::error::DeckResult;

pub use frames::ManualFrameScheduler;
pub use headless::HeadlessViewport;
pub use unavailable::UnavailablePlatform;

/// Platform capability that may be missing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Visibility,
    AnimationFrames,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visibility => f.write_str("visibility observation"),
            Self::AnimationFrames => f.write_str("animation frames"),
        }
    }
}

/// Who an observation belongs to, so entries can be routed back to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservedTarget {
    Section(SectionId),
    Counter(WidgetId),
}

/// One visibility notification for an observed region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEntry {
    pub target: ObservedTarget,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    /// Platform clock time of the notification in milliseconds.
    pub time_ms: f64,
}

impl VisibilityEntry {
    #[must_use]
    pub fn section(id: impl Into<String>, is_intersecting: bool, ratio: f64, time_ms: f64) -> Self {
        Self {
            target: ObservedTarget::Section(SectionId::new(id)),
            is_intersecting,
            intersection_ratio: ratio,
            time_ms,
        }
    }

    #[must_use]
    pub fn counter(id: impl Into<String>, is_intersecting: bool, ratio: f64, time_ms: f64) -> Self {
        Self {
            target: ObservedTarget::Counter(WidgetId::new(id)),
            is_intersecting,
            intersection_ratio: ratio,
            time_ms,
        }
    }
}

/// Entries delivered together by one platform callback.
pub type VisibilityBatch = SmallVec<[VisibilityEntry; 4]>;

/// Reports when observed regions enter or leave an observation window.
pub trait VisibilitySource {
    /// Starts observing `region` on behalf of `target`.
    ///
    /// Returns `DeckError::CapabilityUnavailable` when the platform cannot
    /// observe visibility at all.
    fn observe(
        &mut self,
        target: ObservedTarget,
        region: RegionId,
        options: ObserveOptions,
    ) -> DeckResult<()>;

    /// Stops observing `target`. Unknown targets are ignored.
    fn unobserve(&mut self, target: &ObservedTarget);
}

/// Handle of one pending animation-frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameHandle(pub u64);

/// Invokes a callback once per display refresh.
pub trait FrameScheduler {
    /// Requests one frame callback for `owner`.
    fn request_frame(&mut self, owner: &WidgetId) -> DeckResult<FrameHandle>;

    /// Cancels a pending request. Stale handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Page scrolling and geometry as seen from the navigation bar.
pub trait ScrollHost {
    /// Top edge of `region` relative to the viewport top, or `None` when the
    /// region is gone.
    fn region_top(&self, region: RegionId) -> Option<f64>;

    fn scroll_y(&self) -> f64;

    /// Height of the fixed header overlaying the top of the viewport.
    fn header_height(&self) -> f64;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}
