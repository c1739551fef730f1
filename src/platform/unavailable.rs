use crate::core::{ObserveOptions, RegionId, WidgetId};
use crate::error::{DeckError, DeckResult};

use super::{Capability, FrameHandle, FrameScheduler, ObservedTarget, VisibilitySource};

/// Platform with neither visibility observation nor animation frames.
///
/// Models hosts where the interactive enhancements cannot initialize; the page
/// must still come up with static content.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePlatform;

impl VisibilitySource for UnavailablePlatform {
    fn observe(
        &mut self,
        _target: ObservedTarget,
        _region: RegionId,
        _options: ObserveOptions,
    ) -> DeckResult<()> {
        Err(DeckError::CapabilityUnavailable(Capability::Visibility))
    }

    fn unobserve(&mut self, _target: &ObservedTarget) {}
}

impl FrameScheduler for UnavailablePlatform {
    fn request_frame(&mut self, _owner: &WidgetId) -> DeckResult<FrameHandle> {
        Err(DeckError::CapabilityUnavailable(Capability::AnimationFrames))
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}
}
