use indexmap::IndexMap;

use crate::core::WidgetId;
use crate::error::DeckResult;

use super::{FrameHandle, FrameScheduler};

/// Frame scheduler driven by the host.
///
/// Requests accumulate until the host drains them with `take_due` and feeds
/// each one back with a timestamp. Requests made while handling a frame land
/// in the next drain, like `requestAnimationFrame` inside a frame callback.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_handle: u64,
    pending: IndexMap<FrameHandle, WidgetId>,
    requested_total: usize,
    cancelled_total: usize,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains every pending request in request order.
    pub fn take_due(&mut self) -> Vec<(FrameHandle, WidgetId)> {
        self.pending.drain(..).collect()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    #[must_use]
    pub fn requested_total(&self) -> usize {
        self.requested_total
    }

    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self, owner: &WidgetId) -> DeckResult<FrameHandle> {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.insert(handle, owner.clone());
        self.requested_total += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.shift_remove(&handle).is_some() {
            self.cancelled_total += 1;
        }
    }
}
