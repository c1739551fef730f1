mod chart_config;
mod primitives;
mod recording_backend;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use chart_config::{
    AxisOptions, ChartConfig, ChartDataset, ChartKind, ChartOptions, ChartShape, IndexAxis,
    LegendOptions, LegendPosition,
};
pub use primitives::Color;
pub use recording_backend::{RecordingBackend, RecordingInstance};

use crate::error::DeckResult;

/// Drawable target a chart instance is bound to (a canvas on the web).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Live chart instance returned by a backend.
///
/// `destroy` consumes the handle: a destroyed instance cannot be reached
/// again, and dropping its drawing-context association is the backend's job.
pub trait ChartInstance {
    fn surface(&self) -> SurfaceId;

    fn destroy(self);
}

/// Contract implemented by any charting backend.
///
/// Backends own drawing; callers only decide when an instance exists.
pub trait GraphicsBackend {
    type Instance: ChartInstance;

    fn create(&mut self, surface: SurfaceId, config: &ChartConfig) -> DeckResult<Self::Instance>;

    /// Whether `surface` is still attached to the page.
    fn surface_exists(&self, _surface: SurfaceId) -> bool {
        true
    }
}
