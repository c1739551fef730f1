use thiserror::Error;

use crate::platform::Capability;
use crate::render::SurfaceId;

pub type DeckResult<T> = Result<T, DeckError>;

#[derive(Debug, Error)]
pub enum DeckError {
    /// A platform primitive the page relies on is not available.
    #[error("platform capability unavailable: {0}")]
    CapabilityUnavailable(Capability),

    #[error("target no longer exists: {0}")]
    MissingTarget(String),

    /// Two live chart instances were about to share one render surface.
    #[error("render surface {surface} already has a live chart instance")]
    DoubleBind { surface: SurfaceId },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("graphics backend failure: {0}")]
    Backend(String),
}
