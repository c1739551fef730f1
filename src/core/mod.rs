pub mod focus_band;
pub mod primitives;
pub mod types;

pub use focus_band::{Intersection, ObserveOptions, RootMargin};
pub use primitives::{decimal_to_f64, format_indian_grouping};
pub use types::{RegionBounds, RegionId, SectionId, Viewport, WidgetId};
