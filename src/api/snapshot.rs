use serde::{Deserialize, Serialize};

use crate::core::{SectionId, WidgetId};
use crate::render::{ChartShape, SurfaceId};

use super::CounterPhase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub widget: WidgetId,
    pub target: u64,
    pub displayed: u64,
    pub phase: CounterPhase,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub widget: WidgetId,
    pub surface: SurfaceId,
    pub live: bool,
    pub shape: ChartShape,
}

/// Point-in-time view of the page machinery for diagnostics and traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    pub active_section: SectionId,
    pub tracking_degraded: bool,
    pub sections: Vec<SectionId>,
    pub counters: Vec<CounterSnapshot>,
    pub charts: Vec<ChartSnapshot>,
    pub pending_frames: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_solution: Option<String>,
}

impl DeckSnapshot {
    #[must_use]
    pub fn counter(&self, widget: &str) -> Option<&CounterSnapshot> {
        self.counters
            .iter()
            .find(|counter| counter.widget.as_str() == widget)
    }

    #[must_use]
    pub fn live_chart_count(&self) -> usize {
        self.charts.iter().filter(|chart| chart.live).count()
    }
}
