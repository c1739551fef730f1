//! Static content consumed read-only by the page: sections, headline
//! counters, KPI targets, financial projections and rollout narrative.

mod charts;
pub mod palette;
mod report;

pub use report::{
    Financials, HeroCounter, Kpis, MarketSize, ReportData, Risk, RolloutPhase, SectionSpec,
    Solution,
};
