mod active_section;
mod activity_tracker;
mod chart_lifecycle;
mod counter_animator;
mod counter_display;
mod deck_config;
mod json_contract;
mod navigation;
mod page;
mod snapshot;
mod solution_selector;

pub use active_section::{ActiveSectionCell, ActiveSectionListener};
pub use activity_tracker::SectionActivityTracker;
pub use chart_lifecycle::{ChartBinding, ChartLifecycleManager, MountOutcome};
pub use counter_animator::{
    CounterAnimator, CounterPhase, CounterState, FrameUpdate, counter_value_at,
};
pub use counter_display::CounterDisplay;
pub use deck_config::{CounterConfig, DeckConfig, FocusBandConfig};
pub use json_contract::{
    DECK_CONFIG_JSON_SCHEMA_V1, DECK_SNAPSHOT_JSON_SCHEMA_V1, DeckConfigJsonContractV1,
    DeckSnapshotJsonContractV1,
};
pub use navigation::{
    LinkActivation, NavItem, NavLinkView, NavigationController, NavigationOutcome,
};
pub use page::{DeckPage, TeardownReport, VisibilityReport};
pub use snapshot::{ChartSnapshot, CounterSnapshot, DeckSnapshot};
pub use solution_selector::{SolutionCardView, SolutionSelector};
