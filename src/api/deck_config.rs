use serde::{Deserialize, Serialize};

use crate::core::{ObserveOptions, SectionId};
use crate::error::{DeckError, DeckResult};
use crate::platform::ScrollBehavior;

/// Share of the viewport ignored at the top and bottom when deciding which
/// section is in focus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusBandConfig {
    pub top_margin_ratio: f64,
    pub bottom_margin_ratio: f64,
}

impl Default for FocusBandConfig {
    fn default() -> Self {
        Self {
            top_margin_ratio: 0.3,
            bottom_margin_ratio: 0.3,
        }
    }
}

impl FocusBandConfig {
    pub fn observe_options(self) -> DeckResult<ObserveOptions> {
        ObserveOptions::focus_band(self.top_margin_ratio, self.bottom_margin_ratio)
    }
}

/// Reveal counter tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    pub duration_ms: f64,
    /// Visible share of the counter that starts the animation.
    pub visibility_threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1500.0,
            visibility_threshold: 0.5,
        }
    }
}

impl CounterConfig {
    pub fn observe_options(self) -> DeckResult<ObserveOptions> {
        ObserveOptions::visible_ratio(self.visibility_threshold)
    }

    pub fn validate(self) -> DeckResult<Self> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(DeckError::InvalidConfig(
                "counter duration must be finite and > 0".to_owned(),
            ));
        }
        self.observe_options()?;
        Ok(self)
    }
}

/// Page bootstrap configuration.
///
/// Serializable so hosts can ship it next to the content instead of
/// hard-coding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Section considered active before any scroll happens.
    #[serde(default = "default_initial_section")]
    pub initial_section: SectionId,
    #[serde(default)]
    pub focus_band: FocusBandConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub scroll_behavior: ScrollBehavior,
}

fn default_initial_section() -> SectionId {
    SectionId::new("hero")
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            initial_section: default_initial_section(),
            focus_band: FocusBandConfig::default(),
            counter: CounterConfig::default(),
            scroll_behavior: ScrollBehavior::Smooth,
        }
    }
}

impl DeckConfig {
    #[must_use]
    pub fn new(initial_section: impl Into<String>) -> Self {
        Self {
            initial_section: SectionId::new(initial_section),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_focus_band(mut self, top_margin_ratio: f64, bottom_margin_ratio: f64) -> Self {
        self.focus_band = FocusBandConfig {
            top_margin_ratio,
            bottom_margin_ratio,
        };
        self
    }

    #[must_use]
    pub fn with_counter_duration_ms(mut self, duration_ms: f64) -> Self {
        self.counter.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    pub fn validate(&self) -> DeckResult<()> {
        if self.initial_section.as_str().is_empty() {
            return Err(DeckError::InvalidConfig(
                "initial section id must not be empty".to_owned(),
            ));
        }
        self.focus_band.observe_options()?;
        self.counter.validate()?;
        Ok(())
    }
}
