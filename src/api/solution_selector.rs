use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{ReportData, Solution};
use crate::error::{DeckError, DeckResult};

/// Render model of one solution card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionCardView {
    pub key: String,
    pub title: String,
    pub active: bool,
}

/// Which solution card is expanded.
///
/// The first solution is selected until a card is clicked. Selection is
/// purely local and never touches section activity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSelector {
    solutions: IndexMap<String, Solution>,
    active: Option<String>,
}

impl SolutionSelector {
    #[must_use]
    pub fn new(solutions: IndexMap<String, Solution>) -> Self {
        let active = solutions.keys().next().cloned();
        Self { solutions, active }
    }

    #[must_use]
    pub fn from_report(report: &ReportData) -> Self {
        Self::new(report.solutions.clone())
    }

    /// Expands the card for `key`. Unknown keys leave the selection as is.
    pub fn select(&mut self, key: &str) -> DeckResult<&Solution> {
        let Some(index) = self.solutions.get_index_of(key) else {
            return Err(DeckError::InvalidData(format!("unknown solution `{key}`")));
        };
        if self.active.as_deref() != Some(key) {
            debug!(solution = key, "solution card selected");
            self.active = Some(key.to_owned());
        }
        Ok(&self.solutions[index])
    }

    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn active(&self) -> Option<&Solution> {
        self.active
            .as_deref()
            .and_then(|key| self.solutions.get(key))
    }

    #[must_use]
    pub fn cards(&self) -> Vec<SolutionCardView> {
        self.solutions
            .iter()
            .map(|(key, solution)| SolutionCardView {
                key: key.clone(),
                title: solution.title.clone(),
                active: self.active.as_deref() == Some(key.as_str()),
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
