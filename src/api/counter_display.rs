use serde::{Deserialize, Serialize};

use crate::core::format_indian_grouping;

/// Text decoration around a counter value, e.g. `₹` + `500` + ` Cr`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDisplay {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl CounterDisplay {
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Renders `value` with Indian digit grouping (`10,00,000`).
    #[must_use]
    pub fn render(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, format_indian_grouping(value), self.suffix)
    }
}
