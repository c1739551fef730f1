use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{DeckError, DeckResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> DeckResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| DeckError::InvalidData(format!("{field_name} cannot be represented as f64")))
}

/// Formats an integer with Indian digit grouping (`10,00,000`).
///
/// The last three digits form one group; every group above it has two digits.
#[must_use]
pub fn format_indian_grouping(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}
