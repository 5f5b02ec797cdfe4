//! Field validation rules
//!
//! A rule inspects one field value and returns an [`ErrorMessage`] when it
//! fails. Rules that depend on runtime reference data (precision, ceiling)
//! capture it at construction instead of reading any shared state.

use serde::Serialize;
use tracing::warn;

use crate::decimal::{check_decimal_precision, compare_decimals};

pub const REQUIRED_MESSAGE: &str = "Value is required";
pub const DECIMAL_FORMAT_MESSAGE: &str = "Amount should follow decimal format for this currency";
pub const MAX_AMOUNT_MESSAGE: &str = "Amount should be less than max amount";

/// A single validation failure attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    /// Stable rule identifier (`required`, `decimalFormat`, `maxAmount`)
    pub id: &'static str,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(id: &'static str, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// Boxed rule closure
pub type Rule<'a> = Box<dyn Fn(&str) -> Option<ErrorMessage> + 'a>;

/// Apply every rule in order, keeping all failures
pub fn apply_rules(value: &str, rules: &[Rule<'_>]) -> Vec<ErrorMessage> {
    rules.iter().filter_map(|rule| rule(value)).collect()
}

/// Fails on empty or whitespace-only values
pub fn required<'a>() -> Rule<'a> {
    Box::new(|value| {
        value
            .trim()
            .is_empty()
            .then(|| ErrorMessage::new("required", REQUIRED_MESSAGE))
    })
}

/// Fails unless the value has exactly `decimals` fractional digits
pub fn decimal_format<'a>(decimals: u32) -> Rule<'a> {
    Box::new(move |value| {
        (!check_decimal_precision(value, decimals))
            .then(|| ErrorMessage::new("decimalFormat", DECIMAL_FORMAT_MESSAGE))
    })
}

/// Fails when the value is strictly greater than `ceiling`. Equal passes.
///
/// Values that are not decimal literals are left to `decimal_format`. A
/// malformed ceiling cannot be evaluated and is skipped with a warning.
pub fn max_amount(ceiling: &str) -> Rule<'_> {
    Box::new(move |value| {
        if value.is_empty() {
            return None;
        }
        match compare_decimals(value, ceiling) {
            Ok(std::cmp::Ordering::Greater) => {
                Some(ErrorMessage::new("maxAmount", MAX_AMOUNT_MESSAGE))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(value = %value, ceiling = %ceiling, error = %e, "max amount rule skipped");
                None
            }
        }
    })
}
