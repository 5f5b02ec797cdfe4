//! Form field model
//!
//! One input's value, touched flag and current errors. A UI layer calls
//! [`FormField::set_value`] from its change listener and
//! [`FormField::validate`] when it wants fresh errors.

use super::rules::{ErrorMessage, Rule, apply_rules};
use crate::decimal::normalize_decimal_input;

/// How the field treats incoming values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Value taken as-is (ids, names, codes)
    #[default]
    Select,
    /// Live-normalized to digits and a single dot
    Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    name: &'static str,
    kind: FieldKind,
    value: String,
    is_touched: bool,
    errors: Vec<ErrorMessage>,
}

impl FormField {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            ..Default::default()
        }
    }

    pub fn select(name: &'static str) -> Self {
        Self::new(name, FieldKind::Select)
    }

    pub fn decimal(name: &'static str) -> Self {
        Self::new(name, FieldKind::Decimal)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.is_touched
    }

    pub fn errors(&self) -> &[ErrorMessage] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ErrorMessage> {
        self.errors.first()
    }

    /// Set a new value: marks the field touched and drops stale errors.
    ///
    /// Decimal fields normalize the raw input first (`"1a2.3b4"` -> `"12.34"`).
    pub fn set_value(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.value = match self.kind {
            FieldKind::Decimal => normalize_decimal_input(&raw),
            FieldKind::Select => raw,
        };
        self.is_touched = true;
        self.errors.clear();
    }

    /// Run all rules in order and keep every failure (no short-circuit).
    pub fn validate(&mut self, rules: &[Rule<'_>]) -> &[ErrorMessage] {
        self.errors = apply_rules(&self.value, rules);
        &self.errors
    }

    /// Replace errors computed elsewhere (e.g. by the transfer engine)
    pub fn set_errors(&mut self, errors: Vec<ErrorMessage>) {
        self.errors = errors;
    }

    /// Back to pristine: empty, untouched, no errors
    pub fn reset(&mut self) {
        self.value.clear();
        self.is_touched = false;
        self.errors.clear();
    }
}
