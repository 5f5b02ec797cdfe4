//! Transfer Validation Engine
//!
//! Evaluates a [`TransferDraft`] against the resolved reference records and
//! produces a fresh [`ValidationResult`]. No side effects, no global lookups.
//!
//! # Rule order
//!
//! ```text
//! required(from, to, currency) ──any missing──▶ stop (amount rules skipped)
//!        │
//!        ▼
//! hint(currency, from_user ceiling)
//!        │
//!        ▼
//! required(amount) ──blank──▶ stop
//!        │
//!        ▼
//! decimal_format(currency.decimals) ──fail──▶ stop
//!        │
//!        ▼
//! max_amount(from_user ceiling)   (skipped when no ceiling)
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use super::draft::{TransferDraft, TransferField};
use crate::decimal::generate_decimal_hint_string;
use crate::form::rules::{self, ErrorMessage, Rule, apply_rules};
use crate::models::{Currency, ReferenceData, User};

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Only fields with at least one error are present
    pub field_errors: BTreeMap<TransferField, Vec<ErrorMessage>>,
    /// Informational text for the amount field, shown regardless of validity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationResult {
    /// Form is submittable iff no field has errors
    pub fn is_valid(&self) -> bool {
        self.field_errors.values().all(Vec::is_empty)
    }

    pub fn errors_for(&self, field: TransferField) -> &[ErrorMessage] {
        self.field_errors
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.values().map(Vec::len).sum()
    }

    fn push_all(&mut self, field: TransferField, errors: Vec<ErrorMessage>) {
        if !errors.is_empty() {
            self.field_errors.entry(field).or_default().extend(errors);
        }
    }
}

/// Hint shown under the amount input
///
/// The max-amount clause is left out when the user has no balance entry
/// for the currency.
pub fn amount_hint(currency: &Currency, ceiling: Option<&str>) -> String {
    let format = generate_decimal_hint_string(currency.decimals);
    match ceiling {
        Some(max) => format!("Decimal format for this currency is {format}. Max amount {max}"),
        None => format!("Decimal format for this currency is {format}"),
    }
}

/// Stateless rule orchestrator for the transfer form
pub struct TransferValidationEngine;

impl TransferValidationEngine {
    /// Validate a draft against already-resolved records.
    ///
    /// `from_user` and `currency` must be the records selected by the
    /// draft. Passing `None` for a selected id treats that select as unset.
    pub fn validate(
        draft: &TransferDraft,
        from_user: Option<&User>,
        currency: Option<&Currency>,
    ) -> ValidationResult {
        let from_user = from_user.filter(|_| draft.from_user_id.is_some());
        let currency = currency.filter(|_| draft.currency_id.is_some());
        Self::evaluate(draft, from_user, draft.to_user_id.is_some(), currency)
    }

    /// Resolve the draft's ids in `data`, then validate.
    ///
    /// An id that does not resolve counts as unset.
    pub fn validate_against(draft: &TransferDraft, data: &ReferenceData) -> ValidationResult {
        let from_user = draft.from_user_id.and_then(|id| data.user(id));
        let to_present = draft
            .to_user_id
            .and_then(|id| data.user(id))
            .is_some();
        let currency = draft.currency_id.and_then(|id| data.currency(id));
        Self::evaluate(draft, from_user, to_present, currency)
    }

    fn evaluate(
        draft: &TransferDraft,
        from_user: Option<&User>,
        to_present: bool,
        currency: Option<&Currency>,
    ) -> ValidationResult {
        let mut result = ValidationResult::default();

        // 1. Required selects
        let required = rules::required();
        let presence = [
            (TransferField::FromUserId, from_user.is_some()),
            (TransferField::ToUserId, to_present),
            (TransferField::CurrencyId, currency.is_some()),
        ];
        for (field, present) in presence {
            if !present {
                result.push_all(field, apply_rules("", std::slice::from_ref(&required)));
            }
        }

        let (Some(from_user), Some(currency)) = (from_user, currency) else {
            return result;
        };
        if !to_present {
            return result;
        }

        // Hint is attached even when the amount is still blank
        let ceiling = from_user.ceiling(currency);
        result.hint = Some(amount_hint(currency, ceiling));

        // Amount required: one error and nothing else
        let amount = draft.amount.as_str();
        let missing = apply_rules(amount, std::slice::from_ref(&required));
        if !missing.is_empty() {
            result.push_all(TransferField::Amount, missing);
            return result;
        }

        // 2. Decimal format
        let format_errors = apply_rules(amount, &[rules::decimal_format(currency.decimals)]);
        if !format_errors.is_empty() {
            result.push_all(TransferField::Amount, format_errors);
            return result;
        }

        // 3. Max amount, only when a ceiling exists
        if let Some(ceiling) = ceiling {
            let max_rules: [Rule<'_>; 1] = [rules::max_amount(ceiling)];
            result.push_all(TransferField::Amount, apply_rules(amount, &max_rules));
        }

        result
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::rules::{DECIMAL_FORMAT_MESSAGE, MAX_AMOUNT_MESSAGE, REQUIRED_MESSAGE};
    use std::collections::BTreeMap;

    fn fixtures() -> ReferenceData {
        let alice = User {
            id: 1,
            name: "Alice".to_string(),
            currencies: BTreeMap::from([
                ("RUB".to_string(), "1000.000".to_string()),
                ("USD".to_string(), "521.50".to_string()),
            ]),
        };
        let bob = User {
            id: 2,
            name: "Bob".to_string(),
            currencies: BTreeMap::from([("RUB".to_string(), "200000.000".to_string())]),
        };
        let rub = Currency {
            id: 1,
            code: "RUB".to_string(),
            name: "Russian Ruble".to_string(),
            decimals: 3,
        };
        let eur = Currency {
            id: 3,
            code: "EUR".to_string(),
            name: "Euro".to_string(),
            decimals: 2,
        };
        ReferenceData::new(vec![alice, bob], vec![rub, eur])
    }

    fn alice_to_bob(currency_id: u32, amount: &str) -> TransferDraft {
        TransferDraft {
            from_user_id: Some(1),
            to_user_id: Some(2),
            currency_id: Some(currency_id),
            amount: amount.to_string(),
        }
    }

    fn messages(result: &ValidationResult, field: TransferField) -> Vec<&str> {
        result
            .errors_for(field)
            .iter()
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn test_empty_draft_three_required_errors() {
        let result = TransferValidationEngine::validate_against(&TransferDraft::new(), &fixtures());

        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 3);
        for field in [
            TransferField::FromUserId,
            TransferField::ToUserId,
            TransferField::CurrencyId,
        ] {
            assert_eq!(messages(&result, field), vec![REQUIRED_MESSAGE]);
        }
        assert!(result.errors_for(TransferField::Amount).is_empty());
        assert_eq!(result.hint, None);
    }

    #[test]
    fn test_amount_rules_skipped_when_any_select_missing() {
        let mut draft = alice_to_bob(1, "abc");
        draft.to_user_id = None;
        let result = TransferValidationEngine::validate_against(&draft, &fixtures());

        assert_eq!(messages(&result, TransferField::ToUserId), vec![REQUIRED_MESSAGE]);
        assert!(result.errors_for(TransferField::Amount).is_empty());
        assert_eq!(result.hint, None);
    }

    #[test]
    fn test_blank_amount_required_once_selects_filled() {
        let result = TransferValidationEngine::validate_against(&alice_to_bob(1, ""), &fixtures());

        assert_eq!(result.error_count(), 1);
        assert_eq!(messages(&result, TransferField::Amount), vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn test_hint_shown_for_blank_amount() {
        let result = TransferValidationEngine::validate_against(&alice_to_bob(1, ""), &fixtures());

        assert_eq!(messages(&result, TransferField::Amount), vec![REQUIRED_MESSAGE]);
        assert_eq!(
            result.hint.as_deref(),
            Some("Decimal format for this currency is 0.000. Max amount 1000.000")
        );
    }

    #[test]
    fn test_decimal_format_error_with_hint() {
        let result =
            TransferValidationEngine::validate_against(&alice_to_bob(1, "100.5"), &fixtures());

        assert_eq!(
            messages(&result, TransferField::Amount),
            vec![DECIMAL_FORMAT_MESSAGE]
        );
        assert_eq!(
            result.hint.as_deref(),
            Some("Decimal format for this currency is 0.000. Max amount 1000.000")
        );
    }

    #[test]
    fn test_exceeds_max_amount() {
        let result =
            TransferValidationEngine::validate_against(&alice_to_bob(1, "999999.000"), &fixtures());

        assert_eq!(messages(&result, TransferField::Amount), vec![MAX_AMOUNT_MESSAGE]);
        assert_eq!(
            result.hint.as_deref(),
            Some("Decimal format for this currency is 0.000. Max amount 1000.000")
        );
    }

    #[test]
    fn test_equal_to_ceiling_is_submittable() {
        let result =
            TransferValidationEngine::validate_against(&alice_to_bob(1, "1000.000"), &fixtures());
        assert!(result.is_valid());
        assert!(result.hint.is_some());
    }

    #[test]
    fn test_no_ceiling_skips_max_amount() {
        // Alice holds no EUR
        let result =
            TransferValidationEngine::validate_against(&alice_to_bob(3, "99999.00"), &fixtures());
        assert!(result.is_valid());
        assert_eq!(
            result.hint.as_deref(),
            Some("Decimal format for this currency is 0.00")
        );
    }

    #[test]
    fn test_unknown_ids_count_as_unset() {
        let draft = TransferDraft {
            from_user_id: Some(42),
            to_user_id: Some(2),
            currency_id: Some(99),
            amount: "1.000".to_string(),
        };
        let result = TransferValidationEngine::validate_against(&draft, &fixtures());
        assert_eq!(result.error_count(), 2);
        assert!(!result.errors_for(TransferField::FromUserId).is_empty());
        assert!(!result.errors_for(TransferField::CurrencyId).is_empty());
    }

    #[test]
    fn test_validate_with_resolved_records() {
        let data = fixtures();
        let draft = alice_to_bob(1, "1000.001");
        let result = TransferValidationEngine::validate(
            &draft,
            data.user(1),
            data.currency(1),
        );
        assert_eq!(messages(&result, TransferField::Amount), vec![MAX_AMOUNT_MESSAGE]);

        let result = TransferValidationEngine::validate(&draft, None, data.currency(1));
        assert_eq!(
            messages(&result, TransferField::FromUserId),
            vec![REQUIRED_MESSAGE]
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let data = fixtures();
        let draft = alice_to_bob(1, "999999.000");
        assert_eq!(
            TransferValidationEngine::validate_against(&draft, &data),
            TransferValidationEngine::validate_against(&draft, &data)
        );
    }
}
