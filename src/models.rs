//! Reference data: users and currencies
//!
//! Loaded once per session from the API and never mutated. Balances are
//! kept as decimal strings so they reach the comparison layer untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type UserId = u32;
pub type CurrencyId = u32;

/// A transferable currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    /// ISO-style code, also the key into [`User::currencies`]
    pub code: String,
    pub name: String,
    /// Required number of fractional digits for amounts
    pub decimals: u32,
}

/// A user and their per-currency ceilings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// currency code -> balance string (maximum transferable amount)
    #[serde(default)]
    pub currencies: BTreeMap<String, String>,
}

impl User {
    /// Ceiling for a currency, if the user holds it
    pub fn ceiling(&self, currency: &Currency) -> Option<&str> {
        self.currencies.get(&currency.code).map(String::as_str)
    }
}

/// Users and currencies as one immutable snapshot
///
/// The submission flow swaps whole snapshots behind an `Arc`, so readers
/// never observe users from one load and currencies from another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub users: Vec<User>,
    pub currencies: Vec<Currency>,
}

impl ReferenceData {
    pub fn new(users: Vec<User>, currencies: Vec<Currency>) -> Self {
        Self { users, currencies }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.currencies.is_empty()
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn currency(&self, id: CurrencyId) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.id == id)
    }

    /// Case-insensitive lookup by display name
    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive lookup by code (e.g. `RUB`)
    pub fn currency_by_code(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fixture_shapes() {
        let users: Vec<User> = serde_json::from_str(
            r#"[{"id":1,"name":"Alice","currencies":{"RUB":"1000.000","USD":"521.50"}}]"#,
        )
        .unwrap();
        let currencies: Vec<Currency> = serde_json::from_str(
            r#"[{"id":1,"code":"RUB","name":"Russian Ruble","decimals":3}]"#,
        )
        .unwrap();

        let data = ReferenceData::new(users, currencies);
        let rub = data.currency_by_code("rub").unwrap();
        assert_eq!(rub.decimals, 3);
        assert_eq!(data.user_by_name("alice").unwrap().ceiling(rub), Some("1000.000"));
    }

    #[test]
    fn test_missing_ceiling() {
        let user = User {
            id: 2,
            name: "Bob".to_string(),
            currencies: BTreeMap::new(),
        };
        let usd = Currency {
            id: 2,
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
            decimals: 2,
        };
        assert_eq!(user.ceiling(&usd), None);
    }
}
