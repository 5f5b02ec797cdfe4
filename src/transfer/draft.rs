//! Transfer draft and wire payloads

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{CurrencyId, UserId};

/// Form fields of the transfer draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferField {
    FromUserId,
    ToUserId,
    CurrencyId,
    Amount,
}

impl TransferField {
    pub const ALL: [TransferField; 4] = [
        TransferField::FromUserId,
        TransferField::ToUserId,
        TransferField::CurrencyId,
        TransferField::Amount,
    ];

    /// Wire/field name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferField::FromUserId => "fromUserId",
            TransferField::ToUserId => "toUserId",
            TransferField::CurrencyId => "currencyId",
            TransferField::Amount => "amount",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            TransferField::FromUserId => "From",
            TransferField::ToUserId => "To",
            TransferField::CurrencyId => "Currency",
            TransferField::Amount => "Amount",
        }
    }
}

impl fmt::Display for TransferField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// In-progress transfer form state
///
/// Starts empty and is mutated on every field change. `None` means the
/// select has no choice yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub from_user_id: Option<UserId>,
    pub to_user_id: Option<UserId>,
    pub currency_id: Option<CurrencyId>,
    pub amount: String,
}

impl TransferDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the request body. Returns `None` while any field is unset.
    pub fn to_request(&self) -> Option<TransferRequest> {
        if self.amount.is_empty() {
            return None;
        }
        Some(TransferRequest {
            currency_id: self.currency_id?,
            from_user_id: self.from_user_id?,
            to_user_id: self.to_user_id?,
            amount: self.amount.clone(),
        })
    }
}

/// POST body for the make-transfer endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub currency_id: CurrencyId,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub amount: String,
}

/// Confirmation returned by the make-transfer endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub transfer_id: u64,
    pub amount: String,
    pub message: String,
}
