//! Transfer Form
//!
//! Draft model, validation engine and submission flow for a single
//! user-to-user transfer.
//!
//! # Flow
//!
//! ```text
//! reference data ─▶ TransferDraft ─▶ TransferValidationEngine ─▶ TransferSubmissionFlow ─▶ POST
//!                                          │                              │
//!                                    field errors + hint            notification
//! ```
//!
//! # Invariants
//!
//! 1. **No floats**: amounts stay strings and compare as exact decimals
//! 2. **Validate-before-send**: `submit` never posts a draft with errors
//! 3. **Whole-snapshot reload**: users and currencies are replaced together

pub mod draft;
pub mod flow;
pub mod state;
pub mod validation;

// Re-exports for convenience
pub use draft::{TransferDraft, TransferField, TransferRequest, TransferResponse};
pub use flow::{Notification, NotificationLevel, SubmitOutcome, TransferSubmissionFlow};
pub use state::{FlowState, FlowStatus};
pub use validation::{TransferValidationEngine, ValidationResult, amount_hint};
