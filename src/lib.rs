//! transfer_form - Transfer Form Engine
//!
//! Currency-aware amount validation, decimal formatting and submission for
//! a money-transfer form backed by a JSON API.
//!
//! # Modules
//!
//! - [`decimal`] - Decimal-string precision checks, exact comparison, hints
//! - [`models`] - Users, currencies and the reference-data snapshot
//! - [`form`] - Field model and reusable validation rules
//! - [`transfer`] - Draft, validation engine and submission flow
//! - [`api`] - `TransferApi` trait and its HTTP client
//! - [`config`] - YAML application config
//! - [`logging`] - tracing setup
//! - [`mock_server`] - Fixture-backed mock API (`mock-api` feature)

pub mod api;
pub mod config;
pub mod decimal;
pub mod form;
pub mod logging;
pub mod models;
pub mod transfer;

#[cfg(feature = "mock-api")]
pub mod mock_server;

// Convenient re-exports at crate root
pub use api::{ApiError, HttpTransferApi, TransferApi};
pub use config::{ApiConfig, AppConfig};
pub use decimal::{
    DecimalError, check_decimal_precision, generate_decimal_hint_string, is_first_greater_or_equal,
};
pub use form::{ErrorMessage, FieldKind, FormField};
pub use models::{Currency, ReferenceData, User};
pub use transfer::{
    FlowState, SubmitOutcome, TransferDraft, TransferField, TransferSubmissionFlow,
    TransferValidationEngine, ValidationResult,
};
