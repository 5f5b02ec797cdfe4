//! Transfer Submission Flow
//!
//! Loads reference data, gates submission on the validation engine and
//! dispatches the transfer request through a [`TransferApi`].
//!
//! Errors never escape as panics: every network failure becomes a queued
//! [`Notification`] plus a `FAILED` resolution, and prior state is kept.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::draft::{TransferDraft, TransferResponse};
use super::state::{FlowState, FlowStatus};
use super::validation::{TransferValidationEngine, ValidationResult};
use crate::api::{ApiError, TransferApi};
use crate::models::ReferenceData;

pub const GENERIC_ERROR_TEXT: &str = "Error occurred";
pub const NOTIFICATION_DURATION_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Dismissible toast for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub text: String,
    pub duration_ms: u64,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "Success".to_string(),
            text: text.into(),
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Error".to_string(),
            text: text.into(),
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }
}

/// Result of [`TransferSubmissionFlow::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Rejected(ValidationResult),
    /// Backend confirmed the transfer; the draft was reset
    Submitted(TransferResponse),
    /// Request failed; the draft is untouched
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

pub struct TransferSubmissionFlow {
    api: Arc<dyn TransferApi>,
    reference: Arc<ReferenceData>,
    status: FlowStatus,
    last_outcome: Option<FlowState>,
    notifications: Vec<Notification>,
}

impl TransferSubmissionFlow {
    pub fn new(api: Arc<dyn TransferApi>) -> Self {
        Self {
            api,
            reference: Arc::new(ReferenceData::default()),
            status: FlowStatus::new(),
            last_outcome: None,
            notifications: Vec::new(),
        }
    }

    /// Current reference snapshot (old or new set, never a mix)
    pub fn reference_data(&self) -> Arc<ReferenceData> {
        Arc::clone(&self.reference)
    }

    /// Observable status handle; clone it to watch `is_loading`
    pub fn status(&self) -> FlowStatus {
        self.status.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// `SUCCESS` or `FAILED` of the last resolved request
    pub fn last_outcome(&self) -> Option<FlowState> {
        self.last_outcome
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Hand queued notifications to the presentation layer
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Validate a draft against the current reference snapshot
    pub fn validate(&self, draft: &TransferDraft) -> ValidationResult {
        TransferValidationEngine::validate_against(draft, &self.reference)
    }

    /// Fetch users and currencies concurrently and swap them in together.
    ///
    /// On failure a generic error notification is queued, the previous
    /// snapshot stays in place and nothing is retried.
    pub async fn load_reference_data(&mut self) -> Result<Arc<ReferenceData>, ApiError> {
        self.transition(FlowState::Loading);

        let api = Arc::clone(&self.api);
        let (users, currencies) = tokio::join!(api.fetch_users(), api.fetch_currencies());

        match users.and_then(|users| currencies.map(|currencies| (users, currencies))) {
            Ok((users, currencies)) => {
                info!(
                    users = users.len(),
                    currencies = currencies.len(),
                    "Reference data loaded"
                );
                self.reference = Arc::new(ReferenceData::new(users, currencies));
                self.resolve(FlowState::Success);
                Ok(self.reference_data())
            }
            Err(e) => {
                error!(error = %e, code = e.code(), "Failed to load reference data");
                self.notifications
                    .push(Notification::error(GENERIC_ERROR_TEXT));
                self.resolve(FlowState::Failed);
                Err(e)
            }
        }
    }

    /// Validate, then send the draft.
    ///
    /// Returns `Rejected` without any request when the engine reports
    /// errors. On success the draft is reset; on failure it is left as-is.
    pub async fn submit(&mut self, draft: &mut TransferDraft) -> SubmitOutcome {
        let validation = self.validate(draft);
        let request = match draft.to_request() {
            Some(request) if validation.is_valid() => request,
            _ => {
                debug!(errors = validation.error_count(), "Submit rejected by validation");
                return SubmitOutcome::Rejected(validation);
            }
        };

        self.transition(FlowState::Loading);
        info!(
            from = request.from_user_id,
            to = request.to_user_id,
            currency = request.currency_id,
            amount = %request.amount,
            "Submitting transfer"
        );

        let api = Arc::clone(&self.api);
        match api.make_transfer(&request).await {
            Ok(response) => {
                info!(
                    transfer_id = response.transfer_id,
                    "Transfer confirmed: {}", response.message
                );
                draft.reset();
                self.notifications
                    .push(Notification::success(response.message.clone()));
                self.resolve(FlowState::Success);
                SubmitOutcome::Submitted(response)
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), "Transfer failed");
                let text = e.server_message().unwrap_or(GENERIC_ERROR_TEXT);
                self.notifications.push(Notification::error(text));
                self.resolve(FlowState::Failed);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn transition(&mut self, state: FlowState) {
        debug!(from = %self.status.state(), to = %state, "Flow transition");
        self.status.set(state);
    }

    /// Pass through the resolution state and settle back to IDLE
    fn resolve(&mut self, outcome: FlowState) {
        debug_assert!(outcome.is_resolution(), "{outcome} is not a resolution state");
        self.transition(outcome);
        self.last_outcome = Some(outcome);
        self.transition(FlowState::Idle);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
