//! Submission Flow State Definitions
//!
//! ```text
//! IDLE → LOADING → SUCCESS ─┐
//!            ↓              ├─→ IDLE
//!          FAILED ──────────┘
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Submission flow states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FlowState {
    /// Nothing in flight
    Idle = 0,

    /// A fetch or submit is suspended on the network
    Loading = 1,

    /// Last request resolved successfully
    Success = 2,

    /// Last request resolved with an error
    Failed = 3,
}

impl FlowState {
    /// Resolution states (the flow passes through them back to IDLE)
    #[inline]
    pub fn is_resolution(&self) -> bool {
        matches!(self, FlowState::Success | FlowState::Failed)
    }

    #[inline]
    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(FlowState::Idle),
            1 => Some(FlowState::Loading),
            2 => Some(FlowState::Success),
            3 => Some(FlowState::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Idle => "IDLE",
            FlowState::Loading => "LOADING",
            FlowState::Success => "SUCCESS",
            FlowState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cloneable, observable view of a flow's state
///
/// A UI layer keeps a clone to disable the Send button while `is_loading()`.
#[derive(Debug, Clone, Default)]
pub struct FlowStatus {
    state: Arc<AtomicU8>,
}

impl FlowStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        FlowState::from_id(self.state.load(Ordering::SeqCst)).unwrap_or(FlowState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        self.state() == FlowState::Loading
    }

    pub(crate) fn set(&self, state: FlowState) {
        self.state.store(state.id(), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_states() {
        assert!(FlowState::Success.is_resolution());
        assert!(FlowState::Failed.is_resolution());
        assert!(!FlowState::Idle.is_resolution());
        assert!(!FlowState::Loading.is_resolution());
    }

    #[test]
    fn test_state_id_roundtrip() {
        for state in [
            FlowState::Idle,
            FlowState::Loading,
            FlowState::Success,
            FlowState::Failed,
        ] {
            assert_eq!(FlowState::from_id(state.id()), Some(state));
        }
        assert_eq!(FlowState::from_id(9), None);
    }

    #[test]
    fn test_status_handle_is_shared() {
        let status = FlowStatus::new();
        let observer = status.clone();
        assert_eq!(observer.state(), FlowState::Idle);

        status.set(FlowState::Loading);
        assert!(observer.is_loading());
        assert_eq!(observer.state().to_string(), "LOADING");
    }
}
