//! Session state machine with thread-safe transitions.
//!
//! The lifecycle is deliberately tiny:
//! - Idle -> Busy (a request was accepted)
//! - Busy -> Idle (the conversion finished, success or failure)

use std::fmt;
use std::sync::{Arc, Mutex};

use kosei_core::KoseiError;

/// Operational state of the conversion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No conversion in progress. Ready to accept input.
    Idle,
    /// A conversion round trip is in flight.
    Busy,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Busy => write!(f, "Busy"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Busy) | (SessionState::Busy, SessionState::Idle)
        )
    }
}

/// Thread-safe gate over [`SessionState`].
///
/// All transitions are validated before being applied, returning an error
/// if the requested transition is not permitted. A failed Idle -> Busy
/// transition is how concurrent submissions get rejected.
#[derive(Debug, Clone)]
pub struct StateGate {
    state: Arc<Mutex<SessionState>>,
}

impl Default for StateGate {
    fn default() -> Self {
        Self::new()
    }
}

impl StateGate {
    /// Create a new gate initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> SessionState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: SessionState) -> Result<(), KoseiError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Session state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(KoseiError::Session(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }

    /// Force the gate back to Idle (used for error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        tracing::warn!("Session state gate reset to Idle from {}", *state);
        *state = SessionState::Idle;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Busy.to_string(), "Busy");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::Idle.can_transition_to(&SessionState::Busy));
        assert!(SessionState::Busy.can_transition_to(&SessionState::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot transition to self
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Idle));
        assert!(!SessionState::Busy.can_transition_to(&SessionState::Busy));
    }

    #[test]
    fn test_gate_round_trip() {
        let gate = StateGate::new();
        assert_eq!(gate.current(), SessionState::Idle);

        gate.transition(SessionState::Busy).unwrap();
        assert_eq!(gate.current(), SessionState::Busy);

        gate.transition(SessionState::Idle).unwrap();
        assert_eq!(gate.current(), SessionState::Idle);
    }

    #[test]
    fn test_gate_rejects_double_busy() {
        let gate = StateGate::new();
        gate.transition(SessionState::Busy).unwrap();
        let result = gate.transition(SessionState::Busy);
        assert!(result.is_err());
        assert_eq!(gate.current(), SessionState::Busy);
    }

    #[test]
    fn test_gate_reset() {
        let gate = StateGate::new();
        gate.transition(SessionState::Busy).unwrap();
        gate.reset();
        assert_eq!(gate.current(), SessionState::Idle);
    }

    #[test]
    fn test_gate_clone_is_shared() {
        let gate1 = StateGate::new();
        let gate2 = gate1.clone();

        gate1.transition(SessionState::Busy).unwrap();
        assert_eq!(gate2.current(), SessionState::Busy);
    }

    #[test]
    fn test_gate_transition_error_message() {
        let gate = StateGate::new();
        let result = gate.transition(SessionState::Idle);
        match result {
            Err(KoseiError::Session(msg)) => {
                assert!(msg.contains("Idle"));
            }
            _ => panic!("Expected Session error variant"),
        }
    }
}
