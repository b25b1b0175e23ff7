// crates/patchbot-monitor/src/state.rs
//
// Monitor state machine.
//
// Valid transitions:
//   Idle -> Monitoring
// There is no way back: once a destination is configured the periodic
// check runs for the rest of the process lifetime.

use std::fmt;

use patchbot_core::BotError;

/// Lifecycle states of the change-detection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// No destination configured; no timer running.
    Idle,
    /// Destination configured and the periodic task is running.
    Monitoring,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorState::Idle => write!(f, "Idle"),
            MonitorState::Monitoring => write!(f, "Monitoring"),
        }
    }
}

/// State machine for the monitor lifecycle.
#[derive(Debug)]
pub struct MonitorStateMachine {
    pub current: MonitorState,
}

impl MonitorStateMachine {
    /// Create a new state machine starting in the Idle state.
    pub fn new() -> Self {
        Self {
            current: MonitorState::Idle,
        }
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns an error if the transition is not valid.
    pub fn transition(&mut self, new_state: MonitorState) -> Result<(), BotError> {
        let valid = matches!(
            (self.current, new_state),
            (MonitorState::Idle, MonitorState::Monitoring)
        );

        if valid {
            tracing::info!("Monitor state transition: {} -> {}", self.current, new_state);
            self.current = new_state;
            Ok(())
        } else {
            Err(BotError::InvalidState(format!(
                "Invalid monitor transition: {} -> {}",
                self.current, new_state
            )))
        }
    }
}

impl Default for MonitorStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
