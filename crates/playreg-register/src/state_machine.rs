//! Session state machine.
//!
//! The register is either taking scans (`Normal`) or showing the payment
//! confirmation (`ThankYou`). The confirmation expires on its own after a
//! fixed duration.
//!
//! # Valid Transitions
//!
//! - Normal → ThankYou (card read)
//! - ThankYou → Normal (timeout)
//!
//! [`SessionMachine::reset`] forces `Normal` from any state and is what
//! entering the mode uses.
//!
//! Time is passed in as milliseconds from the register's clock, so the
//! machine itself never reads a clock.
//!
//! # Examples
//!
//! ```
//! use playreg_register::{SessionMachine, SessionState};
//!
//! let mut machine = SessionMachine::new(0);
//! machine.transition_to(SessionState::ThankYou, 1000).unwrap();
//! machine.set_timeout(3000);
//!
//! assert!(!machine.has_timed_out(3999));
//! assert_eq!(machine.time_in_current_state(3500), 2500);
//!
//! let transition = machine.check_and_handle_timeout(4000).unwrap().unwrap();
//! assert_eq!(transition.to, SessionState::Normal);
//! ```
//!
//! # Builder Pattern
//!
//! ```
//! use playreg_register::{SessionMachine, SessionState};
//!
//! let machine = SessionMachine::builder()
//!     .with_initial_state(SessionState::ThankYou)
//!     .with_timeout_ms(3000)
//!     .entered_at(500)
//!     .build();
//!
//! assert_eq!(machine.current_state(), SessionState::ThankYou);
//! assert!(machine.has_timed_out(3500));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use playreg_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Taking scans; the cart screen is shown.
    Normal,

    /// Payment confirmed; the thank-you screen is shown and input is ignored.
    ThankYou,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            SessionState::Normal => "Normal",
            SessionState::ThankYou => "ThankYou",
        };
        write!(f, "{}", state_str)
    }
}

impl SessionState {
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Normal, SessionState::ThankYou)
                | (SessionState::ThankYou, SessionState::Normal)
        )
    }

    /// Whether scans and CLEAR are accepted in this state.
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Normal)
    }
}

/// Record of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: SessionState,
    pub to: SessionState,
    pub at_ms: u64,
}

impl StateTransition {
    pub fn new(from: SessionState, to: SessionState, at_ms: u64) -> Self {
        Self { from, to, at_ms }
    }
}

/// Session state machine with an optional timeout on the current state.
#[derive(Debug, Clone)]
pub struct SessionMachine {
    current_state: SessionState,

    /// When the current state was entered.
    state_entered_at_ms: u64,

    /// Timeout for the current state, cleared on every state change.
    current_timeout_ms: Option<u64>,
}

impl SessionMachine {
    /// Create a machine in `Normal`, entered at `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            current_state: SessionState::Normal,
            state_entered_at_ms: now_ms,
            current_timeout_ms: None,
        }
    }

    pub fn builder() -> SessionMachineBuilder {
        SessionMachineBuilder::default()
    }

    pub fn current_state(&self) -> SessionState {
        self.current_state
    }

    pub fn state_entered_at_ms(&self) -> u64 {
        self.state_entered_at_ms
    }

    pub fn time_in_current_state(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.state_entered_at_ms)
    }

    pub fn has_timed_out(&self, now_ms: u64) -> bool {
        self.current_timeout_ms
            .is_some_and(|timeout| self.time_in_current_state(now_ms) >= timeout)
    }

    pub fn set_timeout(&mut self, timeout_ms: u64) {
        self.current_timeout_ms = Some(timeout_ms);
    }

    /// Move to `new_state` at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateTransition`] when the edge is not
    /// allowed; the machine is left unchanged.
    pub fn transition_to(&mut self, new_state: SessionState, now_ms: u64) -> Result<StateTransition> {
        if !self.current_state.can_transition_to(&new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        let transition = StateTransition::new(self.current_state, new_state, now_ms);
        self.perform_state_change(transition);

        Ok(transition)
    }

    /// Return to `Normal` once the `ThankYou` timeout has elapsed.
    pub fn check_and_handle_timeout(&mut self, now_ms: u64) -> Result<Option<StateTransition>> {
        if !self.has_timed_out(now_ms) {
            return Ok(None);
        }

        let timeout_state = match self.current_state {
            SessionState::ThankYou => SessionState::Normal,
            SessionState::Normal => return Ok(None),
        };

        let transition = self.transition_to(timeout_state, now_ms)?;
        Ok(Some(transition))
    }

    /// Force `Normal` regardless of the current state.
    pub fn reset(&mut self, now_ms: u64) -> StateTransition {
        let transition = StateTransition::new(self.current_state, SessionState::Normal, now_ms);
        self.perform_state_change(transition);
        transition
    }

    fn perform_state_change(&mut self, transition: StateTransition) {
        self.current_state = transition.to;
        self.state_entered_at_ms = transition.at_ms;
        self.current_timeout_ms = None;
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Builder for [`SessionMachine`].
#[derive(Debug, Default)]
pub struct SessionMachineBuilder {
    initial_state: Option<SessionState>,
    entered_at_ms: u64,
    timeout_ms: Option<u64>,
}

impl SessionMachineBuilder {
    pub fn with_initial_state(mut self, state: SessionState) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn entered_at(mut self, now_ms: u64) -> Self {
        self.entered_at_ms = now_ms;
        self
    }

    pub fn build(self) -> SessionMachine {
        SessionMachine {
            current_state: self.initial_state.unwrap_or(SessionState::Normal),
            state_entered_at_ms: self.entered_at_ms,
            current_timeout_ms: self.timeout_ms,
        }
    }
}
