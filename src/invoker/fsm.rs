use crate::{Error, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

// Invocation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Idle,
    InFlight,
    Completed,
    Failed,
}

// Invocation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationEvent {
    RequestSent,
    ResponseReceived,
    ErrorOccurred,
}

/// Lifecycle of a single invocation. There is no edge out of a terminal state.
pub struct InvocationStateMachine {
    state: InvocationState,
    invocation_id: Uuid,
    last_error: Option<String>,
}

impl Default for InvocationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationStateMachine {
    pub fn new() -> Self {
        let invocation_id = Uuid::new_v4();
        debug!("Creating invocation FSM {}", invocation_id);
        Self {
            state: InvocationState::Idle,
            invocation_id,
            last_error: None,
        }
    }

    pub fn current_state(&self) -> InvocationState {
        self.state
    }

    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    pub fn transition(&mut self, event: InvocationEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (InvocationState::Idle, InvocationEvent::RequestSent) => InvocationState::InFlight,
            (InvocationState::InFlight, InvocationEvent::ResponseReceived) => {
                InvocationState::Completed
            }
            (InvocationState::InFlight, InvocationEvent::ErrorOccurred) => InvocationState::Failed,
            _ => {
                warn!(
                    "Invalid transition for invocation {} from {:?} with event {:?}",
                    self.invocation_id, self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "Invocation {} state transition: {:?} -> {:?} (event: {:?})",
            self.invocation_id, self.state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    /// Moves to `Failed`, remembering why.
    pub fn fail(&mut self, error: &Error) -> Result<()> {
        self.transition(InvocationEvent::ErrorOccurred)?;
        self.last_error = Some(error.to_string());
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            InvocationState::Completed | InvocationState::Failed
        )
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
