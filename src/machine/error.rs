//! Errors returned by machine and registry operations.

use crate::core::State;
use thiserror::Error;

/// Boxed domain error produced by a guard or hook.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for machine operations.
pub type Result<T, E = FsmError> = std::result::Result<T, E>;

/// Structural mismatch between a machine's configuration and the subject
/// it was handed. Never retryable: the caller has wired something wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InternalError {
    #[error("subject is not a record")]
    NotARecord,

    #[error("state attribute '{attribute}' not found on subject")]
    MissingAttribute { attribute: String },

    #[error("state attribute '{attribute}' is not an assignable string")]
    NotAssignable { attribute: String },

    #[error("no machine registered for subject type '{type_name}'")]
    Unregistered { type_name: &'static str },

    #[error("lock poisoned by a panicking hook")]
    Poisoned,
}

/// Errors that can occur while querying or firing an event.
///
/// Guard and hook errors are carried unchanged: their `Display` and
/// `source()` are those of the domain error itself.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),

    /// No transition for this event from the subject's current state. The
    /// event may or may not be defined from other states.
    #[error("event {event} does not exist")]
    UnknownEvent { event: String },

    /// A transition exists but a guard rejected it.
    #[error("event {event} cannot transition from {state}")]
    InvalidTransition { event: String, state: State },

    #[error(transparent)]
    Guard(BoxError),

    /// The before-hook failed; the subject was not mutated.
    #[error(transparent)]
    BeforeHook(BoxError),

    /// The after-hook failed. The subject already holds the destination
    /// state and is not rolled back.
    #[error(transparent)]
    AfterHook(BoxError),
}

impl FsmError {
    pub(crate) fn unknown_event(event: &str) -> Self {
        FsmError::UnknownEvent {
            event: event.to_owned(),
        }
    }

    pub(crate) fn invalid_transition(event: &str, state: &State) -> Self {
        FsmError::InvalidTransition {
            event: event.to_owned(),
            state: state.clone(),
        }
    }

    /// True if the subject's state was changed before this error was raised.
    pub fn is_post_mutation(&self) -> bool {
        matches!(self, FsmError::AfterHook(_))
    }

    /// The guard or hook error, if this is one.
    pub fn domain(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            FsmError::Guard(e) | FsmError::BeforeHook(e) | FsmError::AfterHook(e) => {
                Some(e.as_ref())
            }
            _ => None,
        }
    }

    /// Recover the guard or hook error, handing the engine error back otherwise.
    pub fn into_domain(self) -> Result<BoxError, Self> {
        match self {
            FsmError::Guard(e) | FsmError::BeforeHook(e) | FsmError::AfterHook(e) => Ok(e),
            other => Err(other),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for FsmError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        FsmError::Internal(InternalError::Poisoned)
    }
}
