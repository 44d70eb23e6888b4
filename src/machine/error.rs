//! Errors raised while running a machine.

use thiserror::Error;

/// Marker reported when no transition matched at all.
pub const ANY_TRANSITION: &str = "*";

/// Errors that can occur while resolving transitions or invoking actions.
///
/// They abort the call that raised them; the machine stays valid.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("No transition from state '{origin}' matched '{transition}'")]
    MissingTransition { origin: String, transition: String },

    #[error("State '{origin}' has more than one matching transition (first match: '{destination}')")]
    DuplicateTransition { origin: String, destination: String },

    #[error("Transition {transition} failed validation: {message}")]
    ValidationFailed { transition: String, message: String },

    #[error("State '{0}' has no action")]
    MissingAction(String),

    #[error("Action of state '{state}' failed: {message}")]
    ActionFailed { state: String, message: String },

    #[error("State '{0}' does not belong to this machine")]
    UnknownState(String),

    #[error("Cannot reduce an empty sequence without an initial value")]
    EmptySequence,
}
