//! Structural errors raised while compiling a schema into a machine.

use crate::core::RuleError;
use thiserror::Error;

/// Errors that can occur when building a machine from a schema.
///
/// All of them are fatal: no machine is returned and the schema has to be
/// fixed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Set machine.initial_state in the schema")]
    MissingInitialState,

    #[error("Initial state '{0}' is not a declared state")]
    InvalidInitialState(String),

    #[error("State '{origin}' has multiple transitions pointing to '{destination}'")]
    DuplicateDestination { origin: String, destination: String },

    #[error("Destination state '{0}' does not exist")]
    MissingDestinationState(String),

    #[error("Action '{action}' of state '{state}' is not a registered callable")]
    NonCallableAction { state: String, action: String },

    #[error(transparent)]
    Rule(#[from] RuleError),
}
