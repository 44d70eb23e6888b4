//! States and the actions bound to them.

use crate::machine::TransitionError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Error type returned by user-supplied actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

type ActionFn = dyn Fn(&[Value]) -> Result<Value, ActionError> + Send + Sync;

/// Arena index of a state inside its machine.
///
/// Only a machine hands out ids; they cannot be built or deserialized by
/// callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Named callable bound to a state.
///
/// Actions receive positional arguments: mapping and iteration pass
/// `[item]`, folding passes `[accumulator, item]`.
///
/// # Example
///
/// ```rust
/// use statewright::core::Action;
/// use serde_json::{json, Value};
///
/// let double = Action::new("double", |args: &[Value]| {
///     let n = args[0].as_i64().ok_or("expected an integer")?;
///     Ok(json!(n * 2))
/// });
///
/// assert_eq!(double.call(&[json!(21)]).unwrap(), json!(42));
/// ```
#[derive(Clone)]
pub struct Action {
    name: String,
    func: Arc<ActionFn>,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ActionError> + Send + Sync + 'static,
    {
        Action {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, ActionError> {
        (self.func)(args)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.name).finish()
    }
}

/// A state of a compiled machine.
///
/// States are created once while a machine is built and never change
/// afterwards. Two states are the same state when their keys match.
#[derive(Clone, Debug)]
pub struct State {
    key: String,
    name: String,
    action: Option<Action>,
}

impl State {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        State {
            key: key.into(),
            name: name.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Run this state's action with the given arguments.
    ///
    /// Arguments are forwarded unchanged. A state without an action fails
    /// with [`TransitionError::MissingAction`].
    pub fn do_action(&self, args: &[Value]) -> Result<Value, TransitionError> {
        let action = self
            .action
            .as_ref()
            .ok_or_else(|| TransitionError::MissingAction(self.key.clone()))?;

        action
            .call(args)
            .map_err(|source| TransitionError::ActionFailed {
                state: self.key.clone(),
                message: source.to_string(),
            })
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for State {}
