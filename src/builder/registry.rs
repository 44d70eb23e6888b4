//! Registry of named actions available to a schema.

use crate::core::{Action, ActionError};
use serde_json::Value;
use std::collections::HashMap;

/// Caller-constructed mapping from action name to callable.
///
/// Every action named by a schema must be present here when the machine is
/// built; the lookup happens once, at construction.
///
/// # Example
///
/// ```rust
/// use statewright::builder::ActionRegistry;
/// use serde_json::{json, Value};
///
/// let registry = ActionRegistry::new()
///     .register("echo", |args: &[Value]| Ok(args[0].clone()))
///     .register("zero", |_: &[Value]| Ok(json!(0)));
///
/// assert!(registry.contains("echo"));
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable under a name, replacing any previous entry.
    pub fn register<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ActionError> + Send + Sync + 'static,
    {
        self.insert(Action::new(name, func));
        self
    }

    pub fn insert(&mut self, action: Action) -> Option<Action> {
        self.actions.insert(action.name().to_string(), action)
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
