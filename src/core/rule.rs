//! Compiled rule predicates for guarding transitions.
//!
//! A rule is a boolean function of a context value. Rules are produced from
//! their textual form by a [`RuleCompiler`] when a machine is built, so a
//! malformed expression is reported before anything runs.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Expression recorded for rules that were not written in the schema.
pub const ALWAYS: &str = "true";

/// Errors produced while compiling or evaluating a rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleError {
    #[error("Failed to parse rule '{expression}': {message}")]
    Parse { expression: String, message: String },

    #[error("Failed to evaluate rule '{expression}': {message}")]
    Evaluation { expression: String, message: String },
}

type Predicate = dyn Fn(&Value) -> Result<bool, RuleError> + Send + Sync;

/// Compiled boolean predicate over a context.
///
/// Evaluation reports its failures on a separate channel from the boolean
/// outcome. Whether a failure counts as "no match" is decided by the caller.
///
/// # Example
///
/// ```rust
/// use statewright::core::Rule;
/// use serde_json::json;
///
/// let positive = Rule::from_fn(|ctx| Ok(ctx["value"].as_i64().unwrap_or(0) > 0));
///
/// assert_eq!(positive.evaluate(&json!({"value": 3})), Ok(true));
/// assert_eq!(positive.evaluate(&json!({"value": -3})), Ok(false));
/// ```
#[derive(Clone)]
pub struct Rule {
    expression: String,
    predicate: Arc<Predicate>,
}

impl Rule {
    /// Create a rule from its source expression and compiled predicate.
    pub fn new<F>(expression: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Rule {
            expression: expression.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Create a rule from a native closure with no textual form.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self::new("<native>", predicate)
    }

    /// Rule that matches every context.
    pub fn always() -> Self {
        Self::new(ALWAYS, |_| Ok(true))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluate the predicate against a context.
    pub fn evaluate(&self, context: &Value) -> Result<bool, RuleError> {
        (self.predicate)(context)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.expression).finish()
    }
}

/// Turns a rule's textual form into an executable [`Rule`].
///
/// Any `Fn(&str) -> Result<Rule, RuleError>` closure is a compiler, which
/// keeps tests and small embeddings free of an expression language.
pub trait RuleCompiler: Send + Sync {
    fn compile(&self, expression: &str) -> Result<Rule, RuleError>;
}

impl<F> RuleCompiler for F
where
    F: Fn(&str) -> Result<Rule, RuleError> + Send + Sync,
{
    fn compile(&self, expression: &str) -> Result<Rule, RuleError> {
        self(expression)
    }
}
