//! Guarded transitions between states.

use super::rule::Rule;
use super::state::StateId;
use serde_json::Value;
use tracing::debug;

/// Secondary predicate that rejects an otherwise matching transition.
#[derive(Clone, Debug)]
pub struct Validation {
    rule: Rule,
    message: String,
}

impl Validation {
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Validation {
            rule,
            message: message.into(),
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// A validation that cannot be evaluated does not pass.
    pub fn passes(&self, context: &Value) -> bool {
        self.rule.evaluate(context).unwrap_or(false)
    }
}

/// Directed edge from an origin state to a destination state.
///
/// Origin and destination are arena indices into the owning machine.
#[derive(Clone, Debug)]
pub struct Transition {
    key: String,
    name: String,
    origin: StateId,
    destination: StateId,
    rule: Rule,
    validation: Option<Validation>,
}

impl Transition {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        origin: StateId,
        destination: StateId,
        rule: Rule,
    ) -> Self {
        Transition {
            key: key.into(),
            name: name.into(),
            origin,
            destination,
            rule,
            validation: None,
        }
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> StateId {
        self.origin
    }

    pub fn destination(&self) -> StateId {
        self.destination
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    /// Check whether this transition's rule matches the context.
    ///
    /// A rule that fails to evaluate does not match.
    pub fn check_condition(&self, context: &Value) -> bool {
        match self.rule.evaluate(context) {
            Ok(matched) => matched,
            Err(err) => {
                debug!(transition = %self.key, error = %err, "rule evaluation failed, treating as no match");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuleError;
    use serde_json::json;

    fn throwing() -> Rule {
        Rule::new("throw", |_| {
            Err(RuleError::Evaluation {
                expression: "throw".to_string(),
                message: "Invalid rule".to_string(),
            })
        })
    }

    #[test]
    fn transition_exposes_fields() {
        let transition = Transition::new(
            "test_transition",
            "Test Transition",
            StateId(0),
            StateId(1),
            Rule::always(),
        );

        assert_eq!(transition.key(), "test_transition");
        assert_eq!(transition.name(), "Test Transition");
        assert_eq!(transition.origin(), StateId(0));
        assert_eq!(transition.destination(), StateId(1));
        assert!(transition.validation().is_none());
        assert!(transition.check_condition(&json!({})));
    }

    #[test]
    fn failing_rule_does_not_match() {
        let transition = Transition::new("t", "t", StateId(0), StateId(1), throwing());

        assert!(!transition.check_condition(&json!({})));
    }

    #[test]
    fn validation_passes_and_fails() {
        let validation = Validation::new(
            Rule::from_fn(|ctx| Ok(ctx["value"].as_i64().unwrap_or(0) > 0)),
            "Value must be positive",
        );

        assert!(validation.passes(&json!({"value": 1})));
        assert!(!validation.passes(&json!({"value": -1})));
        assert_eq!(validation.message(), "Value must be positive");
    }

    #[test]
    fn failing_validation_rule_does_not_pass() {
        let validation = Validation::new(throwing(), "never");

        assert!(!validation.passes(&json!({})));
    }
}
