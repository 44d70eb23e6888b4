//! Record of the steps taken while walking a machine.
//!
//! [`Trail::record`] returns a new trail with the step appended and leaves
//! the original untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One resolved step from one state to the next.
///
/// # Example
///
/// ```rust
/// use statewright::core::{Step, Trail};
/// use chrono::Utc;
///
/// let trail = Trail::new().record(Step {
///     from: "draft".to_string(),
///     to: "review".to_string(),
///     transition: "submit".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(trail.path(), vec!["draft", "review"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Key of the state the step started from
    pub from: String,
    /// Key of the state the step resolved to
    pub to: String,
    /// Key of the transition that matched
    pub transition: String,
    /// When the step was resolved
    pub timestamp: DateTime<Utc>,
}

/// Ordered list of steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    steps: Vec<Step>,
}

impl Trail {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning a new trail.
    pub fn record(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Append a step in place.
    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Keys of the visited states: the first origin, then every destination.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.from.as_str());
        }
        for step in &self.steps {
            path.push(step.to.as_str());
        }
        path
    }

    /// Time between the first and the last recorded step.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
