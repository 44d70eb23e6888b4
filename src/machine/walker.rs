//! Stepwise cursor over a machine that records where it went.

use crate::core::{State, Step, Trail};
use crate::machine::error::TransitionError;
use crate::machine::Machine;
use chrono::Utc;
use serde_json::Value;

/// Cursor holding a current state and the trail of steps taken so far.
///
/// The machine itself is never modified; any number of walkers may share
/// one machine.
#[derive(Clone, Debug)]
pub struct Walker<'m> {
    machine: &'m Machine,
    current: &'m State,
    trail: Trail,
}

impl<'m> Walker<'m> {
    pub fn new(machine: &'m Machine, start: &'m State) -> Self {
        Self {
            machine,
            current: start,
            trail: Trail::new(),
        }
    }

    pub fn current(&self) -> &'m State {
        self.current
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Whether the current state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.machine.is_terminal(self.current)
    }

    /// Resolve the next state for a context and move to it.
    ///
    /// On error the walker stays where it was and nothing is recorded.
    pub fn step(&mut self, context: &Value) -> Result<&'m State, TransitionError> {
        let machine = self.machine;
        let transition = machine.resolve(self.current, context)?;
        let next = machine.destination(transition);

        self.trail.push(Step {
            from: self.current.key().to_string(),
            to: next.key().to_string(),
            transition: transition.key().to_string(),
            timestamp: Utc::now(),
        });
        self.current = next;
        Ok(next)
    }

    /// Step through every context in order, stopping at the first error.
    pub fn run<I>(&mut self, contexts: I) -> Result<&'m State, TransitionError>
    where
        I: IntoIterator<Item = Value>,
    {
        for context in contexts {
            self.step(&context)?;
        }
        Ok(self.current)
    }
}

impl Machine {
    /// Walker starting at the initial state.
    pub fn walker(&self) -> Walker<'_> {
        Walker::new(self, self.initial())
    }

    /// Walker starting at an arbitrary state of this machine.
    pub fn walker_from<'m>(&'m self, start: &'m State) -> Walker<'m> {
        Walker::new(self, start)
    }
}
