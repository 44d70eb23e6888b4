//! Compiled machine and transition resolution.

use crate::builder::{ActionRegistry, BuildError, MachineBuilder};
use crate::core::{State, StateId, Transition};
use crate::machine::error::{TransitionError, ANY_TRANSITION};
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Key of a transition: `(origin_key, transition_key)`.
pub type TransitionKey = (String, String);

/// Immutable graph of states and transitions with a designated initial state.
///
/// States live in an arena indexed by [`StateId`]; transitions refer to their
/// endpoints by id. Both maps keep declaration order.
pub struct Machine {
    initial: StateId,
    states: IndexMap<String, State>,
    transitions: IndexMap<TransitionKey, Transition>,
    outgoing: Vec<Vec<usize>>,
}

impl Machine {
    /// Build a machine from a schema, compiling rules with the default
    /// expression compiler.
    pub fn new(schema: &Schema, actions: &ActionRegistry) -> Result<Self, BuildError> {
        MachineBuilder::new(schema).actions(actions.clone()).build()
    }

    pub fn builder(schema: &Schema) -> MachineBuilder<'_> {
        MachineBuilder::new(schema)
    }

    pub(crate) fn from_parts(
        initial: StateId,
        states: IndexMap<String, State>,
        transitions: IndexMap<TransitionKey, Transition>,
    ) -> Self {
        let mut outgoing = vec![Vec::new(); states.len()];
        for (position, transition) in transitions.values().enumerate() {
            outgoing[transition.origin().index()].push(position);
        }

        Self {
            initial,
            states,
            transitions,
            outgoing,
        }
    }

    pub fn initial(&self) -> &State {
        self.arena(self.initial)
    }

    pub fn states(&self) -> &IndexMap<String, State> {
        &self.states
    }

    pub fn transitions(&self) -> &IndexMap<TransitionKey, Transition> {
        &self.transitions
    }

    pub fn state(&self, key: &str) -> Option<&State> {
        self.states.get(key)
    }

    /// Look up a state by arena id, `None` for an id from another machine.
    pub fn state_at(&self, id: StateId) -> Option<&State> {
        self.states.get_index(id.index()).map(|(_, state)| state)
    }

    // ids held by the machine itself always index its own arena
    fn arena(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn id_of(&self, state: &State) -> Option<StateId> {
        self.states.get_index_of(state.key()).map(StateId)
    }

    pub fn origin(&self, transition: &Transition) -> &State {
        self.arena(transition.origin())
    }

    pub fn destination(&self, transition: &Transition) -> &State {
        self.arena(transition.destination())
    }

    /// Outgoing transitions of a state, in declaration order.
    pub fn get_transitions(&self, state: &State) -> impl Iterator<Item = &Transition> + '_ {
        let positions = match self.id_of(state) {
            Some(id) => self.outgoing[id.index()].as_slice(),
            None => &[],
        };
        positions.iter().map(move |&position| &self.transitions[position])
    }

    pub fn get_transition(&self, state: &State, key: &str) -> Option<&Transition> {
        self.transitions
            .get(&(state.key().to_string(), key.to_string()))
    }

    /// States with no outgoing transitions.
    pub fn is_terminal(&self, state: &State) -> bool {
        self.get_transitions(state).next().is_none()
    }

    /// Resolve the single next state for a context.
    ///
    /// Every outgoing transition is checked in declaration order. A matching
    /// transition whose validation does not pass aborts resolution at once.
    /// Exactly one match is required.
    pub fn progress(&self, state: &State, context: &Value) -> Result<&State, TransitionError> {
        let transition = self.resolve(state, context)?;
        Ok(self.destination(transition))
    }

    /// Resolve the single transition matching a context, as [`progress`]
    /// does, returning the transition instead of its destination.
    ///
    /// [`progress`]: Machine::progress
    pub fn resolve(&self, state: &State, context: &Value) -> Result<&Transition, TransitionError> {
        let origin = self
            .id_of(state)
            .ok_or_else(|| TransitionError::UnknownState(state.key().to_string()))?;

        let mut matches = Vec::new();
        for &position in &self.outgoing[origin.index()] {
            let transition = &self.transitions[position];
            if !transition.check_condition(context) {
                trace!(origin = state.key(), transition = transition.key(), "rule did not match");
                continue;
            }

            if let Some(validation) = transition.validation() {
                if !validation.passes(context) {
                    debug!(
                        origin = state.key(),
                        transition = transition.key(),
                        "transition rejected by validation"
                    );
                    return Err(TransitionError::ValidationFailed {
                        transition: transition.key().to_string(),
                        message: validation.message().to_string(),
                    });
                }
            }

            matches.push(transition);
        }

        match matches.as_slice() {
            [] => Err(TransitionError::MissingTransition {
                origin: state.key().to_string(),
                transition: ANY_TRANSITION.to_string(),
            }),
            [only] => {
                trace!(origin = state.key(), transition = only.key(), "resolved");
                Ok(*only)
            }
            [first, ..] => Err(TransitionError::DuplicateTransition {
                origin: state.key().to_string(),
                destination: self.destination(first).key().to_string(),
            }),
        }
    }

    /// Invoke a state's action with the given arguments.
    pub fn invoke(&self, state: &State, args: &[Value]) -> Result<Value, TransitionError> {
        state.do_action(args)
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("initial", &self.initial().key())
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("transitions", &self.transitions.keys().collect::<Vec<_>>())
            .finish()
    }
}
