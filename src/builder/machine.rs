//! Builder compiling a schema into a machine.

use crate::builder::error::BuildError;
use crate::builder::registry::ActionRegistry;
use crate::core::{Rule, RuleCompiler, State, StateId, Transition, Validation};
use crate::expr::ExprCompiler;
use crate::machine::Machine;
use crate::schema::{Schema, TransitionDefinition};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Builder for compiling a [`Schema`] into a [`Machine`].
///
/// Rules are compiled with [`ExprCompiler`] unless another compiler is set.
pub struct MachineBuilder<'s> {
    schema: &'s Schema,
    actions: ActionRegistry,
    compiler: Box<dyn RuleCompiler + 's>,
}

/// Transition collected in the first pass, before its destination exists.
struct Pending<'s> {
    origin: StateId,
    key: &'s str,
    definition: &'s TransitionDefinition,
}

impl<'s> MachineBuilder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            actions: ActionRegistry::new(),
            compiler: Box::new(ExprCompiler::default()),
        }
    }

    /// Set the registry used to resolve state actions.
    pub fn actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    /// Set the compiler used for rule and validation expressions.
    pub fn compiler<C>(mut self, compiler: C) -> Self
    where
        C: RuleCompiler + 's,
    {
        self.compiler = Box::new(compiler);
        self
    }

    /// Build the machine.
    ///
    /// States are created first so that transitions may name destinations
    /// declared later in the schema; transitions are resolved in a second
    /// pass.
    pub fn build(self) -> Result<Machine, BuildError> {
        let schema = self.schema;
        let mut states: IndexMap<String, State> = IndexMap::with_capacity(schema.states.len());
        let mut pending = Vec::new();

        for (state_key, definition) in &schema.states {
            let name = definition.name.as_deref().unwrap_or(state_key);
            let mut state = State::new(state_key.as_str(), name);

            if let Some(action_name) = &definition.action {
                let action =
                    self.actions
                        .get(action_name)
                        .ok_or_else(|| BuildError::NonCallableAction {
                            state: state_key.clone(),
                            action: action_name.clone(),
                        })?;
                state = state.with_action(action.clone());
            }

            let origin = StateId(states.len());
            states.insert(state_key.clone(), state);

            let mut destinations = HashSet::new();
            for (key, transition) in &definition.transitions {
                if !destinations.insert(transition.destination.as_str()) {
                    return Err(BuildError::DuplicateDestination {
                        origin: state_key.clone(),
                        destination: transition.destination.clone(),
                    });
                }
                pending.push(Pending {
                    origin,
                    key: key.as_str(),
                    definition: transition,
                });
            }
        }

        let mut transitions = IndexMap::with_capacity(pending.len());
        for Pending {
            origin,
            key,
            definition,
        } in pending
        {
            let destination = states
                .get_index_of(&definition.destination)
                .map(StateId)
                .ok_or_else(|| BuildError::MissingDestinationState(definition.destination.clone()))?;

            let mut transition = Transition::new(
                key,
                definition.name.as_deref().unwrap_or(key),
                origin,
                destination,
                self.compile(definition.rule.as_deref())?,
            );

            if let Some(validation) = &definition.validation {
                transition = transition.with_validation(Validation::new(
                    self.compile(validation.rule.as_deref())?,
                    validation.message.as_str(),
                ));
            }

            let origin_key = states[origin.index()].key().to_string();
            transitions.insert((origin_key, key.to_string()), transition);
        }

        let initial_key = schema
            .initial_state()
            .ok_or(BuildError::MissingInitialState)?;
        let initial = states
            .get_index_of(initial_key)
            .map(StateId)
            .ok_or_else(|| BuildError::InvalidInitialState(initial_key.to_string()))?;

        debug!(
            states = states.len(),
            transitions = transitions.len(),
            initial = initial_key,
            "machine built"
        );

        Ok(Machine::from_parts(initial, states, transitions))
    }

    fn compile(&self, expression: Option<&str>) -> Result<Rule, BuildError> {
        match expression {
            Some(expression) => Ok(self.compiler.compile(expression)?),
            None => Ok(Rule::always()),
        }
    }
}
