//! Individual schema checks and their aggregation.

use crate::builder::{ActionRegistry, BuildError};
use crate::core::RuleCompiler;
use crate::schema::Schema;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of one or more schema checks.
pub type Diagnosis = Validation<(), NonEmptyVec<BuildError>>;

/// Run every check, accumulating ALL problems.
///
/// Returns `Validation::Success(())` when a machine can be built from the
/// schema with the given registry and compiler.
pub fn diagnose(schema: &Schema, actions: &ActionRegistry, compiler: &dyn RuleCompiler) -> Diagnosis {
    let checks: Vec<Diagnosis> = vec![
        check_initial_state(schema),
        check_actions(schema, actions),
        check_transitions(schema),
        check_rules(schema, compiler),
    ];

    Validation::all_vec(checks).map(|_| ())
}

pub fn check_initial_state(schema: &Schema) -> Diagnosis {
    match schema.initial_state() {
        None => Validation::fail(BuildError::MissingInitialState),
        Some(key) if !schema.states.contains_key(key) => {
            Validation::fail(BuildError::InvalidInitialState(key.to_string()))
        }
        Some(_) => Validation::success(()),
    }
}

pub fn check_actions(schema: &Schema, actions: &ActionRegistry) -> Diagnosis {
    let checks: Vec<Diagnosis> = schema
        .states
        .iter()
        .filter_map(|(state, definition)| definition.action.as_ref().map(|action| (state, action)))
        .map(|(state, action)| {
            if actions.contains(action) {
                Validation::success(())
            } else {
                Validation::fail(BuildError::NonCallableAction {
                    state: state.clone(),
                    action: action.clone(),
                })
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Duplicate destinations per origin and dangling destinations.
pub fn check_transitions(schema: &Schema) -> Diagnosis {
    let mut checks: Vec<Diagnosis> = Vec::new();

    for (origin, definition) in &schema.states {
        let mut seen = HashSet::new();
        for transition in definition.transitions.values() {
            let destination = transition.destination.as_str();

            if !seen.insert(destination) {
                checks.push(Validation::fail(BuildError::DuplicateDestination {
                    origin: origin.clone(),
                    destination: destination.to_string(),
                }));
            }

            if !schema.states.contains_key(destination) {
                checks.push(Validation::fail(BuildError::MissingDestinationState(
                    destination.to_string(),
                )));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Every rule and validation rule compiles.
pub fn check_rules(schema: &Schema, compiler: &dyn RuleCompiler) -> Diagnosis {
    let expressions = schema
        .states
        .values()
        .flat_map(|definition| definition.transitions.values())
        .flat_map(|transition| {
            let validation = transition
                .validation
                .as_ref()
                .and_then(|validation| validation.rule.as_deref());
            transition.rule.as_deref().into_iter().chain(validation)
        });

    let checks: Vec<Diagnosis> = expressions
        .map(|expression| match compiler.compile(expression) {
            Ok(_) => Validation::success(()),
            Err(err) => Validation::fail(BuildError::Rule(err)),
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}
