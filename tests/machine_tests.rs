//! End-to-end tests building machines from schema documents.

use serde_json::{json, Value};
use statewright::builder::{ActionRegistry, BuildError};
use statewright::machine::{Machine, TransitionError};
use statewright::schema::Schema;
use std::sync::Arc;

fn simple_machine_schema() -> Schema {
    Schema::from_yaml_str(
        r#"
machine:
  initial_state: state1
states:
  state1:
    name: State One
    transitions:
      to_state2:
        name: Go to State Two
        destination: state2
        rule: "true"
  state2:
    name: State Two
"#,
    )
    .unwrap()
}

fn build(schema: &Schema) -> Result<Machine, BuildError> {
    Machine::new(schema, &ActionRegistry::new())
}

#[test]
fn initialization() {
    let machine = build(&simple_machine_schema()).unwrap();

    assert_eq!(machine.initial().key(), "state1");
    assert_eq!(machine.initial().name(), "State One");
    assert_eq!(machine.states().len(), 2);
    assert_eq!(machine.transitions().len(), 1);
}

#[test]
fn transitions_reference_machine_states() {
    let machine = build(&simple_machine_schema()).unwrap();
    let transition = machine
        .get_transition(machine.initial(), "to_state2")
        .unwrap();

    assert!(std::ptr::eq(
        machine.origin(transition),
        machine.state("state1").unwrap()
    ));
    assert!(std::ptr::eq(
        machine.destination(transition),
        machine.state("state2").unwrap()
    ));
}

#[test]
fn progress_follows_single_true_rule() {
    let machine = build(&simple_machine_schema()).unwrap();

    let next = machine.progress(machine.initial(), &json!({})).unwrap();

    assert_eq!(next.key(), "state2");
    assert!(std::ptr::eq(next, machine.state("state2").unwrap()));
}

#[test]
fn missing_initial_state() {
    let schema = Schema::from_json_value(json!({
        "machine": {},
        "states": {"state1": {"name": "State One"}}
    }))
    .unwrap();

    assert_eq!(build(&schema).unwrap_err(), BuildError::MissingInitialState);
}

#[test]
fn invalid_initial_state() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "nonexistent"},
        "states": {"state1": {"name": "State One"}}
    }))
    .unwrap();

    assert_eq!(
        build(&schema).unwrap_err(),
        BuildError::InvalidInitialState("nonexistent".to_string())
    );
}

#[test]
fn missing_destination_state() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "state1"},
        "states": {
            "state1": {
                "transitions": {
                    "to_state2": {"destination": "nonexistent", "rule": "true"}
                }
            }
        }
    }))
    .unwrap();

    let err = build(&schema).unwrap_err();
    assert_eq!(err, BuildError::MissingDestinationState("nonexistent".to_string()));
    assert_eq!(err.to_string(), "Destination state 'nonexistent' does not exist");
}

#[test]
fn duplicate_destination() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "state1"},
        "states": {
            "state1": {
                "transitions": {
                    "to_state2_a": {"destination": "state2", "rule": "true"},
                    "to_state2_b": {"destination": "state2", "rule": "true"}
                }
            },
            "state2": {}
        }
    }))
    .unwrap();

    let err = build(&schema).unwrap_err();
    assert!(err
        .to_string()
        .contains("State 'state1' has multiple transitions pointing to 'state2'"));
}

#[test]
fn multiple_transitions_pick_the_true_one() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "state1"},
        "states": {
            "state1": {
                "transitions": {
                    "to_state2": {"destination": "state2", "rule": "false"},
                    "to_state3": {"destination": "state3", "rule": "true"}
                }
            },
            "state2": {},
            "state3": {}
        }
    }))
    .unwrap();
    let machine = build(&schema).unwrap();

    let next = machine.progress(machine.initial(), &json!({})).unwrap();

    assert_eq!(next.key(), "state3");
    assert_eq!(machine.transitions().len(), 2);
}

#[test]
fn no_true_rule_is_missing_transition() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "state1"},
        "states": {
            "state1": {"transitions": {"to_state2": {"destination": "state2", "rule": "false"}}},
            "state2": {}
        }
    }))
    .unwrap();
    let machine = build(&schema).unwrap();

    let err = machine.progress(machine.initial(), &json!({})).unwrap_err();
    assert_eq!(
        err,
        TransitionError::MissingTransition {
            origin: "state1".to_string(),
            transition: "*".to_string(),
        }
    );
}

#[test]
fn two_true_rules_are_duplicate_transition() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "state1"},
        "states": {
            "state1": {
                "transitions": {
                    "to_state3": {"destination": "state3"},
                    "to_state2": {"destination": "state2"}
                }
            },
            "state2": {},
            "state3": {}
        }
    }))
    .unwrap();
    let machine = build(&schema).unwrap();

    let err = machine.progress(machine.initial(), &json!({})).unwrap_err();
    assert_eq!(
        err,
        TransitionError::DuplicateTransition {
            origin: "state1".to_string(),
            destination: "state3".to_string(),
        }
    );
}

#[test]
fn rule_that_cannot_evaluate_does_not_match() {
    let schema = Schema::from_json_value(json!({
        "machine": {"initial_state": "state1"},
        "states": {
            "state1": {
                "transitions": {
                    "broken": {"destination": "state2", "rule": "undefined_variable > 1"},
                    "fallback": {"destination": "state3", "rule": "true"}
                }
            },
            "state2": {},
            "state3": {}
        }
    }))
    .unwrap();
    let machine = build(&schema).unwrap();

    let next = machine.progress(machine.initial(), &json!({})).unwrap();
    assert_eq!(next.key(), "state3");
}

fn validated_machine() -> Machine {
    let schema = Schema::from_yaml_str(
        r#"
machine:
  initial_state: start
states:
  start:
    transitions:
      submit:
        destination: done
        rule: "true"
        validation:
          rule: "value > 0"
          message: Value must be positive
      other:
        destination: elsewhere
        rule: "true"
  done: {}
  elsewhere: {}
"#,
    )
    .unwrap();
    build(&schema).unwrap()
}

#[test]
fn validation_failure_aborts_resolution() {
    let machine = validated_machine();

    let err = machine
        .progress(machine.initial(), &json!({"value": -1}))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Transition submit failed validation: Value must be positive"
    );
}

#[test]
fn passing_validation_counts_as_match() {
    let machine = validated_machine();

    // both transitions match once validation passes
    let err = machine
        .progress(machine.initial(), &json!({"value": 1}))
        .unwrap_err();

    assert_eq!(
        err,
        TransitionError::DuplicateTransition {
            origin: "start".to_string(),
            destination: "done".to_string(),
        }
    );
}

#[test]
fn validation_progresses_normally() {
    let schema = Schema::from_yaml_str(
        r#"
machine:
  initial_state: start
states:
  start:
    transitions:
      submit:
        destination: done
        validation:
          rule: "value > 0"
          message: Value must be positive
  done: {}
"#,
    )
    .unwrap();
    let machine = build(&schema).unwrap();

    let next = machine
        .progress(machine.initial(), &json!({"value": 1}))
        .unwrap();
    assert_eq!(next.key(), "done");

    let err = machine
        .progress(machine.initial(), &json!({"value": -1}))
        .unwrap_err();
    assert_eq!(
        err,
        TransitionError::ValidationFailed {
            transition: "submit".to_string(),
            message: "Value must be positive".to_string(),
        }
    );
}

#[test]
fn validation_that_cannot_evaluate_fails() {
    let schema = Schema::from_yaml_str(
        r#"
machine:
  initial_state: start
states:
  start:
    transitions:
      t:
        destination: done
        validation:
          rule: "missing > 0"
          message: M
  done: {}
"#,
    )
    .unwrap();
    let machine = build(&schema).unwrap();

    let err = machine
        .progress(machine.initial(), &json!({"value": 1}))
        .unwrap_err();

    assert_eq!(
        err,
        TransitionError::ValidationFailed {
            transition: "t".to_string(),
            message: "M".to_string(),
        }
    );
}

#[test]
fn graph_output() {
    let machine = build(&simple_machine_schema()).unwrap();
    let dot_graph = machine.graph();

    assert!(dot_graph.contains(r#""state1" [label="state1"]"#));
    assert!(dot_graph.contains(r#""state2" [label="state2"]"#));
    assert!(dot_graph.contains(r#""state1" -> "state2" [label="to_state2"]"#));
    assert!(dot_graph.starts_with("digraph {"));
    assert!(dot_graph.ends_with('}'));
}

const COUNTER: &str = r#"
machine:
  initial_state: start
states:
  start:
    transitions:
      even: { destination: even, rule: "item % 2 == 0" }
      odd: { destination: odd, rule: "item % 2 != 0" }
  even:
    action: on_even
    transitions:
      even: { destination: even, rule: "item % 2 == 0" }
      odd: { destination: odd, rule: "item % 2 != 0" }
  odd:
    action: on_odd
    transitions:
      even: { destination: even, rule: "item % 2 == 0" }
      odd: { destination: odd, rule: "item % 2 != 0" }
"#;

fn counter_machine(on_even: &'static str, on_odd: &'static str) -> Machine {
    let schema = Schema::from_yaml_str(COUNTER).unwrap();
    let actions = ActionRegistry::new()
        .register("on_even", move |args: &[Value]| Ok(json!(format!("{on_even}:{}", args.len()))))
        .register("on_odd", move |args: &[Value]| Ok(json!(format!("{on_odd}:{}", args.len()))));
    Machine::new(&schema, &actions).unwrap()
}

#[test]
fn map_dispatches_to_resolved_state_action() {
    let machine = counter_machine("even", "odd");

    let results: Vec<Value> = machine
        .map_action(machine.initial(), vec![json!(1), json!(2), json!(4), json!(7)])
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        results,
        vec![json!("odd:1"), json!("even:1"), json!("even:1"), json!("odd:1")]
    );
}

fn arithmetic_machine() -> Machine {
    let schema = Schema::from_yaml_str(COUNTER).unwrap();
    let actions = ActionRegistry::new()
        .register("on_even", |args: &[Value]| {
            Ok(json!(args[0].as_i64().unwrap() + args[1].as_i64().unwrap()))
        })
        .register("on_odd", |args: &[Value]| {
            Ok(json!(args[0].as_i64().unwrap() * args[1].as_i64().unwrap()))
        });
    Machine::new(&schema, &actions).unwrap()
}

#[test]
fn fold_with_initial_value() {
    let machine = arithmetic_machine();

    // 0 * 1 = 0, 0 + 2 = 2, 2 * 3 = 6
    let result = machine
        .fold_action(machine.initial(), vec![json!(1), json!(2), json!(3)], json!(0))
        .unwrap();

    assert_eq!(result, json!(6));
}

#[test]
fn reduce_without_initial_value() {
    let machine = arithmetic_machine();

    // seed 1, then 1 + 2 = 3, 3 * 3 = 9
    let result = machine
        .reduce_action(machine.initial(), vec![json!(1), json!(2), json!(3)])
        .unwrap();

    assert_eq!(result, json!(9));
}

#[test]
fn machine_stays_usable_after_errors() {
    let machine = validated_machine();

    assert!(machine
        .progress(machine.initial(), &json!({"value": -5}))
        .is_err());
    assert!(machine
        .progress(machine.initial(), &json!({"value": -5}))
        .is_err());

    let done = machine.state("done").unwrap();
    assert!(machine.is_terminal(done));
}

#[tokio::test]
async fn traversals_run_concurrently_over_one_machine() {
    let machine = Arc::new(arithmetic_machine());

    let handles: Vec<_> = (1..=4_i64)
        .map(|n| {
            let machine = Arc::clone(&machine);
            tokio::task::spawn_blocking(move || {
                let items: Vec<Value> = (1..=n).map(|i| json!(i * 2)).collect();
                machine.fold_action(machine.initial(), items, json!(0))
            })
        })
        .collect();

    let mut totals = Vec::new();
    for handle in handles {
        totals.push(handle.await.unwrap().unwrap());
    }

    // only even items, so every step adds
    assert_eq!(totals, vec![json!(2), json!(6), json!(12), json!(20)]);
}
