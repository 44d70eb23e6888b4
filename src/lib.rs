//! Statewright: finite-state machines compiled from a declarative schema
//!
//! A schema names states, the optional action bound to each state, and the
//! guarded transitions between them. Statewright compiles the schema once
//! into an immutable [`Machine`] and then resolves transitions against
//! runtime contexts.
//!
//! # Core Concepts
//!
//! - **State**: a named node with an optional action
//! - **Transition**: a directed edge guarded by a compiled rule, optionally
//!   gated further by a validation that fails loudly
//! - **Progress**: resolving the single matching transition for a context
//! - **Traversal**: mapping, folding and iterating item sequences through the
//!   machine, invoking each resolved state's action
//!
//! # Example
//!
//! ```rust
//! use statewright::{actions, Machine, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::from_yaml_str(r#"
//! machine:
//!   initial_state: idle
//! states:
//!   idle:
//!     transitions:
//!       credit: { destination: add, rule: "item >= 0" }
//!       debit: { destination: subtract, rule: "item < 0" }
//!   add:
//!     action: add
//!     transitions:
//!       credit: { destination: add, rule: "item >= 0" }
//!       debit: { destination: subtract, rule: "item < 0" }
//!   subtract:
//!     action: subtract
//!     transitions:
//!       credit: { destination: add, rule: "item >= 0" }
//!       debit: { destination: subtract, rule: "item < 0" }
//! "#).unwrap();
//!
//! let registry = actions! {
//!     "add" => |args| Ok(json!(args[0].as_i64().unwrap_or(0) + args[1].as_i64().unwrap_or(0))),
//!     "subtract" => |args| Ok(json!(args[0].as_i64().unwrap_or(0) - args[1].as_i64().unwrap_or(0).abs())),
//! };
//!
//! let machine = Machine::new(&schema, &registry).unwrap();
//! let balance = machine
//!     .fold_action(machine.initial(), vec![json!(10), json!(-3), json!(5)], json!(0))
//!     .unwrap();
//!
//! assert_eq!(balance, json!(12));
//! assert!(machine.graph().starts_with("digraph {"));
//! ```

pub mod builder;
pub mod core;
pub mod diagnostics;
pub mod expr;
pub mod machine;
pub mod schema;

// Re-export commonly used types
pub use builder::{ActionRegistry, BuildError, MachineBuilder};
pub use crate::core::{Action, Rule, RuleCompiler, RuleError, State, Transition, Validation};
pub use expr::ExprCompiler;
pub use machine::{Machine, TransitionError};
pub use schema::{Schema, SchemaError};
