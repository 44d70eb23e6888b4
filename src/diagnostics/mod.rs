//! Whole-schema diagnostics.
//!
//! Building a machine stops at the first structural problem. When editing a
//! schema it is more useful to see every problem at once, so this module runs
//! the same checks and accumulates all failures with Stillwater's
//! `Validation` type.
//!
//! # Example
//!
//! ```rust
//! use statewright::builder::{ActionRegistry, BuildError};
//! use statewright::diagnostics::diagnose;
//! use statewright::expr::ExprCompiler;
//! use statewright::schema::Schema;
//! use stillwater::validation::Validation;
//!
//! let schema = Schema::from_yaml_str(r#"
//! states:
//!   a:
//!     action: missing
//!     transitions:
//!       go: { destination: nowhere }
//! "#).unwrap();
//!
//! match diagnose(&schema, &ActionRegistry::new(), &ExprCompiler::default()) {
//!     Validation::Failure(problems) => assert_eq!(problems.len(), 3),
//!     Validation::Success(_) => panic!("schema has problems"),
//! }
//! ```

mod checks;

pub use checks::{check_actions, check_initial_state, check_rules, check_transitions, diagnose};
