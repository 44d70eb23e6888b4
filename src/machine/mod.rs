//! Running a compiled machine.
//!
//! This module holds the compiled [`Machine`] and everything that executes
//! against it:
//!
//! - **Resolution**: [`Machine::progress`] finds the single next state
//! - **Invocation**: [`Machine::invoke`] runs a state's action
//! - **Traversal**: map, fold, reduce and for-each over item sequences
//! - **Walking**: a [`Walker`] steps through a machine and keeps a trail
//! - **Export**: [`Machine::graph`] renders Graphviz DOT
//!
//! A machine is immutable once built, so any number of callers may run
//! traversals over it at the same time.

mod error;
mod graph;
#[allow(clippy::module_inception)]
mod machine;
mod traversal;
mod walker;

pub use error::{TransitionError, ANY_TRANSITION};
pub use machine::{Machine, TransitionKey};
pub use traversal::MapActions;
pub use walker::Walker;
