//! Record types of a compiled machine.
//!
//! This module contains the immutable building blocks:
//! - States and the actions bound to them
//! - Transitions with their rules and validations
//! - Compiled rules and the compiler seam that produces them
//! - Trails recording walked steps
//!
//! Nothing here changes after a machine is built.

mod history;
mod rule;
mod state;
mod transition;

pub use history::{Step, Trail};
pub use rule::{Rule, RuleCompiler, RuleError, ALWAYS};
pub use state::{Action, ActionError, State, StateId};
pub use transition::{Transition, Validation};
