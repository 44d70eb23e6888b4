//! Compiling schemas into machines.
//!
//! The [`MachineBuilder`] turns a [`Schema`](crate::schema::Schema) into a
//! [`Machine`](crate::machine::Machine) in two passes and checks every
//! structural invariant on the way. Actions named by the schema are resolved
//! against an explicit [`ActionRegistry`].

pub mod error;
pub mod machine;
pub mod macros;
pub mod registry;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use registry::ActionRegistry;
