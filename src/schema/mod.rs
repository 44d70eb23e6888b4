//! Declarative machine schema and its loaders.
//!
//! The schema is a nested key-value document:
//!
//! ```yaml
//! machine:
//!   initial_state: draft
//! states:
//!   draft:
//!     name: Draft
//!     action: save
//!     transitions:
//!       submit:
//!         destination: review
//!         rule: "ready == true"
//!         validation:
//!           rule: "pages > 0"
//!           message: Document must not be empty
//!   review: {}
//! ```
//!
//! States and transitions keep their declaration order, which is the order
//! used for transition resolution and for graph export.

pub mod error;

pub use error::SchemaError;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Root of a machine schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub machine: MachineDefinition,

    #[serde(default)]
    pub states: IndexMap<String, StateDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    #[serde(default)]
    pub initial_state: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDefinition {
    #[serde(default)]
    pub name: Option<String>,

    /// Name of an action in the registry supplied at build time.
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub transitions: IndexMap<String, TransitionDefinition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    #[serde(default)]
    pub name: Option<String>,

    pub destination: String,

    /// Rule expression; an absent rule always matches.
    #[serde(default)]
    pub rule: Option<String>,

    #[serde(default)]
    pub validation: Option<ValidationDefinition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationDefinition {
    #[serde(default)]
    pub rule: Option<String>,

    pub message: String,
}

impl Schema {
    pub fn from_yaml_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load a schema file. Files ending in `.json` are read as JSON, anything
    /// else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.machine.initial_state.as_deref()
    }
}
