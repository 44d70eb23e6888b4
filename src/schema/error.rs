//! Schema loading errors.

use thiserror::Error;

/// Errors that can occur while reading a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),
}
