//! Error type of the crate.

use serde_json::Value;
use thiserror::Error;

/// Error that can occur while resolving a map layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A computation that requires at least one sample got none.
    #[error("cannot compute {what} of an empty sample sequence")]
    EmptyInput {
        /// Name of the computed quantity.
        what: &'static str,
    },

    /// Input value does not satisfy the attribute schema.
    #[error("invalid value {value} for '{path}': expected {expected}")]
    InvalidValue {
        /// Dotted path of the attribute, including the layer index for layer attributes.
        path: String,
        /// Value found in the input container.
        value: Value,
        /// Human readable description of the accepted values.
        expected: String,
    },

    /// Attribute is not declared in the schema.
    #[error("attribute '{0}' is not declared in the schema")]
    UnknownAttribute(String),

    /// Input container is not a JSON object.
    #[error("layout input is not an object container")]
    NotAContainer,

    /// Failed to parse a schema definition.
    #[error(transparent)]
    Schema(#[from] serde_json::Error),
}
