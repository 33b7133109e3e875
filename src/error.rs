//! Error definitions for model loading, planning and output.
//!
//! The naming and factory decisions themselves never fail; errors only come
//! from reading and validating the type model or writing results.

use thiserror::Error;

#[derive(Debug, Error)]
/// Top-level error type returned by public APIs.
pub enum ValuegenError {
    /// Structurally invalid type model document (bad identifier, modifier, ...).
    #[error("model error: {0}")]
    ModelError(String),
    /// A type string could not be parsed.
    #[error("type syntax error: {0}")]
    TypeSyntaxError(String),
    /// A requested type is not declared in the model.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// Invalid `options` block.
    #[error("config error: {0}")]
    ConfigError(String),
    /// JSON input or output failure.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// Filesystem I/O error from CLI or callers that propagate I/O.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
