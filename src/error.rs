//! Error types for genuine programmer errors.
//!
//! The library never raises for wire or schema conditions: those are
//! logged and surfaced as `None`/`false` return values. `LuxtronikError`
//! is reserved for invariant violations that indicate a bug in the
//! calling code, not a flaky heat pump.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LuxtronikError {
    #[error("field definition for index {index} in class '{class}' is invalid: {reason}")]
    InvalidDefinition {
        class: String,
        index: i64,
        reason: String,
    },

    #[error("data type tag '{0}' is not one of the recognized register data types")]
    InvalidDataType(String),

    #[error("version string '{0}' could not be parsed")]
    InvalidVersion(String),

    #[error("io error talking to {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LuxtronikError>;
