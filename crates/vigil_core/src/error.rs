//! Error types for extension probing

use thiserror::Error;

use crate::version::Version;

/// Why an extension lookup produced no answer.
///
/// These never reach the code that asks for health values: the capability
/// resolver turns every probe error into "unavailable" or "no match".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    /// The extension does not expose a type or accessor Vigil relies on
    #[error("missing extension symbol: {0}")]
    MissingSymbol(String),

    /// An intermediate object in a lookup chain was absent
    #[error("null intermediate while resolving {0}")]
    NullIntermediate(String),

    /// An object had a different shape than expected
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The extension is present but speaks an incompatible API version
    #[error("extension version {found} does not satisfy required {required}")]
    VersionMismatch { required: Version, found: Version },

    /// Any other failure raised by the extension
    #[error("extension failure: {0}")]
    Failed(String),
}

impl ProbeError {
    pub fn missing(symbol: impl Into<String>) -> Self {
        Self::MissingSymbol(symbol.into())
    }

    pub fn null(what: impl Into<String>) -> Self {
        Self::NullIntermediate(what.into())
    }

    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Result type for extension probes
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors raised while registering extensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("extension already registered: {0}")]
    AlreadyRegistered(String),
}
