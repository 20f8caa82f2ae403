//! Errors raised while building descriptors or reading field values.
//!
//! None of these abort a build or an extraction. A [`BuildError`] removes one
//! member from its type's descriptors; an [`AccessError`] removes one param
//! from one extraction.

use thiserror::Error;

/// A member that could not be turned into a descriptor.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("member name is empty")]
    EmptyName,
    #[error("member `{name}` is already registered")]
    DuplicateName { name: &'static str },
    #[error("member `{name}` could not be probed: {reason}")]
    Probe { name: &'static str, reason: String },
}

impl BuildError {
    /// Constructs [`BuildError::Probe`] for a member whose accessor could not be built.
    pub fn probe(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Probe {
            name,
            reason: reason.into(),
        }
    }
}

/// A field value that could not be read from one instance.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The accessor was applied to an instance of a different type.
    #[error("accessor expects an instance of `{expected}`")]
    TypeMismatch { expected: &'static str },
    /// The value is not available on this instance.
    #[error("value unavailable: {reason}")]
    Unavailable { reason: String },
}

impl AccessError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// An [`AccessError`] tied to the field it came from.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("field `{field}`: {error}")]
pub struct FieldError {
    pub field: &'static str,
    #[source]
    pub error: AccessError,
}
