use std::time::Duration;

use thiserror::Error;

/// Failures while talking to the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection could not be established. Carries the root cause text,
    /// e.g. `Connection refused (os error 111)`.
    #[error("{0}")]
    Connect(String),
    #[error("server returned HTTP {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("malformed profile document: {0}")]
    Decode(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(String),
}

/// A well-formed document that lacks a field the domain model needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("profile document is missing the `{0}` field")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}
