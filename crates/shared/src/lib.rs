//! Profile domain model, wire envelope and error taxonomy shared by the client and apps.

pub mod domain;
pub mod error;
pub mod protocol;
